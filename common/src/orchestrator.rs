//! Two-phase submission state machine.
//!
//! One logical submission goes out as two requests: the details (phase 1)
//! to endpoint A and the files (phase 2) to endpoint B. Phase 2 starts on
//! whichever comes first, phase 1's completion signal or a fallback timer,
//! so a slow or silent endpoint A never holds back the files.
//!
//! ```text
//!  Idle --attempt_submit--> Submitting --on_files_complete--> Submitted
//!   ^   |                       |
//!   +---+ (validation error)    +-- on_details_complete / on_fallback_elapsed
//!                                   -> files sent once
//! ```
//!
//! The orchestrator never performs I/O itself. The host supplies a
//! [`SubmissionTransport`] and a [`FallbackScheduler`] and feeds the
//! resulting callbacks back in. All entry points are safe to call any
//! number of times in any order.

use std::time::Duration;

use log::{debug, info, warn};
use url::Url;

use crate::admission;
use crate::config::FormConfig;
use crate::error::{ConfigError, SubmitError};
use crate::model::{DocumentSelection, LeadDraft, SubmissionMeta};
use crate::payload::{self, DetailsPayload, FilesPayload};

pub const SUBMITTING_MESSAGE: &str = "Submitting… please wait.";
pub const SUBMITTED_MESSAGE: &str =
    "Your form has been submitted for review, we will send an update shortly.";

/// Fire-and-forget request channels. Implementations must report completion
/// of each send through the matching orchestrator callback.
pub trait SubmissionTransport {
    /// File handle type carried by the files phase.
    type File;

    fn send_details(&mut self, payload: DetailsPayload);

    fn send_files(&mut self, payload: FilesPayload<Self::File>);
}

/// One-off timer used for the phase-2 fallback. When the timer expires the
/// host calls [`SubmissionOrchestrator::on_fallback_elapsed`].
pub trait FallbackScheduler {
    type Handle;

    fn schedule(&mut self, delay: Duration) -> Self::Handle;

    fn cancel(&mut self, handle: Self::Handle);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Submitted,
}

/// What a channel reported when it finished. The state machine advances the
/// same way for both; failures are only logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransmissionOutcome {
    Delivered,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Phase 1 was sent and the fallback timer armed.
    Started(SubmissionMeta),
    /// A submission already ran on this instance; nothing happened.
    Ignored,
}

pub struct SubmissionOrchestrator<T, S>
where
    T: SubmissionTransport,
    S: FallbackScheduler,
{
    config: FormConfig,
    details_url: Url,
    files_url: Url,
    transport: T,
    scheduler: S,
    state: SubmissionState,
    status: String,
    meta: Option<SubmissionMeta>,
    /// Set on entering `Submitting`, never cleared.
    submit_latch: bool,
    /// Set when phase 2 is sent; reset at the start of each submission.
    files_latch: bool,
    pending_fallback: Option<S::Handle>,
    pending_files: Option<FilesPayload<T::File>>,
}

impl<T, S> SubmissionOrchestrator<T, S>
where
    T: SubmissionTransport,
    S: FallbackScheduler,
{
    pub fn new(config: FormConfig, transport: T, scheduler: S) -> Result<Self, ConfigError> {
        let details_url = config.details_url()?;
        let files_url = config.files_url()?;
        Ok(Self {
            config,
            details_url,
            files_url,
            transport,
            scheduler,
            state: SubmissionState::Idle,
            status: String::new(),
            meta: None,
            submit_latch: false,
            files_latch: false,
            pending_fallback: None,
            pending_files: None,
        })
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Current text of the status line.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Correlation data of the running or finished submission.
    pub fn meta(&self) -> Option<&SubmissionMeta> {
        self.meta.as_ref()
    }

    /// True while form controls must stay disabled.
    pub fn is_locked(&self) -> bool {
        self.submit_latch
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Validates the draft and the attachments, then sends phase 1 and arms
    /// the fallback timer.
    ///
    /// Validation failures keep the machine idle and set the status line;
    /// the user may fix the input and try again. Once a submission has
    /// started every further call returns [`SubmitOutcome::Ignored`]
    /// without touching any state.
    pub fn attempt_submit(
        &mut self,
        draft: &LeadDraft,
        documents: Vec<DocumentSelection<T::File>>,
    ) -> Result<SubmitOutcome, SubmitError> {
        if self.submit_latch {
            debug!("submit ignored, submission already started");
            return Ok(SubmitOutcome::Ignored);
        }

        let Some(category) = draft.category() else {
            let err = SubmitError::MissingCategory;
            self.status = err.to_string();
            return Err(err);
        };

        let admitted = match admission::admit(&documents) {
            Ok(admitted) => admitted,
            Err(err) => {
                warn!("attachments rejected: {err}");
                self.status = err.to_string();
                return Err(err.into());
            }
        };

        self.submit_latch = true;
        self.state = SubmissionState::Submitting;

        let meta = SubmissionMeta::generate();
        info!(
            "submitting {} as {} ({} files, {} bytes)",
            category.code(),
            meta.lead_id,
            admitted.count,
            admitted.total_bytes
        );

        let details = payload::details_payload(&self.config, &self.details_url, draft, category, &meta);
        let files = payload::files_payload(&self.files_url, category, &meta, documents);

        self.status = SUBMITTING_MESSAGE.to_string();
        self.meta = Some(meta.clone());
        self.files_latch = false;
        if let Some(handle) = self.pending_fallback.take() {
            self.scheduler.cancel(handle);
        }
        self.pending_files = Some(files);

        self.transport.send_details(details);
        let handle = self.scheduler.schedule(self.config.fallback_delay());
        self.pending_fallback = Some(handle);

        Ok(SubmitOutcome::Started(meta))
    }

    /// Phase-1 completion signal.
    pub fn on_details_complete(&mut self, outcome: TransmissionOutcome) {
        if let TransmissionOutcome::Failed(reason) = &outcome {
            warn!("details transmission reported failure: {reason}");
        }
        if self.state != SubmissionState::Submitting {
            debug!("details signal ignored in state {:?}", self.state);
            return;
        }
        self.send_files_once("details signal");
    }

    /// Fallback timer expiry. Returns true when it sent phase 2.
    pub fn on_fallback_elapsed(&mut self) -> bool {
        // The timer has fired; its handle is spent.
        self.pending_fallback = None;
        if self.state != SubmissionState::Submitting {
            debug!("fallback ignored in state {:?}", self.state);
            return false;
        }
        self.send_files_once("fallback timer")
    }

    /// Phase-2 completion signal. Moves the machine to its terminal state.
    pub fn on_files_complete(&mut self, outcome: TransmissionOutcome) {
        if let TransmissionOutcome::Failed(reason) = &outcome {
            warn!("files transmission reported failure: {reason}");
        }
        if self.state != SubmissionState::Submitting || !self.files_latch {
            debug!("files signal ignored in state {:?}", self.state);
            return;
        }
        if let Some(handle) = self.pending_fallback.take() {
            self.scheduler.cancel(handle);
        }
        self.state = SubmissionState::Submitted;
        self.status = SUBMITTED_MESSAGE.to_string();
        if let Some(meta) = &self.meta {
            info!("submission {} complete", meta.lead_id);
        }
    }

    fn send_files_once(&mut self, trigger: &str) -> bool {
        if self.files_latch {
            debug!("files already sent, {trigger} ignored");
            return false;
        }
        self.files_latch = true;
        // Phase 2 is under way, the fallback has nothing left to do.
        if let Some(handle) = self.pending_fallback.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(files) = self.pending_files.take() {
            debug!("sending files on {trigger}");
            self.transport.send_files(files);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Attachment, LoanCategory, PropertyField};

    const MIB: u64 = 1024 * 1024;

    #[derive(Default)]
    struct RecordingTransport {
        details: Vec<DetailsPayload>,
        files: Vec<FilesPayload<&'static str>>,
    }

    impl SubmissionTransport for RecordingTransport {
        type File = &'static str;

        fn send_details(&mut self, payload: DetailsPayload) {
            self.details.push(payload);
        }

        fn send_files(&mut self, payload: FilesPayload<&'static str>) {
            self.files.push(payload);
        }
    }

    #[derive(Default)]
    struct ManualScheduler {
        next: u32,
        armed: Vec<(u32, Duration)>,
        cancelled: Vec<u32>,
    }

    impl FallbackScheduler for ManualScheduler {
        type Handle = u32;

        fn schedule(&mut self, delay: Duration) -> u32 {
            self.next += 1;
            self.armed.push((self.next, delay));
            self.next
        }

        fn cancel(&mut self, handle: u32) {
            self.cancelled.push(handle);
        }
    }

    type TestOrchestrator = SubmissionOrchestrator<RecordingTransport, ManualScheduler>;

    fn orchestrator() -> TestOrchestrator {
        SubmissionOrchestrator::new(
            FormConfig::default(),
            RecordingTransport::default(),
            ManualScheduler::default(),
        )
        .unwrap()
    }

    fn draft() -> LeadDraft {
        let mut draft = LeadDraft::new();
        draft.select_category(Some(LoanCategory::CommercialRealEstate));
        draft.set_field("full_name", "Dana Reyes");
        draft
    }

    fn documents() -> Vec<DocumentSelection<&'static str>> {
        vec![DocumentSelection::new(
            "doc_rent_roll",
            vec![Attachment::new("rent_roll.pdf", "application/pdf", MIB, "rent-roll-handle")],
        )]
    }

    fn sent(o: &TestOrchestrator) -> (usize, usize) {
        (o.transport().details.len(), o.transport().files.len())
    }

    #[test]
    fn test_happy_path_via_details_signal() {
        let mut o = orchestrator();
        let outcome = o.attempt_submit(&draft(), documents()).unwrap();
        let SubmitOutcome::Started(meta) = outcome else {
            panic!("expected a started submission");
        };
        assert_eq!(o.state(), SubmissionState::Submitting);
        assert_eq!(o.status(), SUBMITTING_MESSAGE);
        assert_eq!(sent(&o), (1, 0));
        assert_eq!(o.scheduler().armed, vec![(1, Duration::from_millis(1200))]);

        o.on_details_complete(TransmissionOutcome::Delivered);
        assert_eq!(sent(&o), (1, 1));

        o.on_files_complete(TransmissionOutcome::Delivered);
        assert_eq!(o.state(), SubmissionState::Submitted);
        assert_eq!(o.status(), SUBMITTED_MESSAGE);
        assert_eq!(o.scheduler().cancelled, vec![1]);

        let details = &o.transport().details[0];
        let files = &o.transport().files[0];
        assert_eq!(details.fields.get("lead_id"), Some(meta.lead_id.as_str()));
        assert_eq!(files.fields.get("lead_id"), Some(meta.lead_id.as_str()));
        assert_eq!(details.fields.get("created_at"), Some(meta.created_at.as_str()));
        assert_eq!(files.files[0].1.handle, "rent-roll-handle");
    }

    #[test]
    fn test_repeated_submit_sends_once() {
        let mut o = orchestrator();
        let draft = draft();
        assert!(matches!(
            o.attempt_submit(&draft, documents()),
            Ok(SubmitOutcome::Started(_))
        ));
        for _ in 0..5 {
            assert_eq!(o.attempt_submit(&draft, documents()), Ok(SubmitOutcome::Ignored));
        }
        o.on_details_complete(TransmissionOutcome::Delivered);
        o.on_fallback_elapsed();
        o.on_files_complete(TransmissionOutcome::Delivered);
        for _ in 0..3 {
            assert_eq!(o.attempt_submit(&draft, documents()), Ok(SubmitOutcome::Ignored));
        }
        assert_eq!(sent(&o), (1, 1));
        assert_eq!(o.scheduler().armed.len(), 1);
    }

    #[test]
    fn test_fallback_first_then_signal() {
        let mut o = orchestrator();
        o.attempt_submit(&draft(), documents()).unwrap();
        o.on_fallback_elapsed();
        assert_eq!(sent(&o), (1, 1));
        o.on_details_complete(TransmissionOutcome::Delivered);
        assert_eq!(sent(&o), (1, 1));
        o.on_files_complete(TransmissionOutcome::Delivered);
        assert_eq!(o.state(), SubmissionState::Submitted);
        // The timer already fired, so there is nothing left to cancel.
        assert!(o.scheduler().cancelled.is_empty());
    }

    #[test]
    fn test_signal_first_then_fallback() {
        let mut o = orchestrator();
        o.attempt_submit(&draft(), documents()).unwrap();
        o.on_details_complete(TransmissionOutcome::Delivered);
        assert!(!o.on_fallback_elapsed());
        assert_eq!(sent(&o), (1, 1));
        o.on_files_complete(TransmissionOutcome::Delivered);
        assert_eq!(o.state(), SubmissionState::Submitted);
    }

    #[test]
    fn test_details_signal_cancels_fallback() {
        let mut o = orchestrator();
        o.attempt_submit(&draft(), documents()).unwrap();
        assert!(o.scheduler().cancelled.is_empty());
        o.on_details_complete(TransmissionOutcome::Delivered);
        assert_eq!(sent(&o), (1, 1));
        assert_eq!(o.scheduler().cancelled, vec![1]);

        o.on_details_complete(TransmissionOutcome::Delivered);
        o.on_files_complete(TransmissionOutcome::Delivered);
        assert_eq!(o.scheduler().cancelled, vec![1]);
    }

    #[test]
    fn test_fallback_reports_whether_it_sent_files() {
        let mut o = orchestrator();
        assert!(!o.on_fallback_elapsed());
        o.attempt_submit(&draft(), documents()).unwrap();
        assert!(o.on_fallback_elapsed());
        assert!(!o.on_fallback_elapsed());
        o.on_files_complete(TransmissionOutcome::Delivered);
        assert!(!o.on_fallback_elapsed());
        assert_eq!(sent(&o), (1, 1));
    }

    #[test]
    fn test_back_to_back_signals() {
        let mut o = orchestrator();
        o.attempt_submit(&draft(), documents()).unwrap();
        o.on_details_complete(TransmissionOutcome::Delivered);
        o.on_details_complete(TransmissionOutcome::Delivered);
        o.on_fallback_elapsed();
        o.on_fallback_elapsed();
        assert_eq!(sent(&o), (1, 1));
    }

    #[test]
    fn test_failed_details_still_progresses() {
        let mut o = orchestrator();
        o.attempt_submit(&draft(), documents()).unwrap();
        o.on_details_complete(TransmissionOutcome::Failed("network down".to_string()));
        assert_eq!(sent(&o), (1, 1));
        o.on_files_complete(TransmissionOutcome::Failed("network down".to_string()));
        assert_eq!(o.state(), SubmissionState::Submitted);
        assert_eq!(o.status(), SUBMITTED_MESSAGE);
    }

    #[test]
    fn test_missing_category_stays_idle() {
        let mut o = orchestrator();
        let empty = LeadDraft::new();
        for _ in 0..3 {
            assert_eq!(
                o.attempt_submit(&empty, documents()),
                Err(SubmitError::MissingCategory)
            );
        }
        assert_eq!(o.state(), SubmissionState::Idle);
        assert!(!o.is_locked());
        assert_eq!(o.status(), "Please select a loan type before submitting.");
        assert_eq!(sent(&o), (0, 0));
        assert!(o.scheduler().armed.is_empty());
        assert!(o.meta().is_none());

        o.attempt_submit(&draft(), documents()).unwrap();
        assert_eq!(o.state(), SubmissionState::Submitting);
    }

    #[test]
    fn test_rejected_attachment_stays_idle_and_recovers() {
        let mut o = orchestrator();
        let bad = vec![DocumentSelection::new(
            "doc_pfs",
            vec![Attachment::new("malware.exe", "application/x-msdownload", 10, "exe")],
        )];
        let err = o.attempt_submit(&draft(), bad).unwrap_err();
        assert!(matches!(err, SubmitError::Attachments(_)));
        assert!(o.status().contains("malware.exe"));
        assert_eq!(o.state(), SubmissionState::Idle);
        assert_eq!(sent(&o), (0, 0));

        let huge = vec![DocumentSelection::new(
            "doc_pfs",
            vec![Attachment::new("scan.pdf", "application/pdf", 10 * MIB, "big")],
        )];
        assert!(o.attempt_submit(&draft(), huge).is_err());
        assert_eq!(o.state(), SubmissionState::Idle);

        assert!(matches!(
            o.attempt_submit(&draft(), documents()),
            Ok(SubmitOutcome::Started(_))
        ));
    }

    #[test]
    fn test_signals_before_submit_are_ignored() {
        let mut o = orchestrator();
        o.on_details_complete(TransmissionOutcome::Delivered);
        o.on_fallback_elapsed();
        o.on_files_complete(TransmissionOutcome::Delivered);
        assert_eq!(o.state(), SubmissionState::Idle);
        assert_eq!(sent(&o), (0, 0));
    }

    #[test]
    fn test_files_signal_before_files_sent_is_ignored() {
        let mut o = orchestrator();
        o.attempt_submit(&draft(), documents()).unwrap();
        o.on_files_complete(TransmissionOutcome::Delivered);
        assert_eq!(o.state(), SubmissionState::Submitting);
        o.on_fallback_elapsed();
        o.on_files_complete(TransmissionOutcome::Delivered);
        assert_eq!(o.state(), SubmissionState::Submitted);
    }

    #[test]
    fn test_terminal_lock_keeps_sent_data() {
        let mut o = orchestrator();
        let mut draft = draft();
        draft.set_field("amount_requested", "2500000");
        o.attempt_submit(&draft, documents()).unwrap();

        draft.set_field("amount_requested", "1");
        o.on_details_complete(TransmissionOutcome::Delivered);
        o.on_files_complete(TransmissionOutcome::Delivered);

        draft.select_category(Some(LoanCategory::Bridge));
        draft.set_multiple_properties(true);
        draft.update_property(0, PropertyField::BridgeArv, "9");
        assert_eq!(o.attempt_submit(&draft, vec![]), Ok(SubmitOutcome::Ignored));
        o.on_fallback_elapsed();
        o.on_details_complete(TransmissionOutcome::Delivered);

        assert_eq!(o.state(), SubmissionState::Submitted);
        assert_eq!(o.status(), SUBMITTED_MESSAGE);
        assert_eq!(sent(&o), (1, 1));
        let details = &o.transport().details[0];
        assert_eq!(details.fields.get("amount_requested"), Some("2500000"));
        assert_eq!(details.fields.get("loan_type"), Some("CRE"));
        assert_eq!(o.scheduler().armed.len(), 1);
    }

    #[test]
    fn test_unsupported_category_sends_neutral_properties() {
        let mut o = orchestrator();
        let mut draft = LeadDraft::new();
        draft.select_category(Some(LoanCategory::Factoring));
        draft.set_multiple_properties(true);
        o.attempt_submit(&draft, vec![]).unwrap();
        let details = &o.transport().details[0];
        assert_eq!(details.fields.get("has_multiple_properties"), Some("false"));
        assert_eq!(details.fields.get("properties_json"), Some(""));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FormConfig {
            files_endpoint: "nope".to_string(),
            ..FormConfig::default()
        };
        let result = SubmissionOrchestrator::new(
            config,
            RecordingTransport::default(),
            ManualScheduler::default(),
        );
        assert!(matches!(result, Err(ConfigError::Url { name: "files_endpoint", .. })));
    }
}
