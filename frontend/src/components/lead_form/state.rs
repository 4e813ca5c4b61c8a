//! Component state for the lead form.
//!
//! The draft answers live in a [`LeadDraft`]; the chosen upload files are
//! kept per input name. Everything about the submission itself (latches,
//! timer, status line) belongs to the orchestrator.

use std::collections::BTreeMap;

use common::catalog;
use common::config::FormConfig;
use common::model::{Attachment, DocumentSelection, LeadDraft};
use common::orchestrator::{SubmissionOrchestrator, SubmissionState};
use gloo_console::warn;
use web_sys::File;
use yew::html::Scope;

use super::transport::{FetchTransport, TimeoutScheduler};

pub type Orchestrator = SubmissionOrchestrator<FetchTransport, TimeoutScheduler>;

pub struct LeadFormComponent {
    pub draft: LeadDraft,

    /// Files picked per upload input, keyed by multipart field name.
    pub selections: BTreeMap<&'static str, Vec<File>>,

    pub orchestrator: Orchestrator,
}

impl LeadFormComponent {
    pub fn new(config: FormConfig, link: &Scope<Self>) -> Self {
        Self {
            draft: LeadDraft::new(),
            selections: BTreeMap::new(),
            orchestrator: build_orchestrator(config, link),
        }
    }

    /// Form controls are frozen from the first accepted submit on.
    pub fn is_locked(&self) -> bool {
        self.orchestrator.is_locked()
    }

    pub fn is_submitting(&self) -> bool {
        self.orchestrator.state() == SubmissionState::Submitting
    }

    pub fn is_submitted(&self) -> bool {
        self.orchestrator.state() == SubmissionState::Submitted
    }

    /// Current file selections in catalog order, one entry per upload input
    /// of the selected category.
    pub fn documents(&self) -> Vec<DocumentSelection<File>> {
        let Some(category) = self.draft.category() else {
            return Vec::new();
        };
        catalog::documents_for(category)
            .into_iter()
            .map(|input| {
                let files = self
                    .selections
                    .get(input.name)
                    .map(|files| files.iter().map(to_attachment).collect())
                    .unwrap_or_default();
                DocumentSelection::new(input.name, files)
            })
            .collect()
    }
}

fn to_attachment(file: &File) -> Attachment<File> {
    // `File.size` is a JS number holding a whole byte count.
    let size = file.size().max(0.0) as u64;
    Attachment::new(file.name(), file.type_(), size, file.clone())
}

fn build_orchestrator(config: FormConfig, link: &Scope<LeadFormComponent>) -> Orchestrator {
    match SubmissionOrchestrator::new(
        config,
        FetchTransport::new(link.clone()),
        TimeoutScheduler::new(link.clone()),
    ) {
        Ok(orchestrator) => orchestrator,
        Err(err) => {
            warn!(format!("invalid form config, using defaults: {err}"));
            SubmissionOrchestrator::new(
                FormConfig::default(),
                FetchTransport::new(link.clone()),
                TimeoutScheduler::new(link.clone()),
            )
            .expect("built-in endpoints are valid URLs")
        }
    }
}
