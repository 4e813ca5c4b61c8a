//! Browser implementations of the orchestrator's I/O seams.
//!
//! Both endpoints are third-party webhooks without CORS headers, so requests
//! go out in `no-cors` mode and the (opaque) response is never read. A
//! request counts as complete once the browser settles it either way; the
//! outcome is forwarded to the component as a message.

use std::time::Duration;

use common::orchestrator::{FallbackScheduler, SubmissionTransport, TransmissionOutcome};
use common::payload::{DetailsPayload, FilesPayload};
use gloo_console::log;
use gloo_net::http::Request;
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsValue;
use wasm_bindgen_futures::spawn_local;
use web_sys::{File, FormData, RequestMode};
use yew::html::Scope;

use super::messages::Msg;
use super::state::LeadFormComponent;

pub struct FetchTransport {
    link: Scope<LeadFormComponent>,
}

impl FetchTransport {
    pub fn new(link: Scope<LeadFormComponent>) -> Self {
        Self { link }
    }
}

impl SubmissionTransport for FetchTransport {
    type File = File;

    fn send_details(&mut self, payload: DetailsPayload) {
        let link = self.link.clone();
        spawn_local(async move {
            let outcome = post_details(&payload).await;
            link.send_message(Msg::DetailsCompleted(outcome));
        });
    }

    fn send_files(&mut self, payload: FilesPayload<File>) {
        let link = self.link.clone();
        spawn_local(async move {
            let outcome = post_files(&payload).await;
            link.send_message(Msg::FilesCompleted(outcome));
        });
    }
}

async fn post_details(payload: &DetailsPayload) -> TransmissionOutcome {
    log!(format!("details -> {} ({} fields)", payload.url.path(), payload.fields.len()));
    let request = Request::post(payload.url.as_str())
        .mode(RequestMode::NoCors)
        .header("Content-Type", "application/x-www-form-urlencoded")
        .body(payload.body());

    match request {
        Ok(request) => match request.send().await {
            Ok(_) => TransmissionOutcome::Delivered,
            Err(err) => TransmissionOutcome::Failed(err.to_string()),
        },
        Err(err) => TransmissionOutcome::Failed(err.to_string()),
    }
}

async fn post_files(payload: &FilesPayload<File>) -> TransmissionOutcome {
    log!(format!("files -> {} ({} files)", payload.url.path(), payload.files.len()));
    let form = match build_form_data(payload) {
        Ok(form) => form,
        Err(err) => return TransmissionOutcome::Failed(format!("{err:?}")),
    };
    // The browser writes the multipart boundary header itself.
    let request = Request::post(payload.url.as_str())
        .mode(RequestMode::NoCors)
        .body(form);

    match request {
        Ok(request) => match request.send().await {
            Ok(_) => TransmissionOutcome::Delivered,
            Err(err) => TransmissionOutcome::Failed(err.to_string()),
        },
        Err(err) => TransmissionOutcome::Failed(err.to_string()),
    }
}

fn build_form_data(payload: &FilesPayload<File>) -> Result<FormData, JsValue> {
    let form = FormData::new()?;
    for (key, value) in payload.fields.iter() {
        form.append_with_str(key, value)?;
    }
    for (field_name, attachment) in &payload.files {
        form.append_with_blob_and_filename(field_name, &attachment.handle, &attachment.name)?;
    }
    Ok(form)
}

/// Fallback timer backed by `setTimeout`. Dropping or cancelling the handle
/// clears the browser timer.
pub struct TimeoutScheduler {
    link: Scope<LeadFormComponent>,
}

impl TimeoutScheduler {
    pub fn new(link: Scope<LeadFormComponent>) -> Self {
        Self { link }
    }
}

impl FallbackScheduler for TimeoutScheduler {
    type Handle = Timeout;

    fn schedule(&mut self, delay: Duration) -> Timeout {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        let link = self.link.clone();
        Timeout::new(millis, move || link.send_message(Msg::FallbackElapsed))
    }

    fn cancel(&mut self, handle: Timeout) {
        drop(handle.cancel());
    }
}
