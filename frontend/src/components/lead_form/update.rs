//! Update function for the lead form component.
//!
//! Elm-style: receives the component state, the `Context` and a `Msg`,
//! mutates the state and returns whether the view should re-render.
//!
//! Edits are dropped once a submission has been accepted, so the data on
//! screen always matches what was sent. Submission messages go straight to
//! the orchestrator, which decides whether they are relevant.

use common::orchestrator::{SubmitOutcome, TransmissionOutcome};
use gloo_console::{log, warn};
use yew::prelude::*;

use super::messages::Msg;
use super::state::LeadFormComponent;

pub fn update(
    component: &mut LeadFormComponent,
    _ctx: &Context<LeadFormComponent>,
    msg: Msg,
) -> bool {
    match msg {
        Msg::Submit => {
            let documents = component.documents();
            match component.orchestrator.attempt_submit(&component.draft, documents) {
                Ok(SubmitOutcome::Started(meta)) => {
                    log!(format!("submission {} started at {}", meta.lead_id, meta.created_at));
                }
                Ok(SubmitOutcome::Ignored) => return false,
                Err(err) => warn!(format!("submit blocked: {err}")),
            }
            true
        }
        Msg::DetailsCompleted(outcome) => {
            report("details", &outcome);
            component.orchestrator.on_details_complete(outcome);
            true
        }
        // Re-render only when the timer actually sent the files.
        Msg::FallbackElapsed => component.orchestrator.on_fallback_elapsed(),
        Msg::FilesCompleted(outcome) => {
            report("files", &outcome);
            component.orchestrator.on_files_complete(outcome);
            true
        }
        _ if component.is_locked() => false,
        Msg::SelectCategory(category) => {
            if component.draft.category() == category {
                return false;
            }
            component.draft.select_category(category);
            // Upload inputs are re-created for the new category.
            component.selections.clear();
            true
        }
        Msg::SetMultipleProperties(enabled) => {
            component.draft.set_multiple_properties(enabled);
            true
        }
        Msg::UpdateField { key, value } => {
            component.draft.set_field(key, value);
            // Controlled inputs already show the typed value.
            false
        }
        Msg::AddProperty => {
            component.draft.add_property();
            true
        }
        Msg::RemoveProperty(index) => {
            component.draft.remove_property(index);
            true
        }
        Msg::UpdateProperty {
            index,
            field,
            value,
        } => {
            component.draft.update_property(index, field, value);
            false
        }
        Msg::FilesChosen { input, files } => {
            if files.is_empty() {
                component.selections.remove(input);
            } else {
                component.selections.insert(input, files);
            }
            false
        }
    }
}

fn report(channel: &str, outcome: &TransmissionOutcome) {
    match outcome {
        TransmissionOutcome::Delivered => log!(format!("{channel} request settled")),
        TransmissionOutcome::Failed(reason) => warn!(format!("{channel} request failed: {reason}")),
    }
}
