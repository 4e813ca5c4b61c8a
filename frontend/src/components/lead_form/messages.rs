use common::model::{LoanCategory, PropertyField};
use common::orchestrator::TransmissionOutcome;

#[derive(Clone)]
pub enum Msg {
    SelectCategory(Option<LoanCategory>),
    SetMultipleProperties(bool),
    UpdateField { key: &'static str, value: String },
    AddProperty,
    RemoveProperty(usize),
    UpdateProperty {
        index: usize,
        field: PropertyField,
        value: String,
    },
    /// Selection of one upload input changed. An empty list clears it.
    FilesChosen {
        input: &'static str,
        files: Vec<web_sys::File>,
    },
    Submit,
    DetailsCompleted(TransmissionOutcome),
    FallbackElapsed,
    FilesCompleted(TransmissionOutcome),
}
