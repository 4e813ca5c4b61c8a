//! Properties for the `LeadFormComponent`.

use common::config::FormConfig;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct LeadFormProps {
    /// Endpoints and payload options. Read once when the component mounts.
    #[prop_or_default]
    pub config: FormConfig,
}
