//! Lead intake form: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering and the browser
//! transport.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `LeadFormProps`, `LeadFormComponent`).
//! - Provide the `Component` implementation that delegates to `update::update` and `view::view`.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod transport;
mod update;
mod view;

pub use messages::Msg;
pub use props::LeadFormProps;
pub use state::LeadFormComponent;

impl Component for LeadFormComponent {
    type Message = Msg;
    type Properties = LeadFormProps;

    fn create(ctx: &Context<Self>) -> Self {
        LeadFormComponent::new(ctx.props().config.clone(), ctx.link())
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
