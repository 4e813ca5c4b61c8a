use crate::components::lead_form::LeadFormComponent;
use crate::{config, theme};
use common::config::FormConfig;
use yew::{html, Component, Context, Html};

pub struct App {
    config: FormConfig,
}

impl Component for App {
    type Message = ();
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        theme::apply_from_query();
        Self {
            config: config::load_form_config(),
        }
    }

    fn view(&self, _ctx: &Context<Self>) -> Html {
        html! {
            <div class="container">
                <div class="header">
                    <img src="/logo.png" alt="Alpine logo" class="brand-img" />
                    <div>
                        <div class="h1">{"Alpine Commercial Funding"}</div>
                        <div class="sub">{"Answer the questions below and upload any supporting documents."}</div>
                    </div>
                </div>
                <LeadFormComponent config={self.config.clone()} />
            </div>
        }
    }
}
