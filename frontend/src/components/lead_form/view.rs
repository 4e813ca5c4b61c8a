//! View rendering for the lead form.
//!
//! Cards, top to bottom: loan type (plus the multiple-properties toggle),
//! top-level questions, the property editor, document uploads, and the
//! submit bar with the status line.

use common::admission;
use common::catalog::{self, FieldKind, FieldSpec, HEARD_ABOUT_OPTIONS, HEARD_ABOUT_OTHER};
use common::model::{LoanCategory, Property, PropertyField};
use common::orchestrator::SUBMITTED_MESSAGE;
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::LeadFormComponent;

const ATTACHMENT_HELP: &str = "Supported: PDF, Word, Excel, CSV/TXT/RTF, ZIP, common images (JPEG/PNG/TIFF/HEIC). Per file ≤ 9.5 MB; total ≤ 30 MB.";

pub fn view(component: &LeadFormComponent, ctx: &Context<LeadFormComponent>) -> Html {
    let link = ctx.link();
    let category = component.draft.category();

    html! {
        <>
            { build_category_card(component, link) }
            { build_fields_card(component, link) }
            {
                match category {
                    Some(category) if component.draft.multi_active() => {
                        build_property_editor(component, link, category)
                    }
                    _ => html! {},
                }
            }
            {
                match category {
                    Some(category) => build_documents_card(component, link, category),
                    None => html! {},
                }
            }
            { build_submit_card(component, link) }
        </>
    }
}

/// Style applied to editable cards once the form is submitted.
fn frozen_style(component: &LeadFormComponent) -> Option<&'static str> {
    component
        .is_submitted()
        .then_some("opacity: 0.7; pointer-events: none;")
}

fn build_category_card(component: &LeadFormComponent, link: &Scope<LeadFormComponent>) -> Html {
    let selected = component.draft.category();
    let locked = component.is_locked();

    let on_category = link.callback(|e: Event| {
        let code = e.target_unchecked_into::<HtmlSelectElement>().value();
        Msg::SelectCategory(LoanCategory::from_code(&code))
    });
    let on_multi = link.callback(|e: Event| {
        let value = e.target_unchecked_into::<HtmlSelectElement>().value();
        Msg::SetMultipleProperties(value == "yes")
    });

    html! {
        <div class="card">
            <div class="grid">
                <div class="span-6">
                    <label>{"Loan Type"}</label>
                    <select onchange={on_category} disabled={locked}>
                        <option value="" disabled={true} selected={selected.is_none()}>
                            {"Select a loan type…"}
                        </option>
                        {
                            for LoanCategory::ALL.iter().map(|c| html! {
                                <option value={c.code()} selected={selected == Some(*c)}>
                                    { format!("{} ({})", c.label(), c.code()) }
                                </option>
                            })
                        }
                    </select>
                    <div class="help" style="margin-top: 8px;">
                        {
                            match selected {
                                Some(c) => html! {
                                    <>
                                        {"Selected: "}<strong>{ c.label() }</strong>
                                        {" · code: "}<strong>{ c.code() }</strong>
                                    </>
                                },
                                None => html! { {"Please select a loan type to continue."} },
                            }
                        }
                    </div>
                </div>
                {
                    if selected.is_some_and(LoanCategory::supports_multiple_properties) {
                        let multi = component.draft.multiple_properties();
                        html! {
                            <div class="span-6">
                                <label>{"Multiple properties?"}</label>
                                <select onchange={on_multi} disabled={locked}>
                                    <option value="no" selected={!multi}>{"No"}</option>
                                    <option value="yes" selected={multi}>{"Yes"}</option>
                                </select>
                                <div class="help">{"Choose “Yes” to add multiple property sections."}</div>
                            </div>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        </div>
    }
}

fn build_fields_card(component: &LeadFormComponent, link: &Scope<LeadFormComponent>) -> Html {
    let fields = catalog::visible_fields(component.draft.category(), component.draft.multi_active());
    html! {
        <div class="card" style={frozen_style(component)}>
            <div class="grid">
                { for fields.into_iter().map(|spec| build_field(component, link, spec)) }
            </div>
        </div>
    }
}

fn build_field(
    component: &LeadFormComponent,
    link: &Scope<LeadFormComponent>,
    spec: FieldSpec,
) -> Html {
    let key = spec.key;
    let value = component.draft.field(key).to_string();
    let locked = component.is_locked();

    let control = match spec.kind {
        FieldKind::HeardAbout => {
            let onchange = link.callback(move |e: Event| Msg::UpdateField {
                key,
                value: e.target_unchecked_into::<HtmlSelectElement>().value(),
            });
            html! {
                <select name={key} {onchange} disabled={locked}>
                    <option value="" disabled={true} selected={value.is_empty()}>{"Select…"}</option>
                    {
                        for HEARD_ABOUT_OPTIONS.iter().map(|option| html! {
                            <option value={*option} selected={value == *option}>{ *option }</option>
                        })
                    }
                </select>
            }
        }
        FieldKind::TextArea => {
            let oninput = link.callback(move |e: InputEvent| Msg::UpdateField {
                key,
                value: e.target_unchecked_into::<HtmlTextAreaElement>().value(),
            });
            html! { <textarea name={key} {value} {oninput} disabled={locked} /> }
        }
        FieldKind::Text => {
            let oninput = link.callback(move |e: InputEvent| Msg::UpdateField {
                key,
                value: e.target_unchecked_into::<HtmlInputElement>().value(),
            });
            let placeholder = (key == HEARD_ABOUT_OTHER).then_some("If you chose 'Other', add detail");
            html! { <input name={key} {value} {placeholder} {oninput} disabled={locked} /> }
        }
    };

    html! {
        <div class="span-6" key={key}>
            <label>{ spec.label }</label>
            { control }
        </div>
    }
}

fn build_property_editor(
    component: &LeadFormComponent,
    link: &Scope<LeadFormComponent>,
    category: LoanCategory,
) -> Html {
    let properties = component.draft.properties();
    let locked = component.is_locked();

    html! {
        <div class="card" style={frozen_style(component)}>
            <div class="grid">
                <div class="span-12">
                    <div class="h2">{ format!("Property Details ({})", properties.len()) }</div>
                    <div class="help">{"Fill a block for each property. Add or remove as needed."}</div>
                </div>
                {
                    for properties.iter().enumerate().map(|(index, property)| {
                        build_property_block(link, category, index, property, locked)
                    })
                }
                <div class="span-12" style="display: flex; gap: 12px;">
                    <button
                        class="btn"
                        type="button"
                        onclick={link.callback(|_| Msg::AddProperty)}
                        disabled={locked}
                    >
                        {"Add Another Property"}
                    </button>
                </div>
            </div>
        </div>
    }
}

fn build_property_block(
    link: &Scope<LeadFormComponent>,
    category: LoanCategory,
    index: usize,
    property: &Property,
    locked: bool,
) -> Html {
    html! {
        <div
            class="span-12"
            key={property.id.clone()}
            style="border-top: 1px solid var(--line); padding-top: 12px; margin-top: 12px;"
        >
            <div style="display: flex; align-items: center; justify-content: space-between; margin-bottom: 8px;">
                <div class="h3">{ format!("Property #{}", index + 1) }</div>
                <button
                    class="btn"
                    type="button"
                    onclick={link.callback(move |_| Msg::RemoveProperty(index))}
                    disabled={locked}
                >
                    {"Remove"}
                </button>
            </div>
            <div class="grid">
                {
                    for PropertyField::editor_fields(category).into_iter().map(|field| {
                        build_property_field(link, index, property, field, locked)
                    })
                }
            </div>
        </div>
    }
}

fn build_property_field(
    link: &Scope<LeadFormComponent>,
    index: usize,
    property: &Property,
    field: PropertyField,
    locked: bool,
) -> Html {
    let value = property.get(field).unwrap_or_default().to_string();
    let control = if field.is_multiline() {
        let oninput = link.callback(move |e: InputEvent| Msg::UpdateProperty {
            index,
            field,
            value: e.target_unchecked_into::<HtmlTextAreaElement>().value(),
        });
        html! { <textarea {value} {oninput} disabled={locked} /> }
    } else {
        let oninput = link.callback(move |e: InputEvent| Msg::UpdateProperty {
            index,
            field,
            value: e.target_unchecked_into::<HtmlInputElement>().value(),
        });
        html! { <input {value} {oninput} disabled={locked} /> }
    };

    html! {
        <div class="span-6" key={field.key()}>
            <label>{ catalog::label(field.key()) }</label>
            { control }
        </div>
    }
}

fn build_documents_card(
    component: &LeadFormComponent,
    link: &Scope<LeadFormComponent>,
    category: LoanCategory,
) -> Html {
    let accept = admission::accept_attribute();
    let locked = component.is_locked();

    html! {
        <div class="card" style={frozen_style(component)}>
            <div class="grid">
                <div class="span-12 help" style="margin-bottom: 8px;">{ ATTACHMENT_HELP }</div>
                {
                    for catalog::documents_for(category).into_iter().map(|input| {
                        let name = input.name;
                        let onchange = link.callback(move |e: Event| {
                            let element = e.target_unchecked_into::<HtmlInputElement>();
                            let files = element
                                .files()
                                .map(|list| (0..list.length()).filter_map(|i| list.get(i)).collect())
                                .unwrap_or_default();
                            Msg::FilesChosen { input: name, files }
                        });
                        html! {
                            <div class="span-6" key={format!("{}-{}", category.code(), name)}>
                                <label>{ input.label }</label>
                                <input
                                    type="file"
                                    name={name}
                                    multiple={input.multiple}
                                    accept={accept.clone()}
                                    {onchange}
                                    disabled={locked}
                                />
                            </div>
                        }
                    })
                }
            </div>
        </div>
    }
}

fn build_submit_card(component: &LeadFormComponent, link: &Scope<LeadFormComponent>) -> Html {
    let submitting = component.is_submitting();
    let lead_id = component.orchestrator.meta().map(|meta| meta.lead_id.clone());
    let tip = match component.draft.category() {
        Some(_) if component.draft.multi_active() => {
            "Tip: Fill each property block above, attach files, then submit."
        }
        Some(_) => "Tip: Attach any available files above before submitting.",
        None => "Choose a loan type to see relevant questions and document uploads.",
    };

    html! {
        <div class="card">
            {
                if component.is_submitted() {
                    html! {
                        <div class="h3" style="color: var(--ink);">{ SUBMITTED_MESSAGE }</div>
                    }
                } else {
                    html! {
                        <div class="btnbar" style="gap: 12px; flex-wrap: wrap;">
                            <button
                                class="btn primary"
                                onclick={link.callback(|_| Msg::Submit)}
                                disabled={submitting}
                                style={submitting.then_some("opacity: .7; cursor: not-allowed;")}
                            >
                                { if submitting { "Submitting…" } else { "Submit Details & Upload Documents" } }
                            </button>
                            <span class="status">{ component.orchestrator.status() }</span>
                        </div>
                    }
                }
            }
            {
                match lead_id {
                    Some(id) => html! {
                        <div class="help" style="margin-top: 6px;">
                            {"Lead ID for this submission: "}<strong>{ id }</strong>
                        </div>
                    },
                    None => html! {},
                }
            }
            <div class="help" style="margin-top: 6px;">{ tip }</div>
        </div>
    }
}
