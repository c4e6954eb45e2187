use std::cell::RefCell;
use std::rc::Rc;

use log::debug;
use wasm_bindgen_futures::spawn_local;
use web_sys::{window, HtmlInputElement};
use yew::prelude::*;

use crate::campaign::{landing_page, Campaign};
use crate::crm::HttpTransport;
use crate::phone::{inspect_keystroke, use_phone_widget, PhoneWidget};
use crate::submission::{
    LeadSubmission, PageEffects, SubmissionPhase, SubmitSettings, SUBMITTING_LABEL, SUBMIT_LABEL,
};
use crate::validation::{FieldMark, FormSnapshot, Validation};

/// The page carries the same form twice: inline and inside the timed popup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Main,
    Popup,
}

struct FieldIds {
    form: &'static str,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    phone_error: &'static str,
    terms: &'static str,
}

impl FormKind {
    fn ids(self) -> FieldIds {
        match self {
            FormKind::Main => FieldIds {
                form: "contactForm",
                name: "name",
                email: "email",
                phone: "phone",
                phone_error: "phoneError",
                terms: "terms",
            },
            FormKind::Popup => FieldIds {
                form: "popupForm",
                name: "popup-name",
                email: "popup-email",
                phone: "popup-phone",
                phone_error: "popupPhoneError",
                terms: "popup-terms",
            },
        }
    }
}

/// Page side effects of a submission, applied to this form's state.
struct FormEffects {
    busy: UseStateHandle<bool>,
    in_flight: Rc<RefCell<bool>>,
    marks: UseStateHandle<Validation>,
}

impl PageEffects for FormEffects {
    fn set_busy(&self, busy: bool) {
        *self.in_flight.borrow_mut() = busy;
        self.busy.set(busy);
    }

    fn show_validation(&self, validation: &Validation) {
        self.marks.set(validation.clone());
    }

    fn alert(&self, message: &str) {
        if let Some(window) = window() {
            let _ = window.alert_with_message(message);
        }
    }

    fn redirect(&self, href: &str) {
        if let Some(window) = window() {
            let _ = window.location().set_href(href);
        }
    }

    fn phase(&self, phase: SubmissionPhase) {
        debug!("Lead submission is {}", phase);
    }
}

fn input_value(node: &NodeRef) -> String {
    node.cast::<HtmlInputElement>()
        .map(|input| input.value())
        .unwrap_or_default()
}

#[derive(Properties, PartialEq)]
pub struct LeadFormProps {
    pub kind: FormKind,
}

#[function_component(LeadForm)]
pub fn lead_form(props: &LeadFormProps) -> Html {
    let ids = props.kind.ids();
    let name_ref = use_node_ref();
    let email_ref = use_node_ref();
    let phone_ref = use_node_ref();
    let terms_ref = use_node_ref();
    let widget = use_phone_widget(phone_ref.clone());
    let marks = use_state(Validation::default);
    let busy = use_state(|| false);
    let in_flight = use_mut_ref(|| false);

    let on_phone_input = {
        let widget = widget.clone();
        let phone_ref = phone_ref.clone();
        let marks = marks.clone();
        Callback::from(move |_: InputEvent| {
            let Some(widget) = widget.as_ref() else {
                return;
            };
            let verdict = inspect_keystroke(&**widget);
            if let Some(input) = phone_ref.cast::<HtmlInputElement>() {
                if let Some(value) = verdict.corrected_value(&input.value()) {
                    input.set_value(&value);
                }
            }
            marks.set(Validation {
                phone: verdict.mark(),
                ..(*marks).clone()
            });
        })
    };

    let on_submit = {
        let form_id = ids.form;
        let widget = widget.clone();
        let busy = busy.clone();
        let marks = marks.clone();
        let (name_ref, email_ref, phone_ref, terms_ref) =
            (name_ref.clone(), email_ref.clone(), phone_ref.clone(), terms_ref.clone());
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *in_flight.borrow() {
                return;
            }
            *in_flight.borrow_mut() = true;

            let snapshot = FormSnapshot {
                name: input_value(&name_ref),
                email: input_value(&email_ref),
                phone_raw: input_value(&phone_ref),
                terms_accepted: terms_ref
                    .cast::<HtmlInputElement>()
                    .map_or(false, |terms| terms.checked()),
            };
            let effects = FormEffects {
                busy: busy.clone(),
                in_flight: in_flight.clone(),
                marks: marks.clone(),
            };
            let widget = widget.clone();

            spawn_local(async move {
                let settings = SubmitSettings {
                    landing_page: landing_page(),
                    ..SubmitSettings::default()
                };
                let flow = LeadSubmission::new(HttpTransport, settings);
                let widget = widget.as_deref().map(|w| w as &dyn PhoneWidget);
                // Failures are already logged and alerted inside `run`.
                if let Err(e) = flow
                    .run(snapshot, widget, Campaign::from_location(), &effects)
                    .await
                {
                    debug!("Lead form {} settled with: {}", form_id, e);
                }
            });
        })
    };

    let field_class = |mark: &FieldMark| classes!("form-control", mark.class());

    html! {
        <form id={ids.form} class="lead-form" novalidate=true onsubmit={on_submit}>
            <div class="form-group">
                <input
                    ref={name_ref}
                    id={ids.name}
                    name="name"
                    type="text"
                    placeholder="Full name"
                    class={field_class(&marks.name)}
                />
                <small class="error-text">{ marks.name.message().to_string() }</small>
            </div>
            <div class="form-group">
                <input
                    ref={email_ref}
                    id={ids.email}
                    name="email"
                    type="email"
                    placeholder="Email address"
                    class={field_class(&marks.email)}
                />
                <small class="error-text">{ marks.email.message().to_string() }</small>
            </div>
            <div class="form-group">
                <input
                    ref={phone_ref}
                    id={ids.phone}
                    name="phone"
                    type="tel"
                    class={field_class(&marks.phone)}
                    oninput={on_phone_input}
                />
                <small class="error-text" id={ids.phone_error}>{ marks.phone.message().to_string() }</small>
            </div>
            <div class="form-check">
                <input ref={terms_ref} id={ids.terms} type="checkbox" class="form-check-input" />
                <label for={ids.terms} class="form-check-label">
                    {"I agree to the "}
                    <a href="./terms.html" target="_blank" rel="noopener noreferrer">{"Terms and Conditions"}</a>
                </label>
            </div>
            <button type="submit" class="submit-btn" disabled={*busy}>
                { if *busy { SUBMITTING_LABEL } else { SUBMIT_LABEL } }
            </button>
        </form>
    }
}
