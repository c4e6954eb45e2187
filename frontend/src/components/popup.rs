use gloo_timers::callback::Timeout;
use log::info;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{window, Element, KeyboardEvent};
use yew::prelude::*;

use super::lead_form::{FormKind, LeadForm};
use crate::config;
use crate::session::{BrowserSession, Dismissal, PopupSession};

const POPUP_ID: &str = "popup";

fn set_body_overflow(value: &str) {
    if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let _ = body.style().set_property("overflow", value);
    }
}

pub enum TimedPopupMsg {
    Fire,
    Dismiss(Dismissal),
    TransitionEnd,
}

/// Lead-form popup that shows up once per browser session after a delay.
pub struct TimedPopup {
    session: PopupSession<BrowserSession>,
    timer: Option<Timeout>,
    on_keydown: Option<Closure<dyn FnMut(KeyboardEvent)>>,
}

impl Component for TimedPopup {
    type Message = TimedPopupMsg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let session = PopupSession::load(BrowserSession);

        let timer = session.is_armed().then(|| {
            let link = ctx.link().clone();
            Timeout::new(config::POPUP_DELAY_MS, move || link.send_message(TimedPopupMsg::Fire))
        });

        let link = ctx.link().clone();
        let on_keydown = Closure::<dyn FnMut(KeyboardEvent)>::new(move |e: KeyboardEvent| {
            if e.key() == "Escape" {
                link.send_message(TimedPopupMsg::Dismiss(Dismissal::Escape));
            }
        });
        let on_keydown = window().and_then(|w| {
            w.add_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref())
                .ok()
                .map(|_| on_keydown)
        });

        Self {
            session,
            timer,
            on_keydown,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            TimedPopupMsg::Fire => {
                self.timer = None;
                if self.session.fire() {
                    info!("Showing lead popup");
                    set_body_overflow("hidden");
                    true
                } else {
                    false
                }
            }
            TimedPopupMsg::Dismiss(how) => {
                // Dropping the Timeout cancels a popup that has not opened yet.
                self.timer = None;
                self.session.dismiss(how);
                set_body_overflow("auto");
                true
            }
            TimedPopupMsg::TransitionEnd => {
                self.session.shown();
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let on_backdrop = ctx.link().batch_callback(|e: MouseEvent| {
            let on_backdrop = e
                .target_dyn_into::<Element>()
                .map_or(false, |target| target.id() == POPUP_ID);
            on_backdrop.then_some(TimedPopupMsg::Dismiss(Dismissal::Backdrop))
        });
        let on_close = ctx
            .link()
            .callback(|_: MouseEvent| TimedPopupMsg::Dismiss(Dismissal::CloseButton));
        let on_transition_end = ctx.link().callback(|_: TransitionEvent| TimedPopupMsg::TransitionEnd);

        html! {
            <div
                id={POPUP_ID}
                class={classes!("popup", self.session.is_open().then(|| "open"))}
                onclick={on_backdrop}
                ontransitionend={on_transition_end}
            >
                <div class="popup-content">
                    <button id="closePopup" class="popup-close" aria-label="Close" onclick={on_close}>{"×"}</button>
                    <h3>{"Book your free consultation"}</h3>
                    <p>{"Leave your details and our Bengaluru team will call you back."}</p>
                    <LeadForm kind={FormKind::Popup} />
                </div>
                <style>
                {r#".popup {
                    position: fixed;
                    inset: 0;
                    display: flex;
                    align-items: center;
                    justify-content: center;
                    background: rgba(0, 0, 0, 0.6);
                    opacity: 0;
                    visibility: hidden;
                    transition: opacity 0.3s ease, visibility 0.3s ease;
                    z-index: 1000;
                }
                .popup.open {
                    opacity: 1;
                    visibility: visible;
                }
                .popup-content {
                    position: relative;
                    background: #fff;
                    border-radius: 12px;
                    padding: 2rem;
                    width: 100%;
                    max-width: 440px;
                }
                .popup-close {
                    position: absolute;
                    top: 0.75rem;
                    right: 0.75rem;
                    border: none;
                    background: none;
                    font-size: 1.5rem;
                    cursor: pointer;
                }"#}
                </style>
            </div>
        }
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        if let (Some(window), Some(on_keydown)) = (window(), self.on_keydown.take()) {
            let _ = window
                .remove_event_listener_with_callback("keydown", on_keydown.as_ref().unchecked_ref());
        }
    }
}
