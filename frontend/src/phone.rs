use std::rc::Rc;

use log::{debug, error};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use wasm_bindgen::prelude::*;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::validation::FieldMark;

pub const MAX_NATIONAL_DIGITS: usize = 15;
pub const MIN_VALID_DIGITS: usize = 8;
pub const INDIA_LEADING_ZERO: &str = "Indian numbers cannot start with 0";

const UTILS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/intl-tel-input@24.3.6/build/js/utils.js";

#[derive(Debug, Error)]
pub enum PhoneError {
    #[error("phone widget failed: {0}")]
    Widget(String),
    #[error("intlTelInput is not loaded on this page")]
    Missing,
}

impl From<JsValue> for PhoneError {
    fn from(value: JsValue) -> Self {
        PhoneError::Widget(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

/// Country currently picked in the phone control.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Region {
    pub iso2: String,
    pub dial_code: String,
}

impl Region {
    pub fn is_india(&self) -> bool {
        self.iso2.eq_ignore_ascii_case("in")
    }
}

/// What the lead form needs from a country-aware phone control.
pub trait PhoneWidget {
    /// Full number in E.164 form, as the control formats it.
    fn number(&self) -> Result<String, PhoneError>;
    fn region(&self) -> Option<Region>;
    fn is_valid_number(&self) -> bool;
}

/// Digits of `full` after the dial code.
pub fn national_number(full: &str, dial_code: &str) -> String {
    let rest = full.strip_prefix('+').unwrap_or(full);
    let rest = rest.strip_prefix(dial_code).unwrap_or(rest);
    rest.chars().filter(|c| c.is_ascii_digit()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keystroke {
    Pending,
    TooLong,
    LeadingZero,
    Valid,
}

impl Keystroke {
    pub fn mark(self) -> FieldMark {
        match self {
            Keystroke::LeadingZero => FieldMark::Invalid(INDIA_LEADING_ZERO.to_string()),
            Keystroke::Valid => FieldMark::Valid,
            Keystroke::Pending | Keystroke::TooLong => FieldMark::Neutral,
        }
    }

    /// New input value, if the keystroke has to be undone.
    pub fn corrected_value(self, current: &str) -> Option<String> {
        match self {
            Keystroke::TooLong => {
                let mut value = current.to_string();
                value.pop();
                Some(value)
            }
            Keystroke::LeadingZero => Some(String::new()),
            Keystroke::Pending | Keystroke::Valid => None,
        }
    }
}

pub fn inspect_keystroke(widget: &dyn PhoneWidget) -> Keystroke {
    let full = widget.number().unwrap_or_default();
    let region = widget.region();
    let dial_code = region.as_ref().map(|r| r.dial_code.as_str()).unwrap_or("");
    let national = national_number(&full, dial_code);

    if national.len() > MAX_NATIONAL_DIGITS {
        return Keystroke::TooLong;
    }
    if region.as_ref().map_or(false, Region::is_india) && national.starts_with('0') {
        return Keystroke::LeadingZero;
    }
    if national.len() >= MIN_VALID_DIGITS && widget.is_valid_number() {
        return Keystroke::Valid;
    }
    Keystroke::Pending
}

#[wasm_bindgen]
extern "C" {
    type Iti;

    #[wasm_bindgen(catch, js_namespace = window, js_name = intlTelInput)]
    fn intl_tel_input(input: &HtmlInputElement, options: &JsValue) -> Result<Iti, JsValue>;

    #[wasm_bindgen(method, catch, js_name = getNumber)]
    fn get_number(this: &Iti) -> Result<String, JsValue>;

    // Returns null until the utils script has loaded.
    #[wasm_bindgen(method, catch, js_name = isValidNumber)]
    fn is_valid_number(this: &Iti) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(method, js_name = getSelectedCountryData)]
    fn get_selected_country_data(this: &Iti) -> JsValue;

    #[wasm_bindgen(method, catch)]
    fn destroy(this: &Iti) -> Result<(), JsValue>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ItiOptions {
    initial_country: &'static str,
    preferred_countries: [&'static str; 3],
    utils_script: &'static str,
    separate_dial_code: bool,
    format_on_display: bool,
}

impl Default for ItiOptions {
    fn default() -> Self {
        Self {
            initial_country: "IN",
            preferred_countries: ["IN", "US", "GB"],
            utils_script: UTILS_SCRIPT,
            separate_dial_code: true,
            format_on_display: true,
        }
    }
}

/// intl-tel-input instance bound to one `<input type="tel">`.
pub struct IntlTelInput {
    iti: Iti,
}

impl IntlTelInput {
    pub fn attach(input: &HtmlInputElement) -> Result<Self, PhoneError> {
        let options = serde_wasm_bindgen::to_value(&ItiOptions::default())
            .map_err(|e| PhoneError::Widget(e.to_string()))?;
        let iti = intl_tel_input(input, &options).map_err(|_| PhoneError::Missing)?;
        debug!("intl-tel-input attached to #{}", input.id());
        Ok(Self { iti })
    }
}

impl PhoneWidget for IntlTelInput {
    fn number(&self) -> Result<String, PhoneError> {
        Ok(self.iti.get_number()?)
    }

    fn region(&self) -> Option<Region> {
        serde_wasm_bindgen::from_value(self.iti.get_selected_country_data()).ok()
    }

    fn is_valid_number(&self) -> bool {
        self.iti
            .is_valid_number()
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

impl Drop for IntlTelInput {
    fn drop(&mut self) {
        let _ = self.iti.destroy();
    }
}

/// Attaches the phone control once the input behind `input` is mounted.
#[hook]
pub fn use_phone_widget(input: NodeRef) -> Option<Rc<IntlTelInput>> {
    let widget = use_state(|| None::<Rc<IntlTelInput>>);
    {
        let widget = widget.clone();
        use_effect_with_deps(
            move |input: &NodeRef| {
                if let Some(element) = input.cast::<HtmlInputElement>() {
                    match IntlTelInput::attach(&element) {
                        Ok(iti) => widget.set(Some(Rc::new(iti))),
                        Err(e) => error!("Phone widget unavailable for #{}: {}", element.id(), e),
                    }
                }
                || ()
            },
            input,
        );
    }
    (*widget).clone()
}
