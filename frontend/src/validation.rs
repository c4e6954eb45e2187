use once_cell::sync::Lazy;
use regex::Regex;

use crate::phone::PhoneWidget;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Valid email required";
pub const PHONE_REQUIRED: &str = "Phone number required";
pub const PHONE_INVALID: &str = "Invalid phone number for selected country";
pub const TERMS_ALERT: &str = "Please accept Terms and Conditions";

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Values of the lead form at the moment it was submitted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSnapshot {
    pub name: String,
    pub email: String,
    pub phone_raw: String,
    pub terms_accepted: bool,
}

/// Visual state of one input: drives `is-valid` / `is-invalid` and the
/// sibling `.error-text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldMark {
    #[default]
    Neutral,
    Valid,
    Invalid(String),
}

impl FieldMark {
    pub fn class(&self) -> Option<&'static str> {
        match self {
            FieldMark::Neutral => None,
            FieldMark::Valid => Some("is-valid"),
            FieldMark::Invalid(_) => Some("is-invalid"),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            FieldMark::Invalid(message) => message,
            _ => "",
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, FieldMark::Invalid(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validation {
    pub name: FieldMark,
    pub email: FieldMark,
    pub phone: FieldMark,
    pub terms_accepted: bool,
}

impl Validation {
    pub fn is_ok(&self) -> bool {
        !self.name.is_invalid()
            && !self.email.is_invalid()
            && !self.phone.is_invalid()
            && self.terms_accepted
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email.trim())
}

/// Runs every check, even after an earlier one failed, so all bad fields get
/// marked in one pass.
pub fn validate(snapshot: &FormSnapshot, widget: Option<&dyn PhoneWidget>) -> Validation {
    let name = if snapshot.name.trim().is_empty() {
        FieldMark::Invalid(NAME_REQUIRED.to_string())
    } else {
        FieldMark::Neutral
    };

    let email = if is_valid_email(&snapshot.email) {
        FieldMark::Neutral
    } else {
        FieldMark::Invalid(EMAIL_REQUIRED.to_string())
    };

    let phone = match widget {
        None => FieldMark::Invalid(PHONE_REQUIRED.to_string()),
        Some(widget) => match widget.number() {
            Ok(number) if !number.is_empty() => {
                if widget.is_valid_number() {
                    FieldMark::Valid
                } else {
                    FieldMark::Invalid(PHONE_INVALID.to_string())
                }
            }
            _ => FieldMark::Invalid(PHONE_REQUIRED.to_string()),
        },
    };

    Validation {
        name,
        email,
        phone,
        terms_accepted: snapshot.terms_accepted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phone::tests::FakeWidget;
    use proptest::prelude::*;

    fn filled() -> FormSnapshot {
        FormSnapshot {
            name: "Asha Rao".into(),
            email: "asha@example.in".into(),
            phone_raw: "98765 43210".into(),
            terms_accepted: true,
        }
    }

    #[test]
    fn email_examples() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@b@c.com"));
        assert!(!is_valid_email(" @b.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn complete_form_passes_and_marks_phone_valid() {
        let widget = FakeWidget::india("+919876543210", true);
        let result = validate(&filled(), Some(&widget));
        assert!(result.is_ok());
        assert_eq!(result.phone, FieldMark::Valid);
        assert_eq!(result.name, FieldMark::Neutral);
    }

    #[test]
    fn all_failures_are_reported_together() {
        let widget = FakeWidget::india("", false);
        let snapshot = FormSnapshot {
            name: "   ".into(),
            email: "nope".into(),
            phone_raw: String::new(),
            terms_accepted: false,
        };
        let result = validate(&snapshot, Some(&widget));
        assert!(!result.is_ok());
        assert_eq!(result.name.message(), NAME_REQUIRED);
        assert_eq!(result.email.message(), EMAIL_REQUIRED);
        assert_eq!(result.phone.message(), PHONE_REQUIRED);
        assert!(!result.terms_accepted);
    }

    #[test]
    fn unchecked_terms_alone_fails() {
        let widget = FakeWidget::india("+919876543210", true);
        let snapshot = FormSnapshot { terms_accepted: false, ..filled() };
        let result = validate(&snapshot, Some(&widget));
        assert!(!result.is_ok());
        assert!(!result.name.is_invalid());
        assert!(!result.email.is_invalid());
    }

    #[test]
    fn number_invalid_for_region() {
        let widget = FakeWidget::us("+1415", false);
        let result = validate(&filled(), Some(&widget));
        assert_eq!(result.phone, FieldMark::Invalid(PHONE_INVALID.to_string()));
        assert_eq!(result.phone.class(), Some("is-invalid"));
    }

    #[test]
    fn missing_or_broken_widget_means_no_phone() {
        assert_eq!(validate(&filled(), None).phone.message(), PHONE_REQUIRED);
        let broken = FakeWidget::broken();
        assert_eq!(validate(&filled(), Some(&broken)).phone.message(), PHONE_REQUIRED);
    }

    proptest! {
        #[test]
        fn email_without_at_sign_is_rejected(s in "[^@]*") {
            prop_assert!(!is_valid_email(&s));
        }

        #[test]
        fn blank_name_never_validates(ws in "[ \t]*") {
            let widget = FakeWidget::india("+919876543210", true);
            let snapshot = FormSnapshot { name: ws, ..filled() };
            prop_assert!(!validate(&snapshot, Some(&widget)).is_ok());
        }
    }
}
