//! Lead submission flow: validate, look up the visitor IP, push the lead to
//! both CRMs, then send the visitor to the thank-you page.
//!
//! The two CRM posts run one after the other and both are always attempted.
//! Their outcomes are collected in a [`SagaReport`] so a lead that reached
//! only one CRM is reported as a partial submission rather than a plain
//! failure. Nothing is rolled back.

use std::fmt;

use log::{debug, error, info, warn};
use thiserror::Error;

use crate::campaign::Campaign;
use crate::config;
use crate::crm::{CrmError, CrmTransport};
use crate::lead::{Endpoint, Lead, UNKNOWN_IP};
use crate::phone::PhoneWidget;
use crate::validation::{validate, FormSnapshot, Validation, TERMS_ALERT};

pub const SUBMIT_LABEL: &str = "Submit Form";
pub const SUBMITTING_LABEL: &str = "Submitting...";
pub const FAILURE_ALERT: &str = "There was a problem submitting the form. Please try again.";
pub const PARTIAL_ALERT: &str =
    "We received your details, but part of the submission failed. Our team may contact you to confirm them.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    Idle,
    Validating,
    EnrichingIp,
    Submitting,
    Redirecting,
    Failed,
}

impl fmt::Display for SubmissionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SubmissionPhase::Idle => "idle",
            SubmissionPhase::Validating => "validating",
            SubmissionPhase::EnrichingIp => "enriching-ip",
            SubmissionPhase::Submitting => "submitting",
            SubmissionPhase::Redirecting => "redirecting",
            SubmissionPhase::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form has invalid fields")]
    Validation,
    #[error("visitor IP lookup failed: {0}")]
    Enrichment(CrmError),
    #[error("{endpoint} rejected the lead: {source}")]
    Submission { endpoint: Endpoint, source: CrmError },
    #[error("lead reached {accepted} but {rejected} failed: {source}")]
    Partial {
        accepted: Endpoint,
        rejected: Endpoint,
        source: CrmError,
    },
}

impl SubmitError {
    /// Text of the single alert shown for this failure, if any.
    pub fn alert(&self) -> Option<&'static str> {
        match self {
            SubmitError::Validation => None,
            SubmitError::Enrichment(_) | SubmitError::Submission { .. } => Some(FAILURE_ALERT),
            SubmitError::Partial { .. } => Some(PARTIAL_ALERT),
        }
    }
}

/// Outcome of each CRM post, in send order.
#[derive(Debug, Default)]
pub struct SagaReport {
    pub steps: Vec<(Endpoint, Result<(), CrmError>)>,
}

impl SagaReport {
    pub fn accepted(&self) -> impl Iterator<Item = Endpoint> + '_ {
        self.steps
            .iter()
            .filter(|(_, result)| result.is_ok())
            .map(|(endpoint, _)| *endpoint)
    }

    pub fn into_result(self) -> Result<(), SubmitError> {
        let accepted = self.accepted().next();
        let rejected = self
            .steps
            .into_iter()
            .find_map(|(endpoint, result)| result.err().map(|e| (endpoint, e)));

        match (accepted, rejected) {
            (_, None) => Ok(()),
            (Some(accepted), Some((rejected, source))) => Err(SubmitError::Partial {
                accepted,
                rejected,
                source,
            }),
            (None, Some((endpoint, source))) => Err(SubmitError::Submission { endpoint, source }),
        }
    }
}

/// What the flow does to the page around it. Implemented over the real DOM
/// by the lead form, and by a recorder in tests.
pub trait PageEffects {
    fn set_busy(&self, busy: bool);
    fn show_validation(&self, validation: &Validation);
    fn alert(&self, message: &str);
    fn redirect(&self, href: &str);
    fn phase(&self, _phase: SubmissionPhase) {}
}

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    pub ip_lookup_required: bool,
    pub landing_page: String,
    pub thank_you_url: String,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            ip_lookup_required: config::ip_lookup_required(),
            landing_page: String::new(),
            thank_you_url: config::THANK_YOU_URL.to_string(),
        }
    }
}

pub struct LeadSubmission<T> {
    transport: T,
    settings: SubmitSettings,
}

impl<T: CrmTransport> LeadSubmission<T> {
    pub fn new(transport: T, settings: SubmitSettings) -> Self {
        Self { transport, settings }
    }

    /// Runs one submission end to end. The submit control is always released
    /// before returning, whatever the outcome.
    pub async fn run(
        &self,
        snapshot: FormSnapshot,
        widget: Option<&dyn PhoneWidget>,
        campaign: Campaign,
        effects: &dyn PageEffects,
    ) -> Result<(), SubmitError> {
        effects.set_busy(true);

        let result = self.drive(snapshot, widget, campaign, effects).await;
        match &result {
            Ok(()) => {
                effects.phase(SubmissionPhase::Redirecting);
                info!("Lead delivered, redirecting to {}", self.settings.thank_you_url);
                effects.redirect(&self.settings.thank_you_url);
            }
            Err(SubmitError::Validation) => {
                debug!("Submission stopped at validation");
                effects.phase(SubmissionPhase::Idle);
            }
            Err(err) => {
                match err {
                    SubmitError::Partial { .. } => error!("Partial lead submission: {}", err),
                    _ => error!("Error submitting form: {}", err),
                }
                effects.phase(SubmissionPhase::Failed);
                if let Some(message) = err.alert() {
                    effects.alert(message);
                }
            }
        }

        effects.set_busy(false);
        result
    }

    async fn drive(
        &self,
        snapshot: FormSnapshot,
        widget: Option<&dyn PhoneWidget>,
        campaign: Campaign,
        effects: &dyn PageEffects,
    ) -> Result<(), SubmitError> {
        effects.phase(SubmissionPhase::Validating);
        let validation = validate(&snapshot, widget);
        effects.show_validation(&validation);
        if !validation.terms_accepted {
            effects.alert(TERMS_ALERT);
        }
        if !validation.is_ok() {
            return Err(SubmitError::Validation);
        }

        effects.phase(SubmissionPhase::EnrichingIp);
        let phone = match widget.map(|w| w.number()) {
            Some(Ok(number)) => number,
            Some(Err(e)) => {
                warn!("Phone widget failed, sending the raw field value: {}", e);
                snapshot.phone_raw.trim().to_string()
            }
            None => snapshot.phone_raw.trim().to_string(),
        };

        let visitor_ip = match self.transport.lookup_ip().await {
            Ok(ip) => ip,
            Err(e) if self.settings.ip_lookup_required => return Err(SubmitError::Enrichment(e)),
            Err(e) => {
                warn!("IP lookup failed, continuing without it: {}", e);
                UNKNOWN_IP.to_string()
            }
        };

        let lead = Lead {
            name: snapshot.name.trim().to_string(),
            email: snapshot.email.trim().to_string(),
            phone,
            campaign,
            visitor_ip,
            landing_page: self.settings.landing_page.clone(),
        };

        effects.phase(SubmissionPhase::Submitting);
        let mut report = SagaReport::default();
        for payload in lead.payloads() {
            let endpoint = payload.endpoint();
            let result = self.transport.post(&payload).await;
            match &result {
                Ok(()) => info!("Lead accepted by {}", endpoint),
                Err(e) => warn!("Lead rejected by {}: {}", endpoint, e),
            }
            report.steps.push((endpoint, result));
        }
        report.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lead::CrmPayload;
    use crate::phone::tests::FakeWidget;
    use crate::validation::FieldMark;
    use futures::executor::block_on;
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        LookupIp,
        Post(Endpoint),
    }

    #[derive(Default)]
    struct FakeTransport {
        calls: RefCell<Vec<Call>>,
        bodies: RefCell<Vec<serde_json::Value>>,
        ip_fails: bool,
        failing: Vec<Endpoint>,
    }

    impl CrmTransport for FakeTransport {
        async fn lookup_ip(&self) -> Result<String, CrmError> {
            self.calls.borrow_mut().push(Call::LookupIp);
            if self.ip_fails {
                Err(CrmError::Network("offline".into()))
            } else {
                Ok("203.0.113.7".into())
            }
        }

        async fn post(&self, payload: &CrmPayload) -> Result<(), CrmError> {
            let endpoint = payload.endpoint();
            self.calls.borrow_mut().push(Call::Post(endpoint));
            self.bodies.borrow_mut().push(serde_json::to_value(payload).unwrap());
            if self.failing.contains(&endpoint) {
                Err(CrmError::Status(500))
            } else {
                Ok(())
            }
        }
    }

    #[derive(Default)]
    struct Recorder {
        busy: Cell<bool>,
        busy_toggles: RefCell<Vec<bool>>,
        alerts: RefCell<Vec<String>>,
        redirects: RefCell<Vec<String>>,
        phases: RefCell<Vec<SubmissionPhase>>,
        validation: RefCell<Option<Validation>>,
    }

    impl Recorder {
        fn label(&self) -> &'static str {
            if self.busy.get() {
                SUBMITTING_LABEL
            } else {
                SUBMIT_LABEL
            }
        }
    }

    impl PageEffects for Recorder {
        fn set_busy(&self, busy: bool) {
            self.busy.set(busy);
            self.busy_toggles.borrow_mut().push(busy);
        }

        fn show_validation(&self, validation: &Validation) {
            *self.validation.borrow_mut() = Some(validation.clone());
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }

        fn redirect(&self, href: &str) {
            self.redirects.borrow_mut().push(href.to_string());
        }

        fn phase(&self, phase: SubmissionPhase) {
            self.phases.borrow_mut().push(phase);
        }
    }

    fn settings() -> SubmitSettings {
        SubmitSettings {
            ip_lookup_required: true,
            landing_page: "https://clinic.example/blr/".into(),
            thank_you_url: "./thankyou.html".into(),
        }
    }

    fn snapshot() -> FormSnapshot {
        FormSnapshot {
            name: " Asha Rao ".into(),
            email: "asha@example.in".into(),
            phone_raw: "98765 43210".into(),
            terms_accepted: true,
        }
    }

    fn submit(
        transport: FakeTransport,
        snapshot: FormSnapshot,
        widget: &FakeWidget,
    ) -> (LeadSubmission<FakeTransport>, Recorder, Result<(), SubmitError>) {
        let flow = LeadSubmission::new(transport, settings());
        let recorder = Recorder::default();
        let result = block_on(flow.run(snapshot, Some(widget), Campaign::from_query(""), &recorder));
        (flow, recorder, result)
    }

    #[test]
    fn valid_form_looks_up_ip_then_posts_twice_then_redirects() {
        let widget = FakeWidget::india("+919876543210", true);
        let (flow, recorder, result) = submit(FakeTransport::default(), snapshot(), &widget);

        assert!(result.is_ok());
        assert_eq!(
            *flow.transport.calls.borrow(),
            vec![Call::LookupIp, Call::Post(Endpoint::Nura), Call::Post(Endpoint::TeleCrm)]
        );
        assert_eq!(*recorder.redirects.borrow(), vec!["./thankyou.html".to_string()]);
        assert!(recorder.alerts.borrow().is_empty());
        assert_eq!(
            *recorder.phases.borrow(),
            vec![
                SubmissionPhase::Validating,
                SubmissionPhase::EnrichingIp,
                SubmissionPhase::Submitting,
                SubmissionPhase::Redirecting,
            ]
        );
        assert_eq!(*recorder.busy_toggles.borrow(), vec![true, false]);
    }

    #[test]
    fn fallback_campaign_tags_reach_the_crms() {
        let widget = FakeWidget::india("+919876543210", true);
        let (flow, _, _) = submit(FakeTransport::default(), snapshot(), &widget);

        let bodies = flow.transport.bodies.borrow();
        assert_eq!(bodies[0]["source"], "Google Lead");
        assert_eq!(bodies[0]["first_name"], "Asha Rao");
        assert_eq!(bodies[1]["fields"]["campaign_name"], "Campaign Name");
        assert_eq!(bodies[1]["fields"]["lead_source"], "Google Lead");
        assert_eq!(bodies[1]["fields"]["ip_address"], "203.0.113.7");
    }

    #[test]
    fn invalid_form_makes_no_network_calls() {
        let widget = FakeWidget::india("", false);
        let bad = FormSnapshot { email: "a@b".into(), ..snapshot() };
        let (flow, recorder, result) = submit(FakeTransport::default(), bad, &widget);

        assert!(matches!(result, Err(SubmitError::Validation)));
        assert!(flow.transport.calls.borrow().is_empty());
        assert!(recorder.alerts.borrow().is_empty());
        assert!(recorder.redirects.borrow().is_empty());
        assert_eq!(recorder.label(), SUBMIT_LABEL);
        let validation = recorder.validation.borrow().clone().unwrap();
        assert!(validation.email.is_invalid());
        assert_eq!(validation.phone.class(), Some("is-invalid"));
    }

    #[test]
    fn unchecked_terms_raise_the_blocking_alert() {
        let widget = FakeWidget::india("+919876543210", true);
        let unchecked = FormSnapshot { terms_accepted: false, ..snapshot() };
        let (flow, recorder, result) = submit(FakeTransport::default(), unchecked, &widget);

        assert!(matches!(result, Err(SubmitError::Validation)));
        assert_eq!(*recorder.alerts.borrow(), vec![TERMS_ALERT.to_string()]);
        assert!(flow.transport.calls.borrow().is_empty());
        let validation = recorder.validation.borrow().clone().unwrap();
        assert_eq!(validation.phone, FieldMark::Valid);
    }

    #[test]
    fn second_post_failing_is_one_alert_and_released_button() {
        let widget = FakeWidget::india("+919876543210", true);
        let transport = FakeTransport { failing: vec![Endpoint::TeleCrm], ..Default::default() };
        let (_, recorder, result) = submit(transport, snapshot(), &widget);

        assert!(matches!(
            result,
            Err(SubmitError::Partial { accepted: Endpoint::Nura, rejected: Endpoint::TeleCrm, .. })
        ));
        assert_eq!(recorder.alerts.borrow().len(), 1);
        assert_eq!(recorder.alerts.borrow()[0], PARTIAL_ALERT);
        assert!(recorder.redirects.borrow().is_empty());
        assert_eq!(recorder.label(), SUBMIT_LABEL);
        assert!(!recorder.busy.get());
    }

    #[test]
    fn both_posts_failing_still_attempts_both() {
        let widget = FakeWidget::india("+919876543210", true);
        let transport = FakeTransport {
            failing: vec![Endpoint::Nura, Endpoint::TeleCrm],
            ..Default::default()
        };
        let (flow, recorder, result) = submit(transport, snapshot(), &widget);

        assert!(matches!(result, Err(SubmitError::Submission { endpoint: Endpoint::Nura, .. })));
        assert_eq!(flow.transport.calls.borrow().len(), 3);
        assert_eq!(*recorder.alerts.borrow(), vec![FAILURE_ALERT.to_string()]);
        assert_eq!(recorder.label(), SUBMIT_LABEL);
        assert_eq!(recorder.phases.borrow().last(), Some(&SubmissionPhase::Failed));
    }

    #[test]
    fn failed_ip_lookup_aborts_by_default() {
        let widget = FakeWidget::india("+919876543210", true);
        let transport = FakeTransport { ip_fails: true, ..Default::default() };
        let (flow, recorder, result) = submit(transport, snapshot(), &widget);

        assert!(matches!(result, Err(SubmitError::Enrichment(_))));
        assert_eq!(*flow.transport.calls.borrow(), vec![Call::LookupIp]);
        assert_eq!(*recorder.alerts.borrow(), vec![FAILURE_ALERT.to_string()]);
        assert_eq!(recorder.label(), SUBMIT_LABEL);
    }

    #[test]
    fn optional_ip_lookup_sends_unknown() {
        let widget = FakeWidget::india("+919876543210", true);
        let transport = FakeTransport { ip_fails: true, ..Default::default() };
        let flow = LeadSubmission::new(
            transport,
            SubmitSettings { ip_lookup_required: false, ..settings() },
        );
        let recorder = Recorder::default();
        let result = block_on(flow.run(snapshot(), Some(&widget), Campaign::default(), &recorder));

        assert!(result.is_ok());
        assert_eq!(flow.transport.bodies.borrow()[1]["fields"]["ip_address"], UNKNOWN_IP);
    }

    #[test]
    fn widget_failing_after_validation_sends_the_trimmed_raw_value() {
        let widget = FakeWidget::india("+919876543210", true).failing_after(1);
        let typed = FormSnapshot { phone_raw: "  98765 43210 ".into(), ..snapshot() };
        let (flow, recorder, result) = submit(FakeTransport::default(), typed, &widget);

        assert!(result.is_ok());
        let bodies = flow.transport.bodies.borrow();
        assert_eq!(bodies[0]["mobile_no"], "98765 43210");
        assert_eq!(bodies[1]["fields"]["phone"], "98765 43210");
        assert_eq!(*recorder.redirects.borrow(), vec!["./thankyou.html".to_string()]);
    }

    #[test]
    fn saga_report_classifies_outcomes() {
        let all_ok = SagaReport {
            steps: vec![(Endpoint::Nura, Ok(())), (Endpoint::TeleCrm, Ok(()))],
        };
        assert!(all_ok.into_result().is_ok());

        let first_failed = SagaReport {
            steps: vec![
                (Endpoint::Nura, Err(CrmError::Network("reset".into()))),
                (Endpoint::TeleCrm, Ok(())),
            ],
        };
        assert!(matches!(
            first_failed.into_result(),
            Err(SubmitError::Partial { accepted: Endpoint::TeleCrm, rejected: Endpoint::Nura, .. })
        ));
    }
}
