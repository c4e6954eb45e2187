use log::Level;

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose console output when running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

pub const IP_LOOKUP_URL: &str = "https://api.ipify.org?format=json";

pub const THANK_YOU_URL: &str = "./thankyou.html";

pub const POPUP_DELAY_MS: u32 = 15_000;

pub const TERRITORY: &str = "Bengaluru";

pub const NURA_LEAD_STATUS: &str = "Not contacted";

// Credentials can be swapped at build time, e.g. `NURA_CRM_TOKEN=... trunk build`.
pub fn nura_base_url() -> &'static str {
    option_env!("NURA_CRM_URL").unwrap_or("https://nuracrm-test.onedesk.app")
}

pub fn nura_lead_url() -> String {
    format!("{}/api/resource/{}", nura_base_url(), urlencoding::encode("CRM Lead"))
}

pub fn nura_authorization() -> String {
    let token = option_env!("NURA_CRM_TOKEN").unwrap_or("21b6f0d64bdf0cd:24630f1b0410c28");
    format!("token {}", token)
}

pub fn telecrm_lead_url() -> String {
    let enterprise = option_env!("TELECRM_ENTERPRISE").unwrap_or("68c406e91f25e2261f341b1e");
    format!("https://next-api.telecrm.in/v2/enterprise/{}/autoupdatelead", enterprise)
}

pub fn telecrm_authorization() -> String {
    let token = option_env!("TELECRM_TOKEN").unwrap_or(
        "412f35c0-2549-4114-bfe0-09ff79b6af1f1758088338356:4a03adde-cf32-437c-bc22-fd8d74332348",
    );
    format!("Bearer {}", token)
}

/// When false, a failed IP lookup no longer aborts the submission and the
/// lead goes out with an "Unknown" address.
pub fn ip_lookup_required() -> bool {
    !matches!(option_env!("LEAD_IP_LOOKUP_OPTIONAL"), Some("1") | Some("true"))
}
