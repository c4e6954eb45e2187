use std::fmt;

use serde::Serialize;

use crate::campaign::Campaign;
use crate::config;

pub const UNKNOWN_IP: &str = "Unknown";

/// The two CRMs every lead is pushed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Nura,
    TeleCrm,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Nura => write!(f, "NuraCRM"),
            Endpoint::TeleCrm => write!(f, "TeleCRM"),
        }
    }
}

/// One validated contact submission. Built per submit and dropped once both
/// CRMs have been tried.
#[derive(Debug, Clone, PartialEq)]
pub struct Lead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub campaign: Campaign,
    pub visitor_ip: String,
    pub landing_page: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NuraLead {
    pub first_name: String,
    pub lead_name: String,
    pub email: String,
    pub mobile_no: String,
    pub status: &'static str,
    pub source: String,
    pub territory: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeleCrmFields {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub lead_source: String,
    pub center: &'static str,
    pub landing_page: String,
    pub campaign_name: String,
    pub ad_name: String,
    pub keyword: String,
    pub ip_address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeleCrmLead {
    pub fields: TeleCrmFields,
}

/// Request body for one CRM, serialized as-is.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CrmPayload {
    Nura(NuraLead),
    TeleCrm(TeleCrmLead),
}

impl CrmPayload {
    pub fn endpoint(&self) -> Endpoint {
        match self {
            CrmPayload::Nura(_) => Endpoint::Nura,
            CrmPayload::TeleCrm(_) => Endpoint::TeleCrm,
        }
    }
}

impl Lead {
    pub fn nura(&self) -> NuraLead {
        NuraLead {
            first_name: self.name.clone(),
            lead_name: self.name.clone(),
            email: self.email.clone(),
            mobile_no: self.phone.clone(),
            status: config::NURA_LEAD_STATUS,
            source: self.campaign.source.clone(),
            territory: config::TERRITORY,
        }
    }

    pub fn telecrm(&self) -> TeleCrmLead {
        TeleCrmLead {
            fields: TeleCrmFields {
                name: self.name.clone(),
                phone: self.phone.clone(),
                email: self.email.clone(),
                lead_source: self.campaign.source.clone(),
                center: config::TERRITORY,
                landing_page: self.landing_page.clone(),
                campaign_name: self.campaign.campaign.clone(),
                ad_name: self.campaign.content.clone(),
                keyword: self.campaign.keyword.clone(),
                ip_address: self.visitor_ip.clone(),
            },
        }
    }

    /// Payloads in the order they are sent.
    pub fn payloads(&self) -> [CrmPayload; 2] {
        [CrmPayload::Nura(self.nura()), CrmPayload::TeleCrm(self.telecrm())]
    }
}
