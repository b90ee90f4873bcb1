//! Contact mechanisms: email addresses and telecom numbers attached to a party.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use userdesk_core::error::require_non_blank;
use userdesk_core::{ContactMechId, DomainError, DomainResult, PartyId};

/// Purpose a contact mechanism serves for its party.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContactMechPurpose {
    PrimaryEmail,
    PrimaryPhone,
}

/// Body for `service/createUpdatePartyEmailAddress`.
///
/// Without `contact_mech_id` the backend creates a new mechanism; with it the
/// existing one is replaced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyEmailAddress {
    pub party_id: PartyId,
    pub email_address: String,
    #[serde(rename = "contactMechPurposeTypeId")]
    pub purpose: ContactMechPurpose,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_mech_id: Option<ContactMechId>,
}

impl PartyEmailAddress {
    pub fn primary(party_id: PartyId, email_address: impl Into<String>) -> Self {
        Self {
            party_id,
            email_address: email_address.into(),
            purpose: ContactMechPurpose::PrimaryEmail,
            contact_mech_id: None,
        }
    }

    pub fn replacing(mut self, contact_mech_id: ContactMechId) -> Self {
        self.contact_mech_id = Some(contact_mech_id);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("emailAddress", &self.email_address)?;
        let valid = self
            .email_address
            .split_once('@')
            .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
        if !valid {
            return Err(DomainError::validation(format!(
                "emailAddress is not an email address: {:?}",
                self.email_address
            )));
        }
        Ok(())
    }
}

/// Body for `service/createUpdatePartyTelecomNumber`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyTelecomNumber {
    pub party_id: PartyId,
    pub contact_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(rename = "contactMechPurposeTypeId")]
    pub purpose: ContactMechPurpose,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_mech_id: Option<ContactMechId>,
}

impl PartyTelecomNumber {
    pub fn primary(party_id: PartyId, contact_number: impl Into<String>) -> Self {
        Self {
            party_id,
            contact_number: contact_number.into(),
            country_code: None,
            purpose: ContactMechPurpose::PrimaryPhone,
            contact_mech_id: None,
        }
    }

    pub fn country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    pub fn replacing(mut self, contact_mech_id: ContactMechId) -> Self {
        self.contact_mech_id = Some(contact_mech_id);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("contactNumber", &self.contact_number)?;
        let digits = self.contact_number.chars().filter(char::is_ascii_digit).count();
        let allowed = self
            .contact_number
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+' | '.'));
        if digits == 0 || !allowed {
            return Err(DomainError::validation(format!(
                "contactNumber is not a phone number: {:?}",
                self.contact_number
            )));
        }
        Ok(())
    }
}

/// Body for `service/deletePartyContactMech`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePartyContactMech {
    pub party_id: PartyId,
    pub contact_mech_id: ContactMechId,
}

impl DeletePartyContactMech {
    pub fn new(party_id: PartyId, contact_mech_id: ContactMechId) -> Self {
        Self {
            party_id,
            contact_mech_id,
        }
    }
}

/// Response of the create/update contact-mechanism services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMechResult {
    pub contact_mech_id: ContactMechId,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}
