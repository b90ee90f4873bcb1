use serde::{Deserialize, Serialize};

use userdesk_core::error::require_non_blank;
use userdesk_core::{DomainError, DomainResult, PartyId};

/// Body for `service/updatePerson`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePerson {
    pub party_id: PartyId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl UpdatePerson {
    pub fn new(party_id: PartyId) -> Self {
        Self {
            party_id,
            first_name: None,
            last_name: None,
        }
    }

    pub fn first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn last_name(mut self, last_name: impl Into<String>) -> Self {
        self.last_name = Some(last_name.into());
        self
    }

    /// At least one name must change, and a supplied name cannot be blank.
    pub fn validate(&self) -> DomainResult<()> {
        if self.first_name.is_none() && self.last_name.is_none() {
            return Err(DomainError::validation("nothing to update"));
        }
        if let Some(first) = &self.first_name {
            require_non_blank("firstName", first)?;
        }
        if let Some(last) = &self.last_name {
            require_non_blank("lastName", last)?;
        }
        Ok(())
    }
}

/// Body for `service/updatePartyGroup`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePartyGroup {
    pub party_id: PartyId,
    pub group_name: String,
}

impl UpdatePartyGroup {
    pub fn new(party_id: PartyId, group_name: impl Into<String>) -> Self {
        Self {
            party_id,
            group_name: group_name.into(),
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("groupName", &self.group_name)
    }
}
