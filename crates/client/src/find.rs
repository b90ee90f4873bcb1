//! `performFind` queries.
//!
//! The backend exposes a generic entity search. Conditions go into
//! `inputFields`; a field can carry `<field>_op` / `<field>_ic` companions
//! for the comparison operator and case-insensitivity.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use userdesk_core::error::require_non_blank;
use userdesk_core::{DomainError, DomainResult};
use userdesk_parties::YesNo;

pub const DEFAULT_VIEW_SIZE: u32 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FindQuery {
    pub entity_name: String,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub input_fields: Map<String, Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub field_list: Vec<String>,
    pub view_size: u32,
    pub view_index: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distinct: Option<YesNo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_by_date: Option<YesNo>,
    pub no_condition_find: YesNo,
}

impl FindQuery {
    pub fn new(entity_name: impl Into<String>) -> Self {
        Self {
            entity_name: entity_name.into(),
            input_fields: Map::new(),
            field_list: Vec::new(),
            view_size: DEFAULT_VIEW_SIZE,
            view_index: 0,
            order_by: None,
            distinct: None,
            filter_by_date: None,
            no_condition_find: YesNo::Yes,
        }
    }

    /// Exact-match condition.
    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.input_fields.insert(field.to_string(), value.into());
        self
    }

    /// Case-insensitive substring condition.
    pub fn contains(mut self, field: &str, value: impl Into<String>) -> Self {
        self.input_fields
            .insert(field.to_string(), Value::String(value.into()));
        self.input_fields
            .insert(format!("{field}_op"), Value::String("contains".to_string()));
        self.input_fields
            .insert(format!("{field}_ic"), Value::String("Y".to_string()));
        self
    }

    /// Value must be empty (null) on the entity.
    pub fn empty(mut self, field: &str) -> Self {
        self.input_fields
            .insert(format!("{field}_op"), Value::String("empty".to_string()));
        self
    }

    pub fn fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_list = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn page(mut self, view_index: u32, view_size: u32) -> Self {
        self.view_index = view_index;
        self.view_size = view_size;
        self
    }

    pub fn order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = Some(YesNo::Yes);
        self
    }

    pub fn filter_by_date(mut self) -> Self {
        self.filter_by_date = Some(YesNo::Yes);
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        require_non_blank("entityName", &self.entity_name)?;
        if self.view_size == 0 {
            return Err(DomainError::validation("viewSize must be greater than zero"));
        }
        Ok(())
    }
}

/// Result page of a `performFind` call.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FindResponse<T> {
    #[serde(default = "Vec::new")]
    pub docs: Vec<T>,
    #[serde(default)]
    pub count: u64,
}

impl<T> FindResponse<T> {
    /// Whether more rows exist beyond the page that was fetched.
    pub fn has_more(&self, query: &FindQuery) -> bool {
        let seen = u64::from(query.view_index) * u64::from(query.view_size) + self.docs.len() as u64;
        self.count > seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_query_shape() {
        let query = FindQuery::new("PartyNameView");
        assert_eq!(
            serde_json::to_value(&query).unwrap(),
            json!({
                "entityName": "PartyNameView",
                "viewSize": 100,
                "viewIndex": 0,
                "noConditionFind": "Y"
            })
        );
    }

    #[test]
    fn builder_fills_conditions_and_paging() {
        let query = FindQuery::new("UserLogin")
            .eq("partyId", "10010")
            .contains("userLoginId", "hot")
            .empty("disabledDateTime")
            .fields(["userLoginId", "enabled"])
            .page(2, 25)
            .order_by("userLoginId")
            .distinct()
            .filter_by_date();

        let value = serde_json::to_value(&query).unwrap();
        assert_eq!(value["inputFields"]["partyId"], "10010");
        assert_eq!(value["inputFields"]["userLoginId_op"], "contains");
        assert_eq!(value["inputFields"]["userLoginId_ic"], "Y");
        assert_eq!(value["inputFields"]["disabledDateTime_op"], "empty");
        assert_eq!(value["fieldList"], json!(["userLoginId", "enabled"]));
        assert_eq!(value["viewIndex"], 2);
        assert_eq!(value["viewSize"], 25);
        assert_eq!(value["orderBy"], "userLoginId");
        assert_eq!(value["distinct"], "Y");
        assert_eq!(value["filterByDate"], "Y");
    }

    #[test]
    fn validation() {
        assert!(FindQuery::new(" ").validate().is_err());
        assert!(FindQuery::new("Party").page(0, 0).validate().is_err());
        assert!(FindQuery::new("Party").validate().is_ok());
    }

    #[test]
    fn response_paging() {
        let query = FindQuery::new("Party").page(1, 2);
        let resp: FindResponse<Value> =
            serde_json::from_value(json!({"docs": [{}, {}], "count": 5})).unwrap();
        assert!(resp.has_more(&query));

        let last: FindResponse<Value> =
            serde_json::from_value(json!({"docs": [{}], "count": 5})).unwrap();
        assert!(!last.has_more(&query.clone().page(2, 2)));
    }
}
