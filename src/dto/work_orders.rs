use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::entities::{batch_record, product, user, work_order, WorkOrderStatus};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkOrderRequest {
    pub product_id: i32,
    #[validate(range(min = 1, message = "must be at least 1"))]
    pub batch_size: i32,
    pub assigned_operator_id: i32,
    #[serde(deserialize_with = "super::timestamp::deserialize")]
    #[schema(value_type = String, format = DateTime, example = "2024-01-01T00:00:00Z")]
    pub start_date: DateTime<Utc>,
    #[serde(default, deserialize_with = "super::timestamp::option::deserialize")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub end_date: Option<DateTime<Utc>>,
    #[validate(length(max = 2000, message = "must be at most 2000 characters"))]
    pub notes: Option<String>,
    /// Defaults to `planned`
    pub status: Option<WorkOrderStatus>,
}

/// Only these fields of a work order can be changed after creation.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateWorkOrderRequest {
    pub status: Option<WorkOrderStatus>,
    #[serde(default, deserialize_with = "super::double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::timestamp::double_option::deserialize")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub end_date: Option<Option<DateTime<Utc>>>,
    pub assigned_operator_id: Option<i32>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WorkOrderListQuery {
    /// Filter by status; unknown values are ignored
    pub status: Option<String>,
    #[serde(default)]
    pub include_relations: bool,
}

impl WorkOrderListQuery {
    pub fn status_filter(&self) -> Option<WorkOrderStatus> {
        self.status.as_deref().and_then(|s| s.parse().ok())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderWithRelations {
    #[serde(flatten)]
    pub work_order: work_order::Model,
    pub product: product::Model,
    pub operator: user::Model,
    pub batch_record: Option<batch_record::Model>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_distinguishes_null_from_absent() {
        let cleared: UpdateWorkOrderRequest =
            serde_json::from_str(r#"{"notes": null}"#).unwrap();
        assert_eq!(cleared.notes, Some(None));
        assert!(cleared.end_date.is_none());

        let untouched: UpdateWorkOrderRequest = serde_json::from_str("{}").unwrap();
        assert!(untouched.notes.is_none());
    }

    #[test]
    fn update_rejects_fields_outside_the_patchable_set() {
        let result = serde_json::from_str::<UpdateWorkOrderRequest>(r#"{"batchSize": 10}"#);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_status_filter_is_ignored() {
        let query = WorkOrderListQuery {
            status: Some("exploded".into()),
            include_relations: false,
        };
        assert_eq!(query.status_filter(), None);

        let query = WorkOrderListQuery {
            status: Some("under_review".into()),
            include_relations: false,
        };
        assert_eq!(query.status_filter(), Some(WorkOrderStatus::UnderReview));
    }
}
