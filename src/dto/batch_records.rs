use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::entities::{
    batch_record, manufacturing_step, quality_control_test, quality_review, user, work_order,
};

/// A step supplied instead of the standard process.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewStepInput {
    pub name: String,
    pub description: Option<String>,
    pub sort_order: i32,
}

/// A test supplied instead of the standard panel.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewTestInput {
    pub name: String,
    pub acceptable_range: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBatchRecordRequest {
    pub work_order_id: i32,
    /// Defaults to the work order's assigned operator
    pub operator_id: Option<i32>,
    #[validate(custom = "validate_step_inputs")]
    pub manufacturing_steps: Option<Vec<NewStepInput>>,
    #[validate(custom = "validate_test_inputs")]
    pub quality_control_tests: Option<Vec<NewTestInput>>,
}

fn validate_step_inputs(steps: &[NewStepInput]) -> Result<(), ValidationError> {
    if steps.iter().any(|step| step.name.trim().is_empty()) {
        let mut err = ValidationError::new("blank_name");
        err.message = Some("every step needs a name".into());
        return Err(err);
    }
    Ok(())
}

fn validate_test_inputs(tests: &[NewTestInput]) -> Result<(), ValidationError> {
    if tests.iter().any(|test| test.name.trim().is_empty()) {
        let mut err = ValidationError::new("blank_name");
        err.message = Some("every test needs a name".into());
        return Err(err);
    }
    Ok(())
}

/// Only these fields of a batch record can be changed directly.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateBatchRecordRequest {
    #[validate(range(min = 0, max = 100, message = "must be between 0 and 100"))]
    pub completion_percentage: Option<i32>,
    pub is_complete: Option<bool>,
    #[serde(default, deserialize_with = "super::timestamp::option::deserialize")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BatchRecordWithRelations {
    #[serde(flatten)]
    pub batch_record: batch_record::Model,
    pub work_order: work_order::Model,
    pub operator: user::Model,
    /// In process order
    pub manufacturing_steps: Vec<manufacturing_step::Model>,
    pub quality_control_tests: Vec<quality_control_test::Model>,
    pub quality_review: Option<quality_review::Model>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentage_outside_range_fails_validation() {
        let req = UpdateBatchRecordRequest {
            completion_percentage: Some(101),
            ..Default::default()
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("completion_percentage"));
    }

    #[test]
    fn blank_custom_step_is_rejected() {
        let req: CreateBatchRecordRequest = serde_json::from_str(
            r#"{"workOrderId": 1, "manufacturingSteps": [{"name": " ", "sortOrder": 1}]}"#,
        )
        .unwrap();
        assert!(req.validate().is_err());
    }
}
