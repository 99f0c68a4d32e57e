use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::auth::USER_ID_HEADER;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "BatchTrack API",
        version = "0.1.0",
        description = r#"
# BatchTrack Manufacturing API

Tracks cosmetic and pharmaceutical work orders from planning through production,
quality control and the final quality decision.

## Lifecycle

`planned -> in_progress -> under_review -> approved | rejected`

- Opening a batch record starts a planned work order.
- Marking the batch record complete submits it for review.
- A quality review approves, rejects or holds the batch.

## Session

Mutating endpoints require the `x-user-id` header naming an existing user.
That user is recorded as the author of every activity log entry.

## Errors

```json
{
  "error": "Bad Request",
  "message": "Validation failed",
  "details": [{"field": "batchSize", "message": "must be at least 1"}],
  "request_id": "4f1c...",
  "timestamp": "2024-01-01T00:00:00Z"
}
```
        "#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers((url = "http://localhost:8080", description = "Local development")),
    tags(
        (name = "work-orders", description = "Planning and manual overrides"),
        (name = "batch-records", description = "Production records"),
        (name = "manufacturing-steps", description = "Process steps"),
        (name = "quality-control-tests", description = "Measurements"),
        (name = "quality-reviews", description = "Quality decisions"),
        (name = "dashboard", description = "Aggregates"),
        (name = "activity-logs", description = "Audit trail"),
        (name = "users", description = "Users and session"),
        (name = "products", description = "Product catalogue"),
        (name = "health", description = "Health check endpoints")
    ),
    paths(
        crate::health_check,
        crate::api_status,

        crate::handlers::users::list_users,
        crate::handlers::users::get_user,
        crate::handlers::users::list_products,
        crate::handlers::users::current_user,

        crate::handlers::work_orders::list_work_orders,
        crate::handlers::work_orders::create_work_order,
        crate::handlers::work_orders::get_work_order,
        crate::handlers::work_orders::update_work_order,
        crate::handlers::work_orders::get_work_order_batch_record,

        crate::handlers::batch_records::list_batch_records,
        crate::handlers::batch_records::create_batch_record,
        crate::handlers::batch_records::get_batch_record,
        crate::handlers::batch_records::update_batch_record,
        crate::handlers::batch_records::list_manufacturing_steps,
        crate::handlers::batch_records::list_quality_control_tests,
        crate::handlers::batch_records::get_quality_review,

        crate::handlers::manufacturing_steps::create_manufacturing_step,
        crate::handlers::manufacturing_steps::update_manufacturing_step,

        crate::handlers::quality_control_tests::create_quality_control_test,
        crate::handlers::quality_control_tests::update_quality_control_test,

        crate::handlers::quality_reviews::list_quality_reviews,
        crate::handlers::quality_reviews::create_quality_review,

        crate::handlers::dashboard::get_dashboard_stats,
        crate::handlers::activity_logs::recent_activity,
    ),
    components(
        schemas(
            crate::entities::user::Model,
            crate::entities::UserRole,
            crate::entities::product::Model,
            crate::entities::work_order::Model,
            crate::entities::WorkOrderStatus,
            crate::entities::batch_record::Model,
            crate::entities::manufacturing_step::Model,
            crate::entities::quality_control_test::Model,
            crate::entities::quality_review::Model,
            crate::entities::ReviewDecision,
            crate::entities::activity_log::Model,
            crate::entities::ActivityType,
            crate::entities::EntityKind,

            crate::dto::CreateWorkOrderRequest,
            crate::dto::UpdateWorkOrderRequest,
            crate::dto::WorkOrderWithRelations,
            crate::dto::CreateBatchRecordRequest,
            crate::dto::NewStepInput,
            crate::dto::NewTestInput,
            crate::dto::UpdateBatchRecordRequest,
            crate::dto::BatchRecordWithRelations,
            crate::dto::CreateManufacturingStepRequest,
            crate::dto::UpdateManufacturingStepRequest,
            crate::dto::CreateQualityControlTestRequest,
            crate::dto::UpdateQualityControlTestRequest,
            crate::dto::CreateQualityReviewRequest,
            crate::dto::QualityReviewWithRelations,
            crate::dto::ActivityLogWithUser,
            crate::dto::DashboardStats,

            crate::errors::ErrorResponse,
            crate::errors::FieldError,
            crate::StatusResponse,
        )
    ),
    modifiers(&SessionHeader)
)]
pub struct ApiDoc;

/// Registers the `x-user-id` session header as the `UserId` security scheme.
struct SessionHeader;

impl Modify for SessionHeader {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "UserId",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(USER_ID_HEADER))),
            );
        }
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}
