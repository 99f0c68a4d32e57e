pub mod activity_logs;
pub mod batch_records;
pub mod dashboard;
pub mod manufacturing_steps;
pub mod quality_reviews;
pub mod work_orders;

pub use activity_logs::{ActivityLogWithUser, RecentActivityQuery};
pub use batch_records::{
    BatchRecordWithRelations, CreateBatchRecordRequest, NewStepInput, NewTestInput,
    UpdateBatchRecordRequest,
};
pub use dashboard::DashboardStats;
pub use manufacturing_steps::{CreateManufacturingStepRequest, UpdateManufacturingStepRequest};
pub use quality_control_tests::{CreateQualityControlTestRequest, UpdateQualityControlTestRequest};
pub use quality_reviews::{CreateQualityReviewRequest, QualityReviewListQuery, QualityReviewWithRelations};
pub use work_orders::{
    CreateWorkOrderRequest, UpdateWorkOrderRequest, WorkOrderListQuery, WorkOrderWithRelations,
};

use serde::Deserialize;
use utoipa::IntoParams;

/// `?includeRelations=true` switch shared by the read endpoints.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RelationsQuery {
    /// Embed related records in the response
    #[serde(default)]
    pub include_relations: bool,
}

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`).
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Timestamps accept RFC 3339 or a bare `YYYY-MM-DD` (midnight UTC).
pub(crate) mod timestamp {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{de, Deserialize, Deserializer};

    pub fn parse(raw: &str) -> Result<DateTime<Utc>, String> {
        let raw = raw.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Ok(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|naive| naive.and_utc())
            .ok_or_else(|| format!("invalid timestamp `{}`", raw))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(de::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            Option::<String>::deserialize(deserializer)?
                .map(|raw| parse(&raw).map_err(de::Error::custom))
                .transpose()
        }
    }

    pub mod double_option {
        use super::*;

        pub fn deserialize<'de, D>(
            deserializer: D,
        ) -> Result<Option<Option<DateTime<Utc>>>, D::Error>
        where
            D: Deserializer<'de>,
        {
            super::option::deserialize(deserializer).map(Some)
        }
    }
}
