use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entities::{activity_log, user};

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RecentActivityQuery {
    /// Number of entries, clamped to the configured maximum
    pub limit: Option<u64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogWithUser {
    #[serde(flatten)]
    pub activity_log: activity_log::Model,
    pub user: user::Model,
}
