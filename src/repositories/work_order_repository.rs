use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use std::collections::BTreeMap;

use crate::entities::work_order::{
    ActiveModel as WorkOrderActiveModel, Column, Entity as WorkOrder, Model as WorkOrderModel,
    WorkOrderStatus,
};
use crate::errors::ServiceError;
use crate::services::lifecycle;

use super::{BaseRepository, Repository};

/// Repository for work order operations
#[derive(Debug)]
pub struct WorkOrderRepository<'a, C> {
    base: BaseRepository<'a, C>,
}

impl<'a, C: ConnectionTrait> WorkOrderRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find a work order by ID
    pub async fn find_by_id(&self, id: i32) -> Result<Option<WorkOrderModel>, ServiceError> {
        Ok(WorkOrder::find_by_id(id).one(self.get_db()).await?)
    }

    /// Newest first, optionally restricted to one status
    pub async fn find_all(
        &self,
        status: Option<WorkOrderStatus>,
    ) -> Result<Vec<WorkOrderModel>, ServiceError> {
        let mut query = WorkOrder::find();
        if let Some(status) = status {
            query = query.filter(Column::Status.eq(status));
        }
        Ok(query.order_by_desc(Column::Id).all(self.get_db()).await?)
    }

    /// Highest numeric suffix among `WO-<year>-*` numbers, if any exist.
    pub async fn max_number_suffix(&self, year: i32) -> Result<Option<u32>, ServiceError> {
        let prefix = format!("{}-{}-", lifecycle::WORK_ORDER_PREFIX, year);
        let numbers: Vec<String> = WorkOrder::find()
            .select_only()
            .column(Column::WorkOrderNumber)
            .filter(Column::WorkOrderNumber.starts_with(&prefix))
            .into_tuple()
            .all(self.get_db())
            .await?;

        Ok(numbers
            .iter()
            .filter_map(|number| lifecycle::parse_suffix(number))
            .max())
    }

    pub async fn create(&self, work_order: WorkOrderActiveModel) -> Result<WorkOrderModel, ServiceError> {
        Ok(work_order.insert(self.get_db()).await?)
    }

    pub async fn update(&self, work_order: WorkOrderActiveModel) -> Result<WorkOrderModel, ServiceError> {
        Ok(work_order.update(self.get_db()).await?)
    }

    /// Per-status counts with every status present, zero-filled.
    pub async fn count_by_status(&self) -> Result<BTreeMap<String, u64>, ServiceError> {
        let mut counts = BTreeMap::new();
        for status in WorkOrderStatus::ALL {
            let count = WorkOrder::find()
                .filter(Column::Status.eq(status))
                .count(self.get_db())
                .await?;
            counts.insert(status.to_string(), count);
        }
        Ok(counts)
    }

    /// Orders that reached approved or rejected at or after `since`.
    pub async fn count_closed_since(&self, since: DateTime<Utc>) -> Result<u64, ServiceError> {
        Ok(WorkOrder::find()
            .filter(Column::Status.is_in([WorkOrderStatus::Approved, WorkOrderStatus::Rejected]))
            .filter(Column::StatusChangedAt.gte(since))
            .count(self.get_db())
            .await?)
    }
}

impl<C: ConnectionTrait> Repository<C> for WorkOrderRepository<'_, C> {
    fn get_db(&self) -> &C {
        self.base.get_db()
    }
}
