use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_reference_tables::Migration),
            Box::new(m20240101_000002_create_work_order_tables::Migration),
            Box::new(m20240101_000003_create_activity_logs_table::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
    Username,
    FullName,
    Role,
    Email,
    AvatarUrl,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    Name,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum WorkOrders {
    Table,
    Id,
    WorkOrderNumber,
    ProductId,
    BatchSize,
    AssignedOperatorId,
    Status,
    StartDate,
    EndDate,
    Notes,
    StatusChangedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum BatchRecords {
    Table,
    Id,
    WorkOrderId,
    OperatorId,
    BatchNumber,
    CompletionPercentage,
    IsComplete,
    SubmittedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ManufacturingSteps {
    Table,
    Id,
    BatchRecordId,
    Name,
    Description,
    CompletedAt,
    CompletedBy,
    SortOrder,
    CreatedAt,
}

#[derive(DeriveIden)]
enum QualityControlTests {
    Table,
    Id,
    BatchRecordId,
    Name,
    AcceptableRange,
    Result,
    IsPassed,
    CompletedAt,
    CompletedBy,
    CreatedAt,
}

#[derive(DeriveIden)]
enum QualityReviews {
    Table,
    Id,
    BatchRecordId,
    ReviewerId,
    Decision,
    Comments,
    ReviewedAt,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ActivityLogs {
    Table,
    Id,
    UserId,
    ActivityType,
    EntityId,
    EntityType,
    Details,
    CreatedAt,
}

mod m20240101_000001_create_reference_tables {
    use super::{Products, Users};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_reference_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Users::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(Users::Username)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Users::FullName).string().not_null())
                        .col(
                            ColumnDef::new(Users::Role)
                                .string_len(32)
                                .not_null()
                                .default("operator"),
                        )
                        .col(ColumnDef::new(Users::Email).string().null())
                        .col(ColumnDef::new(Users::AvatarUrl).string().null())
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Products::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Products::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Products::Name).string().not_null())
                        .col(ColumnDef::new(Products::Description).text().null())
                        .col(
                            ColumnDef::new(Products::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Products::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000002_create_work_order_tables {
    use super::{
        BatchRecords, ManufacturingSteps, Products, QualityControlTests, QualityReviews, Users,
        WorkOrders,
    };
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_work_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(WorkOrders::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(WorkOrders::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::WorkOrderNumber)
                                .string_len(32)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(WorkOrders::ProductId).integer().not_null())
                        .col(ColumnDef::new(WorkOrders::BatchSize).integer().not_null())
                        .col(
                            ColumnDef::new(WorkOrders::AssignedOperatorId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::Status)
                                .string_len(32)
                                .not_null()
                                .default("planned"),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::StartDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::EndDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(WorkOrders::Notes).text().null())
                        .col(
                            ColumnDef::new(WorkOrders::StatusChangedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(WorkOrders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_work_orders_product_id")
                                .from(WorkOrders::Table, WorkOrders::ProductId)
                                .to(Products::Table, Products::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_work_orders_assigned_operator_id")
                                .from(WorkOrders::Table, WorkOrders::AssignedOperatorId)
                                .to(Users::Table, Users::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_work_orders_status")
                        .table(WorkOrders::Table)
                        .col(WorkOrders::Status)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(BatchRecords::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(BatchRecords::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        // One batch record per work order.
                        .col(
                            ColumnDef::new(BatchRecords::WorkOrderId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(BatchRecords::OperatorId).integer().not_null())
                        .col(
                            ColumnDef::new(BatchRecords::BatchNumber)
                                .string_len(64)
                                .not_null()
                                .unique_key(),
                        )
                        .col(
                            ColumnDef::new(BatchRecords::CompletionPercentage)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(BatchRecords::IsComplete)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(BatchRecords::SubmittedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(BatchRecords::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(BatchRecords::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_batch_records_work_order_id")
                                .from(BatchRecords::Table, BatchRecords::WorkOrderId)
                                .to(WorkOrders::Table, WorkOrders::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_batch_records_operator_id")
                                .from(BatchRecords::Table, BatchRecords::OperatorId)
                                .to(Users::Table, Users::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ManufacturingSteps::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ManufacturingSteps::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(ManufacturingSteps::BatchRecordId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(ManufacturingSteps::Name).string().not_null())
                        .col(ColumnDef::new(ManufacturingSteps::Description).text().null())
                        .col(
                            ColumnDef::new(ManufacturingSteps::CompletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ManufacturingSteps::CompletedBy)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(ManufacturingSteps::SortOrder)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ManufacturingSteps::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_manufacturing_steps_batch_record_id")
                                .from(ManufacturingSteps::Table, ManufacturingSteps::BatchRecordId)
                                .to(BatchRecords::Table, BatchRecords::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_manufacturing_steps_batch_record_id")
                        .table(ManufacturingSteps::Table)
                        .col(ManufacturingSteps::BatchRecordId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(QualityControlTests::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(QualityControlTests::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(QualityControlTests::BatchRecordId)
                                .integer()
                                .not_null(),
                        )
                        .col(ColumnDef::new(QualityControlTests::Name).string().not_null())
                        .col(
                            ColumnDef::new(QualityControlTests::AcceptableRange)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(QualityControlTests::Result).string().null())
                        .col(ColumnDef::new(QualityControlTests::IsPassed).boolean().null())
                        .col(
                            ColumnDef::new(QualityControlTests::CompletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityControlTests::CompletedBy)
                                .integer()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(QualityControlTests::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_quality_control_tests_batch_record_id")
                                .from(
                                    QualityControlTests::Table,
                                    QualityControlTests::BatchRecordId,
                                )
                                .to(BatchRecords::Table, BatchRecords::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_quality_control_tests_batch_record_id")
                        .table(QualityControlTests::Table)
                        .col(QualityControlTests::BatchRecordId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(QualityReviews::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(QualityReviews::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        // At most one review per batch record.
                        .col(
                            ColumnDef::new(QualityReviews::BatchRecordId)
                                .integer()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(QualityReviews::ReviewerId).integer().not_null())
                        .col(
                            ColumnDef::new(QualityReviews::Decision)
                                .string_len(16)
                                .not_null(),
                        )
                        .col(ColumnDef::new(QualityReviews::Comments).text().null())
                        .col(
                            ColumnDef::new(QualityReviews::ReviewedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityReviews::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_quality_reviews_batch_record_id")
                                .from(QualityReviews::Table, QualityReviews::BatchRecordId)
                                .to(BatchRecords::Table, BatchRecords::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_quality_reviews_reviewer_id")
                                .from(QualityReviews::Table, QualityReviews::ReviewerId)
                                .to(Users::Table, Users::Id),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(QualityReviews::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(QualityControlTests::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(ManufacturingSteps::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(BatchRecords::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(WorkOrders::Table).to_owned())
                .await
        }
    }
}

mod m20240101_000003_create_activity_logs_table {
    use super::{ActivityLogs, Users};
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_activity_logs_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(ActivityLogs::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ActivityLogs::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(ActivityLogs::UserId).integer().not_null())
                        .col(
                            ColumnDef::new(ActivityLogs::ActivityType)
                                .string_len(48)
                                .not_null(),
                        )
                        .col(ColumnDef::new(ActivityLogs::EntityId).integer().null())
                        .col(ColumnDef::new(ActivityLogs::EntityType).string_len(32).null())
                        .col(ColumnDef::new(ActivityLogs::Details).text().null())
                        .col(
                            ColumnDef::new(ActivityLogs::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_activity_logs_user_id")
                                .from(ActivityLogs::Table, ActivityLogs::UserId)
                                .to(Users::Table, Users::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_activity_logs_created_at")
                        .table(ActivityLogs::Table)
                        .col(ActivityLogs::CreatedAt)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(ActivityLogs::Table).to_owned())
                .await
        }
    }
}
