use std::sync::Arc;

use batchtrack_api::{
    config::AppConfig,
    db,
    services::{
        dashboard::DashboardService,
        seed::{seed_demo_data, SeedOutcome},
    },
};

#[tokio::test]
async fn demo_data_covers_every_stage_and_seeds_once() {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}?mode=rwc", dir.path().join("seed.db").display());
    let cfg = AppConfig::new(url, "test".to_string());

    let pool = db::establish_connection_from_app_config(&cfg).await.unwrap();
    db::run_migrations(&pool).await.unwrap();
    let pool = Arc::new(pool);

    let outcome = seed_demo_data(pool.clone()).await.unwrap();
    assert_eq!(
        outcome,
        SeedOutcome::Seeded {
            users: 3,
            products: 5,
            work_orders: 4
        }
    );

    let stats = DashboardService::new(pool.clone()).stats().await.unwrap();
    assert_eq!(stats.status_counts["approved"], 1);
    assert_eq!(stats.status_counts["in_progress"], 1);
    assert_eq!(stats.status_counts["under_review"], 1);
    assert_eq!(stats.status_counts["planned"], 1);
    assert_eq!(stats.pending_qc_reviews, 1);
    assert_eq!(stats.completed_this_month, 1);

    assert_eq!(seed_demo_data(pool).await.unwrap(), SeedOutcome::Skipped);
}
