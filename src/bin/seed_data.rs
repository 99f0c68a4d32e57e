//! Seed data script: populates the database with demo users, products and
//! work orders in every lifecycle stage.
//!
//! Run with: cargo run --bin seed-data -- --migrate
//!
//! Does nothing when the database already has users.

use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use batchtrack_api::{
    db::{self, DbConfig},
    services::seed::{seed_demo_data, SeedOutcome},
};

#[derive(Debug, Parser)]
#[command(name = "seed-data", about = "Populate BatchTrack with demo data")]
struct Args {
    /// Database to seed
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite://batchtrack.db?mode=rwc"
    )]
    database_url: String,

    /// Run migrations before seeding
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let args = Args::parse();

    info!("=== BatchTrack Seed Data ===");
    info!("Connecting to database: {}", args.database_url);

    let pool = db::establish_connection_with_config(&DbConfig {
        url: args.database_url.clone(),
        max_connections: 5,
        min_connections: 1,
        connect_timeout: Duration::from_secs(10),
        idle_timeout: Duration::from_secs(60),
        acquire_timeout: Duration::from_secs(10),
    })
    .await?;

    if args.migrate {
        db::run_migrations(&pool).await?;
    }

    match seed_demo_data(Arc::new(pool)).await? {
        SeedOutcome::Skipped => {
            info!("Database already has users; nothing to seed");
        }
        SeedOutcome::Seeded {
            users,
            products,
            work_orders,
        } => {
            info!(
                "Created {} users, {} products and {} work orders",
                users, products, work_orders
            );
            info!("");
            info!("Try these API calls:");
            info!("  curl http://localhost:8080/api/work-orders?includeRelations=true");
            info!("  curl http://localhost:8080/api/quality-reviews?pending=true");
            info!("  curl http://localhost:8080/api/dashboard/stats");
            info!("");
            info!("Or explore interactively at: http://localhost:8080/swagger-ui");
        }
    }

    Ok(())
}
