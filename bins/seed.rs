//! Reset the database to the demo directory data.

use dotenvy::dotenv;
use migration::MigratorTrait;
use tracing::{error, info};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    dotenv().ok();
    common::utils::logging::init_logging_from_env();

    match seed().await {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            error!(service = "seed", event = "seed_failed", error = %e, "seeding failed");
            std::process::ExitCode::FAILURE
        }
    }
}

async fn seed() -> anyhow::Result<()> {
    let cfg = configs::AppConfig::load()?;
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None).await?;

    let summary = service::seed::run(&db).await?;
    info!(
        service = "seed",
        event = "done",
        users = summary.users,
        businesses = summary.businesses,
        products = summary.products,
        "database seeded"
    );

    println!("Sample accounts:");
    for (email, password, role) in service::seed::accounts() {
        println!("  {:<9} {email} / {password}", role.as_str());
    }
    Ok(())
}
