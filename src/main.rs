use anyhow::Result;
use farmstand_consumerservice::{app_state::AppState, bootstrap, build_app, config, db};

#[tokio::main]
async fn main() -> Result<()> {
    bootstrap::init_tracing();
    bootstrap::init_env();

    let config = config::load()?;

    if config.database.run_migrations {
        tracing::info!("Running migrations...");
        let migrations_count =
            db::run_migrations_blocking(db::MIGRATIONS, &config.database.url).await?;
        tracing::info!("Run {} new migrations successfully", migrations_count);
    }

    tracing::info!("Bootstrapping...");
    let pool = db::create_pool(&config.database).await?;
    let app = build_app(AppState::from_pool(pool));

    bootstrap::serve("ConsumerService", app, config.server.port).await?;

    tracing::info!("Connection pool closed");
    Ok(())
}
