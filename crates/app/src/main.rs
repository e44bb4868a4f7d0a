use std::sync::Arc;

use chrono_tz::Tz;
use migration::{Migrator, MigratorTrait};
use settings::Database;

use crate::error::{AppError, Result};

mod error;
mod settings;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "telexpenses={level},telegram_bot={level},engine={level},migration={level}",
            level = settings.app.level
        ))
        .init();

    let timezone: Tz = settings.telegram.timezone.parse().map_err(|err| {
        AppError::Timezone(format!("{}: {err}", settings.telegram.timezone))
    })?;
    tracing::info!("Using time zone {timezone}");

    let db = parse_database(&settings.database).await?;
    let engine = engine::Engine::builder()
        .database(db)
        .timezone(timezone)
        .build()
        .await?;

    let bot = telegram_bot::Bot::builder()
        .token(&settings.telegram.token)
        .allowed_users(settings.telegram.allowed_users.clone())
        .timezone(timezone)
        .store(Arc::new(engine))
        .build()
        .map_err(AppError::Bot)?;
    bot.run().await;

    Ok(())
}

async fn parse_database(config: &Database) -> Result<sea_orm::DatabaseConnection> {
    let url = match config {
        Database::Memory => {
            tracing::warn!("Using an in-memory database, expenses are lost on exit");
            String::from("sqlite::memory:")
        }
        Database::Sqlite(path) => format!("sqlite:{path}?mode=rwc"),
    };

    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}
