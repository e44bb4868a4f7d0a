use clap::{Parser, Subcommand};
use sea_orm::Database;
use sea_orm_migration::prelude::*;

#[derive(Debug, Parser)]
#[command(name = "migration", about = "Manage the telexpenses schema")]
struct Args {
    /// SQLite connection string.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./telexpenses.db?mode=rwc"
    )]
    database_url: String,
    #[command(subcommand)]
    action: Option<Action>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Action {
    /// Apply every pending migration (default).
    Up,
    /// Roll back the last `steps` migrations.
    Down {
        #[arg(default_value_t = 1)]
        steps: u32,
    },
    /// Drop everything and apply all migrations again.
    Fresh,
    /// Print which migrations are applied.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), DbErr> {
    let args = Args::parse();
    let db = Database::connect(&args.database_url).await?;

    match args.action.unwrap_or(Action::Up) {
        Action::Up => migration::Migrator::up(&db, None).await,
        Action::Down { steps } => migration::Migrator::down(&db, Some(steps)).await,
        Action::Fresh => migration::Migrator::fresh(&db).await,
        Action::Status => migration::Migrator::status(&db).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_up() {
        let args = Args::try_parse_from(["migration"]).unwrap();
        assert_eq!(args.action, None);

        let args =
            Args::try_parse_from(["migration", "--database-url", "sqlite::memory:", "fresh"])
                .unwrap();
        assert_eq!(args.database_url, "sqlite::memory:");
        assert_eq!(args.action, Some(Action::Fresh));
    }

    #[test]
    fn down_takes_a_step_count() {
        let args = Args::try_parse_from(["migration", "down", "2"]).unwrap();
        assert_eq!(args.action, Some(Action::Down { steps: 2 }));

        let args = Args::try_parse_from(["migration", "down"]).unwrap();
        assert_eq!(args.action, Some(Action::Down { steps: 1 }));
    }
}
