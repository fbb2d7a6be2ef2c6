use colored::*;
use futures::FutureExt;
use sea_orm_migration::prelude::*;
use sea_orm_migration::seaql_migrations;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, EntityTrait};
use std::io::{self, Write};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

const STATUS_COLUMN: usize = 80;

/// Applies every migration that has not been recorded in `seaql_migrations` yet.
pub async fn run_all_migrations(url: &str) {
    let db = sea_orm::Database::connect(url)
        .await
        .expect("DB connection failed");

    <crate::Migrator as MigratorTrait>::install(&db)
        .await
        .expect("Failed to create migration table");

    let applied: Vec<String> = seaql_migrations::Entity::find()
        .all(&db)
        .await
        .expect("Failed to read applied migrations")
        .into_iter()
        .map(|m| m.version)
        .collect();

    println!("Running migrations...");
    let schema_manager = SchemaManager::new(&db);

    for migration in <crate::Migrator as MigratorTrait>::migrations() {
        if applied.iter().any(|v| v == migration.name()) {
            continue;
        }
        run_migration(&schema_manager, migration.as_ref()).await;

        let applied_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs() as i64)
            .unwrap_or_default();
        seaql_migrations::ActiveModel {
            version: Set(migration.name().to_owned()),
            applied_at: Set(applied_at),
        }
        .insert(&db)
        .await
        .expect("Failed to record migration");
    }
}

async fn run_migration(schema_manager: &SchemaManager<'_>, migration: &dyn MigrationTrait) {
    let name_str = format!("Applying {}", migration.name().bold());
    let dots = ".".repeat(STATUS_COLUMN.saturating_sub(name_str.len()));
    print!("{}{} ", name_str, dots);
    io::stdout().flush().ok();

    let start = Instant::now();
    let result = std::panic::AssertUnwindSafe(migration.up(schema_manager))
        .catch_unwind()
        .await;

    match result {
        Ok(Ok(())) => {
            let time_str = format!("({:.2?})", start.elapsed()).dimmed();
            println!("{} {}", "done".green(), time_str);
        }
        Ok(Err(e)) => {
            println!("{} {}", "failed".red(), e);
            std::process::exit(1);
        }
        Err(_) => {
            println!("{}", "failed".red());
            std::process::exit(1);
        }
    }
}
