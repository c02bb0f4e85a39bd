mod cli;

use fittrack::config::{self, Config};
use fittrack::{export, menu::Menu, seed};
use fittrack_db::migrations;
use fittrack_db::pool::{get_conn, init_pool, DbPool};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use rusqlite::{Connection, OpenFlags};
use std::io;
use std::path::{Path, PathBuf};

/// Load config and apply the `--db` override.
fn resolve_config(config_path: Option<&Path>, db_override: Option<PathBuf>) -> Result<Config> {
    let mut config = config::load_config_or_default(config_path)?;
    if let Some(db) = db_override {
        config.database.path = db;
    }
    Ok(config)
}

/// Load config, apply the `--db` override and open the pool.
fn open_pool(config_path: Option<&Path>, db_override: Option<PathBuf>) -> Result<DbPool> {
    let config = resolve_config(config_path, db_override)?;

    let db_path = config.database.path.to_string_lossy();
    let pool = init_pool(&db_path, config.database.pool_size)
        .with_context(|| format!("Failed to open database {}", db_path))?;

    Ok(pool)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag.
    // Logs go to stderr; stdout carries the menu and JSON output.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "fittrack=debug,fittrack_db=debug".to_string()
        } else {
            "fittrack=info,fittrack_db=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(io::stderr)
        .init();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => {
            let pool = open_pool(cli.config.as_deref(), cli.db)?;
            let stdin = io::stdin();
            let stdout = io::stdout();
            Menu::new(pool, stdin.lock(), stdout.lock()).run()
        }
        Commands::Seed => {
            let pool = open_pool(cli.config.as_deref(), cli.db)?;
            let conn = get_conn(&pool)?;
            let summary = seed::seed_demo_data(&conn)?;
            println!(
                "Seeded {} users, {} exercises, {} workouts and {} workout exercises",
                summary.users, summary.exercises, summary.workouts, summary.workout_exercises
            );
            Ok(())
        }
        Commands::Export { pretty } => {
            let pool = open_pool(cli.config.as_deref(), cli.db)?;
            let conn = get_conn(&pool)?;
            let snapshot = export::export_all(&conn)?;
            let json = if pretty {
                serde_json::to_string_pretty(&snapshot)?
            } else {
                serde_json::to_string(&snapshot)?
            };
            println!("{}", json);
            Ok(())
        }
        Commands::Version => {
            println!(
                "fittrack {} (schema v{})",
                env!("CARGO_PKG_VERSION"),
                migrations::latest_version()
            );

            // Report an existing database without creating or migrating it
            let config = resolve_config(cli.config.as_deref(), cli.db)?;
            let db_path = config.database.path;
            if db_path.exists() {
                let conn = Connection::open_with_flags(&db_path, OpenFlags::SQLITE_OPEN_READ_ONLY)
                    .with_context(|| format!("Failed to open database {}", db_path.display()))?;
                let status = migrations::schema_status(&conn)?;
                println!(
                    "database {}: schema v{}, {} pending",
                    db_path.display(),
                    status.current,
                    status.pending()
                );
            }
            Ok(())
        }
    }
}
