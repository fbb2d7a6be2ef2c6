use migration::Migrator;
use std::{env, fs, io, path::Path, process};
use util::config;

mod runner;

/// `migration [up|fresh|clean]`; `up` is the default.
#[tokio::main]
async fn main() {
    let db_path = config::database_path();
    let url = format!("sqlite://{db_path}?mode=rwc");
    let command = env::args().nth(1).unwrap_or_else(|| "up".into());

    let result = match command.as_str() {
        "up" => prepare_dir(&db_path),
        "clean" => drop_db(&db_path),
        "fresh" => drop_db(&db_path).and_then(|_| prepare_dir(&db_path)),
        other => {
            eprintln!("unknown command '{other}', expected up, fresh or clean");
            process::exit(2);
        }
    };
    if let Err(e) = result {
        eprintln!("{db_path}: {e}");
        process::exit(1);
    }

    if command != "clean" {
        runner::run_all_migrations(&url).await;
    }
}

fn drop_db(path: &str) -> io::Result<()> {
    let file = Path::new(path);
    if file.exists() {
        fs::remove_file(file)?;
        println!("Removed attendance database {}", file.display());
    }
    Ok(())
}

fn prepare_dir(path: &str) -> io::Result<()> {
    match Path::new(path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}
