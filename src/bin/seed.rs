use newswire::config::Config;
use newswire::database::Database;
use newswire::seed;
use std::process;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("[seed] Failed to load configuration: {err}");
            process::exit(1);
        }
    };

    println!("[seed] Connecting to database: {}", config.database_url);
    let db = match Database::new_with_migrations(&config.database_url).await {
        Ok(db) => db,
        Err(err) => {
            eprintln!("[seed] Database initialisation failed: {err}");
            process::exit(1);
        }
    };

    println!("[seed] Truncating tables and inserting fixture data.");
    if let Err(err) = seed::run(&db).await {
        eprintln!("[seed] Seeding failed: {err}");
        process::exit(1);
    }

    println!("[seed] Done. Topics, users, articles and comments are in place.");
}
