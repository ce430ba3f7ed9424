//! Create or refresh a dashboard user.
//!
//! Usage: `create-user <email> <password> [display name] [admin|editor|viewer]`

use server::{auth::password::hash_password, config::ServerConfig, db, repo::user};
use shared_types::UserRole;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let mut args = std::env::args().skip(1);
    let email = args.next().ok_or("usage: create-user <email> <password> [name] [role]")?;
    let password = args.next().ok_or("missing password")?;
    let display_name = args.next().unwrap_or_else(|| email.clone());
    let role = UserRole::from_str_or_default(&args.next().unwrap_or_else(|| "editor".into()));

    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url, 1).map_err(|e| e.to_string())?;
    db::run_migrations(&pool).await.map_err(|e| e.to_string())?;

    let hash = hash_password(&password).map_err(|e| e.message)?;
    let row = user::upsert(&pool, &email, &hash, &display_name, role)
        .await
        .map_err(|e| e.message)?;
    println!("User {} ({}) saved as {}", row.id, row.email, row.role);
    Ok(())
}
