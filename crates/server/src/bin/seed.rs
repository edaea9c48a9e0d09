//! Seed tool: ensures a default admin account exists.
//!
//! Idempotent. Run once after provisioning a fresh database, or any time;
//! an existing account is left untouched.
//!
//! ```text
//! cargo run -p kuber-server --bin kuber-seed
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use kuber_core::Email;
use kuber_server::config::Config;
use kuber_server::db::{self, AdminRepository, admins::NewAdmin};
use kuber_server::services::auth;

const SEED_EMAIL: &str = "admin@kuber.com";
const SEED_PASSWORD: &str = "admin123";
const SEED_NAME: &str = "Kuber Admin";

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kuber_seed=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    let pool = db::create_pool(&config.database_url)
        .await
        .expect("Failed to create database pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let repo = AdminRepository::new(&pool);

    match repo.find_by_email(SEED_EMAIL).await {
        Ok(Some(_)) => {
            tracing::info!(email = SEED_EMAIL, "Admin already exists, nothing to do");
        }
        Ok(None) => {
            let email = Email::parse(SEED_EMAIL).expect("Seed email is valid");
            let password_hash =
                auth::hash_password(SEED_PASSWORD).expect("Failed to hash seed password");

            repo.create(&NewAdmin {
                email: &email,
                password_hash: &password_hash,
                name: SEED_NAME,
                role: "admin",
            })
            .await
            .expect("Failed to create seed admin");

            tracing::info!(email = SEED_EMAIL, "Seed admin created");
            tracing::warn!("Default credentials are for first login only. Change the password.");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to query admins");
            std::process::exit(1);
        }
    }
}
