//! Immutable startup configuration, read once from env/.env.

/// Built by `Settings::from_env` at startup and passed explicitly to the
/// components that need it.
#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub listen_addr: String,
}

impl Settings {
    pub fn from_env() -> Self {
        // .env is optional; process env wins.
        dotenvy::dotenv().ok();
        Settings {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://veribakery.db".into()),
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
        }
    }
}
