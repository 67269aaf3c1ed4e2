use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use store::ResilienceConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    pub host: String,
    pub port: u16,
}

impl Server {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Mongo {
    /// Empty disables the document store; the JSON files serve everything.
    pub url: String,
    pub database: String,
    pub timeout_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Storage {
    pub data_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Auth {
    /// Argon2 PHC string, or a plaintext secret.
    pub password: String,
    /// Shared secret carried by the admin cookie.
    pub token: String,
    pub cookie_name: String,
    pub secure_cookie: bool,
}

impl Auth {
    /// Without both secrets every admin request is refused.
    pub fn is_configured(&self) -> bool {
        !self.password.is_empty() && !self.token.is_empty()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: Server,
    pub mongo: Mongo,
    pub storage: Storage,
    pub auth: Auth,
    #[serde(default)]
    pub resilience: ResilienceConfig,
}

impl Settings {
    /// Defaults, then `config.toml` if present, then `PORTFOLIO__SECTION__KEY`
    /// environment variables (a `.env` file is loaded first).
    pub fn new() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8080)?
            .set_default("mongo.url", "")?
            .set_default("mongo.database", "portfolio")?
            .set_default("mongo.timeout_ms", 5000)?
            .set_default("storage.data_dir", "data")?
            .set_default("auth.password", "")?
            .set_default("auth.token", "")?
            .set_default("auth.cookie_name", "admin_token")?
            .set_default("auth.secure_cookie", false)?
            .add_source(
                File::with_name("config.toml")
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix("PORTFOLIO")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}
