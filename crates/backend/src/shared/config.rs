use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub security: SecurityConfig,
    #[serde(default)]
    pub commerce: CommerceConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

/// Public URLs used when rendering links and asset tags
#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub base_url: String,
    pub assets_url: String,
    pub uploads_url: String,
    /// Directory served under `assets_url`
    #[serde(default = "default_assets_dir")]
    pub assets_dir: String,
}

fn default_assets_dir() -> String {
    "assets".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:3000".to_string(),
            assets_url: "/assets".to_string(),
            uploads_url: "/uploads".to_string(),
            assets_dir: default_assets_dir(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SecurityConfig {
    /// Signing key for nonces and admin tokens; generated at startup when empty
    #[serde(default)]
    pub secret: String,
    #[serde(default = "default_nonce_lifetime")]
    pub nonce_lifetime_hours: u32,
    /// `secret` was generated for this process and dies with it
    #[serde(skip)]
    pub ephemeral_secret: bool,
}

fn default_nonce_lifetime() -> u32 {
    24
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            nonce_lifetime_hours: default_nonce_lifetime(),
            ephemeral_secret: false,
        }
    }
}

/// Availability of the commerce catalog the slider depends on
#[derive(Debug, Deserialize, Clone)]
pub struct CommerceConfig {
    pub enabled: bool,
}

impl Default for CommerceConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Default configuration embedded in the binary
pub const DEFAULT_CONFIG: &str = r#"
[database]
path = "target/db/wcs.db"

[server]
host = "127.0.0.1"
port = 3000

[site]
base_url = "http://127.0.0.1:3000"
assets_url = "/assets"
uploads_url = "/uploads"

[security]
secret = ""
nonce_lifetime_hours = 24

[commerce]
enabled = true
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return parse_config(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    parse_config(DEFAULT_CONFIG)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let mut config: Config = toml::from_str(contents)?;
    if config.security.nonce_lifetime_hours < 2 {
        anyhow::bail!("security.nonce_lifetime_hours must be at least 2");
    }
    if config.security.secret.trim().is_empty() {
        tracing::warn!("security.secret is empty, generating an ephemeral secret");
        config.security.secret = generate_secret();
        config.security.ephemeral_secret = true;
    }
    Ok(config)
}

/// Random 256-bit key, base64 encoded
fn generate_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    use rand::Rng;

    let mut rng = rand::thread_rng();
    let random_bytes: Vec<u8> = (0..32).map(|_| rng.gen::<u8>()).collect();
    general_purpose::STANDARD.encode(&random_bytes)
}

/// Get the database file path from configuration
/// Resolves relative paths relative to the executable directory
pub fn get_database_path(config: &Config) -> anyhow::Result<PathBuf> {
    let db_path_str = &config.database.path;
    let db_path = Path::new(db_path_str);

    if db_path.is_absolute() {
        return Ok(db_path.to_path_buf());
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            return Ok(exe_dir.join(db_path));
        }
    }

    Ok(PathBuf::from(db_path_str))
}
