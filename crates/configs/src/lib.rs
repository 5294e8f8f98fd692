use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

pub const DEFAULT_CUSTOMER_API_URL: &str =
    "https://kunde-api-dnecdehugrhmbghu.northeurope-01.azurewebsites.net";
pub const DEFAULT_VEHICLE_API_URL: &str =
    "https://bildatabasedemo-hzfbegh6eqfraqdd.northeurope-01.azurewebsites.net";

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub registries: RegistryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 1 }
fn default_connect_timeout() -> u64 { 30 }
fn default_acquire_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegistryConfig {
    #[serde(default = "default_customer_url")]
    pub customer_base_url: String,
    #[serde(default = "default_vehicle_url")]
    pub vehicle_base_url: String,
    /// Upper bound per registry lookup; unset means no bound.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            customer_base_url: default_customer_url(),
            vehicle_base_url: default_vehicle_url(),
            timeout_secs: None,
        }
    }
}

fn default_customer_url() -> String { DEFAULT_CUSTOMER_API_URL.to_string() }
fn default_vehicle_url() -> String { DEFAULT_VEHICLE_API_URL.to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

/// Build a SQLite URL from a plain file path (the `DB_PATH` convention).
pub fn sqlite_url_from_path(path: &str) -> String {
    format!("sqlite://{}?mode=rwc", path)
}

impl AppConfig {
    /// Load `config.toml` when present, otherwise start from defaults; then apply
    /// environment overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) => match e.downcast_ref::<std::io::Error>() {
                Some(io) if io.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
                _ => return Err(e),
            },
        };
        cfg.apply_env(|k| std::env::var(k).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Environment values win over file values.
    pub fn apply_env<F>(&mut self, get: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(h) = get("SERVER_HOST") { self.server.host = h; }
        if let Some(p) = get("SERVER_PORT").and_then(|p| p.parse::<u16>().ok()) { self.server.port = p; }
        if let Some(w) = get("TOKIO_WORKER_THREADS").and_then(|w| w.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(url) = get("DATABASE_URL") {
            self.database.url = url;
        } else if let Some(path) = get("DB_PATH") {
            self.database.url = sqlite_url_from_path(&path);
        }
        if let Some(s) = get("JWT_SECRET") { self.auth.jwt_secret = s; }
        if let Some(u) = get("CUSTOMER_API_URL") { self.registries.customer_base_url = u; }
        if let Some(u) = get("VEHICLE_API_URL") { self.registries.vehicle_base_url = u; }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize();
        self.database.validate()?;
        self.auth.normalize();
        self.registries.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize(&mut self) {
        if self.url.trim().is_empty() {
            self.url = sqlite_url_from_path("abonnement.db");
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.url.to_lowercase().starts_with("sqlite:") {
            return Err(anyhow!("database.url must start with sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

impl AuthConfig {
    fn normalize(&mut self) {
        if self.jwt_secret.trim().is_empty() {
            self.jwt_secret = "dev-secret-change-me".to_string();
        }
    }
}

impl RegistryConfig {
    fn validate(&self) -> Result<()> {
        for (name, url) in [("customer_base_url", &self.customer_base_url), ("vehicle_base_url", &self.vehicle_base_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(anyhow!("registries.{name} must start with http(s)"));
            }
        }
        if self.timeout_secs == Some(0) {
            return Err(anyhow!("registries.timeout_secs must be positive"));
        }
        Ok(())
    }
}
