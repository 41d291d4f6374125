use config::{Config, ConfigError, Environment, File};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_SESSION_TTL_SECONDS: i64 = 30 * 24 * 60 * 60;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    pub smtp: Option<SmtpConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AuthConfig {
    pub session_secret: Option<String>,
    #[serde(default = "default_session_ttl")]
    pub session_ttl_seconds: i64,
    /// Use the `__Secure-` cookie name and the Secure attribute (HTTPS deployments)
    #[serde(default)]
    pub secure_cookies: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    #[serde(default = "default_llm_model")]
    pub model: String,
    pub base_url: Option<String>,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SmtpConfig {
    pub host: String,
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// Sender address; falls back to `username`
    pub from: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

fn default_session_ttl() -> i64 {
    DEFAULT_SESSION_TTL_SECONDS
}

fn default_llm_model() -> String {
    recap_llm_sdk::models::groq::DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_smtp_port() -> u16 {
    587
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: get_default_db_path(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_secret: None,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            secure_cookies: false,
        }
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_llm_model(),
            base_url: None,
            max_tokens: default_max_tokens(),
        }
    }
}

impl SmtpConfig {
    pub fn from_address(&self) -> Option<&str> {
        self.from.as_deref().or(self.username.as_deref())
    }
}

impl AppConfig {
    /// Load `~/.config/recap/server.toml`, writing a commented default on first run
    pub fn load() -> Result<(Self, PathBuf), ConfigError> {
        let config_path = get_config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let config = Self::load_from_file(&config_path)?;
        Ok((config, config_path))
    }

    /// Load an explicit config file, then apply environment overrides
    pub fn load_from_file(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::Message(format!(
                "Configuration file not found: {}",
                config_path.display()
            )));
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.to_path_buf()))
            .add_source(Environment::with_prefix("RECAP").separator("__"))
            .set_override_option("llm.api_key", env_var("GROQ_API_KEY"))?
            .set_override_option("smtp.host", env_var("SMTP_HOST"))?
            .set_override_option("smtp.port", env_var("SMTP_PORT"))?
            .set_override_option("smtp.username", env_var("SMTP_USER"))?
            .set_override_option("smtp.password", env_var("SMTP_PASS"))?
            .set_override_option("database.path", env_var("DATABASE_PATH"))?
            .set_override_option("auth.session_secret", env_var("SESSION_SECRET"))?
            .build()?;

        let mut config: AppConfig = builder.try_deserialize()?;

        config.database.path = expand_tilde(&config.database.path);

        if config.auth.session_secret.is_none() {
            let new_secret = generate_session_secret();
            tracing::info!("Generated new session secret");

            if let Err(e) = persist_session_secret(config_path, &new_secret) {
                tracing::warn!("Failed to save session secret to config file: {e}");
                tracing::warn!("Sessions will be invalidated on next restart");
            }
            config.auth.session_secret = Some(new_secret);
        }

        Ok(config)
    }

    /// The session secret; always present after loading
    pub fn session_secret(&self) -> &str {
        self.auth.session_secret.as_deref().unwrap_or_default()
    }
}

const DEFAULT_CONFIG: &str = r#"[server]
host = "127.0.0.1"
port = 3000

[database]
path = "~/.local/share/recap/recap.db"

[auth]
# Secret used to sign session tokens. Generated on first start when absent.
# session_secret = "change-me"
# session_ttl_seconds = 2592000
# secure_cookies = true

[llm]
# api_key = "your-groq-key"   # or set GROQ_API_KEY
# model = "llama-3.1-8b-instant"

# [smtp]
# host = "smtp.example.com"   # or set SMTP_HOST / SMTP_PORT / SMTP_USER / SMTP_PASS
# port = 587
# username = "mailer@example.com"
# password = "app-password"
"#;

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

fn expand_tilde(path: &Path) -> PathBuf {
    if path.starts_with("~") {
        if let Some(home) = home::home_dir() {
            let path_str = path.to_string_lossy();
            return PathBuf::from(path_str.replacen('~', &home.to_string_lossy(), 1));
        }
    }
    path.to_path_buf()
}

fn get_config_path() -> PathBuf {
    match home::home_dir() {
        Some(home) => home.join(".config/recap/server.toml"),
        None => PathBuf::from("server.toml"),
    }
}

fn get_default_db_path() -> PathBuf {
    match home::home_dir() {
        Some(home) => home.join(".local/share/recap/recap.db"),
        None => PathBuf::from("recap.db"),
    }
}

/// 48 random bytes, base64 encoded (same shape as `openssl rand -base64 48`)
fn generate_session_secret() -> String {
    let mut rng = rand::rng();
    let random_bytes: Vec<u8> = (0..48).map(|_| rng.random()).collect();
    base64::Engine::encode(&base64::engine::general_purpose::STANDARD, &random_bytes)
}

/// Write `session_secret` into the `[auth]` table, creating the table if needed
fn persist_session_secret(config_path: &Path, secret: &str) -> Result<(), std::io::Error> {
    let content = std::fs::read_to_string(config_path)?;
    let mut lines: Vec<String> = content.lines().map(|s| s.to_string()).collect();
    let secret_line = format!("session_secret = \"{}\"", secret);

    let auth_start = lines.iter().position(|l| l.trim() == "[auth]");

    match auth_start {
        Some(start) => {
            let section_end = lines
                .iter()
                .enumerate()
                .skip(start + 1)
                .find(|(_, l)| {
                    let t = l.trim();
                    t.starts_with('[') && t.ends_with(']')
                })
                .map(|(i, _)| i)
                .unwrap_or(lines.len());

            let existing = (start + 1..section_end).find(|&i| {
                let t = lines[i].trim();
                t.starts_with("session_secret") || t.starts_with("# session_secret")
            });

            match existing {
                Some(i) => lines[i] = secret_line,
                None => lines.insert(start + 1, secret_line),
            }
        }
        None => {
            lines.push(String::new());
            lines.push("[auth]".to_string());
            lines.push(secret_line);
        }
    }

    std::fs::write(config_path, lines.join("\n") + "\n")
}
