use serde::{Deserialize, Serialize};
use showcase_identity::IdentityConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub projects: ProjectsConfig,
    #[serde(default)]
    pub identity: IdentityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Root-site content knobs: the site title and the community-wide links
/// behind `/discord`, `/notion` and `/github` on the root domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_site_title")]
    pub title: String,
    #[serde(default)]
    pub discord_link: String,
    #[serde(default)]
    pub notion_link: String,
    #[serde(default)]
    pub github_link: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectsConfig {
    /// SQLite database holding the project table
    #[serde(default = "default_database_path")]
    pub database_path: String,
    /// Optional CSV seed; when the file exists at startup its rows replace
    /// the project table wholesale before the first load.
    #[serde(default = "default_csv_path")]
    pub csv_path: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_site_title() -> String {
    "Bot Showcase".to_string()
}

fn default_database_path() -> String {
    ".data/projects.sqlite".to_string()
}

fn default_csv_path() -> String {
    "projects.csv".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_site_title(),
            discord_link: String::new(),
            notion_link: String::new(),
            github_link: String::new(),
        }
    }
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            csv_path: default_csv_path(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            logging: LoggingConfig::default(),
            site: SiteConfig::default(),
            projects: ProjectsConfig::default(),
            identity: IdentityConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("showcase_config").required(false))
            .add_source(config::Environment::with_prefix("SHOWCASE").separator("__"))
            .build()?;

        config.try_deserialize()
    }

    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            eprintln!("Warning: Failed to load config file: {}. Using defaults.", e);
            Self::default()
        })
    }
}
