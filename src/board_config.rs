//! Configuration for hireboard, read from `.hireboard/hireboard.toml`.
//!
//! Settings are layered: file → environment → CLI. When the project has no
//! config file, the user-level file under the platform config directory
//! (`~/.config/hireboard/hireboard.toml` on Linux) is used instead.
//!
//! # Configuration File Format
//!
//! ```toml
//! [store]
//! backend = "sqlite"
//! db_path = ".hireboard/hireboard.db"
//!
//! [store.rest]
//! url = "https://example.supabase.co"
//! api_key_env = "HIREBOARD_API_KEY"
//!
//! [board]
//! headers = ["Aplicado", "Triagem", "Entrevista Técnica", "Adequação à Cultura", "Oferta Enviada", "Contratado"]
//!
//! [interviews]
//! upcoming_limit = 7
//!
//! [server]
//! port = 3141
//!
//! [logging]
//! dir = ".hireboard/logs"
//! json = false
//! ```

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::pipeline::stage::STAGES;

pub const CONFIG_DIR: &str = ".hireboard";
pub const CONFIG_FILE: &str = "hireboard.toml";
pub const ENV_STORE_URL: &str = "HIREBOARD_STORE_URL";
pub const DEFAULT_API_KEY_ENV: &str = "HIREBOARD_API_KEY";

/// Which `Store` implementation backs the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Sqlite,
    Rest,
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Sqlite => write!(f, "sqlite"),
            Backend::Rest => write!(f, "rest"),
        }
    }
}

impl std::str::FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sqlite" => Ok(Backend::Sqlite),
            "rest" => Ok(Backend::Rest),
            _ => bail!("Invalid backend '{}': expected 'sqlite' or 'rest'", s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestSection {
    /// Base URL of the hosted table service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_api_key_env() -> String {
    DEFAULT_API_KEY_ENV.to_string()
}

impl Default for RestSection {
    fn default() -> Self {
        Self {
            url: None,
            api_key_env: default_api_key_env(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreSection {
    #[serde(default)]
    pub backend: Backend,
    /// SQLite database path, relative to the project directory.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
    #[serde(default)]
    pub rest: RestSection,
}

fn default_db_path() -> PathBuf {
    PathBuf::from(CONFIG_DIR).join("hireboard.db")
}

impl Default for StoreSection {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            db_path: default_db_path(),
            rest: RestSection::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardSection {
    /// Column header texts in stage order. Written back as the candidate
    /// status on drop.
    #[serde(default = "default_headers")]
    pub headers: Vec<String>,
}

fn default_headers() -> Vec<String> {
    STAGES.iter().map(|s| s.as_str().to_string()).collect()
}

impl Default for BoardSection {
    fn default() -> Self {
        Self {
            headers: default_headers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewsSection {
    #[serde(default = "default_upcoming_limit")]
    pub upcoming_limit: usize,
}

fn default_upcoming_limit() -> usize {
    7
}

impl Default for InterviewsSection {
    fn default() -> Self {
        Self {
            upcoming_limit: default_upcoming_limit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3141
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    /// Enables file logging into this directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
    /// Write the log file as JSON lines.
    #[serde(default)]
    pub json: bool,
}

/// The complete hireboard.toml structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HireboardToml {
    #[serde(default)]
    pub store: StoreSection,
    #[serde(default)]
    pub board: BoardSection,
    #[serde(default)]
    pub interviews: InterviewsSection,
    #[serde(default)]
    pub server: ServerSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

impl HireboardToml {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse hireboard.toml")
    }

    /// Load `hireboard.toml` from `config_dir`, or defaults if it is absent.
    pub fn load_or_default(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            toml::to_string_pretty(self).context("Failed to serialize hireboard.toml")?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    /// Column headers as a fixed array, falling back to the stage labels
    /// when the configured list is not exactly six entries.
    pub fn headers(&self) -> [String; 6] {
        match <[String; 6]>::try_from(self.board.headers.clone()) {
            Ok(headers) => headers,
            Err(_) => STAGES.map(|s| s.as_str().to_string()),
        }
    }

    /// Validate the configuration and return any warnings.
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.board.headers.len() != STAGES.len() {
            warnings.push(format!(
                "board.headers has {} entries, expected {}; stage labels will be used",
                self.board.headers.len(),
                STAGES.len()
            ));
        }
        for (idx, header) in self.board.headers.iter().enumerate() {
            if header.trim().is_empty() {
                warnings.push(format!("board.headers[{}] is blank", idx));
            }
        }
        if self.store.backend == Backend::Rest && self.store.rest.url.is_none() {
            warnings.push(format!(
                "store.backend is 'rest' but store.rest.url is not set (can also come from {})",
                ENV_STORE_URL
            ));
        }
        if self.interviews.upcoming_limit == 0 {
            warnings.push("interviews.upcoming_limit is 0; no interviews will be listed".into());
        }

        warnings
    }
}

/// User-level config file, used when the project has none.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hireboard").join(CONFIG_FILE))
}

/// Resolved configuration for one invocation.
///
/// Merges settings from:
/// 1. hireboard.toml (project, else user-level)
/// 2. Environment variables (and `.env`)
/// 3. CLI arguments
#[derive(Debug, Clone)]
pub struct BoardConfig {
    pub project_dir: PathBuf,
    pub config_dir: PathBuf,
    /// File the settings were read from, if any.
    pub source: Option<PathBuf>,
    pub toml: HireboardToml,
    pub verbose: bool,
    pub yes: bool,
    pub cli_backend: Option<Backend>,
    pub cli_db_path: Option<PathBuf>,
}

impl BoardConfig {
    pub fn new(project_dir: PathBuf) -> Result<Self> {
        let project_dir = project_dir
            .canonicalize()
            .context("Failed to resolve project directory")?;
        let config_dir = project_dir.join(CONFIG_DIR);
        let project_file = config_dir.join(CONFIG_FILE);

        let (toml, source) = if project_file.exists() {
            (HireboardToml::load(&project_file)?, Some(project_file))
        } else {
            match user_config_path().filter(|p| p.exists()) {
                Some(user_file) => (HireboardToml::load(&user_file)?, Some(user_file)),
                None => (HireboardToml::default(), None),
            }
        };

        Ok(Self {
            project_dir,
            config_dir,
            source,
            toml,
            verbose: false,
            yes: false,
            cli_backend: None,
            cli_db_path: None,
        })
    }

    /// Create a BoardConfig with CLI overrides.
    pub fn with_cli_args(
        project_dir: PathBuf,
        verbose: bool,
        yes: bool,
        backend: Option<Backend>,
        db_path: Option<PathBuf>,
    ) -> Result<Self> {
        let mut config = Self::new(project_dir)?;
        config.verbose = verbose;
        config.yes = yes;
        config.cli_backend = backend;
        config.cli_db_path = db_path;
        Ok(config)
    }

    /// Path of the project-level config file.
    pub fn config_path(&self) -> PathBuf {
        self.config_dir.join(CONFIG_FILE)
    }

    /// Backend (CLI → file → default).
    pub fn backend(&self) -> Backend {
        self.cli_backend.unwrap_or(self.toml.store.backend)
    }

    /// SQLite database path (CLI → file), resolved against the project dir.
    pub fn db_path(&self) -> PathBuf {
        let path = self
            .cli_db_path
            .clone()
            .unwrap_or_else(|| self.toml.store.db_path.clone());
        if path.is_absolute() {
            path
        } else {
            self.project_dir.join(path)
        }
    }

    /// REST base URL (env → file).
    pub fn rest_url(&self) -> Option<String> {
        std::env::var(ENV_STORE_URL)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.toml.store.rest.url.clone())
    }

    /// REST API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        let var = &self.toml.store.rest.api_key_env;
        std::env::var(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .with_context(|| format!("{} is not set", var))
    }

    pub fn headers(&self) -> [String; 6] {
        self.toml.headers()
    }

    pub fn upcoming_limit(&self) -> usize {
        self.toml.interviews.upcoming_limit
    }

    pub fn port(&self) -> u16 {
        self.toml.server.port
    }

    /// Log directory resolved against the project dir.
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.toml.logging.dir.as_ref().map(|dir| {
            if dir.is_absolute() {
                dir.clone()
            } else {
                self.project_dir.join(dir)
            }
        })
    }

    pub fn log_json(&self) -> bool {
        self.toml.logging.json
    }

    pub fn validate(&self) -> Vec<String> {
        self.toml.validate()
    }
}
