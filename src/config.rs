use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

pub const DEFAULT_API_URL: &str = "https://en.wikipedia.org/w/api.php";
pub const DEFAULT_USER_AGENT: &str = "wiki-rag-chatbot/1.0 (mailto:your-email@example.com)";

/// How a free-text name is turned into one article title.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionPolicy {
    /// Title lookup following redirects; search only to build suggestions.
    #[default]
    Direct,
    /// Always take the top search hit. Can silently pick the wrong person on common names.
    TopSearch,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_url: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub search_limit: usize,
    pub resolution: ResolutionPolicy,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_url: DEFAULT_API_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 15,
            search_limit: 5,
            resolution: ResolutionPolicy::Direct,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Settings {
    /// Optional `wiki_extractor.toml`, then `WIKI_*` environment variables.
    pub fn load() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::with_name("wiki_extractor").required(false))
            .add_source(config::Environment::with_prefix("WIKI").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
