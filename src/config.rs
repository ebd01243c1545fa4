use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub chat: ChatConfig,
}

/// Settings for the default chat model collaborator.
#[derive(Debug, Deserialize, Clone)]
pub struct ChatConfig {
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o".to_string()
}
fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}
fn default_timeout_secs() -> u64 {
    60
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.chat.model, "gpt-4o");
        assert_eq!(config.chat.api_base, "https://api.openai.com/v1");
        assert_eq!(config.chat.timeout_secs, 60);
    }

    #[test]
    fn test_partial_override() {
        let config: Config = toml::from_str(
            r#"
[chat]
model = "gpt-4o-mini"
"#,
        )
        .unwrap();
        assert_eq!(config.chat.model, "gpt-4o-mini");
        assert_eq!(config.chat.timeout_secs, 60);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("refmark.toml");
        fs::write(
            &path,
            "[chat]\nmodel = \"gpt-4.1\"\napi_base = \"http://localhost:8080/v1\"\ntimeout_secs = 5\n",
        )
        .unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.chat.model, "gpt-4.1");
        assert_eq!(config.chat.api_base, "http://localhost:8080/v1");
        assert_eq!(config.chat.timeout_secs, 5);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_config(Path::new("/nonexistent/refmark.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
