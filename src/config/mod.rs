use std::fs;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct EndpointConfig {
    pub name: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub endpoints: Vec<EndpointConfig>,
}

/// A resolved endpoint the worker can connect to
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub name: Option<String>,
    pub url: String,
}

impl Endpoint {
    pub fn display(&self) -> String {
        self.url.clone()
    }

    /// Label for the endpoint picker: name plus URL when named
    pub fn label(&self) -> String {
        self.name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(|name| format!("{name} ({})", self.url))
            .unwrap_or_else(|| self.url.clone())
    }
}

pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(_) => return Config::default(),
    };
    toml::from_str::<Config>(&content).unwrap_or_default()
}

pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os("SCRY_CONFIG").map(PathBuf::from) {
        return Some(path);
    }
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from) {
        return Some(xdg.join("scry").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME").map(PathBuf::from) {
        return Some(home.join(".config").join("scry").join("config.toml"));
    }

    directories::ProjectDirs::from("io", "scry", "scry")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Normalize a raw endpoint to an HTTP URL
pub fn normalize_url(endpoint: &str) -> String {
    let trimmed = endpoint.trim();
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    }
}
