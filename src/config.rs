//! Site configuration
//!
//! Read from `pressroom.toml` in the working directory when it exists.
//! Missing keys fall back to the built-in defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const CONFIG_FILE: &str = "pressroom.toml";

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteConfig {
    pub site_name: String,
    pub base_url: String,
    pub description: String,
    pub twitter_handle: String,
    pub default_image: String,
    pub default_author: String,
    pub keywords: Vec<String>,
    /// Length of the narrated featured article, in seconds
    pub listen_duration_secs: u32,
    /// Topics the feed starts out following
    pub followed_topics: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_name: "The Pressroom".to_string(),
            base_url: "https://pressroom.example.com".to_string(),
            description: "Long reads on technology, design and the business of ideas.".to_string(),
            twitter_handle: "@pressroom".to_string(),
            default_image: "https://pressroom.example.com/og-default.png".to_string(),
            default_author: "The Pressroom Editors".to_string(),
            keywords: vec![
                "long reads".to_string(),
                "technology".to_string(),
                "design".to_string(),
            ],
            listen_duration_secs: 720,
            followed_topics: vec!["Technology".to_string(), "Design".to_string()],
        }
    }
}

impl SiteConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SiteConfig = toml::from_str(content).context("invalid site configuration")?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    /// Load `pressroom.toml` if present, defaults when there is no file.
    pub fn load() -> Result<Self> {
        let path = Path::new(CONFIG_FILE);
        if !path.exists() {
            tracing::debug!("No {} found, using default site configuration", CONFIG_FILE);
            return Ok(Self::default());
        }
        let config = Self::load_from(path)?;
        tracing::info!(site = %config.site_name, "Loaded site configuration");
        Ok(config)
    }

    /// Absolute URL for a route path
    pub fn canonical_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        if path.starts_with('/') {
            format!("{}{}", base, path)
        } else {
            format!("{}/{}", base, path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let config = SiteConfig::from_toml_str(
            r#"
            site_name = "Field Notes"
            listen_duration_secs = 300
            "#,
        )
        .expect("valid toml");
        assert_eq!(config.site_name, "Field Notes");
        assert_eq!(config.listen_duration_secs, 300);
        assert_eq!(config.twitter_handle, SiteConfig::default().twitter_handle);
    }

    #[test]
    fn malformed_file_is_an_error() {
        assert!(SiteConfig::from_toml_str("site_name = ").is_err());
        assert!(SiteConfig::from_toml_str("listen_duration_secs = \"long\"").is_err());
    }

    #[test]
    fn canonical_urls_join_cleanly() {
        let mut config = SiteConfig::default();
        config.base_url = "https://example.com/".to_string();
        assert_eq!(config.canonical_url("/newsletter"), "https://example.com/newsletter");
        assert_eq!(config.canonical_url("about"), "https://example.com/about");
        assert_eq!(config.canonical_url("/"), "https://example.com/");
    }
}
