use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;
use crate::credentials::CredentialStore;

/// Environment variable checked first for the catalog bearer token
pub const TOKEN_ENV_VAR: &str = "MARQUEE_TMDB_TOKEN";

/// `local@domain.tld` with no whitespace and a dot after the `@`
pub fn is_email_shaped(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.rsplit_once('@') else {
        return false;
    };
    match domain.rsplit_once('.') {
        Some((host, tld)) => !local.is_empty() && !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token; usually left out in favour of the env var or credential store
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    #[serde(default = "default_image_base_url")]
    pub image_base_url: String,
    /// How many cast members the details view shows
    #[serde(default = "default_cast_preview_limit")]
    pub cast_preview_limit: usize,
}

/// The single demo login pair accepted by the session store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_auth_email")]
    pub email: String,
    #[serde(default = "default_auth_password")]
    pub password: String,
    #[serde(default = "default_display_name")]
    pub display_name: String,
}

fn default_base_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_image_base_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_cast_preview_limit() -> usize {
    8
}

fn default_auth_email() -> String {
    "admin@admin.com".to_string()
}

fn default_auth_password() -> String {
    "password".to_string()
}

fn default_display_name() -> String {
    "Admin".to_string()
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            image_base_url: default_image_base_url(),
            cast_preview_limit: default_cast_preview_limit(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            email: default_auth_email(),
            password: default_auth_password(),
            display_name: default_display_name(),
        }
    }
}

impl CatalogConfig {
    /// Full image URL for a relative poster/backdrop path at the given size (e.g. "w500")
    pub fn image_url(&self, path: Option<&str>, size: &str) -> Option<String> {
        path.filter(|p| !p.is_empty())
            .map(|p| format!("{}/{}{}", self.image_base_url.trim_end_matches('/'), size, p))
    }
}

impl Config {
    pub fn load_from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load the config file, falling back to defaults when it does not exist
    pub fn load_or_default(path: &PathBuf) -> anyhow::Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    pub fn save_to_file(&self, path: &PathBuf) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let base_url = self.catalog.base_url.trim();
        if base_url.is_empty() {
            return Err(anyhow::anyhow!("catalog.base_url cannot be empty"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(anyhow::anyhow!("catalog.base_url must be an http(s) URL: {}", base_url));
        }
        if self.catalog.cast_preview_limit == 0 {
            return Err(anyhow::anyhow!("catalog.cast_preview_limit must be at least 1"));
        }
        if !is_email_shaped(self.auth.email.trim()) {
            return Err(anyhow::anyhow!("auth.email is not an email address: {}", self.auth.email));
        }
        if self.auth.password.is_empty() {
            return Err(anyhow::anyhow!("auth.password cannot be empty"));
        }
        Ok(())
    }

    /// Resolve the catalog token: environment, then config file, then credential store
    pub fn resolve_api_token(&self, credentials: &CredentialStore) -> Option<String> {
        if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
            if !token.trim().is_empty() {
                return Some(token);
            }
        }
        self.catalog
            .api_token
            .clone()
            .filter(|t| !t.trim().is_empty())
            .or_else(|| credentials.get_catalog_token().cloned())
    }
}
