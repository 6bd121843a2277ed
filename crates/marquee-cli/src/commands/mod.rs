pub mod config;
pub mod details;
pub mod genres;
pub mod lists;
pub mod prompts;
pub mod session;
pub mod ui;
pub mod watchlist;

use color_eyre::eyre::Context;
use color_eyre::Result;
use marquee_catalog::TmdbClient;
use marquee_config::{Config, CredentialStore, PathManager};
use marquee_core::AppContext;
use std::sync::Arc;

/// Load and validate the config file, falling back to defaults
pub(crate) fn load_config(path_manager: &PathManager) -> Result<Config> {
    let config_file = path_manager.config_file();
    let config = Config::load_or_default(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
    config
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid configuration in {}: {}", config_file.display(), e))?;
    Ok(config)
}

pub(crate) fn load_credentials(path_manager: &PathManager) -> Result<CredentialStore> {
    let credentials_file = path_manager.credentials_file();
    let mut cred_store = CredentialStore::new(credentials_file.clone());
    cred_store
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials from {}: {}", credentials_file.display(), e))?;
    Ok(cred_store)
}

/// Restore persisted state and wire the stores to the TMDB catalog
pub(crate) fn load_app_context() -> Result<AppContext> {
    let path_manager = PathManager::default();
    let config = load_config(&path_manager)?;
    let cred_store = load_credentials(&path_manager)?;

    let token = config.resolve_api_token(&cred_store);
    let catalog = TmdbClient::from_config(&config.catalog, token);
    if !catalog.has_token() {
        tracing::debug!("No catalog token configured; catalog commands will fail");
    }
    tracing::debug!(base_url = catalog.base_url(), "Catalog client ready");

    AppContext::from_paths(config, &path_manager, Arc::new(catalog))
        .map_err(|e| color_eyre::eyre::eyre!("{:#}", e))
        .wrap_err("Failed to restore application state")
}
