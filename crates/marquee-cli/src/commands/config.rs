use super::{load_credentials, prompts};
use crate::output::Output;
use crate::ConfigCommands;
use color_eyre::Result;
use comfy_table::{Cell, Table};
use marquee_config::{Config, PathManager, TOKEN_ENV_VAR};
use owo_colors::OwoColorize;
use serde_json::json;

pub fn run_config(cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show { full } => show_config(full, output),
        ConfigCommands::Init { force } => init_config(force, output),
        ConfigCommands::Token { token } => store_token(token, output),
    }
}

/// Where the active catalog token comes from
fn token_source(config: &Config, has_stored_token: bool) -> &'static str {
    if std::env::var(TOKEN_ENV_VAR).map(|t| !t.trim().is_empty()).unwrap_or(false) {
        "environment"
    } else if config.catalog.api_token.as_deref().map(|t| !t.trim().is_empty()).unwrap_or(false) {
        "config file"
    } else if has_stored_token {
        "credentials file"
    } else {
        "not set"
    }
}

fn show_config(full: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();
    let config = super::load_config(&path_manager)?;
    let cred_store = load_credentials(&path_manager)?;

    let token = config.resolve_api_token(&cred_store);
    let source = token_source(&config, cred_store.get_catalog_token().is_some());
    let shown_token = match (&token, full) {
        (Some(token), true) => token.clone(),
        (Some(token), false) => mask_string(token),
        (None, _) => "<not set>".to_string(),
    };

    if output.format().is_json() {
        output.json(&json!({
            "config_file": config_file.display().to_string(),
            "config_file_exists": config_file.exists(),
            "state_dir": path_manager.state_dir().display().to_string(),
            "catalog": {
                "base_url": config.catalog.base_url,
                "image_base_url": config.catalog.image_base_url,
                "cast_preview_limit": config.catalog.cast_preview_limit,
                "api_token": shown_token,
                "api_token_source": source,
            },
            "auth": {
                "email": config.auth.email,
                "display_name": config.auth.display_name,
            },
        }));
        return Ok(());
    }

    if !config_file.exists() {
        output.warn(format!("No config file at {}; showing defaults", config_file.display()));
        output.info("Run 'marquee config init' to write one.");
    }

    output.println(format!("\n{}", "Configuration".bright_cyan().bold()));

    let mut table = Table::new();
    table.set_header(vec![
        Cell::new("Setting").add_attribute(comfy_table::Attribute::Bold),
        Cell::new("Value").add_attribute(comfy_table::Attribute::Bold),
    ]);
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    let rows = [
        ("Config file", config_file.display().to_string()),
        ("State directory", path_manager.state_dir().display().to_string()),
        ("Catalog URL", config.catalog.base_url.clone()),
        ("Image URL", config.catalog.image_base_url.clone()),
        ("Cast preview", config.catalog.cast_preview_limit.to_string()),
        ("API token", format!("{} ({})", shown_token, source)),
        ("Demo account", config.auth.email.clone()),
        ("Display name", config.auth.display_name.clone()),
    ];
    for (label, value) in rows {
        table.add_row(vec![label.to_string(), value]);
    }
    output.table(&table);
    Ok(())
}

fn init_config(force: bool, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let config_file = path_manager.config_file();

    if config_file.exists() && !force {
        output.warn(format!("Config file already exists at {}", config_file.display()));
        output.info("Use --force to overwrite it with defaults.");
        return Ok(());
    }

    path_manager
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save config to {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}

fn store_token(token_arg: Option<String>, output: &Output) -> Result<()> {
    let path_manager = PathManager::default();
    let mut cred_store = load_credentials(&path_manager)?;

    let token = match token_arg {
        Some(token) => token,
        None => prompts::prompt_password("Catalog API read access token")?,
    };
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(color_eyre::eyre::eyre!("Token cannot be empty"));
    }

    cred_store.set_catalog_token(token);
    cred_store.save().map_err(|e| {
        color_eyre::eyre::eyre!(
            "Failed to save credentials to {}: {}",
            path_manager.credentials_file().display(),
            e
        )
    })?;

    output.success(format!("Token saved to {}", path_manager.credentials_file().display()));
    if std::env::var(TOKEN_ENV_VAR).is_ok() {
        output.warn(format!("{} is set and takes precedence over the saved token", TOKEN_ENV_VAR));
    }
    Ok(())
}

fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}***{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_string() {
        assert_eq!(mask_string("short"), "*****");
        assert_eq!(mask_string("eyJhbGciOiJIUzI1NiJ9.payload"), "eyJh***load");
    }

    #[test]
    fn test_token_source_prefers_config_over_store() {
        let mut config = Config::default();
        config.catalog.api_token = Some("abc".to_string());
        if std::env::var(TOKEN_ENV_VAR).is_err() {
            assert_eq!(token_source(&config, true), "config file");
            assert_eq!(token_source(&Config::default(), true), "credentials file");
            assert_eq!(token_source(&Config::default(), false), "not set");
        }
    }
}
