pub mod config;
pub mod credentials;
pub mod paths;

pub use config::{is_email_shaped, AuthConfig, CatalogConfig, Config, TOKEN_ENV_VAR};
pub use credentials::CredentialStore;
pub use paths::{base_path_override, PathManager};
