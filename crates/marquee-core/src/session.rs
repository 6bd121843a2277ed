use crate::persistence::{PersistKey, PersistenceError, PersistenceGateway};
use marquee_config::{is_email_shaped, AuthConfig};
use marquee_models::{Identity, Session};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tracing::{info, warn};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    /// Input rejected before any credential check
    #[error("{0}")]
    Validation(String),

    #[error("Invalid email or password")]
    InvalidCredentials,
}

/// Local checks applied before credentials are compared
pub fn validate_login_input(email: &str, password: &str) -> Result<(), SessionError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(SessionError::Validation("Email is required".to_string()));
    }
    if !is_email_shaped(email) {
        return Err(SessionError::Validation("Email is invalid".to_string()));
    }
    if password.is_empty() {
        return Err(SessionError::Validation("Password is required".to_string()));
    }
    Ok(())
}

/// Authenticated-identity flag for the single configured demo account
pub struct SessionStore {
    state: watch::Sender<Session>,
    persistence: Arc<PersistenceGateway>,
    auth: AuthConfig,
}

impl SessionStore {
    pub fn restore(persistence: Arc<PersistenceGateway>, auth: AuthConfig) -> Self {
        let session: Session = persistence.restore(PersistKey::Session);
        if session.is_logged_in {
            info!("Session restored");
        }
        let (state, _) = watch::channel(session);
        Self {
            state,
            persistence,
            auth,
        }
    }

    pub fn login(&self, email: &str, password: &str) -> Result<Identity, SessionError> {
        validate_login_input(email, password)?;

        let email = email.trim();
        if !email.eq_ignore_ascii_case(&self.auth.email) || password != self.auth.password {
            warn!(email = %email, "Login rejected");
            return Err(SessionError::InvalidCredentials);
        }

        let identity = Identity {
            name: self.auth.display_name.clone(),
            email: self.auth.email.clone(),
        };
        let session = Session::logged_in(identity.clone());
        self.state.send_replace(session.clone());

        if let Err(e) = self.persistence.snapshot(PersistKey::Session, &session) {
            warn!("Failed to persist session: {}", e);
        }
        info!(name = %identity.name, "Logged in");
        Ok(identity)
    }

    /// Clear the session and purge every persisted key. The in-memory session
    /// is cleared even when the purge reports failures.
    pub fn logout(&self) -> Result<(), PersistenceError> {
        self.state.send_replace(Session::default());
        info!("Logged out");
        self.persistence.purge()
    }

    pub fn current(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.state.borrow().is_logged_in
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, Arc<PersistenceGateway>, SessionStore) {
        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(PersistenceGateway::with_dir(dir.path().to_path_buf()).unwrap());
        let store = SessionStore::restore(gateway.clone(), AuthConfig::default());
        (dir, gateway, store)
    }

    fn validation(email: &str, password: &str) -> String {
        match validate_login_input(email, password) {
            Err(SessionError::Validation(message)) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(validation("", "password"), "Email is required");
        assert_eq!(validation("   ", "password"), "Email is required");
        assert_eq!(validation("admin", "password"), "Email is invalid");
        assert_eq!(validation("admin@admin", "password"), "Email is invalid");
        assert_eq!(validation("ad min@admin.com", "password"), "Email is invalid");
        assert_eq!(validation("admin@admin.com", ""), "Password is required");
        assert!(validate_login_input("a@b.c", "x").is_ok());
    }

    #[test]
    fn test_login_with_demo_credentials() {
        let (_dir, _gateway, store) = store();

        let identity = store.login("admin@admin.com", "password").unwrap();

        assert_eq!(identity.name, "Admin");
        assert!(store.is_logged_in());
        assert_eq!(store.current().identity, Some(identity));
    }

    #[test]
    fn test_wrong_password_is_rejected() {
        let (_dir, _gateway, store) = store();

        let err = store.login("admin@admin.com", "hunter2").unwrap_err();

        assert_eq!(err, SessionError::InvalidCredentials);
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_invalid_input_never_reaches_credential_check() {
        let (_dir, _gateway, store) = store();
        let err = store.login("not-an-email", "password").unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
    }

    #[test]
    fn test_session_survives_restart() {
        let (_dir, gateway, store) = store();
        store.login("admin@admin.com", "password").unwrap();

        let restored = SessionStore::restore(gateway, AuthConfig::default());
        assert!(restored.is_logged_in());
        assert_eq!(restored.current().identity.unwrap().email, "admin@admin.com");
    }

    #[test]
    fn test_logout_clears_and_purges() {
        let (_dir, gateway, store) = store();
        store.login("admin@admin.com", "password").unwrap();
        gateway.snapshot(PersistKey::Watchlist, &Vec::<u64>::new()).unwrap();

        store.logout().unwrap();

        assert_eq!(store.current(), Session::default());
        assert!(!gateway.exists(PersistKey::Session));
        assert!(!gateway.exists(PersistKey::Watchlist));
        assert!(!SessionStore::restore(gateway, AuthConfig::default()).is_logged_in());
    }

    #[test]
    fn test_configured_account_is_used() {
        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(PersistenceGateway::with_dir(dir.path().to_path_buf()).unwrap());
        let auth = AuthConfig {
            email: "critic@example.org".to_string(),
            password: "popcorn".to_string(),
            display_name: "Critic".to_string(),
        };
        let store = SessionStore::restore(gateway, auth);

        assert_eq!(
            store.login("admin@admin.com", "password").unwrap_err(),
            SessionError::InvalidCredentials
        );
        assert_eq!(store.login("critic@example.org", "popcorn").unwrap().name, "Critic");
    }

    #[test]
    fn test_accepted_demo_email_can_log_in() {
        let mut config = marquee_config::Config::default();
        config.auth.email = "admin@localhost".to_string();
        assert!(config.validate().is_err());

        config.auth.email = "admin@localhost.test".to_string();
        config.validate().unwrap();

        let dir = TempDir::new().unwrap();
        let gateway = Arc::new(PersistenceGateway::with_dir(dir.path().to_path_buf()).unwrap());
        let store = SessionStore::restore(gateway, config.auth.clone());
        assert_eq!(store.login("admin@localhost.test", "password").unwrap().name, "Admin");
    }
}
