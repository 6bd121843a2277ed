use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

/// Authenticated-identity flag, replaced wholesale on login and logout
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub is_logged_in: bool,
    pub identity: Option<Identity>,
}

impl Session {
    pub fn logged_in(identity: Identity) -> Self {
        Self {
            is_logged_in: true,
            identity: Some(identity),
        }
    }
}
