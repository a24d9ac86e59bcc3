use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoreId(pub u64);

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Authenticated caller, as established by the host's auth layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    User(String),
}

impl Identity {
    pub fn user(id: impl Into<String>) -> Self {
        Identity::User(id.into())
    }

    pub fn user_id(&self) -> Option<&str> {
        match self {
            Identity::User(id) => Some(id),
            Identity::Anonymous => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Id issued by the external identity provider
    pub id: String,
    pub display_name: String,
    pub avatar_url: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Sign-up payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    pub id: String,
    pub display_name: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: StoreId,
    pub name: String,
    pub subdomain: String,
    pub description: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
}

/// Store launch payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewStore {
    pub name: String,
    pub subdomain: String,
    #[serde(default)]
    pub description: String,
}

impl NewStore {
    pub fn new(name: impl Into<String>, subdomain: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subdomain: subdomain.into(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}
