use crate::models::StoreId;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PersistenceError {
    #[error("Not signed in")]
    Unauthenticated,

    #[error("Account {0} already exists")]
    DuplicateAccount(String),

    #[error("You already have a store named {0}")]
    DuplicateStoreName(String),

    #[error("Subdomain {0} is not available")]
    SubdomainTaken(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Store {0} not found")]
    StoreNotFound(StoreId),

    #[error("Store {0} belongs to another account")]
    NotOwner(StoreId),

    #[error("Storage backend failure: {0}")]
    Backend(String),
}
