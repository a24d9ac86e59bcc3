//! Storage boundary for accounts, stores and their saved pages.
//!
//! The editor core never talks to a database; it hands a
//! `SerializedDocument` to a [`SiteRepository`] and gets one back later.

mod error;
mod memory;
mod models;
mod repository;

pub use error::PersistenceError;
pub use memory::InMemoryRepository;
pub use models::{Account, Identity, NewAccount, NewStore, Store, StoreId};
pub use repository::SiteRepository;
