use crate::error::PersistenceError;
use crate::models::{Account, Identity, NewAccount, NewStore, Store, StoreId};
use sitecraft_common::SerializedDocument;

/// Persistence operations the builder needs. Every rejection leaves the
/// stored state untouched.
pub trait SiteRepository: Send + Sync {
    fn create_account(&self, account: NewAccount) -> Result<Account, PersistenceError>;

    /// Launch a store for the caller. Store names are unique per owner,
    /// subdomains are unique across all owners.
    fn create_store(&self, caller: &Identity, store: NewStore) -> Result<Store, PersistenceError>;

    fn stores_for_owner(&self, caller: &Identity) -> Result<Vec<Store>, PersistenceError>;

    fn store_by_subdomain(&self, subdomain: &str) -> Result<Option<Store>, PersistenceError>;

    /// Replace the saved page of a store the caller owns
    fn save_page(
        &self,
        caller: &Identity,
        store: StoreId,
        doc: &SerializedDocument,
    ) -> Result<(), PersistenceError>;

    fn load_page(&self, store: StoreId) -> Result<Option<SerializedDocument>, PersistenceError>;
}
