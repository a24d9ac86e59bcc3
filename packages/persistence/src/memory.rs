//! Mutex-guarded in-memory repository, used by tests and the CLI.

use crate::error::PersistenceError;
use crate::models::{Account, Identity, NewAccount, NewStore, Store, StoreId};
use crate::repository::SiteRepository;
use chrono::Utc;
use sitecraft_common::SerializedDocument;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

#[derive(Default)]
struct State {
    accounts: BTreeMap<String, Account>,
    stores: BTreeMap<StoreId, Store>,
    /// Pages are kept in their wire form
    pages: BTreeMap<StoreId, String>,
    next_store: u64,
}

#[derive(Default)]
pub struct InMemoryRepository {
    state: Mutex<State>,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, State>, PersistenceError> {
        self.state
            .lock()
            .map_err(|_| PersistenceError::Backend("repository lock poisoned".to_string()))
    }
}

fn caller_id(caller: &Identity) -> Result<&str, PersistenceError> {
    caller.user_id().ok_or(PersistenceError::Unauthenticated)
}

fn required(field: &str, value: &str) -> Result<(), PersistenceError> {
    if value.trim().is_empty() {
        return Err(PersistenceError::InvalidRequest(format!("{} is required", field)));
    }
    Ok(())
}

impl SiteRepository for InMemoryRepository {
    fn create_account(&self, account: NewAccount) -> Result<Account, PersistenceError> {
        required("id", &account.id)?;
        required("email", &account.email)?;

        let mut state = self.lock()?;
        if state.accounts.contains_key(&account.id) {
            return Err(PersistenceError::DuplicateAccount(account.id));
        }

        let created = Account {
            id: account.id,
            display_name: account.display_name,
            avatar_url: account.avatar_url,
            email: account.email,
            created_at: Utc::now(),
        };
        state.accounts.insert(created.id.clone(), created.clone());
        tracing::info!(account = %created.id, "Account created");
        Ok(created)
    }

    fn create_store(&self, caller: &Identity, store: NewStore) -> Result<Store, PersistenceError> {
        let owner = caller_id(caller)?;
        let name = store.name.trim().to_string();
        let subdomain = store.subdomain.trim().to_lowercase();
        required("name", &name)?;
        required("subdomain", &subdomain)?;

        let mut state = self.lock()?;
        if state
            .stores
            .values()
            .any(|s| s.owner_id == owner && s.name == name)
        {
            return Err(PersistenceError::DuplicateStoreName(name));
        }
        if state.stores.values().any(|s| s.subdomain == subdomain) {
            return Err(PersistenceError::SubdomainTaken(subdomain));
        }

        state.next_store += 1;
        let created = Store {
            id: StoreId(state.next_store),
            name,
            subdomain,
            description: store.description,
            owner_id: owner.to_string(),
            created_at: Utc::now(),
        };
        state.stores.insert(created.id, created.clone());
        tracing::info!(store = %created.id, subdomain = %created.subdomain, "Store created");
        Ok(created)
    }

    fn stores_for_owner(&self, caller: &Identity) -> Result<Vec<Store>, PersistenceError> {
        let owner = caller_id(caller)?;
        let state = self.lock()?;
        Ok(state
            .stores
            .values()
            .filter(|s| s.owner_id == owner)
            .cloned()
            .collect())
    }

    fn store_by_subdomain(&self, subdomain: &str) -> Result<Option<Store>, PersistenceError> {
        let subdomain = subdomain.trim().to_lowercase();
        let state = self.lock()?;
        Ok(state
            .stores
            .values()
            .find(|s| s.subdomain == subdomain)
            .cloned())
    }

    fn save_page(
        &self,
        caller: &Identity,
        store: StoreId,
        doc: &SerializedDocument,
    ) -> Result<(), PersistenceError> {
        let owner = caller_id(caller)?;
        doc.validate()
            .map_err(|e| PersistenceError::InvalidRequest(e.to_string()))?;
        let json = doc
            .to_json()
            .map_err(|e| PersistenceError::Backend(e.to_string()))?;

        let mut state = self.lock()?;
        let record = state
            .stores
            .get(&store)
            .ok_or(PersistenceError::StoreNotFound(store))?;
        if record.owner_id != owner {
            return Err(PersistenceError::NotOwner(store));
        }

        state.pages.insert(store, json);
        tracing::info!(store = %store, nodes = doc.nodes.len(), "Page saved");
        Ok(())
    }

    fn load_page(&self, store: StoreId) -> Result<Option<SerializedDocument>, PersistenceError> {
        let state = self.lock()?;
        if !state.stores.contains_key(&store) {
            return Err(PersistenceError::StoreNotFound(store));
        }
        state
            .pages
            .get(&store)
            .map(|json| {
                SerializedDocument::from_json(json)
                    .map_err(|e| PersistenceError::Backend(e.to_string()))
            })
            .transpose()
    }
}
