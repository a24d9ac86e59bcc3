//! # Edit Session
//!
//! One user's editing session over one page. The session owns the tree
//! store exclusively; everything else sees it only through serialized
//! snapshots.

use crate::debounce::Clock;
use crate::errors::{EditorError, MutationError, SerializationError};
use crate::mutations::{Mutation, MutationOutcome};
use crate::serializer;
use crate::settings::{self, FieldEditor, SettingsView};
use crate::tree::TreeStore;
use sitecraft_common::{NodeId, SerializedDocument};
use sitecraft_components::ComponentRegistry;
use std::sync::Arc;

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    /// Session version after the mutation
    pub version: u64,

    pub outcome: MutationOutcome,
}

pub struct EditSession {
    pub id: String,
    tree: TreeStore,
    version: u64,
}

impl EditSession {
    pub fn new(id: impl Into<String>, registry: Arc<ComponentRegistry>) -> Self {
        let id = id.into();
        let tree = TreeStore::new(registry, &id);
        Self { id, tree, version: 0 }
    }

    pub fn with_clock(
        id: impl Into<String>,
        registry: Arc<ComponentRegistry>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let id = id.into();
        let tree = TreeStore::with_clock(registry, &id, clock);
        Self { id, tree, version: 0 }
    }

    /// Resume editing a saved page
    pub fn open(
        id: impl Into<String>,
        registry: Arc<ComponentRegistry>,
        doc: &SerializedDocument,
    ) -> Result<Self, EditorError> {
        let mut session = Self::new(id, registry);
        session.tree.load(doc)?;
        Ok(session)
    }

    pub fn tree(&self) -> &TreeStore {
        &self.tree
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a mutation; the version only moves when it succeeds
    pub fn apply(&mut self, mutation: Mutation) -> Result<MutationResult, MutationError> {
        match mutation.apply(&mut self.tree) {
            Ok(outcome) => {
                self.version += 1;
                Ok(MutationResult {
                    version: self.version,
                    outcome,
                })
            }
            Err(e) => {
                tracing::debug!(session = %self.id, error = %e, "Mutation rejected");
                Err(e)
            }
        }
    }

    /// Apply mutations in order, stopping at the first failure
    pub fn apply_all(
        &mut self,
        mutations: impl IntoIterator<Item = Mutation>,
    ) -> Result<u64, MutationError> {
        for mutation in mutations {
            self.apply(mutation)?;
        }
        Ok(self.version)
    }

    /// Host event loop hook: apply debounced writes that fell due
    pub fn tick(&mut self) -> usize {
        self.tree.tick()
    }

    pub fn selected(&self) -> Option<&NodeId> {
        self.tree.selected()
    }

    pub fn settings_view(&self) -> Result<Option<SettingsView>, MutationError> {
        settings::settings_view(&self.tree)
    }

    pub fn field_editor(&mut self, node: &NodeId, prop: &str) -> Result<FieldEditor<'_>, MutationError> {
        FieldEditor::bind(&mut self.tree, node, prop)
    }

    pub fn serialize(&mut self) -> Result<SerializedDocument, SerializationError> {
        serializer::serialize(&mut self.tree)
    }
}

impl std::fmt::Debug for EditSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditSession")
            .field("id", &self.id)
            .field("version", &self.version)
            .field("tree", &self.tree)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecraft_common::Props;

    fn session() -> EditSession {
        EditSession::new("client-1", Arc::new(ComponentRegistry::builtin().unwrap()))
    }

    #[test]
    fn test_session_creation() {
        let session = session();
        assert_eq!(session.id, "client-1");
        assert_eq!(session.version(), 0);
        assert!(session.selected().is_none());
        assert!(session.settings_view().unwrap().is_none());
    }

    #[test]
    fn test_version_counts_successful_mutations() {
        let mut session = session();

        let created = session
            .apply(Mutation::CreateNode {
                id: Some(NodeId::from("root")),
                type_name: "Container".to_string(),
                props: Props::new(),
            })
            .unwrap();
        assert_eq!(created.version, 1);
        assert_eq!(created.outcome, MutationOutcome::Created(NodeId::from("root")));

        let rejected = session.apply(Mutation::SetRoot {
            node_id: NodeId::from("missing"),
        });
        assert!(rejected.is_err());
        assert_eq!(session.version(), 1);
    }

    #[test]
    fn test_settings_title_uses_display_name() {
        let mut session = session();
        session
            .apply_all([
                Mutation::CreateNode {
                    id: Some(NodeId::from("bg")),
                    type_name: "BgImage".to_string(),
                    props: Props::new(),
                },
                Mutation::Select {
                    node_id: Some(NodeId::from("bg")),
                },
            ])
            .unwrap();

        let view = session.settings_view().unwrap().unwrap();
        assert_eq!(view.title, "Background Image Settings");
        assert_eq!(view.type_name, "BgImage");
    }
}
