//! # Sitecraft Editor
//!
//! The editing side of the page builder: a mutable tree of component
//! instances, debounced property writes, the settings resolver and the
//! serializer that hands snapshots to the renderer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ components: registry of types + settings    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: EditSession owns one TreeStore      │
//! │  - Mutations (create/attach/move/delete)    │
//! │  - Debounced updateProp with a Clock        │
//! │  - Settings view → bound field editors      │
//! │  - serialize() flushes, then snapshots      │
//! └─────────────────────────────────────────────┘
//!                     ↓  SerializedDocument
//! ┌─────────────────────────────────────────────┐
//! │ renderer: document + registry → HTML        │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sitecraft_editor::{EditSession, Mutation};
//!
//! let mut session = EditSession::new("page-home", registry);
//! session.apply(Mutation::CreateNode { id: None, type_name: "Column".into(), props: Props::new() })?;
//! let doc = session.serialize()?;
//! ```

mod debounce;
mod errors;
mod id_generator;
mod mutations;
mod node;
mod serializer;
mod session;
mod settings;
mod tree;

pub use debounce::{Clock, ManualClock, SystemClock};
pub use errors::{AdmissionError, EditorError, MutationError, SerializationError};
pub use id_generator::{session_seed, IdGenerator};
pub use mutations::{Mutation, MutationOutcome};
pub use node::Node;
pub use serializer::{serialize, snapshot};
pub use session::{EditSession, MutationResult};
pub use settings::{parse_input, settings_view, settings_view_for, FieldEditor, FieldState, SettingsView};
pub use tree::TreeStore;
