//! # Sitecraft Components
//!
//! The component model of the page builder: what a component type is, how
//! its settings form is described, and the built-in catalog.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ ComponentDefinition                          │
//! │  - default props (deep-copied per instance)  │
//! │  - container? + admission rule               │
//! │  - settings descriptors (plain data)         │
//! │  - static render fn (props, children → VNode)│
//! └──────────────────────────────────────────────┘
//!                      ↓ registered once
//! ┌──────────────────────────────────────────────┐
//! │ ComponentRegistry: type name → definition    │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sitecraft_components::ComponentRegistry;
//!
//! let registry = ComponentRegistry::builtin()?;
//! let heading = registry.resolve("Heading")?;
//! let props = registry.instantiate_defaults("Heading")?;
//! let vnode = heading.render_with(&props, vec![]);
//! ```

pub mod catalog;
mod definition;
mod palette;
mod registry;
mod settings;

pub use catalog::{SETTINGS_DEBOUNCE_MS, TEXT_DEBOUNCE_MS};
pub use definition::{AdmissionRule, ComponentDefinition, RenderFn};
pub use palette::{Category, Palette, Tool};
pub use registry::{ComponentRegistry, RegistryError};
pub use settings::{Condition, FieldKind, ListItemField, SelectOption, SettingsField};
