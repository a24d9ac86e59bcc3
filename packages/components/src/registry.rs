//! # Component Registry
//!
//! Plain registration table from type name to definition, filled once at
//! process start before any editing session begins.

use crate::catalog;
use crate::definition::ComponentDefinition;
use sitecraft_common::Props;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RegistryError {
    #[error("Component type already registered: {0}")]
    DuplicateType(String),

    #[error("Unknown component type: {0}")]
    UnknownType(String),
}

#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    definitions: BTreeMap<String, ComponentDefinition>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding every built-in component
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        catalog::register_all(&mut registry)?;
        tracing::info!("Component registry built with {} types", registry.len());
        Ok(registry)
    }

    pub fn register(&mut self, definition: ComponentDefinition) -> Result<(), RegistryError> {
        if self.definitions.contains_key(&definition.type_name) {
            return Err(RegistryError::DuplicateType(definition.type_name));
        }
        self.definitions
            .insert(definition.type_name.clone(), definition);
        Ok(())
    }

    pub fn resolve(&self, type_name: &str) -> Result<&ComponentDefinition, RegistryError> {
        self.definitions
            .get(type_name)
            .ok_or_else(|| RegistryError::UnknownType(type_name.to_string()))
    }

    pub fn get(&self, type_name: &str) -> Option<&ComponentDefinition> {
        self.definitions.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.definitions.contains_key(type_name)
    }

    /// Fresh, independently owned copy of a type's default props
    pub fn instantiate_defaults(&self, type_name: &str) -> Result<Props, RegistryError> {
        Ok(self.resolve(type_name)?.default_props.clone())
    }

    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.definitions.keys().map(String::as_str)
    }

    pub fn definitions(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
