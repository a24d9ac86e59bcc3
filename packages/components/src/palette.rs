//! # Palette
//!
//! The toolbox a user drags new components from. Each tool names a
//! registered type plus the props it overrides on creation.

use crate::registry::{ComponentRegistry, RegistryError};
use serde::Serialize;
use sitecraft_common::Props;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub id: String,
    pub name: String,
    pub type_name: String,

    /// Layered over the type's defaults when the tool creates a node
    pub overrides: Props,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub tools: Vec<Tool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Palette {
    categories: Vec<Category>,
}

impl Tool {
    fn new(id: &str, type_name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: type_name.to_string(),
            type_name: type_name.to_string(),
            overrides: Props::new(),
        }
    }

    fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    fn with(mut self, prop: &str, value: &str) -> Self {
        self.overrides = self.overrides.with(prop, value);
        self
    }

    /// Initial props for a node created from this tool
    pub fn initial_props(&self, registry: &ComponentRegistry) -> Result<Props, RegistryError> {
        let defaults = registry.instantiate_defaults(&self.type_name)?;
        Ok(self.overrides.merged_over(&defaults))
    }
}

impl Palette {
    pub fn builtin() -> Self {
        let category = |id: &str, name: &str, tools: Vec<Tool>| Category {
            id: id.to_string(),
            name: name.to_string(),
            tools,
        };

        Self {
            categories: vec![
                category(
                    "layout",
                    "Layout",
                    vec![
                        Tool::new("container", "Container"),
                        Tool::new("column", "Column").named("Columns"),
                        Tool::new("section", "Section"),
                        Tool::new("grid", "Grid"),
                        Tool::new("bg-image", "BgImage").named("Background Image"),
                        Tool::new("spacer", "Spacer"),
                    ],
                ),
                category(
                    "basic",
                    "Basic Elements",
                    vec![
                        Tool::new("button", "Button").with("text", "Click Me"),
                        Tool::new("text", "Text").with("text", "Enter text"),
                        Tool::new("heading", "Heading"),
                        Tool::new("paragraph", "Paragraph"),
                        Tool::new("image", "Image"),
                        Tool::new("link", "Link"),
                    ],
                ),
                category(
                    "blocks",
                    "Blocks",
                    vec![Tool::new("navbar", "Navbar"), Tool::new("accordion", "Accordion")],
                ),
            ],
        }
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn tool(&self, id: &str) -> Option<&Tool> {
        self.categories
            .iter()
            .flat_map(|c| c.tools.iter())
            .find(|t| t.id == id)
    }

    /// Every tool must create a registered type
    pub fn check(&self, registry: &ComponentRegistry) -> Result<(), RegistryError> {
        for tool in self.categories.iter().flat_map(|c| c.tools.iter()) {
            registry.resolve(&tool.type_name)?;
        }
        Ok(())
    }
}
