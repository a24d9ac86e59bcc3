use crate::settings::SettingsField;
use sitecraft_common::{PropValue, Props, VNode};

/// Static render behaviour: current props plus already-rendered children.
pub type RenderFn = fn(&Props, Vec<VNode>) -> VNode;

/// Which child types a container accepts as direct children
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AdmissionRule {
    #[default]
    Any,
    Only(Vec<String>),
    Except(Vec<String>),
}

impl AdmissionRule {
    pub fn admits(&self, child_type: &str) -> bool {
        match self {
            AdmissionRule::Any => true,
            AdmissionRule::Only(types) => types.iter().any(|t| t == child_type),
            AdmissionRule::Except(types) => !types.iter().any(|t| t == child_type),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            AdmissionRule::Any => "any".to_string(),
            AdmissionRule::Only(types) => format!("only {}", types.join(", ")),
            AdmissionRule::Except(types) => format!("anything except {}", types.join(", ")),
        }
    }
}

/// Registry entry for one component type
#[derive(Debug, Clone)]
pub struct ComponentDefinition {
    pub type_name: String,

    /// Human label ("Heading"); falls back to the type name
    pub display_name: Option<String>,

    pub default_props: Props,

    /// Leaf components (Button, Image, Spacer) never hold children
    pub can_contain_children: bool,

    pub admission: AdmissionRule,

    pub settings: Vec<SettingsField>,

    pub render: RenderFn,
}

impl ComponentDefinition {
    pub fn leaf(type_name: impl Into<String>, render: RenderFn) -> Self {
        Self {
            type_name: type_name.into(),
            display_name: None,
            default_props: Props::new(),
            can_contain_children: false,
            admission: AdmissionRule::Any,
            settings: Vec::new(),
            render,
        }
    }

    pub fn container(type_name: impl Into<String>, render: RenderFn) -> Self {
        Self {
            can_contain_children: true,
            ..Self::leaf(type_name, render)
        }
    }

    pub fn display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.default_props.set(name, value.into());
        self
    }

    pub fn admit_only(mut self, types: &[&str]) -> Self {
        self.admission = AdmissionRule::Only(types.iter().map(|t| t.to_string()).collect());
        self
    }

    pub fn field(mut self, field: SettingsField) -> Self {
        self.settings.push(field);
        self
    }

    pub fn fields(mut self, fields: impl IntoIterator<Item = SettingsField>) -> Self {
        self.settings.extend(fields);
        self
    }

    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.type_name)
    }

    /// Whether a child of `child_type` may be nested directly inside
    pub fn admits(&self, child_type: &str) -> bool {
        self.can_contain_children && self.admission.admits(child_type)
    }

    pub fn settings_field(&self, prop: &str) -> Option<&SettingsField> {
        self.settings.iter().find(|f| f.prop == prop)
    }

    /// Render with stored props layered over this type's defaults, so
    /// documents saved before a prop existed still render.
    pub fn render_with(&self, stored: &Props, children: Vec<VNode>) -> VNode {
        let props = stored.merged_over(&self.default_props);
        (self.render)(&props, children)
    }
}
