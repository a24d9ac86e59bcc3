//! # Settings Descriptors
//!
//! A component's settings panel is plain data: an ordered list of fields,
//! each naming the prop it edits and how its input behaves. One generic
//! resolver in the editor turns these into bound field editors, so no
//! per-component UI code is stored in the registry.

use serde::Serialize;
use sitecraft_common::{PropValue, Props, Record};

/// One editable field of a settings panel
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsField {
    /// Property this field reads and writes
    pub prop: String,

    pub label: String,

    pub kind: FieldKind,

    /// Coalesce rapid edits into one write after this many milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debounce_ms: Option<u64>,

    /// Panel section heading (e.g. "Logo", "Menu Items")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    /// Only shown while the condition holds against the node's props
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_when: Option<Condition>,
}

/// Input kind of a settings field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum FieldKind {
    Text {
        multiline: bool,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
        step: Option<f64>,
        /// Parsed like an integer input; fractional input is truncated
        integer: bool,
        /// Stored when the input does not parse as a number
        fallback: f64,
    },
    Color,
    Select {
        options: Vec<SelectOption>,
    },
    Toggle,
    /// Repeatable list of records, e.g. navbar menu items
    List {
        item_fields: Vec<ListItemField>,
        /// Template for newly added items
        new_item: Record,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    /// Stored value; keeps its type (the heading level is a number)
    pub value: PropValue,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListItemField {
    pub key: String,
    pub label: String,
}

/// Visibility condition over the node's current props
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "when", rename_all = "camelCase")]
pub enum Condition {
    Equals { prop: String, value: PropValue },
    NotEmpty { prop: String },
}

impl Condition {
    pub fn equals(prop: impl Into<String>, value: impl Into<PropValue>) -> Self {
        Condition::Equals {
            prop: prop.into(),
            value: value.into(),
        }
    }

    pub fn not_empty(prop: impl Into<String>) -> Self {
        Condition::NotEmpty { prop: prop.into() }
    }

    pub fn holds(&self, props: &Props) -> bool {
        match self {
            Condition::Equals { prop, value } => props.get(prop) == Some(value),
            Condition::NotEmpty { prop } => match props.get(prop) {
                Some(PropValue::Text(s)) => !s.is_empty(),
                Some(PropValue::Null) | None => false,
                Some(_) => true,
            },
        }
    }
}

impl SettingsField {
    fn new(prop: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            prop: prop.into(),
            label: label.into(),
            kind,
            debounce_ms: None,
            group: None,
            visible_when: None,
        }
    }

    pub fn text(prop: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(prop, label, FieldKind::Text { multiline: false })
    }

    pub fn multiline(prop: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(prop, label, FieldKind::Text { multiline: true })
    }

    pub fn integer(prop: impl Into<String>, label: impl Into<String>, fallback: f64) -> Self {
        Self::new(
            prop,
            label,
            FieldKind::Number {
                min: None,
                max: None,
                step: None,
                integer: true,
                fallback,
            },
        )
    }

    pub fn decimal(prop: impl Into<String>, label: impl Into<String>, fallback: f64) -> Self {
        Self::new(
            prop,
            label,
            FieldKind::Number {
                min: None,
                max: None,
                step: None,
                integer: false,
                fallback,
            },
        )
    }

    pub fn color(prop: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(prop, label, FieldKind::Color)
    }

    /// Options given as `(value, label)` string pairs
    pub fn select(prop: impl Into<String>, label: impl Into<String>, options: &[(&str, &str)]) -> Self {
        let options = options
            .iter()
            .map(|(value, label)| SelectOption {
                value: PropValue::text(*value),
                label: label.to_string(),
            })
            .collect();
        Self::new(prop, label, FieldKind::Select { options })
    }

    pub fn select_values(
        prop: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self::new(prop, label, FieldKind::Select { options })
    }

    pub fn toggle(prop: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(prop, label, FieldKind::Toggle)
    }

    pub fn list(
        prop: impl Into<String>,
        label: impl Into<String>,
        item_fields: &[(&str, &str)],
        new_item: Record,
    ) -> Self {
        let item_fields = item_fields
            .iter()
            .map(|(key, label)| ListItemField {
                key: key.to_string(),
                label: label.to_string(),
            })
            .collect();
        Self::new(prop, label, FieldKind::List { item_fields, new_item })
    }

    pub fn min(mut self, value: f64) -> Self {
        if let FieldKind::Number { ref mut min, .. } = self.kind {
            *min = Some(value);
        }
        self
    }

    pub fn max(mut self, value: f64) -> Self {
        if let FieldKind::Number { ref mut max, .. } = self.kind {
            *max = Some(value);
        }
        self
    }

    pub fn step(mut self, value: f64) -> Self {
        if let FieldKind::Number { ref mut step, .. } = self.kind {
            *step = Some(value);
        }
        self
    }

    pub fn debounced(mut self, ms: u64) -> Self {
        self.debounce_ms = Some(ms);
        self
    }

    pub fn in_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn visible_when(mut self, condition: Condition) -> Self {
        self.visible_when = Some(condition);
        self
    }

    pub fn is_visible(&self, props: &Props) -> bool {
        self.visible_when
            .as_ref()
            .map(|c| c.holds(props))
            .unwrap_or(true)
    }
}
