//! # Settings Resolver
//!
//! Turns the selected node's settings descriptors into bound field
//! editors. One generic interpreter handles every component type; an
//! editor only ever writes the single (node, prop) it was bound to.

use crate::errors::MutationError;
use crate::tree::TreeStore;
use sitecraft_common::{NodeId, PropValue, Record};
use sitecraft_components::{FieldKind, SettingsField};
use std::time::Duration;

/// Settings panel of one node
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsView {
    pub node_id: NodeId,
    pub type_name: String,
    pub title: String,
    pub fields: Vec<FieldState>,
}

/// One descriptor plus the value it currently shows
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState {
    pub field: SettingsField,
    pub value: PropValue,
    pub visible: bool,
}

/// Panel for the current selection, `None` when nothing is selected
pub fn settings_view(tree: &TreeStore) -> Result<Option<SettingsView>, MutationError> {
    match tree.selected() {
        Some(id) => settings_view_for(tree, id).map(Some),
        None => Ok(None),
    }
}

pub fn settings_view_for(tree: &TreeStore, id: &NodeId) -> Result<SettingsView, MutationError> {
    let definition = tree.definition_of(id)?;
    let node = tree
        .node(id)
        .ok_or_else(|| MutationError::NodeNotFound(id.clone()))?;

    let label = node.display_name.as_deref().unwrap_or(definition.label());
    let fields = definition
        .settings
        .iter()
        .map(|field| FieldState {
            field: field.clone(),
            value: current_value(tree, id, &field.prop),
            visible: field.is_visible(&node.props),
        })
        .collect();

    Ok(SettingsView {
        node_id: id.clone(),
        type_name: node.type_name.clone(),
        title: format!("{} Settings", label),
        fields,
    })
}

impl SettingsView {
    pub fn visible_fields(&self) -> impl Iterator<Item = &FieldState> {
        self.fields.iter().filter(|f| f.visible)
    }

    pub fn field(&self, prop: &str) -> Option<&FieldState> {
        self.fields.iter().find(|f| f.field.prop == prop)
    }

    /// Bind an editor for one of this panel's fields
    pub fn editor<'t>(&self, tree: &'t mut TreeStore, prop: &str) -> Result<FieldEditor<'t>, MutationError> {
        FieldEditor::bind(tree, &self.node_id, prop)
    }
}

/// Latest value of a prop, counting a not-yet-applied debounced write
fn current_value(tree: &TreeStore, id: &NodeId, prop: &str) -> PropValue {
    tree.pending_value(id, prop)
        .or_else(|| tree.node(id).and_then(|n| n.props.get(prop)))
        .cloned()
        .unwrap_or(PropValue::Null)
}

/// Editor bound to exactly one (node, prop)
pub struct FieldEditor<'t> {
    tree: &'t mut TreeStore,
    node: NodeId,
    field: SettingsField,
}

impl<'t> FieldEditor<'t> {
    pub fn bind(tree: &'t mut TreeStore, node: &NodeId, prop: &str) -> Result<Self, MutationError> {
        let definition = tree.definition_of(node)?;
        let field = definition
            .settings_field(prop)
            .cloned()
            .ok_or_else(|| MutationError::UnknownSetting {
                type_name: definition.type_name.clone(),
                prop: prop.to_string(),
            })?;

        Ok(Self {
            tree,
            node: node.clone(),
            field,
        })
    }

    pub fn field(&self) -> &SettingsField {
        &self.field
    }

    pub fn value(&self) -> PropValue {
        current_value(&*self.tree, &self.node, &self.field.prop)
    }

    fn debounce(&self) -> Option<Duration> {
        self.field.debounce_ms.map(Duration::from_millis)
    }

    /// Write an already-typed value, honouring the field's debounce window
    pub fn set(&mut self, value: PropValue) -> Result<(), MutationError> {
        let debounce = self.debounce();
        self.tree.update_prop(&self.node, &self.field.prop, value, debounce)
    }

    /// Parse raw form input according to the field kind, then write it
    pub fn set_raw(&mut self, raw: &str) -> Result<(), MutationError> {
        let value = parse_input(&self.field, raw)?;
        self.set(value)
    }

    /// Field lost focus: apply its pending write now
    pub fn commit(&mut self) -> bool {
        self.tree.commit(&self.node, &self.field.prop)
    }

    fn items(&self) -> Result<Vec<PropValue>, MutationError> {
        match &self.field.kind {
            FieldKind::List { .. } => Ok(self.value().as_list().map(<[_]>::to_vec).unwrap_or_default()),
            _ => Err(self.invalid("not a list field")),
        }
    }

    /// Edit one key of one list item
    pub fn set_item_field(&mut self, index: usize, key: &str, raw: &str) -> Result<(), MutationError> {
        let mut items = self.items()?;
        let known = match &self.field.kind {
            FieldKind::List { item_fields, .. } => item_fields.iter().any(|f| f.key == key),
            _ => false,
        };
        if !known {
            return Err(self.invalid(&format!("list items have no field {}", key)));
        }

        let item = items
            .get_mut(index)
            .ok_or_else(|| self.invalid(&format!("no item at index {}", index)))?;
        let mut record = item.as_record().cloned().unwrap_or_default();
        record.insert(key.to_string(), PropValue::text(raw));
        *item = PropValue::Record(record);

        self.set(PropValue::List(items))
    }

    /// Append a copy of the field's new-item template with a fresh id
    pub fn push_item(&mut self) -> Result<(), MutationError> {
        let mut items = self.items()?;
        let mut record: Record = match &self.field.kind {
            FieldKind::List { new_item, .. } => new_item.clone(),
            _ => Record::new(),
        };
        record
            .entry("id".to_string())
            .or_insert_with(|| PropValue::text(next_item_id(&items)));
        items.push(PropValue::Record(record));

        self.tree
            .update_prop(&self.node, &self.field.prop, PropValue::List(items), None)
    }

    pub fn remove_item(&mut self, index: usize) -> Result<(), MutationError> {
        let mut items = self.items()?;
        if index >= items.len() {
            return Err(self.invalid(&format!("no item at index {}", index)));
        }
        items.remove(index);

        self.tree
            .update_prop(&self.node, &self.field.prop, PropValue::List(items), None)
    }

    fn invalid(&self, reason: &str) -> MutationError {
        MutationError::InvalidValue {
            prop: self.field.prop.clone(),
            reason: reason.to_string(),
        }
    }
}

/// Smallest positive integer id not used by any item
fn next_item_id(items: &[PropValue]) -> String {
    let used: Vec<&str> = items
        .iter()
        .filter_map(PropValue::as_record)
        .filter_map(|r| r.get("id").and_then(PropValue::as_str))
        .collect();

    (1..)
        .map(|n: usize| n.to_string())
        .find(|candidate| !used.contains(&candidate.as_str()))
        .unwrap_or_default()
}

/// Interpret raw form input for a field
pub fn parse_input(field: &SettingsField, raw: &str) -> Result<PropValue, MutationError> {
    let invalid = |reason: String| MutationError::InvalidValue {
        prop: field.prop.clone(),
        reason,
    };

    match &field.kind {
        FieldKind::Text { .. } | FieldKind::Color => Ok(PropValue::text(raw)),

        FieldKind::Number {
            min,
            max,
            integer,
            fallback,
            ..
        } => {
            let trimmed = raw.trim();
            let mut number = if trimmed.is_empty() {
                0.0
            } else {
                trimmed
                    .parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .unwrap_or(*fallback)
            };
            if *integer {
                number = number.trunc();
            }
            if let Some(min) = min {
                number = number.max(*min);
            }
            if let Some(max) = max {
                number = number.min(*max);
            }

            if number.fract() == 0.0 && number.abs() < i64::MAX as f64 {
                Ok(PropValue::int(number as i64))
            } else {
                Ok(PropValue::float(number))
            }
        }

        FieldKind::Select { options } => options
            .iter()
            .find(|option| option.value.css_value() == raw)
            .map(|option| option.value.clone())
            .ok_or_else(|| invalid(format!("{:?} is not one of the options", raw))),

        FieldKind::Toggle => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "1" | "yes" => Ok(PropValue::Bool(true)),
            "false" | "off" | "0" | "no" | "" => Ok(PropValue::Bool(false)),
            other => Err(invalid(format!("{:?} is not a boolean", other))),
        },

        FieldKind::List { .. } => match serde_json::from_str::<PropValue>(raw) {
            Ok(list @ PropValue::List(_)) => Ok(list),
            Ok(_) => Err(invalid("expected a JSON array".to_string())),
            Err(e) => Err(invalid(e.to_string())),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitecraft_components::SelectOption;

    #[test]
    fn test_number_parsing() {
        let field = SettingsField::integer("columnCount", "Columns", 1.0).min(1.0).max(12.0);

        assert_eq!(parse_input(&field, "4").unwrap(), PropValue::int(4));
        assert_eq!(parse_input(&field, "40").unwrap(), PropValue::int(12));
        assert_eq!(parse_input(&field, "").unwrap(), PropValue::int(1));
        assert_eq!(parse_input(&field, "abc").unwrap(), PropValue::int(1));
        assert_eq!(parse_input(&field, "3.7").unwrap(), PropValue::int(3));
    }

    #[test]
    fn test_decimal_keeps_fraction() {
        let field = SettingsField::decimal("paddingX", "Padding X", 4.0).min(0.0);

        assert_eq!(parse_input(&field, "1.5").unwrap(), PropValue::float(1.5));
        assert_eq!(parse_input(&field, "2").unwrap(), PropValue::int(2));
        assert_eq!(parse_input(&field, "-3").unwrap(), PropValue::int(0));
        assert_eq!(parse_input(&field, "NaN").unwrap(), PropValue::int(4));
    }

    #[test]
    fn test_select_keeps_option_type() {
        let field = SettingsField::select_values(
            "level",
            "Level",
            vec![
                SelectOption { value: PropValue::int(1), label: "H1".into() },
                SelectOption { value: PropValue::int(2), label: "H2".into() },
            ],
        );

        assert_eq!(parse_input(&field, "2").unwrap(), PropValue::int(2));
        assert!(matches!(
            parse_input(&field, "7"),
            Err(MutationError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_toggle_and_list() {
        let toggle = SettingsField::toggle("sticky", "Sticky");
        assert_eq!(parse_input(&toggle, "on").unwrap(), PropValue::Bool(true));
        assert!(parse_input(&toggle, "maybe").is_err());

        let list = SettingsField::list("menuItems", "Menu", &[("text", "Text")], Record::new());
        assert_eq!(
            parse_input(&list, r#"[{"text":"Home"}]"#).unwrap().as_list().unwrap().len(),
            1
        );
        assert!(parse_input(&list, r#"{"text":"Home"}"#).is_err());
    }

    #[test]
    fn test_next_item_id_fills_gaps() {
        let items = vec![
            PropValue::record([("id", PropValue::text("1"))]),
            PropValue::record([("id", PropValue::text("3"))]),
        ];
        assert_eq!(next_item_id(&items), "2");
        assert_eq!(next_item_id(&[]), "1");
    }
}
