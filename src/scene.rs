//! Scene item instances
//!
//! Checks concrete item definitions (what a drawing file or the editor's
//! "Add item" action produces) against a loaded [`Schema`]. The schema says
//! which constructor builds each item type and which properties must be
//! present; building the actual shape is up to the host.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use serde_yaml::Value;

use crate::config::{GeometricField, PropertyValue, Schema};
use crate::error::{InstanceError, NotFoundError};

const TYPE_KEY: &str = "type";
const NAME_KEY: &str = "name";
const ITEM_KEY: &str = "item";
const ITEMS_KEY: &str = "items";

/// A scene item definition that passed the schema checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemInstance {
    /// Item type key
    pub item_type: String,
    /// Host-side constructor to call
    pub constructor: String,
    /// All fields of the definition, `type` included
    pub fields: IndexMap<String, PropertyValue>,
}

impl ItemInstance {
    /// The item's `name` field, or an empty string.
    #[must_use]
    pub fn name(&self) -> &str {
        self.fields
            .get(NAME_KEY)
            .and_then(PropertyValue::as_str)
            .unwrap_or_default()
    }

    /// Label used in menus, e.g. `circle pond`.
    #[must_use]
    pub fn type_and_name(&self) -> String {
        format!("{} {}", self.item_type, self.name())
    }
}

/// A rejected scene entry.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFailure {
    /// Position in the `items` sequence, `None` for document-level failures
    pub index: Option<usize>,
    /// Why the entry was rejected
    pub error: InstanceError,
}

impl fmt::Display for SceneFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(idx) => write!(f, "items[{idx}]: {}", self.error),
            None => write!(f, "{}", self.error),
        }
    }
}

/// Outcome of checking a scene document.
///
/// Bad entries are reported individually and never stop the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneReport {
    /// Entries that passed, in document order
    pub items: Vec<ItemInstance>,
    /// Entries that were rejected
    pub failures: Vec<SceneFailure>,
}

impl SceneReport {
    /// Returns `true` if no entry was rejected.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Converts a YAML mapping into item fields.
///
/// # Errors
///
/// Returns [`InstanceError::InvalidValue`] for a non-mapping, a non-string
/// key, or a value that is not a number, string, boolean or coordinate pair.
pub fn fields_from_yaml(value: &Value) -> Result<IndexMap<String, PropertyValue>, InstanceError> {
    let Value::Mapping(map) = value else {
        return Err(InstanceError::InvalidValue {
            item_type: String::new(),
            field: ITEM_KEY.to_string(),
            detail: "expected a mapping of fields".to_string(),
        });
    };

    let item_type = map
        .get(TYPE_KEY)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let mut fields = IndexMap::with_capacity(map.len());
    for (key, raw) in map {
        let Some(key) = key.as_str() else {
            return Err(InstanceError::InvalidValue {
                item_type,
                field: format!("{key:?}"),
                detail: "field names must be strings".to_string(),
            });
        };
        let Some(value) = PropertyValue::from_yaml(raw) else {
            return Err(InstanceError::InvalidValue {
                item_type,
                field: key.to_string(),
                detail: "expected a number, string, boolean or coordinate pair".to_string(),
            });
        };
        fields.insert(key.to_string(), value);
    }
    Ok(fields)
}

impl Schema {
    /// A ready-to-instantiate definition built from an item type's defaults.
    ///
    /// Returns `Ok(None)` if the type has no `default` block.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::ItemType`] for an unknown item type.
    pub fn default_item(
        &self,
        item_type: &str,
    ) -> Result<Option<IndexMap<String, PropertyValue>>, NotFoundError> {
        let item = self.item_type(item_type)?;
        let Some(default) = &item.default else {
            tracing::debug!(item_type, "no default values for item type");
            return Ok(None);
        };

        let mut fields = IndexMap::with_capacity(default.len() + 1);
        fields.insert(
            TYPE_KEY.to_string(),
            PropertyValue::Text(item.type_name.clone()),
        );
        fields.extend(default.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(Some(fields))
    }

    /// Checks a concrete item definition against its item type.
    ///
    /// # Errors
    ///
    /// Returns an [`InstanceError`] if `type` is missing or unknown, a
    /// required property is absent, or a geometric field has the wrong shape.
    pub fn instantiate(
        &self,
        def: &IndexMap<String, PropertyValue>,
    ) -> Result<ItemInstance, InstanceError> {
        let type_name = match def.get(TYPE_KEY) {
            None => return Err(InstanceError::MissingType),
            Some(PropertyValue::Text(t)) => t.as_str(),
            Some(other) => {
                return Err(InstanceError::InvalidValue {
                    item_type: String::new(),
                    field: TYPE_KEY.to_string(),
                    detail: format!("expected a string, got a {}", other.kind()),
                });
            }
        };

        let item = self
            .item_type(type_name)
            .map_err(InstanceError::UnknownType)?;

        if let Some(missing) = item
            .required_properties
            .iter()
            .find(|p| !def.contains_key(p.as_str()))
        {
            return Err(InstanceError::MissingRequired {
                item_type: item.type_name.clone(),
                property: missing.clone(),
            });
        }

        for (key, value) in def {
            if let Some(field) = GeometricField::from_name(key) {
                if !field.accepts(value) {
                    return Err(InstanceError::InvalidValue {
                        item_type: item.type_name.clone(),
                        field: key.clone(),
                        detail: format!("expected {}, got a {}", field.expected(), value.kind()),
                    });
                }
            }
        }

        Ok(ItemInstance {
            item_type: item.type_name.clone(),
            constructor: item.constructor.clone(),
            fields: def.clone(),
        })
    }

    /// Checks every entry of a scene document `{items: [{item: {...}}, ...]}`.
    #[must_use]
    pub fn check_scene(&self, doc: &Value) -> SceneReport {
        let mut report = SceneReport::default();

        let Some(entries) = doc.get(ITEMS_KEY).and_then(Value::as_sequence) else {
            report.failures.push(SceneFailure {
                index: None,
                error: InstanceError::MissingItemsGroup,
            });
            return report;
        };

        for (idx, entry) in entries.iter().enumerate() {
            let outcome = entry
                .get(ITEM_KEY)
                .ok_or(InstanceError::MissingItemKey)
                .and_then(fields_from_yaml)
                .and_then(|fields| self.instantiate(&fields));

            match outcome {
                Ok(instance) => report.items.push(instance),
                Err(error) => {
                    tracing::debug!(index = idx, %error, "scene entry rejected");
                    report.failures.push(SceneFailure {
                        index: Some(idx),
                        error,
                    });
                }
            }
        }

        report
    }
}
