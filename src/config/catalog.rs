//! The loaded, immutable schema and its lookups.
//!
//! A [`Schema`] is only ever produced by the validator, so every invariant
//! the loader promises holds here: item types and property names are
//! unique, and every non-geometric property reference resolves.

use indexmap::IndexMap;
use serde::Serialize;

use crate::config::schema::{
    GeneralSettings, ItemTypeDefinition, PropertyDefinition, PropertyValue, is_geometric,
};
use crate::error::NotFoundError;

/// Maximum edit distance for "did you mean" suggestions.
const SUGGESTION_DISTANCE: usize = 3;

/// A validated schema document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schema {
    version: String,
    general: GeneralSettings,
    items: IndexMap<String, ItemTypeDefinition>,
    properties: IndexMap<String, PropertyDefinition>,
}

impl Schema {
    pub(crate) const fn new(
        version: String,
        general: GeneralSettings,
        items: IndexMap<String, ItemTypeDefinition>,
        properties: IndexMap<String, PropertyDefinition>,
    ) -> Self {
        Self {
            version,
            general,
            items,
            properties,
        }
    }

    /// Informational document version.
    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    /// General fallback settings.
    #[must_use]
    pub const fn general(&self) -> &GeneralSettings {
        &self.general
    }

    /// Looks up an item type by its `type` key.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::ItemType`] if the schema does not define it.
    pub fn item_type(&self, name: &str) -> Result<&ItemTypeDefinition, NotFoundError> {
        self.items
            .get(name)
            .ok_or_else(|| NotFoundError::ItemType {
                name: name.to_string(),
                suggestion: suggest(name, self.items.keys()),
            })
    }

    /// Looks up a property by name.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::Property`] if the catalog does not define it.
    pub fn property(&self, name: &str) -> Result<&PropertyDefinition, NotFoundError> {
        self.properties
            .get(name)
            .ok_or_else(|| NotFoundError::Property {
                name: name.to_string(),
                suggestion: suggest(name, self.properties.keys()),
            })
    }

    /// Item types in document order.
    pub fn item_types(&self) -> impl Iterator<Item = &ItemTypeDefinition> {
        self.items.values()
    }

    /// Catalog properties in document order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDefinition> {
        self.properties.values()
    }

    /// Merged defaults for every editable property of an item type.
    ///
    /// Each property resolves, in order, to the item's own `default` entry,
    /// the catalog `value`, or (for `back_color` / `back_alpha`) the general
    /// fallback. Properties with none of these are left out.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::ItemType`] for an unknown item type.
    pub fn effective_defaults(
        &self,
        item_type: &str,
    ) -> Result<IndexMap<String, PropertyValue>, NotFoundError> {
        let item = self.item_type(item_type)?;

        let defaults = item
            .editable_properties
            .iter()
            .filter_map(|name| {
                let value = item
                    .default_for(name)
                    .or_else(|| {
                        self.properties
                            .get(name)
                            .and_then(|p| p.value.as_ref())
                    })
                    .or_else(|| self.general.fallback(name))?;
                Some((name.clone(), value.clone()))
            })
            .collect();

        Ok(defaults)
    }

    /// Item types that carry a `default` block, in document order.
    ///
    /// Only these can be added from the editor without further input.
    #[must_use]
    pub fn creatable_types(&self) -> Vec<&str> {
        self.items
            .values()
            .filter(|item| item.default.is_some())
            .map(|item| item.type_name.as_str())
            .collect()
    }

    /// Catalog entries for the edit dialog of an item type.
    ///
    /// Follows `editable_properties` order; geometric fields have no widget
    /// and are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`NotFoundError::ItemType`] for an unknown item type.
    pub fn edit_widgets(&self, item_type: &str) -> Result<Vec<&PropertyDefinition>, NotFoundError> {
        let item = self.item_type(item_type)?;
        Ok(item
            .editable_properties
            .iter()
            .filter(|name| !is_geometric(name))
            .filter_map(|name| self.properties.get(name))
            .collect())
    }
}

/// Suggests the closest candidate for a mistyped name.
///
/// Returns the closest match if its Damerau-Levenshtein distance is at most 3.
pub(crate) fn suggest<'a>(
    input: &str,
    candidates: impl IntoIterator<Item = &'a String>,
) -> Option<String> {
    candidates
        .into_iter()
        .map(|c| (c, strsim::damerau_levenshtein(input, c)))
        .filter(|(_, dist)| *dist <= SUGGESTION_DISTANCE)
        .min_by_key(|(_, dist)| *dist)
        .map(|(name, _)| name.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::SchemaLoader;

    fn builtin() -> std::sync::Arc<Schema> {
        SchemaLoader::with_defaults()
            .load_builtin()
            .expect("builtin schema should load")
            .schema
    }

    #[test]
    fn test_item_type_lookup() {
        let schema = builtin();
        let circle = schema.item_type("circle").unwrap();
        assert_eq!(circle.constructor, "SceneCircle");
        assert_eq!(circle.required_properties, vec!["center", "radius"]);
    }

    #[test]
    fn test_item_type_not_found_suggests() {
        let schema = builtin();
        let err = schema.item_type("circel").unwrap_err();
        assert_eq!(
            err,
            NotFoundError::ItemType {
                name: "circel".to_string(),
                suggestion: Some("circle".to_string()),
            }
        );
    }

    #[test]
    fn test_property_not_found() {
        let schema = builtin();
        let err = schema.property("opacity-level-of-item").unwrap_err();
        assert!(matches!(
            err,
            NotFoundError::Property {
                suggestion: None,
                ..
            }
        ));
    }

    #[test]
    fn test_effective_defaults_circle() {
        let schema = builtin();
        let defaults = schema.effective_defaults("circle").unwrap();
        assert_eq!(defaults.get("color"), Some(&PropertyValue::from("blue")));
        assert_eq!(defaults.get("alpha"), Some(&PropertyValue::Integer(1)));
        assert!(!defaults.contains_key("name"));
        assert!(!defaults.contains_key("description"));
        assert_eq!(defaults.len(), 2);
    }

    #[test]
    fn test_effective_defaults_rectangle() {
        let schema = builtin();
        let defaults = schema.effective_defaults("rectangle").unwrap();
        assert_eq!(defaults.get("width"), Some(&PropertyValue::Float(1.0)));
        assert_eq!(defaults.get("height"), Some(&PropertyValue::Float(1.0)));
        assert_eq!(defaults.get("rotation"), Some(&PropertyValue::Integer(0)));
        assert_eq!(defaults.get("color"), Some(&PropertyValue::from("green")));
        assert_eq!(defaults.get("alpha"), Some(&PropertyValue::Integer(1)));
    }

    #[test]
    fn test_effective_defaults_keeps_editable_order() {
        let schema = builtin();
        let defaults = schema.effective_defaults("rectangle").unwrap();
        let keys: Vec<&str> = defaults.keys().map(String::as_str).collect();
        assert_eq!(keys, ["width", "height", "rotation", "color", "alpha"]);
    }

    #[test]
    fn test_effective_defaults_general_fallback() {
        let schema = builtin();
        let defaults = schema.effective_defaults("corridor").unwrap();
        assert_eq!(defaults.get("back_color"), Some(&PropertyValue::from("white")));
        assert_eq!(defaults.get("back_alpha"), Some(&PropertyValue::Integer(2)));
        assert_eq!(defaults.get("alpha"), Some(&PropertyValue::Integer(3)));
    }

    #[test]
    fn test_effective_defaults_unknown_type() {
        let schema = builtin();
        assert!(schema.effective_defaults("triangle").is_err());
    }

    #[test]
    fn test_creatable_types() {
        let schema = builtin();
        assert_eq!(
            schema.creatable_types(),
            ["line", "circle", "rectangle", "corridor"]
        );
    }

    #[test]
    fn test_edit_widgets_order() {
        let schema = builtin();
        let names: Vec<&str> = schema
            .edit_widgets("circle")
            .unwrap()
            .into_iter()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(names, ["name", "description", "color", "alpha"]);
    }

    #[test]
    fn test_suggest_picks_closest() {
        let candidates = vec!["line".to_string(), "circle".to_string()];
        assert_eq!(suggest("lin", &candidates), Some("line".to_string()));
        assert_eq!(suggest("hexagonal-prism", &candidates), None);
    }
}
