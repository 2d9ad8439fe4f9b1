//! Schema document validation
//!
//! Runs on the deserialized [`SchemaDocument`] and converts it into a typed
//! [`Schema`] in the same pass. Validation collects ALL errors (doesn't stop
//! at the first) so that authors get complete feedback, and only yields a
//! schema when no errors were found.

use indexmap::{IndexMap, IndexSet};
use serde_yaml::Value;
use std::collections::HashSet;

use crate::config::catalog::{Schema, suggest};
use crate::config::loader::DocumentLimits;
use crate::config::schema::{
    GeneralSettings, GeometricField, ItemTypeDefinition, PropertyDefinition, PropertyValue,
    RawGeneralSettings, RawItemType, RawPropertyDefinition, SchemaDocument, SliderRange,
    SpinParams, Widget, WidgetType,
};
use crate::error::{SchemaError, SchemaErrorKind, Severity};

// ============================================================================
// Public API
// ============================================================================

/// Result of schema validation.
#[derive(Debug, Default)]
pub struct ValidationResult {
    /// Validation errors (prevent loading).
    pub errors: Vec<SchemaError>,

    /// Validation warnings (informational).
    pub warnings: Vec<SchemaError>,

    /// The typed schema, present only when there are no errors.
    pub schema: Option<Schema>,
}

impl ValidationResult {
    /// Returns `true` if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if validation passed (no errors).
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Schema document validator.
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<SchemaError>,
    warnings: Vec<SchemaError>,
}

impl Validator {
    /// Creates a new validator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates a document and builds the schema if it is sound.
    pub fn validate(&mut self, doc: &SchemaDocument, limits: &DocumentLimits) -> ValidationResult {
        self.errors.clear();
        self.warnings.clear();

        let version = self.validate_version(doc.version.as_ref());
        let general = self.validate_general(doc.general.as_ref());

        // Properties first: item references resolve against the catalog.
        let (properties, declared) = match &doc.properties {
            Some(entries) => {
                let raw: Vec<&RawPropertyDefinition> = entries.iter().map(|e| &e.property).collect();
                self.validate_properties(&raw)
            }
            None => {
                self.add_error(
                    SchemaErrorKind::MissingSection,
                    "properties",
                    "properties",
                    "Section 'properties' is required",
                );
                (IndexMap::new(), IndexSet::new())
            }
        };

        let items = match &doc.items {
            Some(entries) => {
                let raw: Vec<&RawItemType> = entries.iter().map(|e| &e.item).collect();
                self.validate_items(&raw, &properties, &declared)
            }
            None => {
                self.add_error(
                    SchemaErrorKind::MissingSection,
                    "items",
                    "items",
                    "Section 'items' is required",
                );
                IndexMap::new()
            }
        };

        self.validate_limits(doc, limits);

        let schema = match (version, general) {
            (Some(version), Some(general)) if self.errors.is_empty() => {
                Some(Schema::new(version, general, items, properties))
            }
            _ => None,
        };

        ValidationResult {
            errors: std::mem::take(&mut self.errors),
            warnings: std::mem::take(&mut self.warnings),
            schema,
        }
    }

    // ========================================================================
    // Top-Level Sections
    // ========================================================================

    /// Validates `version` is present and renders it as text.
    fn validate_version(&mut self, version: Option<&Value>) -> Option<String> {
        match version {
            Some(Value::String(s)) => Some(s.clone()),
            Some(Value::Number(n)) => Some(n.to_string()),
            Some(_) => {
                self.add_error(
                    SchemaErrorKind::InvalidValue,
                    "version",
                    "version",
                    "Version must be a string or a number",
                );
                None
            }
            None => {
                self.add_error(
                    SchemaErrorKind::MissingSection,
                    "version",
                    "version",
                    "Section 'version' is required",
                );
                None
            }
        }
    }

    /// Validates the four `general` fields are present.
    fn validate_general(&mut self, general: Option<&RawGeneralSettings>) -> Option<GeneralSettings> {
        let Some(general) = general else {
            self.add_error(
                SchemaErrorKind::MissingSection,
                "general",
                "general",
                "Section 'general' is required",
            );
            return None;
        };

        let items_name = self.require_general_text("items_name", general.items_name.as_ref());
        let item_name = self.require_general_text("item_name", general.item_name.as_ref());
        let back_color = self.require_general_value("back_color", general.back_color.as_ref());
        let back_alpha = self.require_general_value("back_alpha", general.back_alpha.as_ref());

        Some(GeneralSettings {
            items_name: items_name?,
            item_name: item_name?,
            back_color: back_color?,
            back_alpha: back_alpha?,
        })
    }

    fn require_general_text(&mut self, field: &str, value: Option<&Value>) -> Option<String> {
        let path = format!("general.{field}");
        match text(value) {
            Ok(Some(label)) => Some(label.to_string()),
            Ok(None) => {
                self.add_error(
                    SchemaErrorKind::MissingGeneralField,
                    field,
                    &path,
                    &format!("General setting '{field}' is required"),
                );
                None
            }
            Err(found) => {
                self.add_error(
                    SchemaErrorKind::InvalidValue,
                    field,
                    &path,
                    &format!("General setting '{field}' must be a string, got a {found}"),
                );
                None
            }
        }
    }

    fn require_general_value(&mut self, field: &str, value: Option<&Value>) -> Option<PropertyValue> {
        let path = format!("general.{field}");
        let Some(value) = value else {
            self.add_error(
                SchemaErrorKind::MissingGeneralField,
                field,
                &path,
                &format!("General setting '{field}' is required"),
            );
            return None;
        };
        let converted = PropertyValue::from_yaml(value);
        if converted.is_none() {
            self.add_error(
                SchemaErrorKind::InvalidValue,
                field,
                &path,
                &format!(
                    "General setting '{field}' must be a finite number, string or coordinate pair"
                ),
            );
        }
        converted
    }

    // ========================================================================
    // Property Catalog
    // ========================================================================

    /// Validates catalog entries.
    ///
    /// Returns the well-formed entries by name, plus every name the document
    /// declares (well-formed or not) so references and duplicates are judged
    /// against what the author wrote.
    fn validate_properties(
        &mut self,
        entries: &[&RawPropertyDefinition],
    ) -> (IndexMap<String, PropertyDefinition>, IndexSet<String>) {
        let mut catalog = IndexMap::new();
        let mut declared = IndexSet::new();

        for (idx, raw) in entries.iter().enumerate() {
            let path = format!("properties[{idx}].property");
            let name_path = format!("{path}.name");

            let name = match text(raw.name.as_ref()) {
                Ok(Some(name)) if !name.is_empty() => name.to_string(),
                Ok(_) => {
                    self.add_error(
                        SchemaErrorKind::MissingField,
                        &format!("properties[{idx}]"),
                        &name_path,
                        "Property name is required and cannot be empty",
                    );
                    continue;
                }
                Err(found) => {
                    self.add_error(
                        SchemaErrorKind::InvalidValue,
                        &format!("properties[{idx}]"),
                        &name_path,
                        &format!("Property name must be a string, got a {found}"),
                    );
                    continue;
                }
            };

            if !declared.insert(name.clone()) {
                self.add_error(
                    SchemaErrorKind::DuplicateProperty,
                    &name,
                    &name_path,
                    &format!("Duplicate property name: '{name}'"),
                );
                continue;
            }

            if GeometricField::from_name(&name).is_some() {
                self.add_warning(
                    SchemaErrorKind::DuplicateReference,
                    &name,
                    &name_path,
                    &format!("Property '{name}' shadows a geometric field and is never shown"),
                );
            }

            let widget = self.validate_widget(&name, raw, &path);

            let title = match text(raw.title.as_ref()) {
                Ok(Some(title)) => Some(title.to_string()),
                Ok(None) => {
                    self.add_warning(
                        SchemaErrorKind::MissingField,
                        &name,
                        &format!("{path}.title"),
                        &format!("Property '{name}' has no title, its name is shown instead"),
                    );
                    Some(name.clone())
                }
                Err(found) => {
                    self.add_error(
                        SchemaErrorKind::InvalidValue,
                        &name,
                        &format!("{path}.title"),
                        &format!("Property '{name}' title must be a string, got a {found}"),
                    );
                    None
                }
            };

            let tooltip = match text(raw.tooltip.as_ref()) {
                Ok(tooltip) => Some(tooltip.map(str::to_string)),
                Err(found) => {
                    self.add_error(
                        SchemaErrorKind::InvalidValue,
                        &name,
                        &format!("{path}.tooltip"),
                        &format!("Property '{name}' tooltip must be a string, got a {found}"),
                    );
                    None
                }
            };

            let value = match raw.value.as_ref().map(PropertyValue::from_yaml) {
                None => Some(None),
                Some(Some(value)) => Some(Some(value)),
                Some(None) => {
                    self.add_error(
                        SchemaErrorKind::InvalidValue,
                        &name,
                        &format!("{path}.value"),
                        &format!(
                            "Property '{name}' value must be a finite number, string or \
                             coordinate pair"
                        ),
                    );
                    None
                }
            };

            if let (Some(widget), Some(Some(value))) = (&widget, &value) {
                if let Some(problem) = widget.check_value(value) {
                    self.add_warning(
                        SchemaErrorKind::ValueOutOfRange,
                        &name,
                        &format!("{path}.value"),
                        &format!("Property '{name}' default: {problem}"),
                    );
                }
            }

            let (Some(widget), Some(title), Some(tooltip), Some(value)) =
                (widget, title, tooltip, value)
            else {
                continue;
            };

            catalog.insert(
                name.clone(),
                PropertyDefinition {
                    name,
                    title,
                    widget,
                    tooltip,
                    value,
                },
            );
        }

        (catalog, declared)
    }

    /// Resolves a property's widget type and parameters.
    fn validate_widget(
        &mut self,
        name: &str,
        raw: &RawPropertyDefinition,
        path: &str,
    ) -> Option<Widget> {
        let type_path = format!("{path}.type");
        let parms_path = format!("{path}.parms");

        let type_name = match text(raw.type_.as_ref()) {
            Ok(Some(type_name)) => type_name,
            Ok(None) => {
                self.add_error(
                    SchemaErrorKind::MissingField,
                    name,
                    &type_path,
                    &format!("Property '{name}' has no widget type"),
                );
                return None;
            }
            Err(found) => {
                self.add_error(
                    SchemaErrorKind::InvalidValue,
                    name,
                    &type_path,
                    &format!("Property '{name}' widget type must be a string, got a {found}"),
                );
                return None;
            }
        };

        let widget_type = match type_name.parse::<WidgetType>() {
            Ok(widget_type) => widget_type,
            Err(_) => {
                let known: Vec<String> = WidgetType::ALL
                    .iter()
                    .map(|w| w.as_str().to_string())
                    .collect();
                let hint = suggest(type_name, &known)
                    .map_or_else(String::new, |s| format!(" (did you mean '{s}'?)"));
                self.add_error(
                    SchemaErrorKind::UnknownWidgetType,
                    name,
                    &type_path,
                    &format!(
                        "Property '{name}' has unknown widget type '{type_name}'{hint}. \
                         Expected one of: EditText, EditNumberSpin, Slider"
                    ),
                );
                return None;
            }
        };

        match widget_type {
            WidgetType::EditText => {
                if raw.parms.is_some() {
                    self.add_warning(
                        SchemaErrorKind::InvalidValue,
                        name,
                        &parms_path,
                        &format!("Property '{name}' is an EditText; its parms are ignored"),
                    );
                }
                Some(Widget::EditText)
            }
            WidgetType::EditNumberSpin => match &raw.parms {
                None => Some(Widget::EditNumberSpin(None)),
                Some(parms) => match spin_params(parms) {
                    Ok(params) => {
                        if params.step <= 0.0 {
                            self.add_warning(
                                SchemaErrorKind::InvalidSpinParams,
                                name,
                                &parms_path,
                                &format!(
                                    "Property '{name}': spinner step {} is not positive",
                                    params.step
                                ),
                            );
                        }
                        Some(Widget::EditNumberSpin(Some(params)))
                    }
                    Err(problem) => {
                        self.add_error(
                            SchemaErrorKind::InvalidSpinParams,
                            name,
                            &parms_path,
                            &format!("Property '{name}': {problem}"),
                        );
                        None
                    }
                },
            },
            WidgetType::Slider => match slider_range(raw.parms.as_ref()) {
                Ok(range) => {
                    if range.scale == 0.0 {
                        self.add_warning(
                            SchemaErrorKind::InvalidSliderParams,
                            name,
                            &parms_path,
                            &format!("Property '{name}': slider scale is zero"),
                        );
                    }
                    Some(Widget::Slider(range))
                }
                Err(problem) => {
                    self.add_error(
                        SchemaErrorKind::InvalidSliderParams,
                        name,
                        &parms_path,
                        &format!("Property '{name}': {problem}"),
                    );
                    None
                }
            },
        }
    }

    // ========================================================================
    // Item Types
    // ========================================================================

    /// Validates item type entries and their references into the catalog.
    fn validate_items(
        &mut self,
        entries: &[&RawItemType],
        catalog: &IndexMap<String, PropertyDefinition>,
        declared: &IndexSet<String>,
    ) -> IndexMap<String, ItemTypeDefinition> {
        let mut items = IndexMap::new();
        let mut seen = HashSet::new();

        for (idx, raw) in entries.iter().enumerate() {
            let path = format!("items[{idx}].item");

            let type_name = match text(raw.type_.as_ref()) {
                Ok(Some(t)) if !t.is_empty() => t.to_string(),
                Ok(_) => {
                    self.add_error(
                        SchemaErrorKind::MissingField,
                        &format!("items[{idx}]"),
                        &format!("{path}.type"),
                        "Item type is required and cannot be empty",
                    );
                    continue;
                }
                Err(found) => {
                    self.add_error(
                        SchemaErrorKind::InvalidValue,
                        &format!("items[{idx}]"),
                        &format!("{path}.type"),
                        &format!("Item type must be a string, got a {found}"),
                    );
                    continue;
                }
            };

            if !seen.insert(type_name.clone()) {
                self.add_error(
                    SchemaErrorKind::DuplicateItemType,
                    &type_name,
                    &format!("{path}.type"),
                    &format!("Duplicate item type: '{type_name}'"),
                );
                continue;
            }

            let constructor = match text(raw.constructor.as_ref()) {
                Ok(Some(c)) if !c.is_empty() => Some(c.to_string()),
                Ok(_) => {
                    self.add_error(
                        SchemaErrorKind::MissingField,
                        &type_name,
                        &format!("{path}.constructor"),
                        &format!("Item type '{type_name}' has no constructor"),
                    );
                    None
                }
                Err(found) => {
                    self.add_error(
                        SchemaErrorKind::InvalidValue,
                        &type_name,
                        &format!("{path}.constructor"),
                        &format!(
                            "Item type '{type_name}' constructor must be a string, got a {found}"
                        ),
                    );
                    None
                }
            };

            let required = self.property_list(
                &type_name,
                raw.required_properties.as_ref(),
                &format!("{path}.required_properties"),
                declared,
            );
            let editable = self.property_list(
                &type_name,
                raw.editable_properties.as_ref(),
                &format!("{path}.editable_properties"),
                declared,
            );

            let default_path = format!("{path}.default");
            let default = match raw.default.as_ref().map(default_map) {
                None => Some(None),
                Some(Ok(map)) => Some(Some(self.validate_default(
                    &type_name,
                    &map,
                    required.as_deref().unwrap_or_default(),
                    editable.as_deref().unwrap_or_default(),
                    &default_path,
                    catalog,
                ))),
                Some(Err(problem)) => {
                    self.add_error(
                        SchemaErrorKind::InvalidValue,
                        &type_name,
                        &default_path,
                        &format!("Default for item type '{type_name}' {problem}"),
                    );
                    None
                }
            };

            let (
                Some(constructor),
                Some(required_properties),
                Some(editable_properties),
                Some(default),
            ) = (constructor, required, editable, default)
            else {
                continue;
            };

            items.insert(
                type_name.clone(),
                ItemTypeDefinition {
                    type_name,
                    constructor,
                    required_properties,
                    editable_properties,
                    default,
                },
            );
        }

        items
    }

    /// Reads one of an item's property lists and checks its references.
    fn property_list(
        &mut self,
        type_name: &str,
        value: Option<&Value>,
        path: &str,
        declared: &IndexSet<String>,
    ) -> Option<Vec<String>> {
        match name_list(value) {
            Ok(names) => {
                self.validate_references(type_name, &names, path, declared);
                Some(names)
            }
            Err(problem) => {
                self.add_error(
                    SchemaErrorKind::InvalidValue,
                    type_name,
                    path,
                    &format!("Item type '{type_name}': {problem}"),
                );
                None
            }
        }
    }

    /// Checks that every non-geometric name is declared in the catalog.
    fn validate_references(
        &mut self,
        type_name: &str,
        names: &[String],
        path: &str,
        declared: &IndexSet<String>,
    ) {
        let mut seen = HashSet::new();
        for name in names {
            if !seen.insert(name) {
                self.add_warning(
                    SchemaErrorKind::DuplicateReference,
                    type_name,
                    path,
                    &format!("Item type '{type_name}' lists property '{name}' more than once"),
                );
            }

            if GeometricField::from_name(name).is_some() || declared.contains(name) {
                continue;
            }

            let hint = suggest(name, declared)
                .map_or_else(String::new, |s| format!(" (did you mean '{s}'?)"));
            self.add_error(
                SchemaErrorKind::DanglingPropertyReference,
                type_name,
                path,
                &format!(
                    "Dangling property reference: item type '{type_name}' references \
                     unknown property '{name}'{hint}"
                ),
            );
        }
    }

    /// Converts and checks an item's `default` block.
    fn validate_default(
        &mut self,
        type_name: &str,
        default: &IndexMap<String, Value>,
        required: &[String],
        editable: &[String],
        path: &str,
        catalog: &IndexMap<String, PropertyDefinition>,
    ) -> IndexMap<String, PropertyValue> {
        let mut values = IndexMap::new();

        for (key, raw_value) in default {
            let key_path = format!("{path}.{key}");

            let Some(value) = PropertyValue::from_yaml(raw_value) else {
                self.add_error(
                    SchemaErrorKind::InvalidValue,
                    type_name,
                    &key_path,
                    &format!(
                        "Default for '{key}' in item type '{type_name}' must be a finite \
                         number, string or coordinate pair"
                    ),
                );
                continue;
            };

            if let Some(field) = GeometricField::from_name(key) {
                if !field.accepts(&value) {
                    self.add_error(
                        SchemaErrorKind::InvalidGeometry,
                        type_name,
                        &key_path,
                        &format!(
                            "Geometric field '{key}' in item type '{type_name}' must be {}, got a {}",
                            field.expected(),
                            value.kind()
                        ),
                    );
                }
            } else if let Some(property) = catalog.get(key) {
                if let Some(problem) = property.widget.check_value(&value) {
                    self.add_warning(
                        SchemaErrorKind::ValueOutOfRange,
                        type_name,
                        &key_path,
                        &format!("Default for '{key}' in item type '{type_name}': {problem}"),
                    );
                }
            }

            if !required.contains(key) && !editable.contains(key) {
                self.add_warning(
                    SchemaErrorKind::UnlistedDefault,
                    type_name,
                    &key_path,
                    &format!(
                        "Item type '{type_name}' sets a default for '{key}', which it does not list"
                    ),
                );
            }

            values.insert(key.clone(), value);
        }

        for name in required {
            if !default.contains_key(name) {
                self.add_warning(
                    SchemaErrorKind::IncompleteDefault,
                    type_name,
                    path,
                    &format!(
                        "Default for item type '{type_name}' omits required property \
                         '{name}'; it cannot be created from defaults"
                    ),
                );
            }
        }

        values
    }

    // ========================================================================
    // Limits
    // ========================================================================

    /// Validates document counts against limits.
    fn validate_limits(&mut self, doc: &SchemaDocument, limits: &DocumentLimits) {
        let item_count = doc.items.as_ref().map_or(0, Vec::len);
        if item_count > limits.max_item_types {
            self.add_error(
                SchemaErrorKind::LimitExceeded,
                "items",
                "items",
                &format!(
                    "Document defines {item_count} item types, at most {} allowed",
                    limits.max_item_types
                ),
            );
        }

        let property_count = doc.properties.as_ref().map_or(0, Vec::len);
        if property_count > limits.max_properties {
            self.add_error(
                SchemaErrorKind::LimitExceeded,
                "properties",
                "properties",
                &format!(
                    "Document defines {property_count} properties, at most {} allowed",
                    limits.max_properties
                ),
            );
        }
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    /// Adds an error to the collection.
    fn add_error(&mut self, kind: SchemaErrorKind, name: &str, path: &str, detail: &str) {
        self.errors.push(SchemaError {
            kind,
            name: name.to_string(),
            path: path.to_string(),
            detail: detail.to_string(),
            severity: Severity::Error,
        });
    }

    /// Adds a warning to the collection.
    fn add_warning(&mut self, kind: SchemaErrorKind, name: &str, path: &str, detail: &str) {
        self.warnings.push(SchemaError {
            kind,
            name: name.to_string(),
            path: path.to_string(),
            detail: detail.to_string(),
            severity: Severity::Warning,
        });
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Reads an optional string field. `Err` names the shape found instead.
fn text(value: Option<&Value>) -> Result<Option<&str>, &'static str> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(shape(other)),
    }
}

/// Reads a list of property names; an absent list is empty.
fn name_list(value: Option<&Value>) -> Result<Vec<String>, String> {
    let seq = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Sequence(seq)) => seq,
        Some(other) => {
            return Err(format!(
                "expected a sequence of property names, got a {}",
                shape(other)
            ));
        }
    };
    seq.iter()
        .enumerate()
        .map(|(i, entry)| match entry {
            Value::String(name) => Ok(name.clone()),
            other => Err(format!(
                "entry {i} must be a property name, got a {}",
                shape(other)
            )),
        })
        .collect()
}

/// Reads an item's `default` block as a name-keyed mapping.
fn default_map(value: &Value) -> Result<IndexMap<String, Value>, String> {
    let Value::Mapping(map) = value else {
        return Err(format!("must be a mapping, got a {}", shape(value)));
    };
    map.iter()
        .map(|(key, value)| match key {
            Value::String(key) => Ok((key.clone(), value.clone())),
            other => Err(format!("keys must be property names, got a {}", shape(other))),
        })
        .collect()
}

const fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

/// Parses Slider `parms`: exactly `[min, max, scale]`, finite, `min < max`.
fn slider_range(parms: Option<&Value>) -> Result<SliderRange, String> {
    let Some(Value::Sequence(seq)) = parms else {
        return Err("slider parms must be a sequence [min, max, scale]".to_string());
    };
    if seq.len() != 3 {
        return Err(format!(
            "slider parms must have exactly 3 elements [min, max, scale], got {}",
            seq.len()
        ));
    }
    let numbers: Option<Vec<f64>> = seq.iter().map(Value::as_f64).collect();
    let Some(&[min, max, scale]) = numbers.as_deref() else {
        return Err("slider parms must all be numbers".to_string());
    };
    if ![min, max, scale].iter().all(|x| x.is_finite()) {
        return Err(format!(
            "slider parms must be finite, got [{min}, {max}, {scale}]"
        ));
    }
    if min >= max {
        return Err(format!("slider min ({min}) must be less than max ({max})"));
    }
    Ok(SliderRange { min, max, scale })
}

/// Parses `EditNumberSpin` `parms`: a mapping with finite `step` and `maximum`.
fn spin_params(parms: &Value) -> Result<SpinParams, String> {
    let Value::Mapping(map) = parms else {
        return Err("spinner parms must be a mapping {step, maximum}".to_string());
    };
    let number = |key: &str| map.get(key).and_then(Value::as_f64);
    let step = number("step").ok_or("spinner parms need a numeric 'step'")?;
    let maximum = number("maximum").ok_or("spinner parms need a numeric 'maximum'")?;
    if !step.is_finite() || !maximum.is_finite() {
        return Err(format!(
            "spinner parms must be finite, got step {step} and maximum {maximum}"
        ));
    }
    Ok(SpinParams { step, maximum })
}
