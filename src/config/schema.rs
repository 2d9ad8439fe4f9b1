//! Schema document and model types
//!
//! Two layers live here. The `Raw*` types mirror the YAML document as
//! authored and are deliberately lenient (optional fields, untyped
//! `parms`/`value`) so that validation can report every problem at once.
//! The typed model ([`ItemTypeDefinition`], [`PropertyDefinition`],
//! [`GeneralSettings`], [`Widget`], [`PropertyValue`]) is what a loaded
//! [`Schema`](crate::config::Schema) exposes.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Raw Document
// ============================================================================

/// Root of a schema document, as deserialized from YAML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaDocument {
    /// Informational version (string or number)
    #[serde(default)]
    pub version: Option<Value>,

    /// Fallback labels and colors
    #[serde(default)]
    pub general: Option<RawGeneralSettings>,

    /// Item type definitions, each wrapped in an `item` key
    #[serde(default)]
    pub items: Option<Vec<ItemEntry>>,

    /// Property catalog, each entry wrapped in a `property` key
    #[serde(default)]
    pub properties: Option<Vec<PropertyEntry>>,
}

/// The `general` section before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawGeneralSettings {
    /// Label for a collection of items
    #[serde(default)]
    pub items_name: Option<Value>,

    /// Label for a single item
    #[serde(default)]
    pub item_name: Option<Value>,

    /// Fallback background color
    #[serde(default)]
    pub back_color: Option<Value>,

    /// Fallback background alpha
    #[serde(default)]
    pub back_alpha: Option<Value>,
}

/// One entry of the `items` sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemEntry {
    /// The wrapped definition
    pub item: RawItemType,
}

/// An item type definition before validation.
///
/// Every field stays untyped so that a wrong shape is reported against the
/// item it belongs to.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItemType {
    /// Item type key
    #[serde(rename = "type", default)]
    pub type_: Option<Value>,

    /// Host-side constructor name
    #[serde(default)]
    pub constructor: Option<Value>,

    /// Properties that must be supplied on construction
    #[serde(default)]
    pub required_properties: Option<Value>,

    /// Properties exposed in the edit dialog
    #[serde(default)]
    pub editable_properties: Option<Value>,

    /// Per-item default values
    #[serde(default)]
    pub default: Option<Value>,
}

/// One entry of the `properties` sequence.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyEntry {
    /// The wrapped definition
    pub property: RawPropertyDefinition,
}

/// A property definition before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawPropertyDefinition {
    /// Property key
    #[serde(default)]
    pub name: Option<Value>,

    /// Display label
    #[serde(default)]
    pub title: Option<Value>,

    /// Widget type name
    #[serde(rename = "type", default)]
    pub type_: Option<Value>,

    /// Hover text
    #[serde(default)]
    pub tooltip: Option<Value>,

    /// Widget parameters, shape depends on the widget type
    #[serde(default)]
    pub parms: Option<Value>,

    /// Catalog default value
    #[serde(default)]
    pub value: Option<Value>,
}

// ============================================================================
// Values
// ============================================================================

/// A default or field value.
///
/// Documents mix numeric scalars, coordinate pairs and strings freely;
/// anything else (maps, longer sequences, null) is rejected, and so are
/// NaN and infinite numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PropertyValue {
    /// `true` / `false`
    Bool(bool),
    /// Integral number
    Integer(i64),
    /// Floating-point number
    Float(f64),
    /// Two-element coordinate pair
    Point([f64; 2]),
    /// Free text
    Text(String),
}

impl PropertyValue {
    /// Converts a YAML value, returning `None` for unsupported shapes.
    #[must_use]
    pub fn from_yaml(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(Self::Bool(*b)),
            Value::Number(n) => n
                .as_i64()
                .map(Self::Integer)
                .or_else(|| finite(n.as_f64()?).map(Self::Float)),
            Value::String(s) => Some(Self::Text(s.clone())),
            Value::Sequence(seq) if seq.len() == 2 => {
                let x = finite(seq[0].as_f64()?)?;
                let y = finite(seq[1].as_f64()?)?;
                Some(Self::Point([x, y]))
            }
            Value::Tagged(tagged) => Self::from_yaml(&tagged.value),
            _ => None,
        }
    }

    /// Returns the numeric value of a scalar number.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the coordinates of a pair.
    #[must_use]
    pub const fn as_point(&self) -> Option<[f64; 2]> {
        match self {
            Self::Point(p) => Some(*p),
            _ => None,
        }
    }

    /// Returns the text of a string value.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Short shape name used in diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "boolean",
            Self::Integer(_) | Self::Float(_) => "number",
            Self::Point(_) => "coordinate pair",
            Self::Text(_) => "string",
        }
    }
}

fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Float(x) => write!(f, "{x:?}"),
            Self::Point([x, y]) => write!(f, "[{x}, {y}]"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(x: f64) -> Self {
        Self::Float(x)
    }
}

impl From<[f64; 2]> for PropertyValue {
    fn from(p: [f64; 2]) -> Self {
        Self::Point(p)
    }
}

// ============================================================================
// Geometric Fields
// ============================================================================

/// Structural fields that are not part of the property catalog.
///
/// Only their presence and shape are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeometricField {
    /// Line start point
    Start,
    /// Line end point
    End,
    /// Circle or rectangle center
    Center,
    /// Circle radius
    Radius,
}

impl GeometricField {
    /// All geometric fields.
    pub const ALL: [Self; 4] = [Self::Start, Self::End, Self::Center, Self::Radius];

    /// Looks up a geometric field by its document key.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Document key of the field.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
            Self::Center => "center",
            Self::Radius => "radius",
        }
    }

    /// Whether `value` has the shape this field requires.
    #[must_use]
    pub const fn accepts(self, value: &PropertyValue) -> bool {
        match self {
            Self::Start | Self::End | Self::Center => value.as_point().is_some(),
            Self::Radius => value.as_f64().is_some(),
        }
    }

    /// Shape description used in diagnostics.
    #[must_use]
    pub const fn expected(self) -> &'static str {
        match self {
            Self::Start | Self::End | Self::Center => "a coordinate pair [x, y]",
            Self::Radius => "a number",
        }
    }
}

/// Returns `true` if `name` is a geometric field.
#[must_use]
pub fn is_geometric(name: &str) -> bool {
    GeometricField::from_name(name).is_some()
}

// ============================================================================
// Widgets
// ============================================================================

/// Widget kinds a property can be edited with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WidgetType {
    /// Free text box
    EditText,
    /// Numeric spinner
    EditNumberSpin,
    /// Bounded slider
    Slider,
}

impl WidgetType {
    /// All widget types in catalog order.
    pub const ALL: [Self; 3] = [Self::EditText, Self::EditNumberSpin, Self::Slider];

    /// Document spelling of the widget type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EditText => "EditText",
            Self::EditNumberSpin => "EditNumberSpin",
            Self::Slider => "Slider",
        }
    }
}

impl fmt::Display for WidgetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WidgetType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| format!("unknown widget type '{s}'"))
    }
}

/// Spinner parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpinParams {
    /// Increment per click
    pub step: f64,
    /// Upper bound
    pub maximum: f64,
}

/// Slider range `[min, max, scale]`.
///
/// The editor divides the slider position by `scale` to get the value it
/// applies (e.g. alpha 0..10 with scale 10 becomes opacity 0.0..1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderRange {
    /// Lowest slider position
    pub min: f64,
    /// Highest slider position
    pub max: f64,
    /// Divisor applied to the position
    pub scale: f64,
}

impl SliderRange {
    /// Whether `value` lies within `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    /// Maps a slider position to the value applied by the editor.
    ///
    /// A zero scale (allowed with a warning) gives a non-finite result.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        value / self.scale
    }
}

/// A widget type together with its validated parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", content = "parms")]
pub enum Widget {
    /// Free text box
    EditText,
    /// Numeric spinner, parameters optional
    EditNumberSpin(Option<SpinParams>),
    /// Bounded slider
    Slider(SliderRange),
}

impl Widget {
    /// The widget's type tag.
    #[must_use]
    pub const fn widget_type(&self) -> WidgetType {
        match self {
            Self::EditText => WidgetType::EditText,
            Self::EditNumberSpin(_) => WidgetType::EditNumberSpin,
            Self::Slider(_) => WidgetType::Slider,
        }
    }

    /// Checks a value against the widget's declared domain.
    ///
    /// Returns a description of the problem, or `None` if the value fits.
    #[must_use]
    pub fn check_value(&self, value: &PropertyValue) -> Option<String> {
        match self {
            Self::EditText => None,
            Self::EditNumberSpin(params) => {
                let Some(x) = value.as_f64() else {
                    return Some(format!("spinner expects a number, got a {}", value.kind()));
                };
                params
                    .filter(|p| x > p.maximum)
                    .map(|p| format!("value {x} exceeds spinner maximum {}", p.maximum))
            }
            Self::Slider(range) => {
                let Some(x) = value.as_f64() else {
                    return Some(format!("slider expects a number, got a {}", value.kind()));
                };
                (!range.contains(x)).then(|| {
                    format!(
                        "value {x} outside slider range [{}, {}]",
                        range.min, range.max
                    )
                })
            }
        }
    }
}

// ============================================================================
// Validated Model
// ============================================================================

/// Fallback labels and colors shared by all item types.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneralSettings {
    /// Label for a collection of items
    pub items_name: String,
    /// Label for a single item
    pub item_name: String,
    /// Fallback for `back_color`
    pub back_color: PropertyValue,
    /// Fallback for `back_alpha`
    pub back_alpha: PropertyValue,
}

impl GeneralSettings {
    /// Returns the general fallback for a property, if one exists.
    #[must_use]
    pub fn fallback(&self, property: &str) -> Option<&PropertyValue> {
        match property {
            "back_color" => Some(&self.back_color),
            "back_alpha" => Some(&self.back_alpha),
            _ => None,
        }
    }
}

/// One editable property in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDefinition {
    /// Unique key
    pub name: String,
    /// Display label
    pub title: String,
    /// Widget and its parameters
    #[serde(flatten)]
    pub widget: Widget,
    /// Hover text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
    /// Catalog default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<PropertyValue>,
}

impl PropertyDefinition {
    /// The widget type used to edit this property.
    #[must_use]
    pub const fn widget_type(&self) -> WidgetType {
        self.widget.widget_type()
    }
}

/// One editable scene-item kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemTypeDefinition {
    /// Unique key (`line`, `circle`, ...)
    #[serde(rename = "type")]
    pub type_name: String,
    /// Host-side constructor name
    pub constructor: String,
    /// Properties that must be supplied on construction
    pub required_properties: Vec<String>,
    /// Properties exposed in the edit dialog, in display order
    pub editable_properties: Vec<String>,
    /// Per-item defaults; `None` when the document has no `default` block
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<IndexMap<String, PropertyValue>>,
}

impl ItemTypeDefinition {
    /// Returns the item-level default for a property.
    #[must_use]
    pub fn default_for(&self, property: &str) -> Option<&PropertyValue> {
        self.default.as_ref()?.get(property)
    }

    /// Whether `property` appears in either property list.
    #[must_use]
    pub fn lists(&self, property: &str) -> bool {
        self.required_properties.iter().any(|p| p == property)
            || self.editable_properties.iter().any(|p| p == property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn yaml(text: &str) -> Value {
        serde_yaml::from_str(text).unwrap()
    }

    #[test]
    fn test_property_value_from_yaml() {
        assert_eq!(
            PropertyValue::from_yaml(&yaml("1")),
            Some(PropertyValue::Integer(1))
        );
        assert_eq!(
            PropertyValue::from_yaml(&yaml("1.0")),
            Some(PropertyValue::Float(1.0))
        );
        assert_eq!(
            PropertyValue::from_yaml(&yaml("blue")),
            Some(PropertyValue::Text("blue".to_string()))
        );
        assert_eq!(
            PropertyValue::from_yaml(&yaml("[0, 2.5]")),
            Some(PropertyValue::Point([0.0, 2.5]))
        );
        assert_eq!(
            PropertyValue::from_yaml(&yaml("true")),
            Some(PropertyValue::Bool(true))
        );
    }

    #[test]
    fn test_property_value_rejects_unsupported_shapes() {
        assert_eq!(PropertyValue::from_yaml(&yaml("[1, 2, 3]")), None);
        assert_eq!(PropertyValue::from_yaml(&yaml("[a, b]")), None);
        assert_eq!(PropertyValue::from_yaml(&yaml("{x: 1}")), None);
        assert_eq!(PropertyValue::from_yaml(&Value::Null), None);
    }

    #[test]
    fn test_property_value_rejects_non_finite_numbers() {
        assert_eq!(PropertyValue::from_yaml(&yaml(".nan")), None);
        assert_eq!(PropertyValue::from_yaml(&yaml("-.inf")), None);
        assert_eq!(PropertyValue::from_yaml(&yaml("[0, .inf]")), None);
        assert_eq!(PropertyValue::from_yaml(&yaml("[.nan, 1]")), None);
    }

    #[test]
    fn test_geometric_fields() {
        assert!(is_geometric("start"));
        assert!(is_geometric("radius"));
        assert!(!is_geometric("width"));
        assert!(!is_geometric("height"));

        assert!(GeometricField::Center.accepts(&PropertyValue::Point([0.0, 0.0])));
        assert!(!GeometricField::Center.accepts(&PropertyValue::Integer(0)));
        assert!(GeometricField::Radius.accepts(&PropertyValue::Float(0.5)));
        assert!(!GeometricField::Radius.accepts(&PropertyValue::Point([0.0, 0.5])));
    }

    #[test]
    fn test_widget_type_from_str() {
        assert_eq!("Slider".parse::<WidgetType>(), Ok(WidgetType::Slider));
        assert_eq!(
            "EditNumberSpin".parse::<WidgetType>(),
            Ok(WidgetType::EditNumberSpin)
        );
        assert!("ComboBox".parse::<WidgetType>().is_err());
        assert!("slider".parse::<WidgetType>().is_err());
    }

    #[test]
    fn test_slider_check_value() {
        let slider = Widget::Slider(SliderRange {
            min: 0.0,
            max: 10.0,
            scale: 10.0,
        });
        assert_eq!(slider.check_value(&PropertyValue::Integer(3)), None);
        assert!(slider.check_value(&PropertyValue::Integer(30)).is_some());
        assert!(slider.check_value(&"x".into()).is_some());
    }

    #[test]
    fn test_spin_check_value() {
        let spin = Widget::EditNumberSpin(Some(SpinParams {
            step: 1.0,
            maximum: 360.0,
        }));
        assert_eq!(spin.check_value(&PropertyValue::Integer(90)), None);
        assert!(spin.check_value(&PropertyValue::Integer(400)).is_some());
        assert_eq!(
            Widget::EditNumberSpin(None).check_value(&PropertyValue::Float(1e9)),
            None
        );
        assert_eq!(Widget::EditText.check_value(&PropertyValue::Integer(1)), None);
    }

    #[test]
    fn test_slider_normalize() {
        let range = SliderRange {
            min: 0.0,
            max: 10.0,
            scale: 10.0,
        };
        assert!((range.normalize(5.0) - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_general_fallback() {
        let general = GeneralSettings {
            items_name: "items".to_string(),
            item_name: "item".to_string(),
            back_color: "white".into(),
            back_alpha: PropertyValue::Integer(2),
        };
        assert_eq!(general.fallback("back_color"), Some(&"white".into()));
        assert_eq!(general.fallback("back_alpha"), Some(&PropertyValue::Integer(2)));
        assert_eq!(general.fallback("color"), None);
    }

    #[test]
    fn test_property_definition_serializes_widget_inline() {
        let prop = PropertyDefinition {
            name: "alpha".to_string(),
            title: "Alpha".to_string(),
            widget: Widget::Slider(SliderRange {
                min: 0.0,
                max: 10.0,
                scale: 10.0,
            }),
            tooltip: None,
            value: Some(PropertyValue::Integer(5)),
        };
        let json = serde_json::to_value(&prop).unwrap();
        assert_eq!(json["type"], "Slider");
        assert_eq!(json["parms"]["max"], 10.0);
        assert_eq!(json["value"], 5);
    }
}
