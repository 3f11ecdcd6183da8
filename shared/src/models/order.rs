//! Dish order model
//!
//! Two shapes of the same order:
//! - [`OrderDraft`]: raw form values, one string per input. Nothing is checked.
//! - [`Order`]: the finalized record sent to the dish endpoint. Built only by
//!   [`crate::validation::OrderValidator::finalize`].

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ============================================================================
// Dish Type
// ============================================================================

/// Dish type discriminator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DishType {
    Pizza,
    Soup,
    Sandwich,
}

impl DishType {
    pub const ALL: [DishType; 3] = [DishType::Pizza, DishType::Soup, DishType::Sandwich];

    /// Wire value (`"pizza"`, `"soup"`, `"sandwich"`)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pizza => "pizza",
            Self::Soup => "soup",
            Self::Sandwich => "sandwich",
        }
    }

    /// Dish-specific fields that apply to this dish type
    pub fn fields(&self) -> &'static [Field] {
        match self {
            Self::Pizza => &[Field::NoOfSlices, Field::Diameter],
            Self::Soup => &[Field::SpicinessScale],
            Self::Sandwich => &[Field::SlicesOfBread],
        }
    }
}

impl fmt::Display for DishType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown dish type string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown dish type: {0:?}")]
pub struct ParseDishTypeError(pub String);

impl FromStr for DishType {
    type Err = ParseDishTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        DishType::ALL
            .into_iter()
            .find(|dish| dish.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ParseDishTypeError(s.to_string()))
    }
}

// ============================================================================
// Field
// ============================================================================

/// Order form field, keyed by its wire name
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Name,
    PreparationTime,
    DishType,
    NoOfSlices,
    Diameter,
    SpicinessScale,
    SlicesOfBread,
}

impl Field {
    /// Fields every dish type carries
    pub const COMMON: [Field; 3] = [Field::Name, Field::PreparationTime, Field::DishType];

    /// Fields owned by exactly one dish type
    pub const DISH_SPECIFIC: [Field; 4] = [
        Field::NoOfSlices,
        Field::Diameter,
        Field::SpicinessScale,
        Field::SlicesOfBread,
    ];

    pub const ALL: [Field; 7] = [
        Field::Name,
        Field::PreparationTime,
        Field::DishType,
        Field::NoOfSlices,
        Field::Diameter,
        Field::SpicinessScale,
        Field::SlicesOfBread,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::PreparationTime => "preparation_time",
            Self::DishType => "dish_type",
            Self::NoOfSlices => "no_of_slices",
            Self::Diameter => "diameter",
            Self::SpicinessScale => "spiciness_scale",
            Self::SlicesOfBread => "slices_of_bread",
        }
    }

    pub fn from_key(key: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|field| field.key() == key)
    }

    /// Human label used next to the input
    pub fn label(&self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::PreparationTime => "Preparation time",
            Self::DishType => "Type",
            Self::NoOfSlices => "Number of slices",
            Self::Diameter => "Diameter [cm]",
            Self::SpicinessScale => "How spicy",
            Self::SlicesOfBread => "How many slices",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// Draft (raw form input)
// ============================================================================

/// Raw order form values
///
/// Numeric inputs stay as text: `None` means the field is absent (pruned),
/// `Some("")` means the user left it empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub preparation_time: String,
    #[serde(default, alias = "type")]
    pub dish_type: String,
    #[serde(
        default,
        deserialize_with = "raw_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub no_of_slices: Option<String>,
    #[serde(
        default,
        deserialize_with = "raw_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub diameter: Option<String>,
    #[serde(
        default,
        deserialize_with = "raw_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub spiciness_scale: Option<String>,
    #[serde(
        default,
        deserialize_with = "raw_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub slices_of_bread: Option<String>,
}

impl OrderDraft {
    pub fn new(
        name: impl Into<String>,
        preparation_time: impl Into<String>,
        dish_type: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            preparation_time: preparation_time.into(),
            dish_type: dish_type.into(),
            ..Default::default()
        }
    }

    /// Parsed dish type, `None` when empty or unknown
    pub fn dish_type(&self) -> Option<DishType> {
        self.dish_type.parse().ok()
    }

    /// Raw value of a field; `None` when the field is absent
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(self.name.as_str()),
            Field::PreparationTime => Some(self.preparation_time.as_str()),
            Field::DishType => Some(self.dish_type.as_str()),
            Field::NoOfSlices => self.no_of_slices.as_deref(),
            Field::Diameter => self.diameter.as_deref(),
            Field::SpicinessScale => self.spiciness_scale.as_deref(),
            Field::SlicesOfBread => self.slices_of_bread.as_deref(),
        }
    }

    /// Set the raw value of a field
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::PreparationTime => self.preparation_time = value,
            Field::DishType => self.dish_type = value,
            Field::NoOfSlices => self.no_of_slices = Some(value),
            Field::Diameter => self.diameter = Some(value),
            Field::SpicinessScale => self.spiciness_scale = Some(value),
            Field::SlicesOfBread => self.slices_of_bread = Some(value),
        }
    }

    /// Builder form of [`OrderDraft::set`]
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Remove a dish-specific field. Common fields are reset to empty.
    pub fn clear(&mut self, field: Field) {
        match field {
            Field::Name => self.name.clear(),
            Field::PreparationTime => self.preparation_time.clear(),
            Field::DishType => self.dish_type.clear(),
            Field::NoOfSlices => self.no_of_slices = None,
            Field::Diameter => self.diameter = None,
            Field::SpicinessScale => self.spiciness_scale = None,
            Field::SlicesOfBread => self.slices_of_bread = None,
        }
    }

    /// Fields currently present (dish-specific ones only when not absent)
    pub fn present_fields(&self) -> Vec<Field> {
        Field::ALL
            .into_iter()
            .filter(|field| self.get(*field).is_some())
            .collect()
    }
}

/// Numeric form input as sent by a browser or a JSON file
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

fn raw_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<RawNumber>::deserialize(deserializer)?.map(|raw| match raw {
        RawNumber::Int(v) => v.to_string(),
        RawNumber::Float(v) => v.to_string(),
        RawNumber::Text(v) => v,
    }))
}

// ============================================================================
// Finalized Order
// ============================================================================

/// Dish-specific part of a finalized order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "dish_type", rename_all = "lowercase")]
pub enum Dish {
    Pizza { no_of_slices: u8, diameter: f64 },
    Soup { spiciness_scale: u8 },
    Sandwich { slices_of_bread: u8 },
}

impl Dish {
    pub fn dish_type(&self) -> DishType {
        match self {
            Self::Pizza { .. } => DishType::Pizza,
            Self::Soup { .. } => DishType::Soup,
            Self::Sandwich { .. } => DishType::Sandwich,
        }
    }
}

/// Finalized order, serialized as a flat JSON object:
///
/// ```json
/// {"name":"Margherita","preparation_time":"00:20:00","dish_type":"pizza","no_of_slices":8,"diameter":30.0}
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub name: String,
    pub preparation_time: String,
    #[serde(flatten)]
    pub dish: Dish,
}

impl Order {
    pub fn dish_type(&self) -> DishType {
        self.dish.dish_type()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dish_type_parse() {
        assert_eq!("pizza".parse::<DishType>(), Ok(DishType::Pizza));
        assert_eq!(" Soup ".parse::<DishType>(), Ok(DishType::Soup));
        assert_eq!("SANDWICH".parse::<DishType>(), Ok(DishType::Sandwich));
        assert!("".parse::<DishType>().is_err());
        assert!("burger".parse::<DishType>().is_err());
    }

    #[test]
    fn test_field_keys_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("type"), None);
    }

    #[test]
    fn test_draft_accepts_numbers_and_strings() {
        let draft: OrderDraft = serde_json::from_str(
            r#"{"name":"Margherita","preparation_time":"00:20:00","type":"pizza","no_of_slices":8,"diameter":"30.5","spiciness_scale":""}"#,
        )
        .unwrap();

        assert_eq!(draft.dish_type(), Some(DishType::Pizza));
        assert_eq!(draft.no_of_slices.as_deref(), Some("8"));
        assert_eq!(draft.diameter.as_deref(), Some("30.5"));
        assert_eq!(draft.spiciness_scale.as_deref(), Some(""));
        assert_eq!(draft.slices_of_bread, None);
    }

    #[test]
    fn test_draft_null_is_absent() {
        let draft: OrderDraft =
            serde_json::from_str(r#"{"name":"x","slices_of_bread":null}"#).unwrap();
        assert_eq!(draft.slices_of_bread, None);
        assert_eq!(draft.preparation_time, "");
    }

    #[test]
    fn test_draft_set_and_clear() {
        let mut draft = OrderDraft::new("Tomato", "00:15:00", "soup")
            .with(Field::SpicinessScale, "5");
        assert_eq!(draft.get(Field::SpicinessScale), Some("5"));

        draft.clear(Field::SpicinessScale);
        assert_eq!(draft.get(Field::SpicinessScale), None);
        assert_eq!(
            draft.present_fields(),
            vec![Field::Name, Field::PreparationTime, Field::DishType]
        );
    }

    #[test]
    fn test_order_serializes_flat() {
        let order = Order {
            name: "Margherita".to_string(),
            preparation_time: "00:20:00".to_string(),
            dish: Dish::Pizza {
                no_of_slices: 8,
                diameter: 30.0,
            },
        };

        let value = serde_json::to_value(&order).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 5);
        assert_eq!(object["dish_type"], "pizza");
        assert_eq!(object["no_of_slices"], 8);
        assert_eq!(object["diameter"], 30.0);
    }

    #[test]
    fn test_order_deserializes_flat() {
        let order: Order = serde_json::from_str(
            r#"{"name":"Club","preparation_time":"00:05:00","dish_type":"sandwich","slices_of_bread":3}"#,
        )
        .unwrap();

        assert_eq!(order.dish, Dish::Sandwich { slices_of_bread: 3 });
        assert_eq!(order.dish_type(), DishType::Sandwich);
    }
}
