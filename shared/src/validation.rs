//! Order validation
//!
//! One rule set per dish type. Common fields (name, preparation time,
//! dish type) are checked by hand; dish-specific ranges are declared with
//! `validator` on small per-dish input structs.
//!
//! Numeric inputs arrive as text. Empty text is "missing", never 0.

use crate::error::ValidationReport;
use crate::models::{Dish, DishType, Field, Order, OrderDraft};
use validator::{Validate, ValidationErrors};

// ── Limits and messages ─────────────────────────────────────────────

/// Maximum order name length, in characters
pub const MAX_NAME_LEN: usize = 50;

pub const MSG_REQUIRED: &str = "This field is required";
pub const MSG_NAME_TOO_LONG: &str = "Name is too long!";
pub const MSG_NOT_A_NUMBER: &str = "Must be a number";
pub const MSG_NOT_WHOLE: &str = "Must be a whole number";

// ── Per-dish rule sets ──────────────────────────────────────────────

#[derive(Debug, Validate)]
struct PizzaInput {
    #[validate(
        required(message = "This field is required"),
        range(min = 0, max = 12, message = "Choose between 0-12")
    )]
    no_of_slices: Option<i64>,
    #[validate(
        required(message = "This field is required"),
        range(min = 12.0, max = 45.0, message = "Choose between 12-45")
    )]
    diameter: Option<f64>,
}

#[derive(Debug, Validate)]
struct SoupInput {
    #[validate(
        required(message = "This field is required"),
        range(min = 0, max = 10, message = "Scale: 0-10")
    )]
    spiciness_scale: Option<i64>,
}

#[derive(Debug, Validate)]
struct SandwichInput {
    #[validate(
        required(message = "This field is required"),
        range(min = 1, max = 20, message = "Choose between 1-20")
    )]
    slices_of_bread: Option<i64>,
}

// ── Validator ───────────────────────────────────────────────────────

/// Dish-conditional order validation and pruning
pub struct OrderValidator;

impl OrderValidator {
    /// Check every field of a draft.
    ///
    /// Dish-specific fields are only checked for the draft's own dish type.
    /// Without a recognised dish type they are skipped entirely.
    pub fn validate(draft: &OrderDraft) -> ValidationReport {
        match evaluate(draft) {
            Ok(_) => ValidationReport::new(),
            Err(report) => report,
        }
    }

    /// Copy of the draft with every field not relevant to its dish type
    /// removed. Idempotent.
    pub fn prune(draft: &OrderDraft) -> OrderDraft {
        let relevant = draft.dish_type().map(|dish| dish.fields()).unwrap_or(&[]);
        let mut pruned = draft.clone();
        for field in Field::DISH_SPECIFIC {
            if !relevant.contains(&field) {
                pruned.clear(field);
            }
        }
        pruned
    }

    /// Validate, prune and convert a draft into a submit-ready [`Order`].
    pub fn finalize(draft: &OrderDraft) -> Result<Order, ValidationReport> {
        evaluate(&Self::prune(draft))
    }

    /// Inputs shown for a dish type: the common fields, then the dish's own.
    pub fn visible_fields(dish_type: Option<DishType>) -> Vec<Field> {
        let mut fields = Field::COMMON.to_vec();
        if let Some(dish) = dish_type {
            fields.extend_from_slice(dish.fields());
        }
        fields
    }
}

fn evaluate(draft: &OrderDraft) -> Result<Order, ValidationReport> {
    let mut report = ValidationReport::new();

    let name = draft.name.trim();
    if name.is_empty() {
        report.insert(Field::Name, MSG_REQUIRED);
    } else if draft.name.chars().count() > MAX_NAME_LEN {
        report.insert(Field::Name, MSG_NAME_TOO_LONG);
    }

    if draft.preparation_time.trim().is_empty() {
        report.insert(Field::PreparationTime, MSG_REQUIRED);
    }

    let dish = match draft.dish_type() {
        Some(DishType::Pizza) => pizza_rules(draft, &mut report),
        Some(DishType::Soup) => soup_rules(draft, &mut report),
        Some(DishType::Sandwich) => sandwich_rules(draft, &mut report),
        None => {
            report.insert(Field::DishType, MSG_REQUIRED);
            None
        }
    };

    if !report.is_valid() {
        return Err(report);
    }
    let dish = dish.ok_or_else(|| ValidationReport::single(Field::DishType, MSG_REQUIRED))?;

    Ok(Order {
        name: draft.name.clone(),
        preparation_time: draft.preparation_time.clone(),
        dish,
    })
}

fn pizza_rules(draft: &OrderDraft, report: &mut ValidationReport) -> Option<Dish> {
    let input = PizzaInput {
        no_of_slices: parse_integer(Field::NoOfSlices, draft.no_of_slices.as_deref(), report),
        diameter: parse_number(Field::Diameter, draft.diameter.as_deref(), report),
    };
    if let Err(errors) = input.validate() {
        absorb(&errors, report);
        return None;
    }
    Some(Dish::Pizza {
        no_of_slices: u8::try_from(input.no_of_slices?).ok()?,
        diameter: input.diameter?,
    })
}

fn soup_rules(draft: &OrderDraft, report: &mut ValidationReport) -> Option<Dish> {
    let input = SoupInput {
        spiciness_scale: parse_integer(
            Field::SpicinessScale,
            draft.spiciness_scale.as_deref(),
            report,
        ),
    };
    if let Err(errors) = input.validate() {
        absorb(&errors, report);
        return None;
    }
    Some(Dish::Soup {
        spiciness_scale: u8::try_from(input.spiciness_scale?).ok()?,
    })
}

fn sandwich_rules(draft: &OrderDraft, report: &mut ValidationReport) -> Option<Dish> {
    let input = SandwichInput {
        slices_of_bread: parse_integer(
            Field::SlicesOfBread,
            draft.slices_of_bread.as_deref(),
            report,
        ),
    };
    if let Err(errors) = input.validate() {
        absorb(&errors, report);
        return None;
    }
    Some(Dish::Sandwich {
        slices_of_bread: u8::try_from(input.slices_of_bread?).ok()?,
    })
}

/// Copy `validator` errors into the report, keyed by wire field name.
fn absorb(errors: &ValidationErrors, report: &mut ValidationReport) {
    for (key, field_errors) in errors.field_errors() {
        let (Some(field), Some(error)) = (Field::from_key(&key), field_errors.first()) else {
            continue;
        };
        let message = error
            .message
            .as_ref()
            .map(|m| m.to_string())
            .unwrap_or_else(|| error.code.to_string());
        report.insert(field, message);
    }
}

// ── Numeric input parsing ───────────────────────────────────────────

/// Parse a finite number. Empty or absent input is `None`.
fn parse_number(field: Field, raw: Option<&str>, report: &mut ValidationReport) -> Option<f64> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(value),
        _ => {
            report.insert(field, MSG_NOT_A_NUMBER);
            None
        }
    }
}

/// Parse a whole number. `"8"` and `"8.0"` are accepted, `"8.5"` is not.
///
/// Values beyond `i64` saturate, so they fail the range check instead.
fn parse_integer(field: Field, raw: Option<&str>, report: &mut ValidationReport) -> Option<i64> {
    let trimmed = raw.map(str::trim).filter(|s| !s.is_empty())?;
    if let Ok(value) = trimmed.parse::<i64>() {
        return Some(value);
    }
    let value = parse_number(field, Some(trimmed), report)?;
    if value.fract() != 0.0 {
        report.insert(field, MSG_NOT_WHOLE);
        return None;
    }
    Some(value as i64)
}
