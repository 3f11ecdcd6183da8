//! Shared types for the dish order form
//!
//! Order model, dish-conditional validation and the validation error type.
//! No I/O happens here; the HTTP side lives in `order-client`.

pub mod error;
pub mod models;
pub mod validation;

// Re-exports
pub use error::ValidationReport;
pub use models::{Dish, DishType, Field, Order, OrderDraft, ParseDishTypeError};
pub use serde::{Deserialize, Serialize};
pub use validation::OrderValidator;
