//! Order Form - the caller side of a dish order
//!
//! # Flow
//!
//! ```text
//! FormSnapshot (raw input + touched fields)
//!   → OrderValidator::finalize   (validate + prune)
//!   → OrderSubmitter::submit     (one POST, no retry)
//!   → StatusNotice               ("order sent!" / "something went wrong!")
//! ```
//!
//! # Modules
//!
//! - `form`: snapshots and the submission controller
//! - `status`: the banner shown after a submission attempt
//! - `config` / `logger` / `cli`: process setup for the `order-form` binary

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logger;
pub mod status;

pub use cli::Args;
pub use config::Config;
pub use error::FormError;
pub use form::{FormSnapshot, OrderForm, SubmitOutcome};
pub use logger::init_logger;
pub use status::StatusNotice;
