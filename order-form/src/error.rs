//! Form error types

use order_client::ClientError;
use shared::ValidationReport;
use thiserror::Error;

/// Why a submit attempt did not produce a server reply
#[derive(Debug, Error)]
pub enum FormError {
    /// Input is invalid; nothing was sent
    #[error(transparent)]
    Validation(#[from] ValidationReport),

    /// The order was valid but sending it failed
    #[error("Submission failed: {0}")]
    Submission(#[from] ClientError),

    /// Another submission from this form is still pending
    #[error("An order is already being sent")]
    AlreadySending,
}

impl FormError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_submission(&self) -> bool {
        matches!(self, Self::Submission(_))
    }
}
