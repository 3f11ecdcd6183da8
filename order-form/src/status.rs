//! Status banner shown after a submission attempt

use crate::FormError;
use serde::Serialize;
use std::fmt;

const SENT_COLOR: &str = "#008000";
const ERROR_COLOR: &str = "#ff0000";

/// Outcome message for the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusNotice {
    pub message: String,
    pub is_error: bool,
}

impl StatusNotice {
    pub fn sent() -> Self {
        Self {
            message: "order sent!".to_string(),
            is_error: false,
        }
    }

    /// Generic failure; network and server errors are not told apart
    pub fn failed() -> Self {
        Self {
            message: "something went wrong!".to_string(),
            is_error: true,
        }
    }

    /// Banner for a submit outcome.
    ///
    /// `None` when nothing was sent: validation failures are shown next to
    /// the fields instead, and a second click while sending is ignored.
    pub fn from_outcome<T>(outcome: &Result<T, FormError>) -> Option<Self> {
        match outcome {
            Ok(_) => Some(Self::sent()),
            Err(FormError::Submission(_)) => Some(Self::failed()),
            Err(FormError::Validation(_) | FormError::AlreadySending) => None,
        }
    }

    pub fn color(&self) -> &'static str {
        if self.is_error { ERROR_COLOR } else { SENT_COLOR }
    }
}

impl fmt::Display for StatusNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use order_client::ClientError;
    use shared::{Field, ValidationReport};

    #[test]
    fn test_sent_notice() {
        let notice = StatusNotice::from_outcome::<()>(&Ok(())).unwrap();
        assert_eq!(notice.to_string(), "order sent!");
        assert!(!notice.is_error);
        assert_eq!(notice.color(), "#008000");
    }

    #[test]
    fn test_failed_notice() {
        let outcome: Result<(), FormError> = Err(ClientError::Timeout(30).into());
        let notice = StatusNotice::from_outcome(&outcome).unwrap();
        assert_eq!(notice, StatusNotice::failed());
        assert_eq!(notice.color(), "#ff0000");
    }

    #[test]
    fn test_no_notice_without_sending() {
        let invalid: Result<(), FormError> =
            Err(ValidationReport::single(Field::Name, "This field is required").into());
        assert!(StatusNotice::from_outcome(&invalid).is_none());

        let busy: Result<(), FormError> = Err(FormError::AlreadySending);
        assert!(StatusNotice::from_outcome(&busy).is_none());
    }
}
