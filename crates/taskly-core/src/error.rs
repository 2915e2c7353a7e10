//! Validation errors for the task model.

/// Error raised when a value cannot be part of a valid task.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("task name must not be empty")]
    EmptyName,

    #[error("invalid status value: {code}. Use {valid}")]
    InvalidStatusCode { code: i64, valid: String },

    #[error("invalid status label {label:?}. Use one of {valid}")]
    InvalidStatusLabel { label: String, valid: String },
}

impl Error {
    /// Create an error for a numeric status code outside the known set.
    pub fn invalid_status_code(code: i64) -> Self {
        Self::InvalidStatusCode {
            code,
            valid: crate::Status::valid_options(),
        }
    }

    /// Create an error for a status label that is not canonical.
    pub fn invalid_status_label<S: Into<String>>(label: S) -> Self {
        let valid = crate::Status::all()
            .iter()
            .map(|status| format!("{:?}", status.label()))
            .collect::<Vec<_>>()
            .join(", ");
        Self::InvalidStatusLabel {
            label: label.into(),
            valid,
        }
    }
}
