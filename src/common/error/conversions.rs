//! Error conversion implementations.
//!
//! This module contains From trait implementations to convert from library
//! error types to the unified Error type.

use super::types::Error;
use super::warning::Warning;

impl From<Warning> for Error {
    fn from(warning: Warning) -> Self {
        match warning {
            Warning::NonFiniteClamped { context } => Error::NonFiniteValue(context),
            other => Error::Promoted(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_warning_promotes_to_non_finite_value() {
        let err: Error = Warning::NonFiniteClamped {
            context: "length NaNpx".into(),
        }
        .into();
        assert_eq!(err, Error::NonFiniteValue("length NaNpx".into()));
        assert!(err.is_shape_scoped());
    }

    #[test]
    fn test_promoted_warning_is_shape_scoped() {
        let err: Error = Warning::NegativeClamped {
            context: "width".into(),
            value: -3.0,
        }
        .into();
        assert!(matches!(err, Error::Promoted(_)));
        assert!(err.is_shape_scoped());
        assert!(err.to_string().contains("width"));
    }
}
