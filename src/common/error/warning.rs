//! Non-fatal conversion signals.
use std::fmt;

/// A non-fatal signal raised while converting a value.
///
/// The value that accompanies a warning is always usable (clamped, defaulted or
/// substituted); whether to treat it as fatal is up to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// NaN or infinity replaced by a finite value
    NonFiniteClamped { context: String },
    /// Negative value where only non-negative values are valid, replaced by 0
    NegativeClamped { context: String, value: f64 },
    /// Unparseable length replaced by 0
    MalformedLengthDefaulted { input: String },
    /// Viewport field replaced by its default
    ViewportDefaulted { field: &'static str },
    /// Pattern tile could not be encoded; a solid fill was used instead
    PatternFallback { reason: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteClamped { context } => {
                write!(f, "non-finite value in {} clamped to 0", context)
            },
            Self::NegativeClamped { context, value } => {
                write!(f, "negative value {} in {} clamped to 0", value, context)
            },
            Self::MalformedLengthDefaulted { input } => {
                write!(f, "malformed length '{}' defaulted to 0", input)
            },
            Self::ViewportDefaulted { field } => {
                write!(f, "viewport {} invalid, default used", field)
            },
            Self::PatternFallback { reason } => {
                write!(f, "pattern fill replaced by solid fill: {}", reason)
            },
        }
    }
}

/// A value together with the warnings raised while producing it.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Checked<T> {
    /// A value produced without warnings.
    #[inline]
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// A value produced with a single warning.
    #[inline]
    pub fn warned(value: T, warning: Warning) -> Self {
        Self {
            value,
            warnings: vec![warning],
        }
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Transform the value, keeping the warnings.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Checked<U> {
        Checked {
            value: f(self.value),
            warnings: self.warnings,
        }
    }

    /// Chain a computation that may warn as well.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Checked<U>) -> Checked<U> {
        let mut next = f(self.value);
        let mut warnings = self.warnings;
        warnings.append(&mut next.warnings);
        Checked {
            value: next.value,
            warnings,
        }
    }

    /// Move this value's warnings into `sink` and return the bare value.
    pub fn collect_into(self, sink: &mut Vec<Warning>) -> T {
        sink.extend(self.warnings);
        self.value
    }

    /// Return the value, or the first warning as an error.
    pub fn into_strict(self) -> crate::Result<T> {
        match self.warnings.into_iter().next() {
            Some(warning) => Err(warning.into()),
            None => Ok(self.value),
        }
    }
}
