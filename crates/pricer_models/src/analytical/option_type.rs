//! Call/put flag.

use std::fmt;

/// Call or put, carrying the sign convention `+1` / `-1`.
///
/// # Examples
/// ```
/// use pricer_models::analytical::OptionType;
///
/// assert_eq!(OptionType::Call.sign(), 1.0);
/// assert_eq!(OptionType::from_sign(-1.0), Some(OptionType::Put));
/// assert_eq!(OptionType::Put.flip(), OptionType::Call);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy (`+1`).
    Call,
    /// Right to sell (`-1`).
    Put,
}

impl OptionType {
    /// `+1.0` for calls, `-1.0` for puts.
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Parse a `±1` flag; `None` for anything else.
    pub fn from_sign(sign: f64) -> Option<Self> {
        if sign == 1.0 {
            Some(OptionType::Call)
        } else if sign == -1.0 {
            Some(OptionType::Put)
        } else {
            None
        }
    }

    /// The opposite side.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            OptionType::Call => OptionType::Put,
            OptionType::Put => OptionType::Call,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_sign_rejects_other_values() {
        assert_eq!(OptionType::from_sign(0.0), None);
        assert_eq!(OptionType::from_sign(2.0), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(OptionType::Call.to_string(), "call");
        assert_eq!(OptionType::Put.to_string(), "put");
    }
}
