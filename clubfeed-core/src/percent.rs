//! Whole-number relevance percentages.

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;
use thiserror::Error;

/// Share of an item's declared interests that the viewer also holds,
/// truncated to a whole percentage in `0..=100`.
///
/// # Examples
/// ```
/// use clubfeed_core::PercentMatch;
///
/// assert_eq!(PercentMatch::from_ratio(2, 3).value(), 66);
/// assert_eq!(PercentMatch::from_ratio(1, 1), PercentMatch::FULL);
/// assert_eq!(PercentMatch::from_ratio(0, 0), PercentMatch::ZERO);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct PercentMatch(u8);

/// Errors returned by [`PercentMatch::new`].
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum PercentMatchError {
    /// The value exceeded 100.
    #[error("percent match {0} exceeds 100")]
    OutOfRange(u8),
}

impl PercentMatch {
    /// No shared interests.
    pub const ZERO: Self = Self(0);
    /// Every declared interest is shared.
    pub const FULL: Self = Self(100);

    /// Validate and wrap a raw percentage.
    ///
    /// # Errors
    /// Returns [`PercentMatchError::OutOfRange`] for values above 100.
    pub const fn new(value: u8) -> Result<Self, PercentMatchError> {
        if value > 100 {
            return Err(PercentMatchError::OutOfRange(value));
        }
        Ok(Self(value))
    }

    /// Floor of `shared / declared × 100`.
    ///
    /// Returns [`PercentMatch::ZERO`] when `declared` is zero. `shared` is
    /// capped at `declared`, so the result never exceeds 100.
    #[must_use]
    #[expect(
        clippy::integer_division,
        reason = "percentages are truncated towards zero by definition"
    )]
    pub fn from_ratio(shared: usize, declared: usize) -> Self {
        if declared == 0 {
            return Self::ZERO;
        }
        let shared = u128::try_from(shared.min(declared)).unwrap_or(u128::MAX);
        let declared = u128::try_from(declared).unwrap_or(u128::MAX);
        let percent = shared.saturating_mul(100) / declared;
        Self(u8::try_from(percent).unwrap_or(100))
    }

    /// Raw percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Report whether any interest is shared.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl fmt::Display for PercentMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl TryFrom<u8> for PercentMatch {
    type Error = PercentMatchError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PercentMatch> for u8 {
    fn from(percent: PercentMatch) -> Self {
        percent.0
    }
}
