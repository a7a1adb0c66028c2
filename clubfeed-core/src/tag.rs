//! Interest tags: opaque, case-sensitive topical labels.
//!
//! Tags are attached to viewers and to clubs; events and posts inherit the
//! tags of their owning club. A tag's identity is its name.

use std::borrow::Borrow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single interest label such as `Music` or `Tech`.
///
/// Comparison is case-sensitive: `Music` and `music` are distinct tags.
///
/// # Examples
/// ```
/// use clubfeed_core::InterestTag;
///
/// # fn main() -> Result<(), clubfeed_core::InterestTagError> {
/// let tag = InterestTag::new("Music")?;
/// assert_eq!(tag.as_str(), "Music");
/// assert_ne!(tag, InterestTag::new("music")?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct InterestTag(String);

/// Errors returned by [`InterestTag::new`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InterestTagError {
    /// The name was empty or contained only whitespace.
    #[error("interest tag must not be blank")]
    Blank,
}

impl InterestTag {
    /// Validate and construct a tag.
    ///
    /// # Errors
    /// Returns [`InterestTagError::Blank`] when `name` is empty or only
    /// whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, InterestTagError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InterestTagError::Blank);
        }
        Ok(Self(name))
    }

    /// Borrow the tag name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InterestTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for InterestTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for InterestTag {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for InterestTag {
    type Error = InterestTagError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for InterestTag {
    type Error = InterestTagError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InterestTag> for String {
    fn from(tag: InterestTag) -> Self {
        tag.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn rejects_blank_names(#[case] name: &str) {
        assert_eq!(InterestTag::new(name), Err(InterestTagError::Blank));
    }

    #[rstest]
    fn comparison_is_case_sensitive() {
        let upper = InterestTag::new("Art").expect("valid tag");
        let lower = InterestTag::new("art").expect("valid tag");
        assert_ne!(upper, lower);
    }

    #[rstest]
    fn keeps_surrounding_whitespace_verbatim() {
        let tag = InterestTag::new(" Tech ").expect("valid tag");
        assert_eq!(tag.as_str(), " Tech ");
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn deserialising_blank_tag_fails() {
        let result: Result<InterestTag, _> = serde_json::from_str("\"  \"");
        assert!(result.is_err());
    }
}
