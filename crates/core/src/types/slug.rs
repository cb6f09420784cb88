//! URL-safe post identifiers.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input string is empty (or became empty after normalization).
    #[error("slug cannot be empty")]
    Empty,
    /// The input contains characters outside `[a-z0-9-]` or misplaced hyphens.
    #[error("slug must match [a-z0-9]+(-[a-z0-9]+)*")]
    InvalidFormat,
}

/// A URL-safe post identifier.
///
/// Slugs appear in public URLs (`/blog/{slug}`) and must match the pattern
/// `[a-z0-9]+(-[a-z0-9]+)*`: lowercase alphanumeric runs separated by single
/// hyphens, with no leading or trailing hyphen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Parse a `Slug`, requiring the input to already be in canonical form.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty or not in canonical
    /// `[a-z0-9]+(-[a-z0-9]+)*` form.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        let valid = s.split('-').all(|run| {
            !run.is_empty() && run.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        });

        if !valid {
            return Err(SlugError::InvalidFormat);
        }

        Ok(Self(s.to_owned()))
    }

    /// Derive a slug from free text such as a post title.
    ///
    /// Lowercases the input, collapses every run of non-alphanumeric
    /// characters into a single hyphen, and strips leading/trailing hyphens.
    /// Mirrors what the admin post form does as the editor types a title.
    ///
    /// # Errors
    ///
    /// Returns [`SlugError::Empty`] if no alphanumeric characters remain.
    pub fn generate(text: &str) -> Result<Self, SlugError> {
        let mut out = String::with_capacity(text.len());
        let mut pending_hyphen = false;

        for c in text.chars().flat_map(char::to_lowercase) {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                if pending_hyphen && !out.is_empty() {
                    out.push('-');
                }
                pending_hyphen = false;
                out.push(c);
            } else {
                pending_hyphen = true;
            }
        }

        if out.is_empty() {
            return Err(SlugError::Empty);
        }

        Ok(Self(out))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_canonical() {
        assert!(Slug::parse("hello-world").is_ok());
        assert!(Slug::parse("post-2024").is_ok());
        assert!(Slug::parse("a").is_ok());
    }

    #[test]
    fn test_parse_rejects_non_canonical() {
        assert!(matches!(Slug::parse(""), Err(SlugError::Empty)));
        assert!(Slug::parse("Hello-World").is_err());
        assert!(Slug::parse("-leading").is_err());
        assert!(Slug::parse("trailing-").is_err());
        assert!(Slug::parse("double--hyphen").is_err());
        assert!(Slug::parse("with space").is_err());
        assert!(Slug::parse("unicode-é").is_err());
    }

    #[test]
    fn test_generate_from_title() {
        assert_eq!(Slug::generate("Hello World").unwrap().as_str(), "hello-world");
        assert_eq!(
            Slug::generate("  Rust & WebAssembly, part 2!  ").unwrap().as_str(),
            "rust-webassembly-part-2"
        );
        assert_eq!(Slug::generate("ALREADY-a-slug").unwrap().as_str(), "already-a-slug");
    }

    #[test]
    fn test_generate_empty() {
        assert!(matches!(Slug::generate("!!!"), Err(SlugError::Empty)));
        assert!(matches!(Slug::generate(""), Err(SlugError::Empty)));
    }

    #[test]
    fn test_generate_output_parses() {
        for title in ["Hello, World!", "100% Rust", "--x--", "Ctrl Alt Crew"] {
            let slug = Slug::generate(title).unwrap();
            assert!(Slug::parse(slug.as_str()).is_ok(), "generated slug not canonical: {slug}");
        }
    }
}
