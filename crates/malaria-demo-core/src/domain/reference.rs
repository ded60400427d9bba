//! Sample references and the built-in demo samples.

use std::fmt;

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

/// Prefix the built-in samples are published under when none is configured.
pub const DEFAULT_SAMPLE_BASE: &str = "/";

/// Opaque identifier of a selectable input, usually a URL or a filename.
///
/// A reference is never empty, so holding one means a sample has been chosen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SampleReference(String);

impl SampleReference {
    /// Creates a reference from a URL or filename.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` is empty.
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        ensure!(!value.is_empty(), "sample reference must not be empty");
        Ok(Self(value))
    }

    /// Returns the reference as given by the caller.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the built-in sample this reference points at, if any.
    #[must_use]
    pub fn known_sample(&self) -> Option<KnownSample> {
        let lowered = self.0.to_lowercase();
        KnownSample::ALL
            .into_iter()
            .find(|sample| lowered.contains(sample.file_name()))
    }
}

impl TryFrom<String> for SampleReference {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<SampleReference> for String {
    fn from(reference: SampleReference) -> Self {
        reference.0
    }
}

impl AsRef<str> for SampleReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SampleReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two specimens the demo offers out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KnownSample {
    /// Clean blood smear.
    Uninfected,
    /// Blood smear with visible parasites.
    Infected,
}

impl KnownSample {
    /// All built-in samples, in the order they are offered.
    ///
    /// `uninfected.jpg` contains `infected.jpg`, so lookups walk the longer
    /// name first.
    pub const ALL: [Self; 2] = [Self::Uninfected, Self::Infected];

    /// Short identifier used on the command line.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Infected => "infected",
            Self::Uninfected => "uninfected",
        }
    }

    /// File name the sample image is published as.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Infected => "infected.jpg",
            Self::Uninfected => "uninfected.jpg",
        }
    }

    /// Human-readable label shown next to the thumbnail.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Infected => "Infected",
            Self::Uninfected => "Not infected",
        }
    }

    /// Builds the reference of this sample under the given prefix.
    #[must_use]
    pub fn reference(self, base: &str) -> SampleReference {
        SampleReference(format!("{base}{}", self.file_name()))
    }

    /// Parses a sample name as accepted on the command line.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|sample| sample.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for KnownSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_reference_rejected() {
        let err = SampleReference::new("").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn test_reference_keeps_original_text() {
        let reference = SampleReference::new("/static/Mystery.PNG").unwrap();
        assert_eq!(reference.as_str(), "/static/Mystery.PNG");
        assert_eq!(reference.to_string(), "/static/Mystery.PNG");
    }

    #[test]
    fn test_known_sample_references_use_base() {
        assert_eq!(KnownSample::Infected.reference("/").as_str(), "/infected.jpg");
        assert_eq!(
            KnownSample::Uninfected.reference("https://demo.test/static/").as_str(),
            "https://demo.test/static/uninfected.jpg"
        );
    }

    #[test]
    fn test_known_sample_lookup_prefers_longer_name() {
        let reference = SampleReference::new("/UNINFECTED.JPG").unwrap();
        assert_eq!(reference.known_sample(), Some(KnownSample::Uninfected));

        let reference = SampleReference::new("/img/infected.jpg?v=2").unwrap();
        assert_eq!(reference.known_sample(), Some(KnownSample::Infected));

        let reference = SampleReference::new("mystery.png").unwrap();
        assert_eq!(reference.known_sample(), None);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(KnownSample::from_name("infected"), Some(KnownSample::Infected));
        assert_eq!(KnownSample::from_name("Uninfected"), Some(KnownSample::Uninfected));
        assert_eq!(KnownSample::from_name("healthy"), None);
    }

    #[test]
    fn test_serde_rejects_empty_reference() {
        let parsed: Result<SampleReference, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());

        let parsed: SampleReference = serde_json::from_str("\"a.png\"").unwrap();
        assert_eq!(parsed.as_str(), "a.png");
    }
}
