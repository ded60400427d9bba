//! Deterministic classification of sample references.
//!
//! The two built-in samples map to fixed outcomes. Any other reference falls
//! back to a character-code hash so repeated runs agree with each other.

use time::OffsetDateTime;

use crate::domain::{AnalysisResult, KnownSample, SampleReference};

/// Confidence reported for the infected sample.
pub const INFECTED_CONFIDENCE: f64 = 0.96;
/// Confidence reported for the uninfected sample.
pub const UNINFECTED_CONFIDENCE: f64 = 0.98;

const FALLBACK_BASE_CONFIDENCE: f64 = 0.70;
const FALLBACK_MAX_CONFIDENCE: f64 = 0.99;

/// Which rule produced a classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassificationRule {
    /// Reference names the infected sample.
    KnownInfected,
    /// Reference names the uninfected sample.
    KnownUninfected,
    /// Unknown reference, decided from its character-code sum.
    Fallback {
        /// Sum of the reference's character codes.
        hash: u64,
    },
}

/// Decision for a reference, before it is stamped with a time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Rule that fired.
    pub rule: ClassificationRule,
    /// Whether parasites are reported.
    pub parasite_detected: bool,
    /// Confidence of the decision.
    pub confidence: f64,
}

impl Classification {
    /// Stamps the decision, producing the final result.
    #[must_use]
    pub const fn into_result(self, processed_at: OffsetDateTime) -> AnalysisResult {
        AnalysisResult {
            parasite_detected: self.parasite_detected,
            confidence: self.confidence,
            processed_at,
        }
    }
}

/// Classifies a reference.
///
/// Matching on the sample file names is case-insensitive and looks for the
/// name anywhere in the reference, so URLs with prefixes or query strings
/// still resolve to the built-in samples.
#[must_use]
pub fn classify(reference: &SampleReference) -> Classification {
    match reference.known_sample() {
        Some(KnownSample::Infected) => Classification {
            rule: ClassificationRule::KnownInfected,
            parasite_detected: true,
            confidence: INFECTED_CONFIDENCE,
        },
        Some(KnownSample::Uninfected) => Classification {
            rule: ClassificationRule::KnownUninfected,
            parasite_detected: false,
            confidence: UNINFECTED_CONFIDENCE,
        },
        None => fallback(reference_hash(reference.as_str())),
    }
}

/// Sums the character codes of `reference`.
///
/// A character's code is its first UTF-16 code unit, which matches what a
/// browser reports for the same string.
#[must_use]
pub fn reference_hash(reference: &str) -> u64 {
    reference.chars().map(char_code).sum()
}

fn char_code(ch: char) -> u64 {
    let mut units = [0u16; 2];
    u64::from(ch.encode_utf16(&mut units)[0])
}

#[allow(clippy::cast_precision_loss)] // hash % 30 is tiny
fn fallback(hash: u64) -> Classification {
    let confidence =
        (FALLBACK_BASE_CONFIDENCE + (hash % 30) as f64 / 100.0).min(FALLBACK_MAX_CONFIDENCE);
    Classification {
        rule: ClassificationRule::Fallback { hash },
        parasite_detected: hash % 3 != 0,
        confidence,
    }
}
