//! Analysis result types.

use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

use super::SampleReference;

/// Formats a timestamp the way results carry it: UTC with millisecond
/// precision, e.g. `2024-05-01T12:30:00.250Z`.
///
/// Sub-millisecond digits are truncated.
///
/// # Errors
///
/// Returns an error if the year cannot be written with four digits.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, time::error::Format> {
    at.to_offset(UtcOffset::UTC).format(format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
    ))
}

/// Serde adapter: millisecond UTC on output, any RFC 3339 on input.
mod timestamp {
    use serde::{Deserializer, Serializer};
    use time::OffsetDateTime;

    pub fn serialize<S: Serializer>(
        at: &OffsetDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let text = super::format_timestamp(*at).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<OffsetDateTime, D::Error> {
        time::serde::rfc3339::deserialize(deserializer)
    }
}

/// Outcome of one simulated analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Whether parasites were reported in the sample.
    pub parasite_detected: bool,
    /// Confidence of the decision (0.0 to 1.0).
    pub confidence: f64,
    /// When the result was produced (RFC 3339, milliseconds, on the wire).
    #[serde(with = "timestamp")]
    pub processed_at: OffsetDateTime,
}

/// A result paired with the reference it was produced for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// The analyzed sample.
    pub reference: SampleReference,
    /// The analysis outcome.
    #[serde(flatten)]
    pub result: AnalysisResult,
}

impl AnalysisReport {
    /// Pairs a result with its reference.
    #[must_use]
    pub const fn new(reference: SampleReference, result: AnalysisResult) -> Self {
        Self { reference, result }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_result_serializes_camel_case() {
        let result = AnalysisResult {
            parasite_detected: true,
            confidence: 0.96,
            processed_at: datetime!(2024-05-01 12:30:00 UTC),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["parasiteDetected"], true);
        assert_eq!(json["confidence"], 0.96);
        assert_eq!(json["processedAt"], "2024-05-01T12:30:00.000Z");
    }

    #[test]
    fn test_processed_at_truncated_to_millis() {
        let result = AnalysisResult {
            parasite_detected: false,
            confidence: 0.5,
            processed_at: datetime!(2024-05-01 12:30:05.123987654 +02:00),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["processedAt"], "2024-05-01T10:30:05.123Z");

        let back: AnalysisResult = serde_json::from_value(json).unwrap();
        assert_eq!(back.processed_at, datetime!(2024-05-01 10:30:05.123 UTC));
    }

    #[test]
    fn test_format_timestamp_pads_millis() {
        assert_eq!(
            format_timestamp(datetime!(2024-05-01 08:00:00.12 UTC)).unwrap(),
            "2024-05-01T08:00:00.120Z"
        );
    }

    #[test]
    fn test_report_flattens_result() {
        let report = AnalysisReport::new(
            SampleReference::new("/infected.jpg").unwrap(),
            AnalysisResult {
                parasite_detected: false,
                confidence: 0.98,
                processed_at: datetime!(2024-05-01 12:30:00 UTC),
            },
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["reference"], "/infected.jpg");
        assert_eq!(json["parasiteDetected"], false);
        assert!(json.get("result").is_none());
    }
}
