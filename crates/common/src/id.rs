//! ID generation utilities.

use chrono::{DateTime, Datelike, Utc};
use ulid::Ulid;

/// Prefix shared by every human-readable dispute ID.
pub const DISPUTE_ID_PREFIX: &str = "BND-DISP";

/// ID generator for entities.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    _private: (),
}

impl IdGenerator {
    /// Create a new ID generator.
    #[must_use]
    pub const fn new() -> Self {
        Self { _private: () }
    }

    /// Generate a new ULID-based ID.
    ///
    /// ULIDs are:
    /// - Lexicographically sortable
    /// - Monotonically increasing within the same millisecond
    /// - Shorter than UUIDs when represented as strings
    #[must_use]
    pub fn generate(&self) -> String {
        Ulid::new().to_string().to_lowercase()
    }
}

/// Formats human-readable dispute IDs such as `BND-DISP-MH-2026-007`.
#[derive(Debug, Clone)]
pub struct DisputeIdFormat {
    region: String,
}

impl DisputeIdFormat {
    /// Create a formatter for the given region code.
    #[must_use]
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into().to_uppercase(),
        }
    }

    /// Format the ID for `sequence`, stamped with the year of `at`.
    ///
    /// Sequence numbers are zero-padded to three digits and widen past 999.
    #[must_use]
    pub fn format(&self, sequence: u64, at: DateTime<Utc>) -> String {
        format!(
            "{DISPUTE_ID_PREFIX}-{}-{}-{sequence:03}",
            self.region,
            at.year()
        )
    }

    /// Extract the sequence number from a formatted ID, whatever its region.
    #[must_use]
    pub fn parse_sequence(dispute_id: &str) -> Option<u64> {
        let rest = dispute_id.strip_prefix(DISPUTE_ID_PREFIX)?;
        rest.rsplit('-').next()?.parse().ok()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_generate_ulid() {
        let id_gen = IdGenerator::new();
        let id1 = id_gen.generate();
        let id2 = id_gen.generate();

        assert_eq!(id1.len(), 26);
        assert_eq!(id2.len(), 26);
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_format_dispute_id() {
        let format = DisputeIdFormat::new("mh");
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 0, 0, 0).unwrap();

        assert_eq!(format.format(7, at), "BND-DISP-MH-2026-007");
        assert_eq!(format.format(1234, at), "BND-DISP-MH-2026-1234");
    }

    #[test]
    fn test_parse_sequence() {
        assert_eq!(
            DisputeIdFormat::parse_sequence("BND-DISP-MH-2026-042"),
            Some(42)
        );
        assert_eq!(
            DisputeIdFormat::parse_sequence("BND-DISP-KA-2025-1001"),
            Some(1001)
        );
        assert_eq!(DisputeIdFormat::parse_sequence("ORD-1"), None);
        assert_eq!(DisputeIdFormat::parse_sequence("BND-DISP-MH-2026-x"), None);
    }
}
