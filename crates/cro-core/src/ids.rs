//! Report ID generation.
//!
//! IDs look like `rpt-3fa85f6457b2`: a fixed prefix followed by 12 lowercase
//! hex characters drawn from OS randomness. IDs are opaque to every consumer;
//! only [`generate_report_id`] knows the layout.

/// Prefix for all report IDs.
pub const REPORT_ID_PREFIX: &str = "rpt";

const RANDOM_BYTES: usize = 6;

/// Generate a fresh report ID.
///
/// Falls back to the current time in nanoseconds if the OS random source is
/// unavailable, so ID generation itself can never fail a submission.
#[must_use]
pub fn generate_report_id() -> String {
    let mut bytes = [0u8; RANDOM_BYTES];
    if getrandom::fill(&mut bytes).is_err() {
        let nanos = chrono::Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or_default()
            .to_le_bytes();
        bytes.copy_from_slice(&nanos[..RANDOM_BYTES]);
    }
    format_id(&bytes)
}

fn format_id(bytes: &[u8]) -> String {
    let hex: String = bytes.iter().map(|b| format!("{b:02x}")).collect();
    format!("{REPORT_ID_PREFIX}-{hex}")
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn id_has_prefix_and_hex_suffix() {
        let id = generate_report_id();
        let (prefix, suffix) = id.split_once('-').expect("id should contain '-'");
        assert_eq!(prefix, REPORT_ID_PREFIX);
        assert_eq!(suffix.len(), RANDOM_BYTES * 2);
        assert!(suffix.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn ids_are_unique_across_many_calls() {
        let ids: HashSet<String> = (0..1000).map(|_| generate_report_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn format_id_pads_each_byte() {
        assert_eq!(format_id(&[0, 1, 0xab, 0xff, 0x10, 0x02]), "rpt-0001abff1002");
    }
}
