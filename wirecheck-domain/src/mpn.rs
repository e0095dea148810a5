//! Manufacturer part number grammar.
//!
//! An MPN is a list of `-`-separated segments. Two segment shapes carry data:
//! `<digits>POS` (connector position count) and `<digits>AWG` (wire gauge).
//! Matching is case-insensitive. Every other segment is opaque. A part number
//! that yields nothing for a property simply skips the check that needs it.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PartNumber {
    pub positions: Option<u32>,
    pub awg: Option<u32>,
}

impl PartNumber {
    /// The first matching segment wins for each property.
    pub fn parse(mpn: &str) -> Self {
        let mut out = PartNumber::default();
        for segment in mpn.split('-') {
            let segment = segment.trim();
            if out.positions.is_none() {
                out.positions = numeric_with_suffix(segment, "POS");
            }
            if out.awg.is_none() {
                out.awg = numeric_with_suffix(segment, "AWG");
            }
        }
        out
    }
}

fn numeric_with_suffix(segment: &str, suffix: &str) -> Option<u32> {
    let split = segment.len().checked_sub(suffix.len())?;
    if !segment.is_char_boundary(split) {
        return None;
    }
    let (digits, tail) = segment.split_at(split);
    if !tail.eq_ignore_ascii_case(suffix) {
        return None;
    }
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn reads_positions_and_awg() {
        assert_eq!(
            PartNumber::parse("HDR-12POS-22AWG"),
            PartNumber { positions: Some(12), awg: Some(22) }
        );
        assert_eq!(PartNumber::parse("LUG-14AWG").awg, Some(14));
        assert_eq!(PartNumber::parse("crimp-20awg").awg, Some(20));
    }

    #[test]
    fn ignores_segments_that_only_look_similar() {
        assert_eq!(PartNumber::parse("IDC-12A-CONTACT"), PartNumber::default());
        assert_eq!(PartNumber::parse("POS-AWG"), PartNumber::default());
        assert_eq!(PartNumber::parse("X-1.5AWG").awg, None);
        assert_eq!(PartNumber::parse("X-99999999999AWG").awg, None);
        assert_eq!(PartNumber::parse("").positions, None);
    }

    proptest! {
        #[test]
        fn never_panics(s in "\\PC{0,24}") {
            let _ = PartNumber::parse(&s);
        }

        #[test]
        fn round_trips_generated_numbers(n in 1u32..1000, m in 1u32..50) {
            let parsed = PartNumber::parse(&format!("ACME-{n}POS-{m}AWG-R1"));
            prop_assert_eq!(parsed, PartNumber { positions: Some(n), awg: Some(m) });
        }
    }
}
