//! Flang major -> emsdk policy map
//!
//! Flang major `m` is built with the newest emsdk release known to embed LLVM
//! major `m - 1`.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Inclusive range of flang majors, written `START-END`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MajorRange {
    pub start: u64,
    pub end: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MajorRangeError {
    #[error("Invalid major range '{0}'. Expected START-END, e.g. 19-23")]
    Malformed(String),

    #[error("Major range must be ascending, e.g. 19-23 (got {start}-{end})")]
    Descending { start: u64, end: u64 },
}

impl MajorRange {
    pub fn new(start: u64, end: u64) -> Result<Self, MajorRangeError> {
        if start > end {
            return Err(MajorRangeError::Descending { start, end });
        }
        Ok(Self { start, end })
    }
}

impl FromStr for MajorRange {
    type Err = MajorRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || MajorRangeError::Malformed(s.to_string());

        let (start, end) = s.split_once('-').ok_or_else(malformed)?;
        let start = start.trim().parse().map_err(|_| malformed())?;
        let end = end.trim().parse().map_err(|_| malformed())?;

        Self::new(start, end)
    }
}

impl fmt::Display for MajorRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Pair every flang major in `range` with the latest emsdk release of the
/// previous LLVM major. Majors without a qualifying release map to `None`.
pub fn flang_prev_major_policy_map(
    llvm_major_to_latest_emsdk: &BTreeMap<String, String>,
    range: MajorRange,
) -> BTreeMap<String, Option<String>> {
    (range.start..=range.end)
        .map(|flang_major| {
            let previous = flang_major.checked_sub(1).map(|m| m.to_string());
            let release = previous.and_then(|m| llvm_major_to_latest_emsdk.get(&m).cloned());
            (flang_major.to_string(), release)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn maps_each_major_to_previous_llvm_major() {
        let latest = BTreeMap::from([
            ("19".to_string(), "2.1.0".to_string()),
            ("20".to_string(), "3.0.0".to_string()),
        ]);

        let result = flang_prev_major_policy_map(&latest, MajorRange::new(20, 21).unwrap());

        assert_eq!(
            result,
            BTreeMap::from([
                ("20".to_string(), Some("2.1.0".to_string())),
                ("21".to_string(), Some("3.0.0".to_string())),
            ])
        );
    }

    #[test]
    fn missing_previous_major_maps_to_none() {
        let latest = BTreeMap::from([("19".to_string(), "2.1.0".to_string())]);

        let result = flang_prev_major_policy_map(&latest, MajorRange::new(19, 21).unwrap());

        assert_eq!(
            result,
            BTreeMap::from([
                ("19".to_string(), None),
                ("20".to_string(), Some("2.1.0".to_string())),
                ("21".to_string(), None),
            ])
        );
    }

    #[test]
    fn major_zero_has_no_previous_major() {
        let result = flang_prev_major_policy_map(&BTreeMap::new(), MajorRange::new(0, 0).unwrap());
        assert_eq!(result, BTreeMap::from([("0".to_string(), None)]));
    }

    #[rstest]
    #[case("19-23", MajorRange { start: 19, end: 23 })]
    #[case("20-20", MajorRange { start: 20, end: 20 })]
    #[case(" 19 - 21 ", MajorRange { start: 19, end: 21 })]
    fn parse_major_range(#[case] input: &str, #[case] expected: MajorRange) {
        assert_eq!(input.parse::<MajorRange>(), Ok(expected));
    }

    #[rstest]
    #[case("19")]
    #[case("19-")]
    #[case("a-b")]
    #[case("19-23-25")]
    fn parse_major_range_rejects_malformed(#[case] input: &str) {
        assert!(matches!(
            input.parse::<MajorRange>(),
            Err(MajorRangeError::Malformed(_))
        ));
    }

    #[test]
    fn parse_major_range_rejects_descending() {
        assert_eq!(
            "23-19".parse::<MajorRange>(),
            Err(MajorRangeError::Descending { start: 23, end: 19 })
        );
    }

    #[test]
    fn display_round_trips() {
        let range = MajorRange::new(19, 23).unwrap();
        assert_eq!(range.to_string().parse::<MajorRange>(), Ok(range));
    }
}
