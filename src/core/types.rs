use serde::{Deserialize, Serialize};

/// Whether reads come from one file or from two mate files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplingMode {
    Single,
    Paired,
}

impl std::fmt::Display for SamplingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single => write!(f, "single-end"),
            Self::Paired => write!(f, "paired-end"),
        }
    }
}

/// Geometric class of one read (single mode) or one read pair (paired mode)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrientationCategory {
    /// Read runs along the target in increasing coordinates
    Forward,
    /// Read runs along the target in decreasing coordinates
    Reverse,
    /// Mates face each other, read 1 on the forward strand
    InwardForward,
    /// Mates face each other, read 1 on the reverse strand
    InwardReverse,
    /// Mates face away from each other, read 1 on the forward strand
    OutwardForward,
    /// Mates face away from each other, read 1 on the reverse strand
    OutwardReverse,
    /// Geometry gives no usable evidence
    Unclassified,
}

impl OrientationCategory {
    /// Whether this observation counts as evidence
    #[must_use]
    pub fn is_classified(self) -> bool {
        self != Self::Unclassified
    }

    /// Short code used in reports
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Forward => "F",
            Self::Reverse => "R",
            Self::InwardForward => "IF",
            Self::InwardReverse => "IR",
            Self::OutwardForward => "OF",
            Self::OutwardReverse => "OR",
            Self::Unclassified => "NA",
        }
    }
}

impl std::fmt::Display for OrientationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Final library-type label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LibraryType {
    #[serde(rename = "SF")]
    StrandedForward,
    #[serde(rename = "SR")]
    StrandedReverse,
    #[serde(rename = "U")]
    Unstranded,
    #[serde(rename = "ISF")]
    InwardStrandedForward,
    #[serde(rename = "ISR")]
    InwardStrandedReverse,
    #[serde(rename = "IU")]
    InwardUnstranded,
    #[serde(rename = "OSF")]
    OutwardStrandedForward,
    #[serde(rename = "OSR")]
    OutwardStrandedReverse,
    #[serde(rename = "OU")]
    OutwardUnstranded,
    #[serde(rename = "undetermined")]
    Undetermined,
}

impl LibraryType {
    /// Short code (`SF`, `ISR`, ...) as used by common quantifiers
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::StrandedForward => "SF",
            Self::StrandedReverse => "SR",
            Self::Unstranded => "U",
            Self::InwardStrandedForward => "ISF",
            Self::InwardStrandedReverse => "ISR",
            Self::InwardUnstranded => "IU",
            Self::OutwardStrandedForward => "OSF",
            Self::OutwardStrandedReverse => "OSR",
            Self::OutwardUnstranded => "OU",
            Self::Undetermined => "undetermined",
        }
    }

    /// Human-readable description of the label
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::StrandedForward => "stranded, reads match the transcript strand",
            Self::StrandedReverse => "stranded, reads match the opposite strand",
            Self::Unstranded => "unstranded",
            Self::InwardStrandedForward => "inward-facing mates, read 1 on the transcript strand",
            Self::InwardStrandedReverse => "inward-facing mates, read 1 on the opposite strand",
            Self::InwardUnstranded => "inward-facing mates, unstranded",
            Self::OutwardStrandedForward => "outward-facing mates, read 1 on the transcript strand",
            Self::OutwardStrandedReverse => "outward-facing mates, read 1 on the opposite strand",
            Self::OutwardUnstranded => "outward-facing mates, unstranded",
            Self::Undetermined => "could not be determined",
        }
    }

    #[must_use]
    pub fn is_determined(self) -> bool {
        self != Self::Undetermined
    }
}

impl std::fmt::Display for LibraryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_type_serializes_as_code() {
        let json = serde_json::to_string(&LibraryType::InwardStrandedReverse).unwrap();
        assert_eq!(json, "\"ISR\"");

        let parsed: LibraryType = serde_json::from_str("\"OU\"").unwrap();
        assert_eq!(parsed, LibraryType::OutwardUnstranded);
    }

    #[test]
    fn test_display_matches_code() {
        assert_eq!(LibraryType::StrandedForward.to_string(), "SF");
        assert_eq!(OrientationCategory::OutwardReverse.to_string(), "OR");
        assert!(!LibraryType::Undetermined.is_determined());
        assert!(!OrientationCategory::Unclassified.is_classified());
    }
}
