use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// JLPT proficiency tier. Ordered from easiest (N5) to hardest (N1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JlptLevel {
    N5, // Beginner
    N4, // Elementary
    N3, // Intermediate
    N2, // Upper intermediate
    N1, // Advanced
}

impl JlptLevel {
    pub const ALL: [JlptLevel; 5] = [
        JlptLevel::N5,
        JlptLevel::N4,
        JlptLevel::N3,
        JlptLevel::N2,
        JlptLevel::N1,
    ];

    /// Get level string
    pub fn as_str(&self) -> &'static str {
        match self {
            JlptLevel::N5 => "N5",
            JlptLevel::N4 => "N4",
            JlptLevel::N3 => "N3",
            JlptLevel::N2 => "N2",
            JlptLevel::N1 => "N1",
        }
    }

    /// Get level description
    pub fn description(&self) -> &'static str {
        match self {
            JlptLevel::N5 => "N5 (Beginner)",
            JlptLevel::N4 => "N4 (Elementary)",
            JlptLevel::N3 => "N3 (Intermediate)",
            JlptLevel::N2 => "N2 (Upper Intermediate)",
            JlptLevel::N1 => "N1 (Advanced)",
        }
    }
}

impl fmt::Display for JlptLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown JLPT level: {0}")]
pub struct UnknownJlptLevel(pub String);

impl FromStr for JlptLevel {
    type Err = UnknownJlptLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "N5" => Ok(JlptLevel::N5),
            "N4" => Ok(JlptLevel::N4),
            "N3" => Ok(JlptLevel::N3),
            "N2" => Ok(JlptLevel::N2),
            "N1" => Ok(JlptLevel::N1),
            _ => Err(UnknownJlptLevel(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_levels_case_insensitively() {
        assert_eq!("n5".parse::<JlptLevel>(), Ok(JlptLevel::N5));
        assert_eq!(" N1 ".parse::<JlptLevel>(), Ok(JlptLevel::N1));
        assert!("N6".parse::<JlptLevel>().is_err());
        assert!("".parse::<JlptLevel>().is_err());
    }

    #[test]
    fn unknown_level_error_names_the_input() {
        let err = "N6".parse::<JlptLevel>().unwrap_err();
        assert_eq!(err, UnknownJlptLevel("N6".into()));
        assert_eq!(err.to_string(), "unknown JLPT level: N6");
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn ordering_runs_easiest_to_hardest() {
        assert!(JlptLevel::N5 < JlptLevel::N4);
        assert!(JlptLevel::N2 < JlptLevel::N1);
        assert_eq!(JlptLevel::ALL.iter().max(), Some(&JlptLevel::N1));
    }

    #[test]
    fn serde_rejects_values_outside_the_five_levels() {
        let level: JlptLevel = serde_json::from_str("\"N3\"").unwrap();
        assert_eq!(level, JlptLevel::N3);
        assert!(serde_json::from_str::<JlptLevel>("\"N0\"").is_err());
    }
}
