use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How far world generation got before the world was stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Step {
    /// Plate simulation only.
    Plates,
    /// Plates plus the precipitation pass.
    Precipitations,
    /// Every stage through biomes.
    Full,
}

/// A step name that is not one of `plates`, `precipitations`, `full`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown generation step: {0:?}")]
pub struct UnknownStep(pub String);

impl Step {
    /// Lowercase name used on the wire and the command line.
    pub fn name(self) -> &'static str {
        match self {
            Step::Plates => "plates",
            Step::Precipitations => "precipitations",
            Step::Full => "full",
        }
    }

    /// Parses a name produced by [`Step::name`].
    pub fn from_name(name: &str) -> Result<Self, UnknownStep> {
        match name {
            "plates" => Ok(Step::Plates),
            "precipitations" => Ok(Step::Precipitations),
            "full" => Ok(Step::Full),
            other => Err(UnknownStep(other.to_string())),
        }
    }

    /// Every step includes plates.
    pub fn include_plates(self) -> bool {
        true
    }

    /// Whether precipitation layers were generated.
    pub fn include_precipitations(self) -> bool {
        matches!(self, Step::Precipitations | Step::Full)
    }

    /// Whether erosion ran.
    pub fn include_erosion(self) -> bool {
        self == Step::Full
    }

    /// Whether biomes were assigned.
    pub fn include_biome(self) -> bool {
        self == Step::Full
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Step {
    type Err = UnknownStep;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Step::from_name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for step in [Step::Plates, Step::Precipitations, Step::Full] {
            assert_eq!(Step::from_name(step.name()), Ok(step));
        }
        assert_eq!(
            "erosion".parse::<Step>(),
            Err(UnknownStep("erosion".into()))
        );
    }

    #[test]
    fn test_flags() {
        assert!(Step::Plates.include_plates());
        assert!(!Step::Plates.include_precipitations());
        assert!(Step::Precipitations.include_precipitations());
        assert!(!Step::Precipitations.include_biome());
        assert!(Step::Full.include_erosion());
        assert!(Step::Full.include_biome());
    }
}
