//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

use crate::core::error::MoonError;

/// The four display buckets the widget actually renders.
///
/// Symmetric sub-phases are merged: everything between new and full is
/// waxing, everything between full and new is waning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoonPhase {
    NewMoon,
    WaxingMoon,
    FullMoon,
    WaningMoon,
}

/// The eight-valued vocabulary used by astronomy data providers and by
/// the boundary table of the local calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SubPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

impl SubPhase {
    /// The provider-side label for this sub-phase.
    pub fn label(&self) -> &'static str {
        match self {
            SubPhase::New => "New Moon",
            SubPhase::WaxingCrescent => "Waxing Crescent",
            SubPhase::FirstQuarter => "First Quarter",
            SubPhase::WaxingGibbous => "Waxing Gibbous",
            SubPhase::Full => "Full Moon",
            SubPhase::WaningGibbous => "Waning Gibbous",
            SubPhase::LastQuarter => "Last Quarter",
            SubPhase::WaningCrescent => "Waning Crescent",
        }
    }

    /// Parse a provider label. Labels outside the known eight fail loudly:
    /// a miss signals data-source incompatibility, never a silent default.
    pub fn from_label(label: &str) -> Result<Self, MoonError> {
        match label {
            "New Moon" => Ok(SubPhase::New),
            "Waxing Crescent" => Ok(SubPhase::WaxingCrescent),
            "First Quarter" => Ok(SubPhase::FirstQuarter),
            "Waxing Gibbous" => Ok(SubPhase::WaxingGibbous),
            "Full Moon" => Ok(SubPhase::Full),
            "Waning Gibbous" => Ok(SubPhase::WaningGibbous),
            "Last Quarter" => Ok(SubPhase::LastQuarter),
            "Waning Crescent" => Ok(SubPhase::WaningCrescent),
            other => Err(MoonError::UnknownPhaseLabel(other.to_string())),
        }
    }

    pub const ALL: [SubPhase; 8] = [
        SubPhase::New,
        SubPhase::WaxingCrescent,
        SubPhase::FirstQuarter,
        SubPhase::WaxingGibbous,
        SubPhase::Full,
        SubPhase::WaningGibbous,
        SubPhase::LastQuarter,
        SubPhase::WaningCrescent,
    ];
}

/// Supported display languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ru,
    Lt,
}

impl std::str::FromStr for Language {
    type Err = MoonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ru" => Ok(Language::Ru),
            "lt" => Ok(Language::Lt),
            other => Err(MoonError::InvalidConfig(format!(
                "unsupported language: {}",
                other
            ))),
        }
    }
}

/// A cycle-day threshold marking the end of a named lunar sub-phase.
#[derive(Debug, Clone, Copy)]
pub struct PhaseBoundary {
    pub sub_phase: SubPhase,
    /// Cycle day (fractional) at which this sub-phase ends.
    pub cycle_day_end: f64,
}

/// Result of the local astronomical calculation.
#[derive(Debug, Clone, Copy)]
pub struct LocalPhase {
    pub phase: MoonPhase,
    pub sub_phase: SubPhase,
    /// Fractional days since the last new moon, in `[0, SYNODIC_MONTH)`.
    pub cycle_position: f64,
    /// Cosine-approximated illumination percentage, `[0, 100]`.
    pub illumination: f64,
}

/// Time remaining until the next phase boundary, floored at each step so
/// the display always shows a lower bound of the remaining time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_labels_round_trip() {
        for sub in SubPhase::ALL {
            assert_eq!(SubPhase::from_label(sub.label()).unwrap(), sub);
        }
    }

    #[test]
    fn test_unknown_label_rejected() {
        let err = SubPhase::from_label("Blood Moon").unwrap_err();
        assert!(matches!(err, MoonError::UnknownPhaseLabel(label) if label == "Blood Moon"));
    }

    #[test]
    fn test_language_from_str() {
        assert_eq!("ru".parse::<Language>().unwrap(), Language::Ru);
        assert_eq!("LT".parse::<Language>().unwrap(), Language::Lt);
        assert!("en".parse::<Language>().is_err());
    }
}
