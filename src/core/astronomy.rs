//! Local astronomical calculator - lunar cycle position, phase
//! classification, illumination, and countdown to the next boundary.
//!
//! A fixed historical new-moon reference plus modular arithmetic avoids any
//! ephemeris dependency. Accuracy drifts on the order of minutes per elapsed
//! year, acceptable for a decorative display, not precision astronomy.

use chrono::{DateTime, Utc};

use crate::core::error::{MoonError, Result};
use crate::core::types::{Countdown, LocalPhase, PhaseBoundary, SubPhase};

// ============================================================================
// Constants
// ============================================================================

/// Mean synodic month length in days.
///
/// The key numeric invariant of the whole module: every boundary below is
/// derived from it, and changing it shifts all phase transitions.
pub const SYNODIC_MONTH: f64 = 29.53058867;

/// Ordered boundary table partitioning the synodic month into the eight
/// named sub-phases. Each entry marks the cycle day its sub-phase ends on;
/// positions past the last entry wrap back into New Moon.
pub const PHASE_BOUNDARIES: [PhaseBoundary; 8] = [
    PhaseBoundary { sub_phase: SubPhase::New, cycle_day_end: 1.84566 },
    PhaseBoundary { sub_phase: SubPhase::WaxingCrescent, cycle_day_end: 5.53699 },
    PhaseBoundary { sub_phase: SubPhase::FirstQuarter, cycle_day_end: 9.22831 },
    PhaseBoundary { sub_phase: SubPhase::WaxingGibbous, cycle_day_end: 12.91963 },
    PhaseBoundary { sub_phase: SubPhase::Full, cycle_day_end: 16.61096 },
    PhaseBoundary { sub_phase: SubPhase::WaningGibbous, cycle_day_end: 20.30228 },
    PhaseBoundary { sub_phase: SubPhase::LastQuarter, cycle_day_end: 23.99361 },
    PhaseBoundary { sub_phase: SubPhase::WaningCrescent, cycle_day_end: 27.68493 },
];

const MILLIS_PER_DAY: f64 = 86_400_000.0;

// ============================================================================
// Cycle arithmetic
// ============================================================================

/// Fractional days since the last new moon, in `[0, SYNODIC_MONTH)`.
///
/// A `now` earlier than the reference means the system clock is invalid;
/// there is no further fallback tier below the local calculation, so this
/// surfaces as an error.
pub fn cycle_position(now: DateTime<Utc>, reference_new_moon: DateTime<Utc>) -> Result<f64> {
    let elapsed = now.signed_duration_since(reference_new_moon);
    let days = elapsed.num_milliseconds() as f64 / MILLIS_PER_DAY;
    if days < 0.0 {
        return Err(MoonError::ClockBeforeReference);
    }
    Ok(days.rem_euclid(SYNODIC_MONTH))
}

/// Classify a cycle position against the boundary table.
///
/// The first boundary whose end exceeds the position wins; a position past
/// all entries (the floating-point wraparound edge) is New Moon again.
pub fn classify(position: f64) -> SubPhase {
    for boundary in PHASE_BOUNDARIES {
        if position < boundary.cycle_day_end {
            return boundary.sub_phase;
        }
    }
    SubPhase::New
}

/// Cosine illumination approximation: 0% at new moon, 100% at full.
///
/// Cosmetic only - phase classification uses the boundary table, never this.
pub fn illumination(position: f64) -> f64 {
    (1.0 - (2.0 * std::f64::consts::PI * position / SYNODIC_MONTH).cos()) / 2.0 * 100.0
}

/// Compute the current lunar phase from the local approximation.
pub fn compute_local_phase(
    now: DateTime<Utc>,
    reference_new_moon: DateTime<Utc>,
) -> Result<LocalPhase> {
    let position = cycle_position(now, reference_new_moon)?;
    let sub_phase = classify(position);
    Ok(LocalPhase {
        phase: sub_phase.bucket(),
        sub_phase,
        cycle_position: position,
        illumination: illumination(position),
    })
}

// ============================================================================
// Countdown to next boundary
// ============================================================================

/// Days remaining until the next phase boundary, wrapping to the first New
/// Moon boundary of the following cycle when the position is past them all.
pub fn days_to_next_boundary(position: f64) -> f64 {
    for boundary in PHASE_BOUNDARIES {
        if boundary.cycle_day_end > position {
            return boundary.cycle_day_end - position;
        }
    }
    (SYNODIC_MONTH - position) + PHASE_BOUNDARIES[0].cycle_day_end
}

/// Decompose remaining days into integer days/hours/minutes via `floor` at
/// each step. No rounding: the displayed countdown is always a lower bound
/// of the true remaining time.
pub fn countdown_to_next(position: f64) -> Countdown {
    let remaining = days_to_next_boundary(position);
    let days = remaining.floor();
    let hours = ((remaining - days) * 24.0).floor();
    let minutes = (((remaining - days) * 24.0 - hours) * 60.0).floor();
    Countdown {
        days: days as u64,
        hours: hours as u64,
        minutes: minutes as u64,
    }
}

// ============================================================================
// Tests
// ============================================================================
