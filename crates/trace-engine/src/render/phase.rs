//! Pure phase functions for the timed effects. The draw pass asks "what
//! phase is this effect in right now" instead of doing time arithmetic
//! inline.

/// How long the new-best highlight blinks after a finish, in seconds.
pub const BLINK_DURATION: f64 = 2.0;
/// Blink toggle period in seconds.
pub const BLINK_PERIOD: f64 = 0.5;
/// Length of the milestone confetti window in seconds.
pub const CONFETTI_DURATION: f64 = 15.0;

/// Visual phase of the new-best highlight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlinkPhase {
    /// Past the blink window: shown steadily.
    Steady,
    On,
    Off,
}

/// Phase of the new-best blink at time `now`, given when the highlight
/// started. Blinks for [`BLINK_DURATION`], toggling every [`BLINK_PERIOD`].
pub fn blink_phase(now: f64, started_at: f64) -> BlinkPhase {
    if now - started_at >= BLINK_DURATION {
        return BlinkPhase::Steady;
    }
    if (now / BLINK_PERIOD).floor() as i64 % 2 == 0 {
        BlinkPhase::On
    } else {
        BlinkPhase::Off
    }
}

/// Whether the confetti window is open at time `now`.
pub fn confetti_active(now: f64, started_at: Option<f64>) -> bool {
    match started_at {
        Some(t0) => now - t0 < CONFETTI_DURATION,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blink_toggles_then_goes_steady() {
        let t0 = 100.0;
        // Within the window the phase alternates with the global clock.
        assert_eq!(blink_phase(100.1, t0), BlinkPhase::On);
        assert_eq!(blink_phase(100.6, t0), BlinkPhase::Off);
        assert_eq!(blink_phase(101.1, t0), BlinkPhase::On);
        // After the window it holds steady.
        assert_eq!(blink_phase(102.0, t0), BlinkPhase::Steady);
        assert_eq!(blink_phase(150.0, t0), BlinkPhase::Steady);
    }

    #[test]
    fn confetti_window_is_fifteen_seconds() {
        assert!(!confetti_active(10.0, None));
        assert!(confetti_active(10.0, Some(10.0)));
        assert!(confetti_active(24.9, Some(10.0)));
        assert!(!confetti_active(25.0, Some(10.0)));
    }
}
