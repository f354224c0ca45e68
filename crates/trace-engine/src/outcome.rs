//! Outcome evaluation for a finished attempt.
//!
//! Runs exactly once per transition into `Finished` (the game guarantees
//! the call cadence; this module owns the decision logic).

use crate::api::game::EngineContext;
use crate::api::types::{GameEvent, SoundCue};
use crate::session::SessionState;

/// Accuracy above which the one-time congratulations milestone fires.
pub const MILESTONE_ACCURACY: f32 = 70.0;

/// What a finished attempt produced. The render pass reads this alongside
/// the session state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outcome {
    /// Both endpoints were touched.
    pub success: bool,
    pub accuracy: f32,
    pub new_best: bool,
    pub milestone: bool,
    pub easter_egg: bool,
}

/// The easter egg keys off the displayed one-decimal rounding, not an
/// epsilon comparison.
pub fn is_easter_egg(accuracy: f32) -> bool {
    format!("{accuracy:.1}") == "66.6"
}

/// Decide the outcome of a finished attempt, updating session state,
/// persistence, sound cues and game events.
pub fn evaluate(
    accuracy: f32,
    touched_endpoints: bool,
    session: &mut SessionState,
    ctx: &mut EngineContext,
) -> Outcome {
    let easter_egg = is_easter_egg(accuracy);
    let mut new_best = false;
    let mut milestone = false;

    if touched_endpoints {
        let beats_best = accuracy > session.best_score;

        if accuracy > MILESTONE_ACCURACY && !session.congrats_played {
            milestone = true;
            session.record_congrats(ctx.now(), &mut *ctx.store);
            ctx.emit_sound(SoundCue::Congrats);
            ctx.emit_event(GameEvent::milestone(accuracy));
        } else if beats_best {
            ctx.emit_sound(SoundCue::Success);
        }

        if beats_best {
            new_best = true;
            session.record_best(accuracy, ctx.now(), &mut *ctx.store);
            ctx.emit_event(GameEvent::new_best(accuracy));
        }
    } else {
        ctx.emit_sound(SoundCue::Fail);
    }

    ctx.emit_event(GameEvent::finished(accuracy, touched_endpoints));

    Outcome {
        success: touched_endpoints,
        accuracy,
        new_best,
        milestone,
        easter_egg,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{KeyValueStore, MemoryStore, SessionState, KEY_BEST, KEY_CONGRATS};

    fn setup() -> (SessionState, EngineContext) {
        let ctx = EngineContext::new(Box::new(MemoryStore::new()));
        let session = SessionState::load(&*ctx.store);
        (session, ctx)
    }

    #[test]
    fn missed_endpoint_is_failure_regardless_of_accuracy() {
        let (mut session, mut ctx) = setup();
        let out = evaluate(99.0, false, &mut session, &mut ctx);
        assert!(!out.success);
        assert!(!out.new_best);
        assert_eq!(ctx.sounds, vec![SoundCue::Fail]);
        assert_eq!(session.best_score, 0.0);
        assert!(ctx.store.get(KEY_BEST).is_none());
    }

    #[test]
    fn new_best_is_recorded_and_persisted() {
        let (mut session, mut ctx) = setup();
        session.congrats_played = true; // keep the milestone out of the way
        let out = evaluate(55.5, true, &mut session, &mut ctx);
        assert!(out.new_best);
        assert!(session.new_best);
        assert_eq!(ctx.sounds, vec![SoundCue::Success]);
        assert_eq!(ctx.store.get(KEY_BEST).unwrap(), "55.5");
    }

    #[test]
    fn best_score_is_monotonic() {
        let (mut session, mut ctx) = setup();
        session.congrats_played = true;
        evaluate(60.0, true, &mut session, &mut ctx);
        ctx.clear_frame_data();
        session.begin_attempt();
        let out = evaluate(40.0, true, &mut session, &mut ctx);
        assert!(!out.new_best);
        assert!(ctx.sounds.is_empty(), "no cue for a non-best success");
        assert_eq!(session.best_score, 60.0);
    }

    #[test]
    fn milestone_fires_once_ever_and_suppresses_success_cue() {
        let (mut session, mut ctx) = setup();
        let out = evaluate(75.0, true, &mut session, &mut ctx);
        assert!(out.milestone);
        assert!(out.new_best, "milestone does not block the best-score flow");
        assert_eq!(ctx.sounds, vec![SoundCue::Congrats]);
        assert!(session.congrats_played);
        assert!(session.confetti_started_at.is_some());
        assert_eq!(ctx.store.get(KEY_CONGRATS).unwrap(), "true");

        // A later, higher score is a plain new best: no congrats replay.
        ctx.clear_frame_data();
        session.begin_attempt();
        let out = evaluate(80.0, true, &mut session, &mut ctx);
        assert!(!out.milestone);
        assert_eq!(ctx.sounds, vec![SoundCue::Success]);
    }

    #[test]
    fn milestone_persists_across_sessions() {
        let mut store = MemoryStore::new();
        store.set(KEY_CONGRATS, "true");
        let mut ctx = EngineContext::new(Box::new(store));
        let mut session = SessionState::load(&*ctx.store);
        let out = evaluate(90.0, true, &mut session, &mut ctx);
        assert!(!out.milestone);
        assert_eq!(ctx.sounds, vec![SoundCue::Success]);
    }

    #[test]
    fn easter_egg_detection_uses_displayed_rounding() {
        assert!(is_easter_egg(66.6));
        assert!(is_easter_egg(66.649));
        assert!(is_easter_egg(66.551));
        assert!(!is_easter_egg(66.4));
        assert!(!is_easter_egg(66.75));
    }

    #[test]
    fn easter_egg_is_independent_of_best_score_logic() {
        let (mut session, mut ctx) = setup();
        session.congrats_played = true;
        session.best_score = 90.0;
        let out = evaluate(66.6, true, &mut session, &mut ctx);
        assert!(out.easter_egg);
        assert!(!out.new_best);
        // Flagged even on a failed attempt.
        session.begin_attempt();
        let out = evaluate(66.6, false, &mut session, &mut ctx);
        assert!(out.easter_egg);
        assert!(!out.success);
    }

    #[test]
    fn finished_event_is_always_emitted() {
        let (mut session, mut ctx) = setup();
        evaluate(10.0, false, &mut session, &mut ctx);
        assert!(ctx
            .events
            .iter()
            .any(|e| e.kind == GameEvent::FINISHED && e.b == 0.0));
    }
}
