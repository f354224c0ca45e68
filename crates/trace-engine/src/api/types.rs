use bytemuck::{Pod, Zeroable};

/// A sound cue emitted by the game logic.
/// The host (browser shell) owns the actual audio assets and playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// A finished attempt beat the best score.
    Success,
    /// A finished attempt missed one or both endpoints.
    Fail,
    /// First-ever attempt above the milestone threshold.
    Congrats,
    /// Follow-up cue chained after `Congrats` completes.
    Encore,
}

/// A game event communicated from the engine to the host shell.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// An attempt transitioned to finished. `a` = accuracy, `b` = 1 on success.
    pub const FINISHED: f32 = 1.0;
    /// The best score was beaten. `a` = new best.
    pub const NEW_BEST: f32 = 2.0;
    /// The one-time congratulations milestone fired. `a` = accuracy.
    pub const MILESTONE: f32 = 3.0;

    pub fn finished(accuracy: f32, success: bool) -> Self {
        Self {
            kind: Self::FINISHED,
            a: accuracy,
            b: if success { 1.0 } else { 0.0 },
            c: 0.0,
        }
    }

    pub fn new_best(accuracy: f32) -> Self {
        Self {
            kind: Self::NEW_BEST,
            a: accuracy,
            b: 0.0,
            c: 0.0,
        }
    }

    pub fn milestone(accuracy: f32) -> Self {
        Self {
            kind: Self::MILESTONE,
            a: accuracy,
            b: 0.0,
            c: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_event_packs_success_flag() {
        let ev = GameEvent::finished(87.5, true);
        assert_eq!(ev.kind, GameEvent::FINISHED);
        assert_eq!(ev.a, 87.5);
        assert_eq!(ev.b, 1.0);

        let ev = GameEvent::finished(12.0, false);
        assert_eq!(ev.b, 0.0);
    }

    #[test]
    fn game_event_is_pod() {
        let ev = GameEvent::new_best(50.0);
        let bytes: &[u8] = bytemuck::bytes_of(&ev);
        assert_eq!(bytes.len(), GameEvent::FLOATS * 4);
    }
}
