//! Session state and the key-value persistence boundary.
//!
//! Persisted reads are defensive: malformed or missing values fall back to
//! zero/false and never fail the session.

use std::collections::HashMap;

pub const KEY_BEST: &str = "glyphtrace_best";
pub const KEY_TRIES: &str = "glyphtrace_tries";
pub const KEY_CONGRATS: &str = "glyphtrace_congrats_played";

/// The mirror gag: the shape is vertically flipped for this tries range.
const FLIP_TRIES: std::ops::Range<u32> = 100..103;

/// External key-value persistence collaborator.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, used by tests and as the default backing.
#[derive(Debug, Default)]
pub struct MemoryStore {
    map: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.map.insert(key.to_string(), value.to_string());
    }
}

/// Cross-attempt session state. `best_score`, `tries` and
/// `congrats_played` survive process restarts through the store; the rest
/// resets every attempt.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub best_score: f32,
    pub tries: u32,
    pub congrats_played: bool,
    pub new_best: bool,
    /// Engine time (seconds) the new-best highlight started.
    pub new_best_at: f64,
    /// Engine time (seconds) the confetti window opened, if it has.
    pub confetti_started_at: Option<f64>,
}

impl SessionState {
    /// Load persisted fields, defaulting anything missing or malformed.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let best_score = store
            .get(KEY_BEST)
            .and_then(|v| v.parse::<f32>().ok())
            .filter(|v| v.is_finite())
            .unwrap_or(0.0);
        let tries = store
            .get(KEY_TRIES)
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(0);
        let congrats_played = store
            .get(KEY_CONGRATS)
            .and_then(|v| serde_json::from_str::<bool>(&v).ok())
            .unwrap_or(false);
        SessionState {
            best_score,
            tries,
            congrats_played,
            new_best: false,
            new_best_at: 0.0,
            confetti_started_at: None,
        }
    }

    /// Whether the mirror gag is active for the current tries count.
    pub fn flipped(&self) -> bool {
        FLIP_TRIES.contains(&self.tries)
    }

    /// Reset the per-attempt fields (restart).
    pub fn begin_attempt(&mut self) {
        self.new_best = false;
        self.new_best_at = 0.0;
        self.confetti_started_at = None;
    }

    /// Count a restart and persist the tries counter.
    pub fn record_try(&mut self, store: &mut dyn KeyValueStore) {
        self.tries += 1;
        store.set(KEY_TRIES, &self.tries.to_string());
    }

    /// Record and persist a strictly better score. `best_score` is
    /// monotonically non-decreasing for the session's lifetime.
    pub fn record_best(&mut self, score: f32, now: f64, store: &mut dyn KeyValueStore) {
        debug_assert!(score > self.best_score);
        self.best_score = score;
        self.new_best = true;
        self.new_best_at = now;
        store.set(KEY_BEST, &score.to_string());
    }

    /// Permanently latch the one-time congratulations milestone and open
    /// the confetti window.
    pub fn record_congrats(&mut self, now: f64, store: &mut dyn KeyValueStore) {
        self.congrats_played = true;
        self.confetti_started_at = Some(now);
        store.set(KEY_CONGRATS, "true");
    }
}
