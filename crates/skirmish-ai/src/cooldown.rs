//! Per-agent cooldown table: attack name -> earliest next use (ms).

use std::collections::HashMap;

#[derive(Debug, Clone, Default)]
pub struct CooldownTable {
    ready_at: HashMap<String, f64>,
}

impl CooldownTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` may be used at `now`. Unknown names are ready.
    pub fn is_ready(&self, name: &str, now: f64) -> bool {
        self.ready_at.get(name).map_or(true, |&at| now >= at)
    }

    /// Earliest next use of `name`, if it was ever used.
    pub fn ready_at(&self, name: &str) -> Option<f64> {
        self.ready_at.get(name).copied()
    }

    pub fn remaining(&self, name: &str, now: f64) -> f64 {
        self.ready_at(name).map_or(0.0, |at| (at - now).max(0.0))
    }

    pub(crate) fn start(&mut self, name: &str, now: f64, duration_ms: f64) {
        self.ready_at.insert(name.to_owned(), now + duration_ms);
    }
}
