//! Boss phase controller.
//!
//! Watches the boss's health ratio and switches phases at the configured
//! thresholds. Every phase change (other than the first engagement) grants a
//! short invulnerability window during which incoming damage is absorbed.

use tracing::{debug, info};

use skirmish_core::config::BossConfig;
use skirmish_core::enums::BossPhase;
use skirmish_core::events::CombatEvent;

use crate::behavior::BehaviorController;
use crate::body::Body;
use crate::host::{CombatWorld, EventSink};
use crate::pipeline::AttackPipeline;

#[derive(Debug, Clone)]
pub struct PhaseController {
    config: BossConfig,
    phase: BossPhase,
    invulnerable: bool,
    invulnerable_remaining_ms: f64,
    /// Time since defeat (ms). Only advances while dying.
    defeat_elapsed_ms: f64,
}

impl PhaseController {
    pub fn new(config: BossConfig) -> Self {
        Self {
            config,
            phase: BossPhase::Idle,
            invulnerable: false,
            invulnerable_remaining_ms: 0.0,
            defeat_elapsed_ms: 0.0,
        }
    }

    pub fn phase(&self) -> BossPhase {
        self.phase
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invulnerable
    }

    pub fn invulnerable_remaining_ms(&self) -> f64 {
        self.invulnerable_remaining_ms
    }

    pub fn is_dying(&self) -> bool {
        self.phase == BossPhase::Dying
    }

    /// Dying for at least the defeat delay; the host may despawn.
    pub fn is_expired(&self) -> bool {
        self.is_dying() && self.defeat_elapsed_ms >= self.config.defeat_delay_ms
    }

    pub fn update(
        &mut self,
        delta_ms: f64,
        body: &mut Body,
        behavior: &mut BehaviorController,
        pipeline: &mut AttackPipeline,
        world: &mut dyn CombatWorld,
        events: &mut dyn EventSink,
    ) {
        if self.is_dying() {
            self.defeat_elapsed_ms += delta_ms;
            return;
        }

        if self.invulnerable {
            self.invulnerable_remaining_ms -= delta_ms;
            if self.invulnerable_remaining_ms <= 0.0 {
                self.invulnerable = false;
                self.invulnerable_remaining_ms = 0.0;
                debug!(agent = body.id.0, phase = ?self.phase, "invulnerability ended");
            }
        }

        self.check_thresholds(body, behavior, pipeline, events);
        if self.is_dying() {
            return;
        }

        behavior.update(delta_ms, body, pipeline, Some(self.phase), world, events);

        if self.phase == BossPhase::Idle && behavior.target().is_some() {
            self.enter(BossPhase::Phase1, 0.0, body, events);
        }
    }

    /// Returns whether the boss is still alive. Damage is absorbed while
    /// invulnerable.
    pub fn take_damage(
        &mut self,
        amount: f64,
        body: &mut Body,
        behavior: &mut BehaviorController,
        pipeline: &mut AttackPipeline,
        events: &mut dyn EventSink,
    ) -> bool {
        if self.is_dying() {
            return false;
        }
        if self.invulnerable {
            debug!(agent = body.id.0, amount, "damage absorbed");
            return true;
        }
        let alive = behavior.take_damage(amount, body, pipeline, events);
        if !alive {
            self.begin_defeat(body, behavior, pipeline, events);
        }
        alive
    }

    /// Thresholds are stored highest first; the lowest one the ratio has
    /// reached wins.
    fn check_thresholds(
        &mut self,
        body: &Body,
        behavior: &mut BehaviorController,
        pipeline: &mut AttackPipeline,
        events: &mut dyn EventSink,
    ) {
        let ratio = body.health_ratio();
        let Some(reached) = self
            .config
            .thresholds
            .iter()
            .rev()
            .find(|t| ratio <= t.ratio)
            .copied()
        else {
            return;
        };

        if reached.phase == BossPhase::Dying {
            self.begin_defeat(body, behavior, pipeline, events);
        } else if reached.phase != self.phase {
            self.enter(reached.phase, self.config.invulnerable_ms, body, events);
        }
    }

    fn enter(&mut self, to: BossPhase, invulnerable_ms: f64, body: &Body, events: &mut dyn EventSink) {
        let from = self.phase;
        self.phase = to;
        self.invulnerable = invulnerable_ms > 0.0;
        self.invulnerable_remaining_ms = invulnerable_ms;
        info!(agent = body.id.0, ?from, ?to, invulnerable_ms, "boss phase changed");
        events.emit(CombatEvent::PhaseChanged {
            agent: body.id,
            from,
            to,
            invulnerable_ms,
        });
    }

    fn begin_defeat(
        &mut self,
        body: &Body,
        behavior: &mut BehaviorController,
        pipeline: &mut AttackPipeline,
        events: &mut dyn EventSink,
    ) {
        if self.is_dying() {
            return;
        }
        behavior.mark_dead(body.id, pipeline, events);
        self.phase = BossPhase::Dying;
        self.invulnerable = false;
        self.invulnerable_remaining_ms = 0.0;
        self.defeat_elapsed_ms = 0.0;
        info!(agent = body.id.0, "boss defeated");
        events.emit(CombatEvent::Defeated { agent: body.id });
        events.emit(CombatEvent::DroppedLoot {
            agent: body.id,
            position: body.position,
        });
    }
}
