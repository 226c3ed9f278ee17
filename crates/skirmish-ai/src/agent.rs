//! A complete combat agent: body, behavior, attack pipeline and, for bosses,
//! the phase controller.
//!
//! This is the only type hosts normally hold. All mutation goes through
//! `update`, `take_damage`, `heal` and `reset`; everything else is a read.

use glam::DVec2;
use tracing::info;

use skirmish_core::config::AgentConfig;
use skirmish_core::enums::{AgentKind, BehaviorState, BossPhase};
use skirmish_core::events::CombatEvent;
use skirmish_core::state::{ActiveAttackView, AgentView, BossView};
use skirmish_core::types::{AgentId, TargetId};

use crate::attacks::{AttackBook, AvailabilityContext};
use crate::behavior::BehaviorController;
use crate::body::Body;
use crate::host::{CombatWorld, EventSink, MovementIntent};
use crate::phase::PhaseController;
use crate::pipeline::AttackPipeline;

/// How the agent reacts to damage and death.
#[derive(Debug, Clone)]
pub enum Strategy {
    Standard,
    Boss(PhaseController),
}

#[derive(Debug, Clone)]
pub struct Agent {
    archetype: String,
    body: Body,
    behavior: BehaviorController,
    pipeline: AttackPipeline,
    strategy: Strategy,
}

impl Agent {
    pub fn new(
        archetype: impl Into<String>,
        id: AgentId,
        position: DVec2,
        config: AgentConfig,
        book: AttackBook,
        strategy: Strategy,
    ) -> Self {
        Self {
            archetype: archetype.into(),
            body: Body::new(id, position, config.max_health),
            behavior: BehaviorController::new(config),
            pipeline: AttackPipeline::new(book),
            strategy,
        }
    }

    pub fn id(&self) -> AgentId {
        self.body.id
    }

    pub fn archetype(&self) -> &str {
        &self.archetype
    }

    pub fn kind(&self) -> AgentKind {
        match self.strategy {
            Strategy::Standard => AgentKind::Standard,
            Strategy::Boss(_) => AgentKind::Boss,
        }
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Hosts integrate movement themselves.
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    pub fn state(&self) -> BehaviorState {
        self.behavior.state()
    }

    pub fn target(&self) -> Option<TargetId> {
        self.behavior.target()
    }

    pub fn intent(&self) -> MovementIntent {
        self.behavior.intent()
    }

    pub fn pipeline(&self) -> &AttackPipeline {
        &self.pipeline
    }

    pub fn boss_phase(&self) -> Option<BossPhase> {
        match &self.strategy {
            Strategy::Standard => None,
            Strategy::Boss(phase) => Some(phase.phase()),
        }
    }

    pub fn is_invulnerable(&self) -> bool {
        matches!(&self.strategy, Strategy::Boss(phase) if phase.is_invulnerable())
    }

    pub fn is_dead(&self) -> bool {
        self.behavior.state().is_terminal()
    }

    /// Ready to be despawned by the host.
    pub fn is_expired(&self) -> bool {
        match &self.strategy {
            Strategy::Standard => self.is_dead(),
            Strategy::Boss(phase) => phase.is_expired(),
        }
    }

    pub fn update(&mut self, delta_ms: f64, world: &mut dyn CombatWorld, events: &mut dyn EventSink) {
        match &mut self.strategy {
            Strategy::Standard => self.behavior.update(
                delta_ms,
                &mut self.body,
                &mut self.pipeline,
                None,
                world,
                events,
            ),
            Strategy::Boss(phase) => phase.update(
                delta_ms,
                &mut self.body,
                &mut self.behavior,
                &mut self.pipeline,
                world,
                events,
            ),
        }
    }

    /// Returns whether the agent is still alive.
    pub fn take_damage(&mut self, amount: f64, events: &mut dyn EventSink) -> bool {
        match &mut self.strategy {
            Strategy::Standard => {
                let was_alive = !self.behavior.state().is_terminal();
                let alive =
                    self.behavior
                        .take_damage(amount, &mut self.body, &mut self.pipeline, events);
                if was_alive && !alive {
                    info!(agent = self.body.id.0, archetype = %self.archetype, "agent died");
                    events.emit(CombatEvent::Died { agent: self.body.id });
                    events.emit(CombatEvent::DroppedLoot {
                        agent: self.body.id,
                        position: self.body.position,
                    });
                }
                alive
            }
            Strategy::Boss(phase) => phase.take_damage(
                amount,
                &mut self.body,
                &mut self.behavior,
                &mut self.pipeline,
                events,
            ),
        }
    }

    /// Restore health, capped at the maximum. No-op once dead.
    pub fn heal(&mut self, amount: f64) {
        if self.is_dead() || amount <= 0.0 {
            return;
        }
        self.body.health = (self.body.health + amount).min(self.body.max_health);
    }

    pub fn cancel_attack(&mut self) {
        self.pipeline.cancel_attack();
    }

    /// Drop the in-flight attack and the target, and return to idle.
    pub fn reset(&mut self, events: &mut dyn EventSink) {
        self.pipeline.cancel_attack();
        self.behavior.reset(self.body.id, events);
    }

    pub fn active_attack(&self) -> Option<ActiveAttackView> {
        self.pipeline.active_view()
    }

    /// Attacks that could be selected right now, ignoring range.
    pub fn available_attacks(&self) -> Vec<String> {
        let ctx = AvailabilityContext {
            boss_phase: self.boss_phase(),
            health_ratio: self.body.health_ratio(),
            target_distance: None,
        };
        self.pipeline.available_attacks(&ctx)
    }

    pub fn view(&self) -> AgentView {
        let boss = match &self.strategy {
            Strategy::Standard => None,
            Strategy::Boss(phase) => Some(BossView {
                phase: phase.phase(),
                invulnerable: phase.is_invulnerable(),
                invulnerable_remaining_ms: phase.invulnerable_remaining_ms(),
                hud_visible: !phase.is_dying() && phase.phase() != BossPhase::Idle,
            }),
        };
        AgentView {
            id: self.body.id,
            kind: self.kind(),
            archetype: self.archetype.clone(),
            position: self.body.position,
            facing: self.body.facing,
            health: self.body.health,
            max_health: self.body.max_health,
            state: self.behavior.state(),
            target: self.behavior.target(),
            active_attack: self.active_attack(),
            available_attacks: self.available_attacks(),
            boss,
        }
    }
}
