//! Per-agent behavior state machine.
//!
//! idle -> patrol -> chase -> attack, with flee entered from any live state
//! after a heavy hit and dead entered when health reaches zero. The
//! controller owns movement intent and the current target reference; combat
//! decisions are delegated to the attack pipeline.

use tracing::debug;

use skirmish_core::config::AgentConfig;
use skirmish_core::constants::*;
use skirmish_core::enums::{BehaviorState, BossPhase};
use skirmish_core::events::CombatEvent;
use skirmish_core::types::{AgentId, Facing, TargetId};

use crate::attacks::AvailabilityContext;
use crate::body::Body;
use crate::host::{CombatWorld, EventSink, MovementIntent, TargetInfo};
use crate::locator;
use crate::pipeline::AttackPipeline;

#[derive(Debug, Clone)]
pub struct BehaviorController {
    config: AgentConfig,
    state: BehaviorState,
    /// Time spent in the current state (ms).
    state_timer_ms: f64,
    patrol_timer_ms: f64,
    patrol_direction: Facing,
    target: Option<TargetId>,
    intent: MovementIntent,
    /// Time until the fallback strike may land again (ms).
    contact_cooldown_ms: f64,
}

impl BehaviorController {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            state: BehaviorState::Idle,
            state_timer_ms: 0.0,
            patrol_timer_ms: 0.0,
            patrol_direction: Facing::default(),
            target: None,
            intent: MovementIntent::stop(),
            contact_cooldown_ms: 0.0,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn target(&self) -> Option<TargetId> {
        self.target
    }

    pub fn intent(&self) -> MovementIntent {
        self.intent
    }

    /// Advance one tick.
    pub fn update(
        &mut self,
        delta_ms: f64,
        body: &mut Body,
        pipeline: &mut AttackPipeline,
        boss_phase: Option<BossPhase>,
        world: &mut dyn CombatWorld,
        events: &mut dyn EventSink,
    ) {
        if self.state.is_terminal() {
            self.intent = MovementIntent::stop();
            return;
        }

        self.state_timer_ms += delta_ms;
        self.contact_cooldown_ms = (self.contact_cooldown_ms - delta_ms).max(0.0);

        if self.target.is_none() {
            let candidates = world.candidates();
            if let Some(found) =
                locator::find_target(body.position, self.config.detection_range, &candidates)
            {
                debug!(agent = body.id.0, target = found.id.0, "target acquired");
                self.target = Some(found.id);
            }
        }

        pipeline.update(delta_ms, body, self.target, world, events);

        // An invalidated target reads as no target
        let target = self
            .target
            .and_then(|id| world.locate(id))
            .filter(TargetInfo::is_alive);
        if target.is_none() {
            self.target = None;
        }

        match self.state {
            BehaviorState::Idle => {
                self.intent = MovementIntent::stop();
                if self.state_timer_ms > IDLE_TO_PATROL_MS {
                    self.transition(BehaviorState::Patrol, body.id, events);
                }
            }
            BehaviorState::Patrol => {
                if target.is_some() {
                    self.transition(BehaviorState::Chase, body.id, events);
                    return;
                }
                self.patrol_timer_ms += delta_ms;
                if self.patrol_timer_ms >= self.config.patrol_change_ms {
                    self.patrol_direction = self.patrol_direction.flipped();
                    self.patrol_timer_ms = 0.0;
                }
                body.facing = self.patrol_direction;
                self.intent = MovementIntent {
                    direction: self.patrol_direction.sign(),
                    speed: self.config.patrol_speed,
                };
            }
            BehaviorState::Chase => {
                let Some(target) = target else {
                    self.intent = MovementIntent::stop();
                    self.transition(BehaviorState::Patrol, body.id, events);
                    return;
                };
                let distance = body.distance_to(target.position);
                if distance <= self.config.attack_range {
                    self.intent = MovementIntent::stop();
                    self.transition(BehaviorState::Attack, body.id, events);
                } else if distance > self.config.detection_range {
                    debug!(agent = body.id.0, target = target.id.0, "target lost");
                    self.target = None;
                    self.intent = MovementIntent::stop();
                    self.transition(BehaviorState::Patrol, body.id, events);
                } else {
                    body.face(target.position);
                    self.intent = MovementIntent {
                        direction: body.facing.sign(),
                        speed: self.config.chase_speed,
                    };
                }
            }
            BehaviorState::Attack => {
                self.intent = MovementIntent::stop();
                let Some(target) = target else {
                    self.transition(BehaviorState::Patrol, body.id, events);
                    return;
                };
                let distance = body.distance_to(target.position);
                if distance > self.config.attack_range {
                    self.transition(BehaviorState::Chase, body.id, events);
                    return;
                }
                if pipeline.is_busy() {
                    return;
                }
                let ctx = AvailabilityContext {
                    boss_phase,
                    health_ratio: body.health_ratio(),
                    target_distance: Some(distance),
                };
                let started = pipeline
                    .select_best_attack(&ctx)
                    .is_some_and(|name| pipeline.execute_attack(&name, body, Some(&target), events));
                if !started {
                    self.fallback_strike(body, &target, world, events);
                }
            }
            BehaviorState::Flee => {
                if self.state_timer_ms > FLEE_DURATION_MS {
                    self.intent = MovementIntent::stop();
                    self.transition(BehaviorState::Idle, body.id, events);
                    return;
                }
                if let Some(target) = target {
                    // Face away from the threat
                    body.facing = body.facing.toward(target.position, body.position);
                }
                self.intent = MovementIntent {
                    direction: body.facing.sign(),
                    speed: self.config.flee_speed,
                };
            }
            BehaviorState::Dead => {}
        }
    }

    /// Apply damage. Returns whether the agent is still alive.
    pub fn take_damage(
        &mut self,
        amount: f64,
        body: &mut Body,
        pipeline: &mut AttackPipeline,
        events: &mut dyn EventSink,
    ) -> bool {
        if self.state.is_terminal() {
            return false;
        }
        if amount <= 0.0 {
            return true;
        }

        body.health = (body.health - amount).max(0.0);
        debug!(agent = body.id.0, amount, health = body.health, "took damage");
        if body.health <= 0.0 {
            self.mark_dead(body.id, pipeline, events);
            return false;
        }
        if body.health < FLEE_HEALTH_RATIO * body.max_health {
            self.transition(BehaviorState::Flee, body.id, events);
        }
        true
    }

    /// Enter the terminal state and drop any in-flight attack.
    pub fn mark_dead(
        &mut self,
        id: AgentId,
        pipeline: &mut AttackPipeline,
        events: &mut dyn EventSink,
    ) {
        if self.state.is_terminal() {
            return;
        }
        pipeline.cancel_attack();
        self.intent = MovementIntent::stop();
        self.target = None;
        self.transition(BehaviorState::Dead, id, events);
    }

    /// Forget the target and go back to idle. No-op once dead.
    pub fn reset(&mut self, id: AgentId, events: &mut dyn EventSink) {
        if self.state.is_terminal() {
            return;
        }
        self.target = None;
        self.intent = MovementIntent::stop();
        self.transition(BehaviorState::Idle, id, events);
    }

    fn fallback_strike(
        &mut self,
        body: &mut Body,
        target: &TargetInfo,
        world: &mut dyn CombatWorld,
        events: &mut dyn EventSink,
    ) {
        if self.contact_cooldown_ms > 0.0 || self.config.contact_damage <= 0.0 {
            return;
        }
        body.face(target.position);
        let target_alive = world.apply_damage(target.id, self.config.contact_damage);
        self.contact_cooldown_ms = self.config.contact_interval_ms;
        events.emit(CombatEvent::AttackHit {
            agent: body.id,
            attack: FALLBACK_ATTACK_NAME.to_owned(),
            target: target.id,
            damage: self.config.contact_damage,
            target_alive,
        });
    }

    /// Switch state and restart the state timer. Re-entering the current
    /// state restarts the timer without an event.
    fn transition(&mut self, to: BehaviorState, id: AgentId, events: &mut dyn EventSink) {
        let from = self.state;
        self.state = to;
        self.state_timer_ms = 0.0;
        if to == BehaviorState::Patrol {
            self.patrol_timer_ms = 0.0;
        }
        if from != to {
            debug!(agent = id.0, ?from, ?to, "state changed");
            events.emit(CombatEvent::StateChanged { agent: id, from, to });
        }
    }
}
