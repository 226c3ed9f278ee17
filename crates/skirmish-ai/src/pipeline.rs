//! Attack execution pipeline: telegraph -> commit -> cooldown.
//!
//! At most one attack instance is in flight per agent. The instance's effect
//! fires exactly once, on the first tick where commit-phase time reaches half
//! of the commit duration. Completion starts the attack's cooldown; explicit
//! cancellation does neither.
//!
//! All timing is accumulated from the deltas passed to `update`, so the
//! pipeline is fully deterministic for a given delta sequence.

use glam::DVec2;
use tracing::{debug, trace};

use skirmish_core::constants::*;
use skirmish_core::enums::{AttackKind, AttackPhase};
use skirmish_core::events::CombatEvent;
use skirmish_core::state::ActiveAttackView;
use skirmish_core::types::TargetId;

use crate::attacks::{AttackBook, AttackDefinition, AvailabilityContext, EffectContext};
use crate::body::Body;
use crate::cooldown::CooldownTable;
use crate::host::{CombatWorld, EventSink, TargetInfo};
use crate::selector;

/// The attack currently being run.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveAttack {
    pub name: String,
    pub kind: AttackKind,
    pub phase: AttackPhase,
    /// Time spent in the current phase (ms).
    pub elapsed_ms: f64,
    pub triggered: bool,
}

/// Delayed follow-up hit of a teleport.
#[derive(Debug, Clone, PartialEq)]
struct PendingStrike {
    attack: String,
    target: TargetId,
    damage: f64,
    range: f64,
    remaining_ms: f64,
}

#[derive(Debug, Clone)]
pub struct AttackPipeline {
    book: AttackBook,
    cooldowns: CooldownTable,
    active: Option<ActiveAttack>,
    pending_strike: Option<PendingStrike>,
    now_ms: f64,
}

impl AttackPipeline {
    pub fn new(book: AttackBook) -> Self {
        Self {
            book,
            cooldowns: CooldownTable::new(),
            active: None,
            pending_strike: None,
            now_ms: 0.0,
        }
    }

    pub fn cooldowns(&self) -> &CooldownTable {
        &self.cooldowns
    }

    /// Pipeline clock: the sum of all deltas seen so far (ms).
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn active(&self) -> Option<&ActiveAttack> {
        self.active.as_ref()
    }

    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_view(&self) -> Option<ActiveAttackView> {
        let active = self.active.as_ref()?;
        let phase_duration_ms = self
            .book
            .get(&active.name)
            .map(|d| match active.phase {
                AttackPhase::Telegraphing => d.telegraph_ms,
                AttackPhase::Committing => d.commit_ms,
            })
            .unwrap_or_default();
        Some(ActiveAttackView {
            name: active.name.clone(),
            kind: active.kind,
            phase: active.phase,
            elapsed_ms: active.elapsed_ms,
            phase_duration_ms,
            triggered: active.triggered,
        })
    }

    /// Names of attacks that are off cooldown and currently allowed.
    pub fn available_attacks(&self, ctx: &AvailabilityContext) -> Vec<String> {
        selector::eligible(&self.book, &self.cooldowns, self.now_ms, ctx)
            .map(|d| d.name.clone())
            .collect()
    }

    pub fn select_best_attack(&self, ctx: &AvailabilityContext) -> Option<String> {
        selector::select_best_attack(&self.book, &self.cooldowns, self.now_ms, ctx)
            .map(|d| d.name.clone())
    }

    /// Start the named attack. Fails without side effects when the attack is
    /// unknown, on cooldown, out of range of `target`, or another attack is
    /// already in flight.
    pub fn execute_attack(
        &mut self,
        name: &str,
        body: &mut Body,
        target: Option<&TargetInfo>,
        events: &mut dyn EventSink,
    ) -> bool {
        if let Some(active) = &self.active {
            debug!(agent = body.id.0, attack = name, busy = %active.name, "attack rejected: busy");
            return false;
        }
        let Some(definition) = self.book.get(name) else {
            debug!(agent = body.id.0, attack = name, "attack rejected: unknown");
            return false;
        };
        if !self.cooldowns.is_ready(name, self.now_ms) {
            debug!(
                agent = body.id.0,
                attack = name,
                remaining_ms = self.cooldowns.remaining(name, self.now_ms),
                "attack rejected: cooling down"
            );
            return false;
        }
        if let Some(target) = target {
            let distance = body.distance_to(target.position);
            if distance > definition.range {
                debug!(
                    agent = body.id.0,
                    attack = name,
                    distance,
                    range = definition.range,
                    "attack rejected: out of range"
                );
                return false;
            }
            if definition.needs_face_target {
                body.face(target.position);
            }
        }

        self.active = Some(ActiveAttack {
            name: definition.name.clone(),
            kind: definition.kind,
            phase: AttackPhase::Telegraphing,
            elapsed_ms: 0.0,
            triggered: false,
        });
        trace!(agent = body.id.0, attack = name, "telegraph started");
        events.emit(CombatEvent::TelegraphStarted {
            agent: body.id,
            attack: definition.name.clone(),
            kind: definition.kind,
            duration_ms: definition.telegraph_ms,
        });
        true
    }

    /// Advance the clock and the in-flight attack. Returns whether an attack
    /// is still in flight afterwards.
    pub fn update(
        &mut self,
        delta_ms: f64,
        body: &mut Body,
        target: Option<TargetId>,
        world: &mut dyn CombatWorld,
        events: &mut dyn EventSink,
    ) -> bool {
        self.now_ms += delta_ms;
        self.advance_pending_strike(delta_ms, body, world, events);

        let Some(active) = self.active.as_mut() else {
            return false;
        };
        let Some(definition) = self.book.get(&active.name) else {
            // Definition removed mid-flight
            self.active = None;
            return false;
        };

        active.elapsed_ms += delta_ms;
        let mut completed = false;
        match active.phase {
            AttackPhase::Telegraphing => {
                if active.elapsed_ms >= definition.telegraph_ms {
                    active.phase = AttackPhase::Committing;
                    active.elapsed_ms = 0.0;
                    trace!(agent = body.id.0, attack = %definition.name, "committing");
                    events.emit(CombatEvent::AttackStarted {
                        agent: body.id,
                        attack: definition.name.clone(),
                        kind: definition.kind,
                    });
                }
            }
            AttackPhase::Committing => {
                if !active.triggered
                    && active.elapsed_ms >= definition.commit_ms * COMMIT_TRIGGER_FRACTION
                {
                    active.triggered = true;
                    trace!(agent = body.id.0, attack = %definition.name, "effect triggered");
                    if let Some(strike) = fire(definition, body, target, world, events) {
                        self.pending_strike = Some(strike);
                    }
                }
                if active.elapsed_ms >= definition.commit_ms {
                    self.cooldowns
                        .start(&definition.name, self.now_ms, definition.cooldown_ms);
                    trace!(
                        agent = body.id.0,
                        attack = %definition.name,
                        ready_at = self.now_ms + definition.cooldown_ms,
                        "attack complete"
                    );
                    completed = true;
                }
            }
        }

        if completed {
            self.active = None;
        }
        self.active.is_some()
    }

    /// Drop the in-flight attack without firing its effect or starting its
    /// cooldown. Also drops a pending teleport strike.
    pub fn cancel_attack(&mut self) {
        if let Some(active) = self.active.take() {
            trace!(attack = %active.name, "attack cancelled");
        }
        self.pending_strike = None;
    }

    fn advance_pending_strike(
        &mut self,
        delta_ms: f64,
        body: &Body,
        world: &mut dyn CombatWorld,
        events: &mut dyn EventSink,
    ) {
        let Some(strike) = self.pending_strike.as_mut() else {
            return;
        };
        strike.remaining_ms -= delta_ms;
        if strike.remaining_ms > 0.0 {
            return;
        }
        let Some(strike) = self.pending_strike.take() else {
            return;
        };
        if let Some(target) = world.locate(strike.target).filter(TargetInfo::is_alive) {
            if body.distance_to(target.position) <= strike.range {
                hit(body, &strike.attack, &target, strike.damage, world, events);
            }
        }
    }
}

/// Apply the effect of `definition`. Returns a follow-up strike for teleports.
fn fire(
    definition: &AttackDefinition,
    body: &mut Body,
    target: Option<TargetId>,
    world: &mut dyn CombatWorld,
    events: &mut dyn EventSink,
) -> Option<PendingStrike> {
    let target = target
        .and_then(|id| world.locate(id))
        .filter(TargetInfo::is_alive);

    if let Some(effect) = &definition.custom {
        let mut ctx = EffectContext {
            attack: definition,
            body,
            target,
            world,
            events,
        };
        effect(&mut ctx);
        return None;
    }

    match definition.kind {
        AttackKind::Melee | AttackKind::Charge | AttackKind::Aoe => {
            if let Some(target) = target {
                if body.distance_to(target.position) <= definition.range {
                    hit(body, &definition.name, &target, definition.damage, world, events);
                }
            }
            None
        }
        AttackKind::Projectile => {
            events.emit(CombatEvent::ProjectileFired {
                agent: body.id,
                attack: definition.name.clone(),
                origin: body.position,
                direction: body.facing.sign(),
                damage: definition.damage,
                range: definition.range,
            });
            None
        }
        AttackKind::Summon => {
            events.emit(CombatEvent::MinionSpawned {
                agent: body.id,
                attack: definition.name.clone(),
                position: body.position,
                count: SUMMON_COUNT,
            });
            None
        }
        AttackKind::Teleport => {
            let target = target?;
            // Reappear on the far side of the target
            let side = if target.position.x >= body.position.x {
                1.0
            } else {
                -1.0
            };
            let from = body.position;
            let to = DVec2::new(target.position.x + side * TELEPORT_OFFSET, target.position.y);
            events.emit(CombatEvent::Teleported {
                agent: body.id,
                from,
                to,
            });
            body.position = to;
            body.face(target.position);
            Some(PendingStrike {
                attack: definition.name.clone(),
                target: target.id,
                damage: definition.damage,
                range: definition.range,
                remaining_ms: TELEPORT_STRIKE_DELAY_MS,
            })
        }
    }
}

fn hit(
    body: &Body,
    attack: &str,
    target: &TargetInfo,
    damage: f64,
    world: &mut dyn CombatWorld,
    events: &mut dyn EventSink,
) {
    let target_alive = world.apply_damage(target.id, damage);
    events.emit(CombatEvent::AttackHit {
        agent: body.id,
        attack: attack.to_owned(),
        target: target.id,
        damage,
        target_alive,
    });
}
