use glam::DVec2;

use skirmish_core::config::{AgentConfig, ArchetypeConfig, BossConfig, EncounterConfig};
use skirmish_core::enums::*;
use skirmish_core::error::ConfigError;
use skirmish_core::events::CombatEvent;
use skirmish_core::types::{AgentId, Facing, TargetId};

use crate::agent::{Agent, Strategy};
use crate::attacks::{AttackBook, AttackDefinition, AvailabilityContext};
use crate::behavior::BehaviorController;
use crate::body::Body;
use crate::cooldown::CooldownTable;
use crate::host::{CombatWorld, TargetInfo};
use crate::locator::find_target;
use crate::phase::PhaseController;
use crate::pipeline::AttackPipeline;
use crate::profiles::{build_agent, get_profile, resolve, Archetype};
use crate::selector::{score, select_best_attack};

/// Minimal host: a flat list of targets.
#[derive(Default)]
struct Arena {
    targets: Vec<TargetInfo>,
}

impl Arena {
    fn with_target(x: f64, health: f64) -> Self {
        Self {
            targets: vec![make_target(1, x, health)],
        }
    }

    fn health(&self, id: u64) -> f64 {
        self.targets
            .iter()
            .find(|t| t.id == TargetId(id))
            .map_or(0.0, |t| t.health)
    }
}

impl CombatWorld for Arena {
    fn candidates(&self) -> Vec<TargetInfo> {
        self.targets.clone()
    }

    fn locate(&self, id: TargetId) -> Option<TargetInfo> {
        self.targets.iter().find(|t| t.id == id).copied()
    }

    fn apply_damage(&mut self, id: TargetId, amount: f64) -> bool {
        match self.targets.iter_mut().find(|t| t.id == id) {
            Some(target) => {
                target.health = (target.health - amount).max(0.0);
                target.health > 0.0
            }
            None => false,
        }
    }
}

fn make_target(id: u64, x: f64, health: f64) -> TargetInfo {
    TargetInfo {
        id: TargetId(id),
        position: DVec2::new(x, 0.0),
        health,
    }
}

fn make_body(max_health: f64) -> Body {
    Body::new(AgentId(1), DVec2::ZERO, max_health)
}

fn melee(name: &str, range: f64) -> AttackDefinition {
    AttackDefinition::new(name, AttackKind::Melee, 10.0, range)
}

fn make_standard(max_health: f64, attacks: Vec<AttackDefinition>) -> Agent {
    let config = AgentConfig {
        max_health,
        ..AgentConfig::default()
    };
    Agent::new(
        "test",
        AgentId(1),
        DVec2::ZERO,
        config,
        attacks.into_iter().collect(),
        Strategy::Standard,
    )
}

fn make_boss() -> Agent {
    let config = AgentConfig {
        max_health: 100.0,
        ..AgentConfig::default()
    };
    Agent::new(
        "test-boss",
        AgentId(7),
        DVec2::ZERO,
        config,
        AttackBook::new(),
        Strategy::Boss(PhaseController::new(BossConfig::default())),
    )
}

fn ctx_at(distance: f64) -> AvailabilityContext {
    AvailabilityContext {
        boss_phase: None,
        health_ratio: 1.0,
        target_distance: Some(distance),
    }
}

fn count_hits(events: &[CombatEvent], attack: &str) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, CombatEvent::AttackHit { attack: a, .. } if a == attack))
        .count()
}

/// Run `ticks` updates, integrating the movement intent like a host would.
fn run(agent: &mut Agent, arena: &mut Arena, ticks: usize, delta_ms: f64) -> Vec<CombatEvent> {
    let mut events: Vec<CombatEvent> = Vec::new();
    for _ in 0..ticks {
        agent.update(delta_ms, arena, &mut events);
        let velocity = agent.intent().velocity();
        agent.body_mut().position.x += velocity * delta_ms / 1000.0;
    }
    events
}

// --- Target locator ---

#[test]
fn test_locator_returns_first_match_not_nearest() {
    let candidates = vec![make_target(1, 250.0, 10.0), make_target(2, 20.0, 10.0)];
    let found = find_target(DVec2::ZERO, 300.0, &candidates).map(|t| t.id);
    assert_eq!(found, Some(TargetId(1)));
}

#[test]
fn test_locator_skips_dead_and_out_of_range() {
    let candidates = vec![
        make_target(1, 10.0, 0.0),
        make_target(2, 500.0, 10.0),
        make_target(3, 100.0, 10.0),
    ];
    let found = find_target(DVec2::ZERO, 300.0, &candidates).map(|t| t.id);
    assert_eq!(found, Some(TargetId(3)));
    assert!(find_target(DVec2::ZERO, 300.0, &Vec::<TargetInfo>::new()).is_none());
}

// --- Attack selector ---

#[test]
fn test_selector_prefers_higher_priority() {
    // Scenario: two in-range attacks with priority 1 and 3
    let book: AttackBook = vec![
        melee("jab", 100.0).with_priority(1.0),
        melee("smash", 100.0).with_priority(3.0),
    ]
    .into_iter()
    .collect();
    let best = select_best_attack(&book, &CooldownTable::new(), 0.0, &ctx_at(50.0));
    assert_eq!(best.map(|d| d.name.as_str()), Some("smash"));
}

#[test]
fn test_selector_tie_goes_to_first_registered() {
    let book: AttackBook = vec![melee("left", 100.0), melee("right", 100.0)]
        .into_iter()
        .collect();
    let best = select_best_attack(&book, &CooldownTable::new(), 0.0, &ctx_at(50.0));
    assert_eq!(best.map(|d| d.name.as_str()), Some("left"));
}

#[test]
fn test_selector_situational_modifiers() {
    let sword = melee("sword", 60.0).with_priority(2.0);
    let bow = AttackDefinition::new("bow", AttackKind::Projectile, 5.0, 300.0).with_priority(1.0);

    // Far away: melee out of range and too far, projectile in range and far
    assert_eq!(score(&sword, Some(200.0)), 2.0 - 1.0 - 2.0);
    assert_eq!(score(&bow, Some(200.0)), 1.0 + 2.0 + 1.0);
    // Close: no far modifiers
    assert_eq!(score(&sword, Some(40.0)), 2.0 + 2.0);
    assert_eq!(score(&bow, Some(40.0)), 1.0 + 2.0);
    // No target: priority only
    assert_eq!(score(&bow, None), 1.0);
}

#[test]
fn test_selector_none_when_everything_filtered() {
    let book: AttackBook = vec![melee("gated", 60.0).gated_to(vec![BossPhase::Phase3])]
        .into_iter()
        .collect();
    assert!(select_best_attack(&book, &CooldownTable::new(), 0.0, &ctx_at(10.0)).is_none());
    assert!(select_best_attack(&AttackBook::new(), &CooldownTable::new(), 0.0, &ctx_at(10.0)).is_none());
}

#[test]
fn test_attack_book_rejects_duplicate_names() {
    let mut book = AttackBook::new();
    assert!(book.register(melee("slash", 60.0)));
    assert!(!book.register(melee("slash", 999.0)));
    assert_eq!(book.len(), 1);
    assert_eq!(book.get("slash").map(|d| d.range), Some(60.0));
    assert!(book.remove("slash").is_some());
    assert!(book.remove("slash").is_none());
}

// --- Attack execution pipeline ---

#[test]
fn test_execute_out_of_range_fails_without_telegraph() {
    // Scenario: melee range 60, target at 150
    let mut pipeline = AttackPipeline::new(vec![melee("slash", 60.0)].into_iter().collect());
    let mut body = make_body(100.0);
    let target = make_target(1, 150.0, 100.0);
    let mut events: Vec<CombatEvent> = Vec::new();

    assert!(!pipeline.execute_attack("slash", &mut body, Some(&target), &mut events));
    assert!(events.is_empty());
    assert!(!pipeline.is_busy());
}

#[test]
fn test_execute_unknown_attack_fails() {
    let mut pipeline = AttackPipeline::new(AttackBook::new());
    let mut events: Vec<CombatEvent> = Vec::new();
    assert!(!pipeline.execute_attack("nope", &mut make_body(10.0), None, &mut events));
    assert!(events.is_empty());
}

#[test]
fn test_single_active_attack() {
    let book: AttackBook = vec![melee("a", 100.0), melee("b", 100.0)].into_iter().collect();
    let mut pipeline = AttackPipeline::new(book);
    let mut body = make_body(100.0);
    let target = make_target(1, 50.0, 100.0);
    let mut events: Vec<CombatEvent> = Vec::new();

    assert!(pipeline.execute_attack("a", &mut body, Some(&target), &mut events));
    assert!(!pipeline.execute_attack("b", &mut body, Some(&target), &mut events));
    assert_eq!(pipeline.active().map(|a| a.name.as_str()), Some("a"));
    assert_eq!(events.len(), 1);
}

#[test]
fn test_execute_faces_target() {
    let mut pipeline = AttackPipeline::new(vec![melee("slash", 60.0)].into_iter().collect());
    let mut body = make_body(100.0);
    assert_eq!(body.facing, Facing::Right);
    let target = make_target(1, -30.0, 100.0);
    let mut events: Vec<CombatEvent> = Vec::new();
    assert!(pipeline.execute_attack("slash", &mut body, Some(&target), &mut events));
    assert_eq!(body.facing, Facing::Left);
}

#[test]
fn test_trigger_fires_once_at_half_commit() {
    // Scenario: telegraph 500, commit 300, 100ms ticks
    let book: AttackBook = vec![melee("slash", 60.0).with_timing(500.0, 300.0, 1000.0)]
        .into_iter()
        .collect();
    let mut pipeline = AttackPipeline::new(book);
    let mut body = make_body(100.0);
    let mut arena = Arena::with_target(30.0, 100.0);
    let target = arena.targets[0];
    let mut events: Vec<CombatEvent> = Vec::new();
    assert!(pipeline.execute_attack("slash", &mut body, Some(&target), &mut events));

    let mut hit_tick = Vec::new();
    for tick in 1..=12 {
        let before = count_hits(&events, "slash");
        pipeline.update(100.0, &mut body, Some(target.id), &mut arena, &mut events);
        if count_hits(&events, "slash") > before {
            hit_tick.push(tick);
        }
        if tick == 5 {
            let active = pipeline.active().map(|a| (a.phase, a.elapsed_ms));
            assert_eq!(active, Some((AttackPhase::Committing, 0.0)));
        }
    }

    // Commit starts on tick 5; 200ms of commit time is reached on tick 7
    assert_eq!(hit_tick, vec![7]);
    assert_eq!(arena.health(1), 90.0);
    assert!(!pipeline.is_busy());
}

#[test]
fn test_cooldown_window() {
    let book: AttackBook = vec![melee("slash", 60.0).with_timing(100.0, 100.0, 1000.0)]
        .into_iter()
        .collect();
    let mut pipeline = AttackPipeline::new(book);
    let mut body = make_body(100.0);
    let mut arena = Arena::with_target(30.0, 100.0);
    let target = arena.targets[0];
    let mut events: Vec<CombatEvent> = Vec::new();

    assert!(pipeline.execute_attack("slash", &mut body, Some(&target), &mut events));
    pipeline.update(100.0, &mut body, Some(target.id), &mut arena, &mut events);
    pipeline.update(100.0, &mut body, Some(target.id), &mut arena, &mut events);
    assert!(!pipeline.is_busy());
    assert_eq!(pipeline.cooldowns().ready_at("slash"), Some(200.0 + 1000.0));

    // Within the window
    assert!(!pipeline.execute_attack("slash", &mut body, Some(&target), &mut events));
    for _ in 0..10 {
        pipeline.update(100.0, &mut body, Some(target.id), &mut arena, &mut events);
    }
    assert!(pipeline.execute_attack("slash", &mut body, Some(&target), &mut events));
}

#[test]
fn test_cancel_skips_effect_and_cooldown() {
    let book: AttackBook = vec![melee("slash", 60.0).with_timing(100.0, 100.0, 1000.0)]
        .into_iter()
        .collect();
    let mut pipeline = AttackPipeline::new(book);
    let mut body = make_body(100.0);
    let mut arena = Arena::with_target(30.0, 100.0);
    let target = arena.targets[0];
    let mut events: Vec<CombatEvent> = Vec::new();

    assert!(pipeline.execute_attack("slash", &mut body, Some(&target), &mut events));
    pipeline.update(100.0, &mut body, Some(target.id), &mut arena, &mut events);
    pipeline.cancel_attack();
    pipeline.update(100.0, &mut body, Some(target.id), &mut arena, &mut events);

    assert_eq!(count_hits(&events, "slash"), 0);
    assert!(pipeline.cooldowns().is_ready("slash", pipeline.now_ms()));
}

#[test]
fn test_teleport_reappears_behind_and_strikes_once() {
    let blink = AttackDefinition::new("blink", AttackKind::Teleport, 18.0, 200.0)
        .with_timing(0.0, 100.0, 5000.0);
    let mut pipeline = AttackPipeline::new(vec![blink].into_iter().collect());
    let mut body = make_body(100.0);
    let mut arena = Arena::with_target(100.0, 100.0);
    let target = arena.targets[0];
    let mut events: Vec<CombatEvent> = Vec::new();

    assert!(pipeline.execute_attack("blink", &mut body, Some(&target), &mut events));
    for _ in 0..8 {
        pipeline.update(50.0, &mut body, Some(target.id), &mut arena, &mut events);
    }

    assert!(events.iter().any(|e| matches!(e, CombatEvent::Teleported { .. })));
    assert_eq!(body.position, DVec2::new(140.0, 0.0));
    assert_eq!(body.facing, Facing::Left);
    assert_eq!(count_hits(&events, "blink"), 1);
    assert_eq!(arena.health(1), 82.0);
}

#[test]
fn test_projectile_and_summon_emit_spawn_requests() {
    let book: AttackBook = vec![
        AttackDefinition::new("bolt", AttackKind::Projectile, 7.0, 300.0),
        AttackDefinition::new("raise", AttackKind::Summon, 0.0, 300.0),
    ]
    .into_iter()
    .collect();
    let mut pipeline = AttackPipeline::new(book);
    let mut body = make_body(100.0);
    let mut arena = Arena::with_target(100.0, 100.0);
    let target = arena.targets[0];
    let mut events: Vec<CombatEvent> = Vec::new();

    for name in ["bolt", "raise"] {
        assert!(pipeline.execute_attack(name, &mut body, Some(&target), &mut events));
        pipeline.update(10.0, &mut body, Some(target.id), &mut arena, &mut events);
        pipeline.update(10.0, &mut body, Some(target.id), &mut arena, &mut events);
    }

    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::ProjectileFired { direction, damage, .. } if *direction == 1.0 && *damage == 7.0
    )));
    assert!(events
        .iter()
        .any(|e| matches!(e, CombatEvent::MinionSpawned { count: 2, .. })));
    // Spawn requests never damage directly
    assert_eq!(arena.health(1), 100.0);
}

#[test]
fn test_custom_effect_replaces_default() {
    let drain = melee("drain", 60.0).with_custom_effect(|ctx| {
        if let Some(target) = ctx.target {
            ctx.world.apply_damage(target.id, 25.0);
        }
        ctx.body.health = ctx.body.max_health;
    });
    let mut pipeline = AttackPipeline::new(vec![drain].into_iter().collect());
    let mut body = make_body(100.0);
    body.health = 10.0;
    let mut arena = Arena::with_target(30.0, 100.0);
    let target = arena.targets[0];
    let mut events: Vec<CombatEvent> = Vec::new();

    assert!(pipeline.execute_attack("drain", &mut body, Some(&target), &mut events));
    pipeline.update(10.0, &mut body, Some(target.id), &mut arena, &mut events);
    pipeline.update(10.0, &mut body, Some(target.id), &mut arena, &mut events);

    assert_eq!(arena.health(1), 75.0);
    assert_eq!(body.health, 100.0);
    assert_eq!(count_hits(&events, "drain"), 0);
}

#[test]
fn test_melee_misses_when_target_walks_away() {
    let book: AttackBook = vec![melee("slash", 60.0).with_timing(100.0, 100.0, 0.0)]
        .into_iter()
        .collect();
    let mut pipeline = AttackPipeline::new(book);
    let mut body = make_body(100.0);
    let mut arena = Arena::with_target(30.0, 100.0);
    let target = arena.targets[0];
    let mut events: Vec<CombatEvent> = Vec::new();

    assert!(pipeline.execute_attack("slash", &mut body, Some(&target), &mut events));
    arena.targets[0].position.x = 500.0;
    for _ in 0..3 {
        pipeline.update(100.0, &mut body, Some(target.id), &mut arena, &mut events);
    }
    assert_eq!(count_hits(&events, "slash"), 0);
    assert!(!pipeline.is_busy());
}

// --- Behavior controller ---

#[test]
fn test_heavy_hit_triggers_flee() {
    // Scenario: health 5 of 5 takes 4 -> 1 < 1.5
    let mut agent = make_standard(5.0, Vec::new());
    let mut events: Vec<CombatEvent> = Vec::new();
    assert!(agent.take_damage(4.0, &mut events));
    assert_eq!(agent.body().health, 1.0);
    assert_eq!(agent.state(), BehaviorState::Flee);
    assert!(events.contains(&CombatEvent::StateChanged {
        agent: AgentId(1),
        from: BehaviorState::Idle,
        to: BehaviorState::Flee,
    }));
}

#[test]
fn test_flee_ends_in_idle() {
    let mut agent = make_standard(10.0, Vec::new());
    agent.take_damage(8.0, &mut Vec::<CombatEvent>::new());
    let mut arena = Arena::default();
    run(&mut agent, &mut arena, 30, 100.0);
    assert_eq!(agent.state(), BehaviorState::Flee);
    run(&mut agent, &mut arena, 1, 100.0);
    assert_eq!(agent.state(), BehaviorState::Idle);
}

#[test]
fn test_flee_runs_away_from_target() {
    let mut agent = make_standard(10.0, Vec::new());
    let mut arena = Arena::with_target(100.0, 100.0);
    agent.take_damage(8.0, &mut Vec::<CombatEvent>::new());
    run(&mut agent, &mut arena, 5, 100.0);
    assert_eq!(agent.state(), BehaviorState::Flee);
    assert_eq!(agent.body().facing, Facing::Left);
    assert!(agent.body().position.x < 0.0);
}

#[test]
fn test_heavy_hit_while_chasing_triggers_flee() {
    let mut agent = make_standard(10.0, Vec::new());
    let mut arena = Arena::with_target(250.0, 100.0);
    run(&mut agent, &mut arena, 23, 100.0);
    assert_eq!(agent.state(), BehaviorState::Chase);

    let mut events: Vec<CombatEvent> = Vec::new();
    assert!(agent.take_damage(8.0, &mut events));
    assert_eq!(agent.state(), BehaviorState::Flee);
    assert!(events.contains(&CombatEvent::StateChanged {
        agent: AgentId(1),
        from: BehaviorState::Chase,
        to: BehaviorState::Flee,
    }));
}

#[test]
fn test_heavy_hit_while_attacking_triggers_flee() {
    let mut agent = make_standard(10.0, Vec::new());
    let mut arena = Arena::with_target(30.0, 100.0);
    run(&mut agent, &mut arena, 40, 100.0);
    assert_eq!(agent.state(), BehaviorState::Attack);

    let mut events: Vec<CombatEvent> = Vec::new();
    assert!(agent.take_damage(8.0, &mut events));
    assert_eq!(agent.state(), BehaviorState::Flee);
    assert!(events.contains(&CombatEvent::StateChanged {
        agent: AgentId(1),
        from: BehaviorState::Attack,
        to: BehaviorState::Flee,
    }));

    // Moves away from the target on the next tick
    run(&mut agent, &mut arena, 1, 100.0);
    assert_eq!(agent.body().facing, Facing::Left);
}

#[test]
fn test_idle_patrol_chase_attack_sequence() {
    let mut agent = build_agent(AgentId(1), DVec2::ZERO, &get_profile(Archetype::Grunt));
    let mut arena = Arena::with_target(200.0, 100.0);
    let events = run(&mut agent, &mut arena, 80, 100.0);

    let transitions: Vec<BehaviorState> = events
        .iter()
        .filter_map(|e| match e {
            CombatEvent::StateChanged { to, .. } => Some(*to),
            _ => None,
        })
        .collect();
    assert_eq!(
        &transitions[..3],
        &[BehaviorState::Patrol, BehaviorState::Chase, BehaviorState::Attack]
    );
    assert!(events.iter().any(
        |e| matches!(e, CombatEvent::TelegraphStarted { attack, .. } if attack == "slash")
    ));
    assert!(count_hits(&events, "slash") >= 1);
    assert!(arena.health(1) < 100.0);
    assert_eq!(agent.target(), Some(TargetId(1)));
}

#[test]
fn test_patrol_flips_direction() {
    let mut agent = make_standard(10.0, Vec::new());
    let mut arena = Arena::default();
    run(&mut agent, &mut arena, 25, 100.0);
    assert_eq!(agent.state(), BehaviorState::Patrol);
    assert_eq!(agent.body().facing, Facing::Right);
    run(&mut agent, &mut arena, 30, 100.0);
    assert_eq!(agent.body().facing, Facing::Left);
}

#[test]
fn test_fallback_strike_respects_contact_interval() {
    let mut agent = make_standard(10.0, Vec::new());
    let mut arena = Arena::with_target(30.0, 100.0);
    let events = run(&mut agent, &mut arena, 40, 100.0);
    assert_eq!(agent.state(), BehaviorState::Attack);
    assert_eq!(count_hits(&events, "basic"), 2);
    assert_eq!(arena.health(1), 90.0);
}

#[test]
fn test_removed_target_returns_to_patrol() {
    let mut agent = make_standard(10.0, Vec::new());
    let mut arena = Arena::with_target(250.0, 100.0);
    run(&mut agent, &mut arena, 23, 100.0);
    assert_eq!(agent.state(), BehaviorState::Chase);
    arena.targets.clear();
    run(&mut agent, &mut arena, 1, 100.0);
    assert_eq!(agent.state(), BehaviorState::Patrol);
    assert_eq!(agent.target(), None);
}

#[test]
fn test_death_cancels_attack() {
    let mut body = make_body(10.0);
    let mut behavior = BehaviorController::new(AgentConfig {
        max_health: 10.0,
        ..AgentConfig::default()
    });
    let book: AttackBook = vec![melee("slash", 60.0).with_timing(500.0, 300.0, 0.0)]
        .into_iter()
        .collect();
    let mut pipeline = AttackPipeline::new(book);
    let target = make_target(1, 30.0, 100.0);
    let mut events: Vec<CombatEvent> = Vec::new();

    assert!(pipeline.execute_attack("slash", &mut body, Some(&target), &mut events));
    assert!(!behavior.take_damage(50.0, &mut body, &mut pipeline, &mut events));
    assert_eq!(behavior.state(), BehaviorState::Dead);
    assert_eq!(body.health, 0.0);
    assert!(!pipeline.is_busy());

    // Dead is terminal
    assert!(!behavior.take_damage(1.0, &mut body, &mut pipeline, &mut events));
    assert_eq!(behavior.state(), BehaviorState::Dead);
}

#[test]
fn test_standard_death_events_and_expiry() {
    let mut agent = make_standard(10.0, Vec::new());
    let mut events: Vec<CombatEvent> = Vec::new();
    assert!(!agent.take_damage(15.0, &mut events));
    assert!(agent.is_dead());
    assert!(agent.is_expired());
    assert!(events.contains(&CombatEvent::Died { agent: AgentId(1) }));
    assert!(events.contains(&CombatEvent::DroppedLoot {
        agent: AgentId(1),
        position: DVec2::ZERO,
    }));

    events.clear();
    agent.take_damage(5.0, &mut events);
    agent.heal(5.0);
    assert!(events.is_empty());
    assert_eq!(agent.body().health, 0.0);
}

// --- Boss phase controller ---

#[test]
fn test_boss_phase_change_grants_invulnerability() {
    // Scenario: 1.0 -> 0.5 crosses 0.66; a hit 500ms later is absorbed
    let mut boss = make_boss();
    let mut arena = Arena::default();
    let mut events: Vec<CombatEvent> = Vec::new();

    assert!(boss.take_damage(50.0, &mut events));
    boss.update(100.0, &mut arena, &mut events);
    assert_eq!(boss.boss_phase(), Some(BossPhase::Phase2));
    assert!(boss.is_invulnerable());
    assert!(events.contains(&CombatEvent::PhaseChanged {
        agent: AgentId(7),
        from: BossPhase::Idle,
        to: BossPhase::Phase2,
        invulnerable_ms: 2000.0,
    }));

    boss.update(400.0, &mut arena, &mut events);
    assert!(boss.take_damage(10.0, &mut events));
    assert_eq!(boss.body().health, 50.0);

    boss.update(1600.0, &mut arena, &mut events);
    assert!(!boss.is_invulnerable());
    boss.take_damage(10.0, &mut events);
    assert_eq!(boss.body().health, 40.0);
}

#[test]
fn test_boss_big_hit_skips_to_phase3() {
    let mut boss = make_boss();
    let mut events: Vec<CombatEvent> = Vec::new();
    boss.take_damage(80.0, &mut events);
    boss.update(100.0, &mut Arena::default(), &mut events);
    assert_eq!(boss.boss_phase(), Some(BossPhase::Phase3));
}

#[test]
fn test_boss_engages_into_phase1() {
    let mut boss = make_boss();
    let mut arena = Arena::with_target(100.0, 100.0);
    let mut events: Vec<CombatEvent> = Vec::new();
    boss.update(100.0, &mut arena, &mut events);
    assert_eq!(boss.boss_phase(), Some(BossPhase::Phase1));
    assert!(!boss.is_invulnerable());
    assert!(boss.view().boss.is_some_and(|b| b.hud_visible));
}

#[test]
fn test_boss_heal_moves_phase_back_up() {
    let mut boss = make_boss();
    let mut arena = Arena::default();
    let mut events: Vec<CombatEvent> = Vec::new();

    boss.take_damage(50.0, &mut events);
    boss.update(100.0, &mut arena, &mut events);
    boss.update(2100.0, &mut arena, &mut events);
    boss.take_damage(30.0, &mut events);
    boss.update(100.0, &mut arena, &mut events);
    assert_eq!(boss.boss_phase(), Some(BossPhase::Phase3));

    boss.update(2100.0, &mut arena, &mut events);
    boss.heal(40.0);
    boss.update(100.0, &mut arena, &mut events);
    assert_eq!(boss.boss_phase(), Some(BossPhase::Phase2));
}

#[test]
fn test_boss_defeat_sequence() {
    let mut boss = make_boss();
    let mut arena = Arena::default();
    let mut events: Vec<CombatEvent> = Vec::new();

    assert!(!boss.take_damage(150.0, &mut events));
    assert_eq!(boss.boss_phase(), Some(BossPhase::Dying));
    assert_eq!(boss.state(), BehaviorState::Dead);
    assert!(events.contains(&CombatEvent::Defeated { agent: AgentId(7) }));
    assert!(!events.iter().any(|e| matches!(e, CombatEvent::Died { .. })));
    assert!(boss.view().boss.is_some_and(|b| !b.hud_visible));

    assert!(!boss.is_expired());
    boss.update(1000.0, &mut arena, &mut events);
    assert!(!boss.is_expired());
    boss.update(1000.0, &mut arena, &mut events);
    assert!(boss.is_expired());
}

#[test]
fn test_phase_gated_attacks() {
    let mut warlock = build_agent(AgentId(3), DVec2::ZERO, &get_profile(Archetype::Warlock));
    let available = warlock.available_attacks();
    assert!(available.contains(&"claw".to_string()));
    assert!(!available.contains(&"raise_dead".to_string()));
    assert!(!available.contains(&"shockwave".to_string()));

    let mut events: Vec<CombatEvent> = Vec::new();
    warlock.take_damage(450.0, &mut events);
    warlock.update(100.0, &mut Arena::default(), &mut events);
    assert_eq!(warlock.boss_phase(), Some(BossPhase::Phase3));
    let available = warlock.available_attacks();
    assert!(available.contains(&"raise_dead".to_string()));
    assert!(available.contains(&"shockwave".to_string()));
}

// --- Agent and profiles ---

#[test]
fn test_reset_returns_to_idle() {
    let mut agent = make_standard(10.0, Vec::new());
    let mut arena = Arena::with_target(250.0, 100.0);
    run(&mut agent, &mut arena, 23, 100.0);
    assert_eq!(agent.state(), BehaviorState::Chase);

    agent.reset(&mut Vec::<CombatEvent>::new());
    assert_eq!(agent.state(), BehaviorState::Idle);
    assert_eq!(agent.target(), None);
    assert!(agent.active_attack().is_none());
}

#[test]
fn test_view_reports_active_attack() {
    let mut agent = build_agent(AgentId(1), DVec2::ZERO, &get_profile(Archetype::Grunt));
    let mut arena = Arena::with_target(40.0, 100.0);
    let mut events: Vec<CombatEvent> = Vec::new();
    while agent.active_attack().is_none() {
        agent.update(100.0, &mut arena, &mut events);
    }
    let view = agent.view();
    assert_eq!(view.kind, AgentKind::Standard);
    assert_eq!(view.archetype, "grunt");
    assert_eq!(view.state, BehaviorState::Attack);
    assert_eq!(
        view.active_attack.map(|a| (a.name, a.phase, a.phase_duration_ms)),
        Some(("slash".to_string(), AttackPhase::Telegraphing, 300.0))
    );
    assert!(view.boss.is_none());
}

#[test]
fn test_builtin_profiles_validate() {
    for archetype in Archetype::ALL {
        let profile = get_profile(archetype);
        assert_eq!(profile.validate().ok(), Some(()), "{:?}", archetype);
        let json = serde_json::to_string(&profile).unwrap_or_default();
        let back: ArchetypeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
        assert_eq!(Archetype::from_name(archetype.name()), Some(archetype));
    }
}

#[test]
fn test_every_builtin_archetype_flees_below_threshold() {
    for archetype in Archetype::ALL {
        let profile = get_profile(archetype);
        let mut agent = build_agent(AgentId(1), DVec2::ZERO, &profile);
        let mut events: Vec<CombatEvent> = Vec::new();

        let alive = agent.take_damage(profile.agent.max_health * 0.8, &mut events);
        assert!(alive, "{:?}", archetype);
        assert!(agent.body().health < 0.3 * profile.agent.max_health);
        assert_eq!(agent.state(), BehaviorState::Flee, "{:?}", archetype);
    }
}

#[test]
fn test_resolve_prefers_encounter_archetypes() {
    let mut encounter: EncounterConfig = serde_json::from_str("{}").unwrap();
    let mut custom = get_profile(Archetype::Grunt);
    custom.agent.max_health = 1.0;
    encounter.archetypes.push(custom);

    let grunt = resolve("grunt", &encounter).unwrap();
    assert_eq!(grunt.agent.max_health, 1.0);
    assert_eq!(resolve("warlock", &encounter).unwrap().kind, AgentKind::Boss);
    assert!(matches!(
        resolve("dragon", &encounter),
        Err(ConfigError::UnknownArchetype(name)) if name == "dragon"
    ));
}
