//! Archetype-specific combat profiles.
//!
//! Consolidates per-archetype tuning and attack lists, and turns any
//! `ArchetypeConfig` (built-in or loaded from an encounter file) into an
//! `Agent`.

use glam::DVec2;

use skirmish_core::config::{AgentConfig, ArchetypeConfig, AttackSpec, BossConfig, EncounterConfig};
use skirmish_core::enums::{AgentKind, AttackKind, BossPhase};
use skirmish_core::error::ConfigError;
use skirmish_core::types::AgentId;

use crate::agent::{Agent, Strategy};
use crate::attacks::{AttackBook, AttackDefinition};
use crate::phase::PhaseController;

/// Built-in archetypes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Archetype {
    Grunt,
    Archer,
    Brute,
    Warlock,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Grunt,
        Archetype::Archer,
        Archetype::Brute,
        Archetype::Warlock,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Archetype::Grunt => "grunt",
            Archetype::Archer => "archer",
            Archetype::Brute => "brute",
            Archetype::Warlock => "warlock",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }
}

#[allow(clippy::too_many_arguments)]
fn attack(
    name: &str,
    kind: AttackKind,
    damage: f64,
    range: f64,
    telegraph_ms: f64,
    commit_ms: f64,
    cooldown_ms: f64,
    priority: f64,
) -> AttackSpec {
    AttackSpec {
        name: name.into(),
        kind,
        damage,
        range,
        telegraph_ms,
        commit_ms,
        cooldown_ms,
        priority,
        needs_face_target: true,
        phases: Vec::new(),
    }
}

/// Get the combat profile for a built-in archetype.
pub fn get_profile(archetype: Archetype) -> ArchetypeConfig {
    match archetype {
        Archetype::Grunt => ArchetypeConfig {
            name: archetype.name().into(),
            kind: AgentKind::Standard,
            agent: AgentConfig {
                max_health: 40.0,
                attack_range: 55.0,
                ..AgentConfig::default()
            },
            attacks: vec![attack("slash", AttackKind::Melee, 6.0, 60.0, 300.0, 200.0, 800.0, 1.0)],
            boss: None,
        },
        Archetype::Archer => ArchetypeConfig {
            name: archetype.name().into(),
            kind: AgentKind::Standard,
            agent: AgentConfig {
                max_health: 30.0,
                chase_speed: 70.0,
                detection_range: 350.0,
                attack_range: 250.0,
                contact_damage: 2.0,
                ..AgentConfig::default()
            },
            attacks: vec![
                attack("arrow", AttackKind::Projectile, 5.0, 300.0, 400.0, 200.0, 1500.0, 2.0),
                attack("kick", AttackKind::Melee, 4.0, 50.0, 200.0, 200.0, 1000.0, 1.0),
            ],
            boss: None,
        },
        Archetype::Brute => ArchetypeConfig {
            name: archetype.name().into(),
            kind: AgentKind::Standard,
            agent: AgentConfig {
                max_health: 120.0,
                patrol_speed: 30.0,
                chase_speed: 60.0,
                flee_speed: 80.0,
                attack_range: 90.0,
                contact_damage: 8.0,
                ..AgentConfig::default()
            },
            attacks: vec![
                attack("charge", AttackKind::Charge, 15.0, 90.0, 700.0, 500.0, 4000.0, 2.0),
                attack("stomp", AttackKind::Aoe, 10.0, 100.0, 500.0, 300.0, 2500.0, 1.5),
            ],
            boss: None,
        },
        Archetype::Warlock => {
            let mut raise_dead =
                attack("raise_dead", AttackKind::Summon, 0.0, 500.0, 900.0, 400.0, 10_000.0, 3.0);
            raise_dead.needs_face_target = false;
            raise_dead.phases = vec![BossPhase::Phase2, BossPhase::Phase3];
            let mut shockwave =
                attack("shockwave", AttackKind::Aoe, 25.0, 160.0, 1000.0, 500.0, 8000.0, 4.0);
            shockwave.phases = vec![BossPhase::Phase3];

            ArchetypeConfig {
                name: archetype.name().into(),
                kind: AgentKind::Boss,
                agent: AgentConfig {
                    max_health: 600.0,
                    chase_speed: 70.0,
                    detection_range: 450.0,
                    attack_range: 180.0,
                    contact_damage: 10.0,
                    ..AgentConfig::default()
                },
                attacks: vec![
                    attack("claw", AttackKind::Melee, 12.0, 70.0, 400.0, 300.0, 1200.0, 2.0),
                    attack("hex_bolt", AttackKind::Projectile, 10.0, 400.0, 500.0, 200.0, 2500.0, 1.0),
                    attack("blink", AttackKind::Teleport, 18.0, 200.0, 600.0, 400.0, 6000.0, 1.5),
                    raise_dead,
                    shockwave,
                ],
                boss: Some(BossConfig::default()),
            }
        }
    }
}

/// Resolve an archetype name: encounter-defined archetypes shadow built-ins.
pub fn resolve(name: &str, encounter: &EncounterConfig) -> Result<ArchetypeConfig, ConfigError> {
    if let Some(custom) = encounter.archetype(name) {
        return Ok(custom.clone());
    }
    Archetype::from_name(name)
        .map(get_profile)
        .ok_or_else(|| ConfigError::UnknownArchetype(name.to_owned()))
}

/// Build an agent from any archetype config.
///
/// Duplicate attack names keep the first definition. A boss without a
/// `boss` section gets the default phase tuning.
pub fn build_agent(id: AgentId, position: DVec2, config: &ArchetypeConfig) -> Agent {
    let book: AttackBook = config.attacks.iter().map(AttackDefinition::from_spec).collect();
    let strategy = match config.kind {
        AgentKind::Standard => Strategy::Standard,
        AgentKind::Boss => Strategy::Boss(PhaseController::new(
            config.boss.clone().unwrap_or_default(),
        )),
    };
    Agent::new(
        config.name.clone(),
        id,
        position,
        config.agent.clone(),
        book,
        strategy,
    )
}
