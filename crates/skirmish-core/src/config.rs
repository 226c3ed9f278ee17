//! Agent, attack and encounter configuration.
//!
//! Everything here is plain serde data. Encounter files are JSON; missing
//! fields fall back to the tuning values in `constants`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{AgentKind, AttackKind, BossPhase};
use crate::error::ConfigError;

/// Movement, sensing and fallback tuning for one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    pub max_health: f64,
    /// Patrol speed (units/s).
    pub patrol_speed: f64,
    /// Chase speed (units/s).
    pub chase_speed: f64,
    /// Flee speed (units/s).
    pub flee_speed: f64,
    pub detection_range: f64,
    pub attack_range: f64,
    /// Interval between patrol direction flips (ms).
    pub patrol_change_ms: f64,
    /// Damage of the fallback strike.
    pub contact_damage: f64,
    /// Minimum interval between fallback strikes (ms).
    pub contact_interval_ms: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_health: 100.0,
            patrol_speed: PATROL_SPEED,
            chase_speed: CHASE_SPEED,
            flee_speed: FLEE_SPEED,
            detection_range: DETECTION_RANGE,
            attack_range: ATTACK_RANGE,
            patrol_change_ms: PATROL_CHANGE_MS,
            contact_damage: CONTACT_DAMAGE,
            contact_interval_ms: CONTACT_INTERVAL_MS,
        }
    }
}

/// Serializable part of an attack definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackSpec {
    pub name: String,
    pub kind: AttackKind,
    pub damage: f64,
    pub range: f64,
    #[serde(default)]
    pub telegraph_ms: f64,
    #[serde(default)]
    pub commit_ms: f64,
    #[serde(default)]
    pub cooldown_ms: f64,
    #[serde(default)]
    pub priority: f64,
    #[serde(default = "default_true")]
    pub needs_face_target: bool,
    /// Boss phases in which the attack may be selected. Empty = always.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub phases: Vec<BossPhase>,
}

fn default_true() -> bool {
    true
}

/// One health-ratio threshold and the phase entered at or below it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseThreshold {
    pub ratio: f64,
    pub phase: BossPhase,
}

/// Boss phase tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BossConfig {
    /// Strictly descending ratios.
    pub thresholds: Vec<PhaseThreshold>,
    pub invulnerable_ms: f64,
    pub defeat_delay_ms: f64,
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            thresholds: vec![
                PhaseThreshold {
                    ratio: PHASE2_THRESHOLD,
                    phase: BossPhase::Phase2,
                },
                PhaseThreshold {
                    ratio: PHASE3_THRESHOLD,
                    phase: BossPhase::Phase3,
                },
                PhaseThreshold {
                    ratio: DYING_THRESHOLD,
                    phase: BossPhase::Dying,
                },
            ],
            invulnerable_ms: PHASE_INVULNERABLE_MS,
            defeat_delay_ms: DEFEAT_DESPAWN_DELAY_MS,
        }
    }
}

/// Complete recipe for building an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchetypeConfig {
    pub name: String,
    #[serde(default)]
    pub kind: AgentKind,
    #[serde(default)]
    pub agent: AgentConfig,
    #[serde(default)]
    pub attacks: Vec<AttackSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boss: Option<BossConfig>,
}

impl ArchetypeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.agent;
        self.positive("max_health", a.max_health)?;
        for (field, value) in [
            ("patrol_speed", a.patrol_speed),
            ("chase_speed", a.chase_speed),
            ("flee_speed", a.flee_speed),
            ("detection_range", a.detection_range),
            ("attack_range", a.attack_range),
            ("patrol_change_ms", a.patrol_change_ms),
            ("contact_damage", a.contact_damage),
            ("contact_interval_ms", a.contact_interval_ms),
        ] {
            self.non_negative(field, value)?;
        }

        let mut seen = HashSet::new();
        for attack in &self.attacks {
            if !seen.insert(attack.name.as_str()) {
                return Err(ConfigError::DuplicateAttack {
                    archetype: self.name.clone(),
                    attack: attack.name.clone(),
                });
            }
            for (field, value) in [
                ("attack damage", attack.damage),
                ("attack range", attack.range),
                ("telegraph_ms", attack.telegraph_ms),
                ("commit_ms", attack.commit_ms),
                ("cooldown_ms", attack.cooldown_ms),
            ] {
                self.non_negative(field, value)?;
            }
        }

        match (&self.kind, &self.boss) {
            (AgentKind::Boss, None) => Err(ConfigError::MissingBossConfig {
                archetype: self.name.clone(),
            }),
            (_, Some(boss)) => {
                self.non_negative("invulnerable_ms", boss.invulnerable_ms)?;
                self.non_negative("defeat_delay_ms", boss.defeat_delay_ms)?;
                let in_bounds = boss
                    .thresholds
                    .iter()
                    .all(|t| (0.0..=1.0).contains(&t.ratio));
                let descending = boss.thresholds.windows(2).all(|w| w[0].ratio > w[1].ratio);
                if in_bounds && descending {
                    Ok(())
                } else {
                    Err(ConfigError::BadThresholds {
                        archetype: self.name.clone(),
                    })
                }
            }
            (AgentKind::Standard, None) => Ok(()),
        }
    }

    fn positive(&self, field: &'static str, value: f64) -> Result<(), ConfigError> {
        if value > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NotPositive {
                archetype: self.name.clone(),
                field,
                value,
            })
        }
    }

    fn non_negative(&self, field: &'static str, value: f64) -> Result<(), ConfigError> {
        if value >= 0.0 {
            Ok(())
        } else {
            Err(ConfigError::Negative {
                archetype: self.name.clone(),
                field,
                value,
            })
        }
    }
}

/// An agent placed in an encounter, by archetype name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpawn {
    pub archetype: String,
    pub x: f64,
    #[serde(default)]
    pub y: f64,
}

/// A target (player character) placed in an encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpawn {
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    pub health: f64,
}

/// Damage dealt to an agent at a given tick, standing in for player input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScriptedHit {
    pub at_tick: u64,
    /// Index into `EncounterConfig::agents`.
    pub agent: usize,
    pub amount: f64,
}

/// A full encounter file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncounterConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: f64,
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    /// Archetypes defined by this file, in addition to the built-in ones.
    #[serde(default)]
    pub archetypes: Vec<ArchetypeConfig>,
    #[serde(default)]
    pub agents: Vec<AgentSpawn>,
    #[serde(default)]
    pub targets: Vec<TargetSpawn>,
    #[serde(default)]
    pub hits: Vec<ScriptedHit>,
}

fn default_seed() -> u64 {
    42
}

fn default_tick_ms() -> f64 {
    DEFAULT_TICK_MS
}

fn default_ticks() -> u64 {
    600
}

impl EncounterConfig {
    /// Read, parse and validate an encounter file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Parse and validate an encounter from a JSON string.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: EncounterConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms <= 0.0 {
            return Err(ConfigError::NotPositive {
                archetype: "<encounter>".into(),
                field: "tick_ms",
                value: self.tick_ms,
            });
        }
        for archetype in &self.archetypes {
            archetype.validate()?;
        }
        for hit in &self.hits {
            if hit.agent >= self.agents.len() {
                return Err(ConfigError::BadSpawnIndex {
                    index: hit.agent,
                    count: self.agents.len(),
                });
            }
        }
        Ok(())
    }

    /// Custom archetype with the given name, if this file defines one.
    pub fn archetype(&self, name: &str) -> Option<&ArchetypeConfig> {
        self.archetypes.iter().find(|a| a.name == name)
    }
}
