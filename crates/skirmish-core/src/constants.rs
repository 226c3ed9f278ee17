//! Combat timing constants and tuning parameters.
//!
//! All durations are in milliseconds, distances in world units,
//! speeds in world units per second.

/// Default host tick length (ms), ~60 Hz.
pub const DEFAULT_TICK_MS: f64 = 1000.0 / 60.0;

// --- Behavior controller ---

/// Time spent idle before an agent starts patrolling.
pub const IDLE_TO_PATROL_MS: f64 = 2000.0;

/// Time spent fleeing before an agent reverts to idle.
pub const FLEE_DURATION_MS: f64 = 3000.0;

/// Health ratio below which a surviving agent flees.
pub const FLEE_HEALTH_RATIO: f64 = 0.3;

/// Default interval between patrol direction flips.
pub const PATROL_CHANGE_MS: f64 = 3000.0;

/// Default patrol speed.
pub const PATROL_SPEED: f64 = 40.0;

/// Default chase speed.
pub const CHASE_SPEED: f64 = 90.0;

/// Default flee speed.
pub const FLEE_SPEED: f64 = 110.0;

/// Default target detection radius.
pub const DETECTION_RANGE: f64 = 300.0;

/// Default radius at which an agent stops chasing and attacks.
pub const ATTACK_RANGE: f64 = 60.0;

/// Damage of the fallback strike used when no attack can be run.
pub const CONTACT_DAMAGE: f64 = 5.0;

/// Minimum interval between two fallback strikes.
pub const CONTACT_INTERVAL_MS: f64 = 1000.0;

/// Attack name reported for the fallback strike.
pub const FALLBACK_ATTACK_NAME: &str = "basic";

// --- Attack selector ---

/// Bonus when the target is inside the attack's range.
pub const SCORE_IN_RANGE_BONUS: f64 = 2.0;

/// Penalty when the target is outside the attack's range.
pub const SCORE_OUT_OF_RANGE_PENALTY: f64 = 1.0;

/// Melee attacks are penalized beyond this distance.
pub const SCORE_MELEE_FAR_DISTANCE: f64 = 150.0;

/// Penalty applied to far melee attacks.
pub const SCORE_MELEE_FAR_PENALTY: f64 = 2.0;

/// Projectile attacks get a bonus beyond this distance.
pub const SCORE_PROJECTILE_NEAR_DISTANCE: f64 = 100.0;

/// Bonus applied to projectile attacks at distance.
pub const SCORE_PROJECTILE_FAR_BONUS: f64 = 1.0;

// --- Attack pipeline ---

/// Fraction of the commit window at which the attack's effect fires.
pub const COMMIT_TRIGGER_FRACTION: f64 = 0.5;

/// Distance from the target at which a teleporting agent reappears.
pub const TELEPORT_OFFSET: f64 = 40.0;

/// Delay between reappearing and the teleport strike.
pub const TELEPORT_STRIKE_DELAY_MS: f64 = 200.0;

/// Speed of projectiles fired through `ProjectileFired` events.
pub const PROJECTILE_SPEED: f64 = 300.0;

/// Minions raised by a single summon trigger.
pub const SUMMON_COUNT: u32 = 2;

// --- Simulation host ---

/// Half-width of a projectile's hit box.
pub const PROJECTILE_HIT_RADIUS: f64 = 12.0;

/// Initial projectile pool slots.
pub const PROJECTILE_POOL_CAPACITY: usize = 32;

/// Max horizontal offset of a summoned minion from its summoner.
pub const MINION_SPAWN_JITTER: f64 = 30.0;

// --- Boss phases ---

/// Default health-ratio thresholds, most lenient first.
pub const PHASE2_THRESHOLD: f64 = 0.66;
pub const PHASE3_THRESHOLD: f64 = 0.33;
pub const DYING_THRESHOLD: f64 = 0.0;

/// Invulnerability window after a phase transition.
pub const PHASE_INVULNERABLE_MS: f64 = 2000.0;

/// Cosmetic delay between a boss's defeat and its removal.
pub const DEFEAT_DESPAWN_DELAY_MS: f64 = 2000.0;
