//! Attack selection: filter by cooldown and availability, then score.
//!
//! score = priority
//!       + 2 if the target is within the attack's range, else - 1
//!       - 2 for melee beyond 150 units
//!       + 1 for projectiles beyond 100 units
//!
//! Situational modifiers only apply when there is a target. Ties go to the
//! attack registered first.

use skirmish_core::constants::*;
use skirmish_core::enums::AttackKind;

use crate::attacks::{AttackBook, AttackDefinition, AvailabilityContext};
use crate::cooldown::CooldownTable;

/// Priority score of `definition` against a target at `target_distance`.
pub fn score(definition: &AttackDefinition, target_distance: Option<f64>) -> f64 {
    let mut score = definition.priority;
    let Some(distance) = target_distance else {
        return score;
    };

    if distance <= definition.range {
        score += SCORE_IN_RANGE_BONUS;
    } else {
        score -= SCORE_OUT_OF_RANGE_PENALTY;
    }

    match definition.kind {
        AttackKind::Melee if distance > SCORE_MELEE_FAR_DISTANCE => {
            score -= SCORE_MELEE_FAR_PENALTY;
        }
        AttackKind::Projectile if distance > SCORE_PROJECTILE_NEAR_DISTANCE => {
            score += SCORE_PROJECTILE_FAR_BONUS;
        }
        _ => {}
    }

    score
}

/// Definitions that are off cooldown and pass their availability predicate,
/// in registration order.
pub fn eligible<'a>(
    book: &'a AttackBook,
    cooldowns: &'a CooldownTable,
    now: f64,
    ctx: &'a AvailabilityContext,
) -> impl Iterator<Item = &'a AttackDefinition> + 'a {
    book.iter()
        .filter(move |d| cooldowns.is_ready(&d.name, now) && d.is_available(ctx))
}

/// Highest-scoring eligible attack, or `None` when nothing is eligible.
pub fn select_best_attack<'a>(
    book: &'a AttackBook,
    cooldowns: &CooldownTable,
    now: f64,
    ctx: &AvailabilityContext,
) -> Option<&'a AttackDefinition> {
    let mut best: Option<(&AttackDefinition, f64)> = None;
    for definition in book.iter() {
        if !cooldowns.is_ready(&definition.name, now) || !definition.is_available(ctx) {
            continue;
        }
        let candidate = score(definition, ctx.target_distance);
        // Strictly greater keeps the earliest registration on ties
        if best.map_or(true, |(_, top)| candidate > top) {
            best = Some((definition, candidate));
        }
    }
    best.map(|(definition, _)| definition)
}
