//! Projectile system: flight, hits and expiry.
//!
//! Each projectile sweeps the segment it covers this tick and hits the first
//! live target (by id) inside its hit box. Spent projectiles go back to the
//! pool.

use hecs::World;
use tracing::trace;

use skirmish_core::components::TargetBody;
use skirmish_core::constants::PROJECTILE_HIT_RADIUS;
use skirmish_core::events::CombatEvent;

use crate::pool::ProjectilePool;

pub fn run(world: &mut World, pool: &mut ProjectilePool, delta_ms: f64, events: &mut Vec<CombatEvent>) {
    let dt = delta_ms / 1000.0;

    for index in pool.live_indices() {
        let Some(projectile) = pool.get_mut(index) else {
            continue;
        };
        let step = (projectile.speed * dt).min(projectile.remaining_range);
        let from_x = projectile.position.x;
        projectile.position.x += projectile.direction * step;
        projectile.remaining_range -= step;

        let lo = from_x.min(projectile.position.x) - PROJECTILE_HIT_RADIUS;
        let hi = from_x.max(projectile.position.x) + PROJECTILE_HIT_RADIUS;
        let y = projectile.position.y;

        let mut hit = None;
        for (_entity, target) in world.query_mut::<&mut TargetBody>() {
            if !target.is_alive()
                || target.position.x < lo
                || target.position.x > hi
                || (target.position.y - y).abs() > PROJECTILE_HIT_RADIUS
            {
                continue;
            }
            if hit.as_ref().map_or(true, |(id, _)| target.id < *id) {
                hit = Some((target.id, target));
            }
        }

        if let Some((id, target)) = hit {
            target.health = (target.health - projectile.damage).max(0.0);
            events.push(CombatEvent::AttackHit {
                agent: projectile.owner,
                attack: projectile.attack.clone(),
                target: id,
                damage: projectile.damage,
                target_alive: target.is_alive(),
            });
            pool.release(index);
        } else if projectile.remaining_range <= 0.0 {
            trace!(slot = index, "projectile expired");
            pool.release(index);
        }
    }
}
