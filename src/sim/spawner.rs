use crate::consts::*;
use crate::engine::{Point, Size};
use crate::sim::entities::{Enemy, Tier};
use rand::Rng;

/// Picks a spawn point uniformly inside `[0, width - size) x [0, height - size)`
/// at least `3 x size` away from `hero`.
///
/// Sampling is rejection based. After `SPAWN_MAX_ATTEMPTS` rejections the
/// farthest sample seen is used instead, which only happens when the arena is
/// too small to hold a legal point.
pub fn spawn_point<R: Rng + ?Sized>(rng: &mut R, arena: Size, size: f64, hero: Point) -> Point {
    let min_distance = size * SPAWN_MIN_DISTANCE_FACTOR;
    let mut farthest = (Point::default(), f64::NEG_INFINITY);

    for _ in 0..SPAWN_MAX_ATTEMPTS {
        let candidate = Point::new(
            sample(rng, arena.width - size),
            sample(rng, arena.height - size),
        );
        let distance = candidate.distance(hero);
        if distance >= min_distance {
            return candidate;
        }
        if distance > farthest.1 {
            farthest = (candidate, distance);
        }
    }

    log::warn!(
        "Spawner: no point {:.1}px away from the hero after {} attempts, using {:.1}px",
        min_distance,
        SPAWN_MAX_ATTEMPTS,
        farthest.1
    );
    farthest.0
}

/// Builds the enemy for `level`, `None` once every tier is exhausted
pub fn next_enemy<R: Rng + ?Sized>(
    rng: &mut R,
    level: usize,
    arena: Size,
    size: f64,
    hero: Point,
) -> Option<Enemy> {
    let tier = Tier::new(level)?;
    Some(Enemy::new(tier, spawn_point(rng, arena, size, hero), size))
}

fn sample<R: Rng + ?Sized>(rng: &mut R, extent: f64) -> f64 {
    if extent > 0.0 {
        rng.gen_range(0.0..extent)
    } else {
        0.0
    }
}
