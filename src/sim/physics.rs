use crate::consts::POINTER_SMOOTHING;
use crate::engine::input::InputState;
use crate::engine::{Point, Size};
use crate::sim::entities::{Enemy, Hero, Projectile};

/// Directional keys and the offset each one applies, in hero speeds
const DIRECTIONS: [(&str, f64, f64); 4] = [
    ("ArrowLeft", -1.0, 0.0),
    ("ArrowRight", 1.0, 0.0),
    ("ArrowUp", 0.0, -1.0),
    ("ArrowDown", 0.0, 1.0),
];

/// Pointer easing and directional keys both apply in the same tick, then the
/// hero is clamped to the arena
pub fn steer_hero(hero: &mut Hero, input: &InputState, arena: Size) {
    if let Some(target) = input.pointer() {
        hero.position.x += (target.x - hero.position.x) * POINTER_SMOOTHING;
        hero.position.y += (target.y - hero.position.y) * POINTER_SMOOTHING;
    }
    for (key, dx, dy) in DIRECTIONS {
        if input.is_pressed(key) {
            hero.position.x += dx * hero.speed;
            hero.position.y += dy * hero.speed;
        }
    }
    clamp_hero(hero, arena);
}

/// Keeps the whole hero on the canvas: `[size/2, dim - size/2]` on each axis
pub fn clamp_hero(hero: &mut Hero, arena: Size) {
    let half = hero.size / 2.0;
    hero.position.x = hero.position.x.min(arena.width - half).max(half);
    hero.position.y = hero.position.y.min(arena.height - half).max(half);
}

pub fn advance_projectiles(projectiles: &mut Vec<Projectile>) {
    for projectile in projectiles.iter_mut() {
        projectile.position.y -= projectile.speed;
    }
    projectiles.retain(|projectile| !projectile.is_off_screen());
}

/// Moves `enemy` one step of its speed toward `target`. Coincident points are
/// left alone so the direction is never divided by zero.
pub fn pursue(enemy: &mut Enemy, target: Point) {
    let dx = target.x - enemy.position.x;
    let dy = target.y - enemy.position.y;
    let distance = dx.hypot(dy);
    if distance > 0.0 {
        enemy.position.x += dx / distance * enemy.speed;
        enemy.position.y += dy / distance * enemy.speed;
    }
}

/// Consumes projectiles that hit `enemy`, one health point each, in order.
///
/// Health is checked after every hit: once the enemy is dead the remaining
/// projectiles are left for later enemies and later ticks. Returns the number
/// of hits.
pub fn absorb_hits(enemy: &mut Enemy, projectiles: &mut Vec<Projectile>) -> u32 {
    let mut hits = 0;
    let mut index = 0;
    while index < projectiles.len() && !enemy.is_dead() {
        if enemy.is_hit_by(&projectiles[index]) {
            projectiles.remove(index);
            enemy.health -= 1;
            hits += 1;
        } else {
            index += 1;
        }
    }
    hits
}
