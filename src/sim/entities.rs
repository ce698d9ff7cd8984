use crate::consts::*;
use crate::engine::Point;

/// Index into the enemy tiers, also the sprite the enemy is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tier(usize);

impl Tier {
    pub const FIRST: Tier = Tier(0);

    /// `None` once every tier has been used up
    pub fn new(level: usize) -> Option<Tier> {
        (level < ENEMY_TIERS).then_some(Tier(level))
    }

    pub fn level(self) -> usize {
        self.0
    }

    pub fn is_final(self) -> bool {
        self.0 == ENEMY_TIERS - 1
    }

    pub fn next(self) -> Option<Tier> {
        Tier::new(self.0 + 1)
    }

    pub fn speed(self) -> f64 {
        ENEMY_BASE_SPEED + self.0 as f64 * ENEMY_SPEED_PER_LEVEL
    }

    pub fn health(self) -> i32 {
        ((ENEMY_BASE_HEALTH + self.0 as f64 * ENEMY_HEALTH_PER_LEVEL) * ENEMY_HEALTH_SCALE).round()
            as i32
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hero {
    pub position: Point,
    pub speed: f64,
    /// diameter
    pub size: f64,
}

impl Hero {
    pub fn new(position: Point, size: f64) -> Self {
        Hero {
            position,
            speed: HERO_SPEED,
            size,
        }
    }

    /// Where a freshly fired projectile starts: the top of the hero
    pub fn muzzle(&self) -> Point {
        Point::new(self.position.x, self.position.y - self.size / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Point,
    /// upward, px per tick
    pub speed: f64,
}

impl Projectile {
    pub fn new(position: Point) -> Self {
        Projectile {
            position,
            speed: PROJECTILE_SPEED,
        }
    }

    pub fn is_off_screen(&self) -> bool {
        self.position.y < 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub position: Point,
    pub speed: f64,
    pub size: f64,
    pub health: i32,
    pub tier: Tier,
}

impl Enemy {
    pub fn new(tier: Tier, position: Point, size: f64) -> Self {
        Enemy {
            position,
            speed: tier.speed(),
            size,
            health: tier.health(),
            tier,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    pub fn is_hit_by(&self, projectile: &Projectile) -> bool {
        self.position.distance(projectile.position) < self.size / 2.0
    }

    pub fn touches(&self, hero: &Hero) -> bool {
        self.position.distance(hero.position) < (self.size + hero.size) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiers_run_out_after_the_last_sprite() {
        assert_eq!(Tier::new(ENEMY_TIERS - 1).map(Tier::is_final), Some(true));
        assert_eq!(Tier::new(ENEMY_TIERS), None);
        assert_eq!(Tier::FIRST.next(), Tier::new(1));
    }

    #[test]
    fn health_follows_the_level_formula() {
        let health: Vec<i32> = (0..ENEMY_TIERS)
            .filter_map(Tier::new)
            .map(Tier::health)
            .collect();
        // round((4 + 3L) * 1.26)
        assert_eq!(health, vec![5, 9, 13, 16]);
    }

    #[test]
    fn hit_radius_is_half_the_enemy_size() {
        let enemy = Enemy::new(Tier::FIRST, Point::new(100.0, 100.0), 40.0);
        assert!(enemy.is_hit_by(&Projectile::new(Point::new(119.0, 100.0))));
        assert!(!enemy.is_hit_by(&Projectile::new(Point::new(120.0, 100.0))));
    }
}
