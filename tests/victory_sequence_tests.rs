mod common;

use common::Harness;
use heart_shooter::consts::{text, ENEMY_TIERS};
use heart_shooter::engine::{Point, Tick};
use heart_shooter::sim::phase::{Crawl, HeartPulse, Phase};
use heart_shooter::sim::{Enemy, Panel, Projectile, Tier};

/// Harness on the tick right after the final enemy fell
fn victorious() -> Harness {
    let mut harness = Harness::begun();
    let last = Tier::new(ENEMY_TIERS - 1).unwrap();
    harness.state.level = last.level();
    let mut boss = Enemy::new(last, Point::new(400.0, 100.0), harness.state.base_size());
    boss.speed = 0.0;
    boss.health = 1;
    harness.state.enemies = vec![boss];
    harness
        .state
        .projectiles
        .push(Projectile::new(Point::new(400.0, 110.0)));
    harness.tick();
    harness
}

#[test]
fn heart_pulses_for_360_ticks_then_the_crawl_wait_begins() {
    let mut harness = victorious();

    harness.ticks(360);
    assert_eq!(
        harness.state.phase,
        Phase::VictoryHeart(HeartPulse { remaining: 0 })
    );

    harness.tick();
    assert_eq!(
        harness.state.phase,
        Phase::VictoryCrawlWait(Crawl { elapsed: 1 })
    );
}

#[test]
fn crawl_text_appears_once_at_tick_420() {
    let mut harness = victorious();
    harness.ticks(361);

    harness.ticks(418);
    assert_eq!(
        harness.state.phase,
        Phase::VictoryCrawlWait(Crawl { elapsed: 419 })
    );
    assert_eq!(harness.overlay.shown(Panel::Crawl), 0);

    harness.tick();
    assert_eq!(
        harness.state.phase,
        Phase::VictoryCrawlActive(Crawl { elapsed: 420 })
    );
    assert!(harness.overlay.calls.contains(&common::OverlayCall::Show(
        Panel::Crawl,
        Some(text::CRAWL.to_string())
    )));

    harness.ticks(500);
    assert_eq!(harness.overlay.shown(Panel::Crawl), 1);
}

#[test]
fn image_sequence_starts_after_tick_1440_and_holds_forever() {
    let mut harness = victorious();
    harness.ticks(361 + 419 + 1020);
    assert_eq!(
        harness.state.phase,
        Phase::VictoryCrawlActive(Crawl { elapsed: 1440 })
    );

    harness.tick();
    match harness.state.phase {
        Phase::VictoryImageSequence(sequence) => {
            assert_eq!(sequence.elapsed, 1);
            approx::assert_relative_eq!(sequence.background, 1.0 / 120.0);
            assert_eq!(sequence.foreground, 0.0);
            assert_eq!(sequence.caption, 0.0);
        }
        phase => panic!("expected the image sequence, got {:?}", phase),
    }

    let ticks = harness.ticks(5000);
    assert!(ticks.iter().all(|tick| *tick == Tick::Continue));
    match harness.state.phase {
        Phase::VictoryImageSequence(sequence) => {
            assert_eq!(
                (sequence.background, sequence.foreground, sequence.caption),
                (1.0, 1.0, 1.0)
            );
        }
        phase => panic!("expected the image sequence, got {:?}", phase),
    }
    assert_eq!(harness.overlay.shown(Panel::Crawl), 1);
}

#[test]
fn victory_never_spawns_or_restarts() {
    let mut harness = victorious();

    let ticks = harness.ticks(3000);

    assert!(ticks.iter().all(|tick| *tick == Tick::Continue));
    assert!(harness.state.enemies.is_empty());
    assert_eq!(harness.state.level, ENEMY_TIERS - 1);
}
