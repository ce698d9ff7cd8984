use crate::consts::*;
use crate::engine::{PathSegment, PathStyle, Point, Rect, Size, Text};
use crate::sim::entities::Tier;
use crate::sim::phase::{HeartPulse, ImageSequence, Phase};
use crate::sim::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sprite {
    Hero,
    Backdrop,
    Enemy(Tier),
}

/// Whatever the frame is drawn on. The canvas renderer implements it in the
/// browser; it owns no game data.
pub trait Surface {
    fn clear(&mut self, rect: &Rect);
    fn set_alpha(&mut self, alpha: f64);
    fn draw_sprite(&mut self, sprite: Sprite, destination: &Rect);
    fn fill_rect(&mut self, color: &str, rect: &Rect);
    fn fill_path(&mut self, path: &[PathSegment], style: &PathStyle);
    fn draw_text(&mut self, text: &Text);
}

/// Clears the surface and draws the frame for the current phase.
/// Draw order matters : background -> foreground
pub fn render(state: &GameState, surface: &mut dyn Surface) {
    let arena = state.arena();
    surface.clear(&Rect::new(Point::default(), arena));

    match &state.phase {
        Phase::Playing => draw_play_field(state, surface),
        Phase::VictoryHeart(heart) => draw_heart(heart, arena, surface),
        Phase::VictoryImageSequence(sequence) => {
            draw_finale(sequence, arena, state.base_size(), surface)
        }
        Phase::DefeatFreeze(_) | Phase::VictoryCrawlWait(_) | Phase::VictoryCrawlActive(_) => {}
    }
}

fn draw_play_field(state: &GameState, surface: &mut dyn Surface) {
    let hero = &state.hero;
    surface.draw_sprite(Sprite::Hero, &Rect::centered(hero.position, hero.size));

    let bolt = Size {
        width: state.base_size() * PROJECTILE_WIDTH_RATIO,
        height: state.base_size() * PROJECTILE_HEIGHT_RATIO,
    };
    for projectile in &state.projectiles {
        surface.fill_rect(PROJECTILE_COLOR, &Rect::new(projectile.position, bolt));
    }

    for enemy in &state.enemies {
        surface.draw_sprite(
            Sprite::Enemy(enemy.tier),
            &Rect::centered(enemy.position, enemy.size),
        );
    }
}

fn draw_heart(heart: &HeartPulse, arena: Size, surface: &mut dyn Surface) {
    // fully faded
    if heart.remaining == 0 {
        return;
    }
    let size = arena.width.min(arena.height) * HEART_SIZE_RATIO * heart.beat();
    let center = Point::new(arena.width / 2.0, arena.height * HEART_CENTER_Y_RATIO);

    surface.set_alpha(heart.alpha());
    surface.fill_path(
        &heart_path(center, size),
        &PathStyle {
            fill: HEART_FILL,
            stroke: HEART_STROKE,
            line_width: HEART_LINE_WIDTH,
        },
    );
    surface.set_alpha(1.0);
}

/// Two mirrored cubic curves from the notch at the top to the tip at the
/// bottom. `top` is the top-center reference point, `size` the full height.
pub fn heart_path(top: Point, size: f64) -> Vec<PathSegment> {
    let Point { x, y } = top;
    let notch = Point::new(x, y + size / 4.0);
    vec![
        PathSegment::MoveTo(notch),
        PathSegment::BezierTo {
            control1: Point::new(x - size / 2.0, y - size / 2.0),
            control2: Point::new(x - size, y + size / 2.0),
            end: Point::new(x, y + size),
        },
        PathSegment::BezierTo {
            control1: Point::new(x + size, y + size / 2.0),
            control2: Point::new(x + size / 2.0, y - size / 2.0),
            end: notch,
        },
    ]
}

fn draw_finale(sequence: &ImageSequence, arena: Size, base_size: f64, surface: &mut dyn Surface) {
    surface.set_alpha(sequence.background);
    surface.draw_sprite(Sprite::Backdrop, &Rect::new(Point::default(), arena));

    let center = Point::new(arena.width / 2.0, arena.height / 2.0);
    surface.set_alpha(sequence.foreground);
    surface.draw_sprite(
        Sprite::Hero,
        &Rect::centered(center, base_size * PORTRAIT_SIZE_FACTOR),
    );

    surface.set_alpha(sequence.caption);
    surface.draw_text(&Text {
        content: text::CAPTION,
        position: Point::new(arena.width / 2.0, arena.height * CAPTION_Y_RATIO),
        font: format!(
            "bold {}px {}",
            arena.width.min(arena.height) * CAPTION_FONT_RATIO,
            text::CAPTION_FONT
        ),
        fill: CAPTION_FILL,
        stroke: CAPTION_STROKE,
        line_width: CAPTION_LINE_WIDTH,
    });

    surface.set_alpha(1.0);
}
