use crate::audio::{self, WebAudio};
use crate::browser;
use crate::consts::*;
use crate::engine::input::InputState;
use crate::engine::{self, Game, PathSegment, PathStyle, Rect, Renderer, Size, Text, Tick};
use crate::overlay::DomOverlay;
use crate::sim::{render, Effects, GameState, Overlay, Panel, Sprite, Surface, Track};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use futures::future::{try_join_all, LocalBoxFuture};
use rand::rngs::StdRng;
use rand::SeedableRng;
use web_sys::{HtmlAudioElement, HtmlElement, HtmlImageElement, HtmlVideoElement};

/// ┌────────────────────── Startup and Restart ───────────────────────┐
/// │  Loading ──initialize──► Loaded(Arcade)                          │
/// │                            │                                     │
/// │            prelude : intro video (first time only) + title card  │
/// │                            │                                     │
/// │            begin   : score shown, music, first enemy             │
/// │                            │                                     │
/// │            update / draw once per frame                          │
/// │                            │                                     │
/// │            reset   : fresh GameState, back to prelude            │
/// └──────────────────────────────────────────────────────────────────┘
pub enum HeartShooter {
    Loading,
    Loaded(Arcade),
}

pub struct Arcade {
    state: GameState,
    assets: Assets,
    audio: WebAudio,
    overlay: DomOverlay,
    intro: Intro,
    rng: StdRng,
}

impl HeartShooter {
    pub fn new() -> Self {
        HeartShooter::Loading
    }
}

impl Default for HeartShooter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Game for HeartShooter {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            HeartShooter::Loading => {
                let assets = Assets::load().await?;
                let (width, height) = browser::fit_canvas_to_viewport()?;
                let audio = WebAudio::new()?;
                let overlay = DomOverlay::new();
                let intro = Intro::new(&audio, overlay.clone())?;
                Ok(Box::new(HeartShooter::Loaded(Arcade {
                    state: GameState::new(Size { width, height }, false),
                    assets,
                    audio,
                    overlay,
                    intro,
                    rng: StdRng::from_entropy(),
                })))
            }
            HeartShooter::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn prelude(&self) -> LocalBoxFuture<'static, Result<()>> {
        match self {
            HeartShooter::Loaded(arcade) => {
                Box::pin(arcade.intro.clone().play(arcade.state.intro_seen()))
            }
            HeartShooter::Loading => Box::pin(async { Err(anyhow!("Game is not loaded")) }),
        }
    }

    fn begin(&mut self) {
        if let HeartShooter::Loaded(arcade) = self {
            let mut fx = Effects::new(&mut arcade.audio, &mut arcade.overlay);
            arcade.state.begin(&mut arcade.rng, &mut fx);
        }
    }

    fn update(&mut self, input: &mut InputState) -> Tick {
        match self {
            HeartShooter::Loaded(arcade) => {
                let mut fx = Effects::new(&mut arcade.audio, &mut arcade.overlay);
                arcade.state.tick(input, &mut arcade.rng, &mut fx)
            }
            HeartShooter::Loading => Tick::Continue,
        }
    }

    fn draw(&mut self, renderer: &Renderer) {
        if let HeartShooter::Loaded(arcade) = self {
            let mut canvas = Canvas {
                renderer,
                assets: &arcade.assets,
            };
            render(&arcade.state, &mut canvas);
        }
    }

    fn reset(&mut self) {
        if let HeartShooter::Loaded(arcade) = self {
            let placeholder = GameState::new(arcade.state.arena(), arcade.state.intro_seen());
            let finished = std::mem::replace(&mut arcade.state, placeholder);
            let mut fx = Effects::new(&mut arcade.audio, &mut arcade.overlay);
            arcade.state = finished.restart(&mut fx);
        }
    }
}

/// Every image the game draws, loaded before the first tick
struct Assets {
    hero: HtmlImageElement,
    backdrop: HtmlImageElement,
    /// indexed by tier
    enemies: Vec<HtmlImageElement>,
}

impl Assets {
    async fn load() -> Result<Assets> {
        // all loads run together; the slowest one decides when we start
        let sources: Vec<&str> = [assets::HERO_IMAGE, assets::BACKDROP_IMAGE]
            .into_iter()
            .chain(assets::ENEMY_IMAGES)
            .collect();
        let mut images = try_join_all(sources.iter().map(|source| async move {
            engine::load_image(source)
                .await
                .with_context(|| format!("Failed to load image from : {}", source))
        }))
        .await?
        .into_iter();

        let mut next = |name: &str| {
            images
                .next()
                .ok_or_else(|| anyhow!("Missing image for {}", name))
        };
        let hero = next("hero")?;
        let backdrop = next("backdrop")?;
        let enemies = (0..ENEMY_TIERS)
            .map(|_| next("enemy"))
            .collect::<Result<Vec<_>>>()?;
        Ok(Assets {
            hero,
            backdrop,
            enemies,
        })
    }

    fn image(&self, sprite: Sprite) -> Option<&HtmlImageElement> {
        match sprite {
            Sprite::Hero => Some(&self.hero),
            Sprite::Backdrop => Some(&self.backdrop),
            Sprite::Enemy(tier) => self.enemies.get(tier.level()),
        }
    }
}

/// The canvas seen through the `Surface` the simulation draws on
struct Canvas<'a> {
    renderer: &'a Renderer,
    assets: &'a Assets,
}

impl Surface for Canvas<'_> {
    fn clear(&mut self, rect: &Rect) {
        self.renderer.clear(rect);
    }

    fn set_alpha(&mut self, alpha: f64) {
        self.renderer.set_alpha(alpha);
    }

    fn draw_sprite(&mut self, sprite: Sprite, destination: &Rect) {
        match self.assets.image(sprite) {
            Some(image) => self.renderer.draw_image(image, destination),
            None => log::warn!("No image for {:?}", sprite),
        }
    }

    fn fill_rect(&mut self, color: &str, rect: &Rect) {
        self.renderer.fill_rect(color, rect);
    }

    fn fill_path(&mut self, path: &[PathSegment], style: &PathStyle) {
        self.renderer.fill_path(path, style);
    }

    fn draw_text(&mut self, text: &Text) {
        self.renderer.draw_text(text);
    }
}

/// Intro video with its soundtrack, then the title card
#[derive(Clone)]
struct Intro {
    video: Option<HtmlVideoElement>,
    soundtrack: Option<HtmlAudioElement>,
    canvas: HtmlElement,
    overlay: DomOverlay,
}

impl Intro {
    const VIDEO_ID: &'static str = "intro-video";

    fn new(audio: &WebAudio, overlay: DomOverlay) -> Result<Self> {
        let video = browser::element_by_id::<HtmlVideoElement>(Self::VIDEO_ID)
            .map_err(|err| log::warn!("No intro video, skipping it : {:#?}", err))
            .ok();
        Ok(Intro {
            video,
            soundtrack: audio.element(Track::Intro).cloned(),
            canvas: browser::canvas()?.into(),
            overlay,
        })
    }

    async fn play(mut self, intro_seen: bool) -> Result<()> {
        if let (false, Some(video)) = (intro_seen, &self.video) {
            video.set_volume(INTRO_VOLUME);
            if let Some(soundtrack) = &self.soundtrack {
                audio::play_media(soundtrack, "intro");
            }
            browser::set_display(video, true)?;
            if let Err(err) = audio::play_to_end(video, "intro video").await {
                log::warn!("Skipping the intro : {:#}", err);
            }

            browser::set_display(video, false)?;
            if let Some(soundtrack) = &self.soundtrack {
                if let Err(err) = soundtrack.pause() {
                    log::warn!("Could not pause intro audio : {:#?}", err);
                }
                soundtrack.set_current_time(0.0);
            }
        }

        browser::set_display(&self.canvas, true)?;
        self.overlay.show(Panel::Title, None);
        self.overlay.show(Panel::Subtitle, None);
        browser::sleep(TITLE_CARD_MS).await
    }
}
