#![allow(dead_code)]

use heart_shooter::engine::input::InputState;
use heart_shooter::engine::{PathSegment, PathStyle, Rect, Size, Text, Tick};
use heart_shooter::sim::{Audio, Effects, GameState, Overlay, Panel, Sprite, Surface, Track};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(Debug, Clone, PartialEq)]
pub enum AudioCall {
    Loop(Track),
    Once(Track),
    Stop(Track),
    Volume(Track, f64),
}

#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub calls: Vec<AudioCall>,
}

impl RecordingAudio {
    pub fn count(&self, call: &AudioCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }
}

impl Audio for RecordingAudio {
    fn play_loop(&mut self, track: Track) {
        self.calls.push(AudioCall::Loop(track));
    }
    fn play_once(&mut self, track: Track) {
        self.calls.push(AudioCall::Once(track));
    }
    fn stop(&mut self, track: Track) {
        self.calls.push(AudioCall::Stop(track));
    }
    fn set_volume(&mut self, track: Track, volume: f64) {
        self.calls.push(AudioCall::Volume(track, volume));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OverlayCall {
    Show(Panel, Option<String>),
    Hide(Panel),
    Style(Panel, String, String),
}

#[derive(Debug, Default)]
pub struct RecordingOverlay {
    pub calls: Vec<OverlayCall>,
}

impl RecordingOverlay {
    pub fn shown(&self, panel: Panel) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, OverlayCall::Show(p, _) if *p == panel))
            .count()
    }

    pub fn hidden(&self, panel: Panel) -> usize {
        self.calls
            .iter()
            .filter(|call| matches!(call, OverlayCall::Hide(p) if *p == panel))
            .count()
    }
}

impl Overlay for RecordingOverlay {
    fn show(&mut self, panel: Panel, text: Option<&str>) {
        self.calls
            .push(OverlayCall::Show(panel, text.map(str::to_string)));
    }
    fn hide(&mut self, panel: Panel) {
        self.calls.push(OverlayCall::Hide(panel));
    }
    fn set_style(&mut self, panel: Panel, property: &str, value: &str) {
        self.calls.push(OverlayCall::Style(
            panel,
            property.to_string(),
            value.to_string(),
        ));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear(Rect),
    Alpha(f64),
    Sprite(Sprite, Rect),
    FillRect(String, Rect),
    Path(Vec<PathSegment>, PathStyle),
    Text(Text),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl Surface for RecordingSurface {
    fn clear(&mut self, rect: &Rect) {
        self.calls.push(DrawCall::Clear(*rect));
    }
    fn set_alpha(&mut self, alpha: f64) {
        self.calls.push(DrawCall::Alpha(alpha));
    }
    fn draw_sprite(&mut self, sprite: Sprite, destination: &Rect) {
        self.calls.push(DrawCall::Sprite(sprite, *destination));
    }
    fn fill_rect(&mut self, color: &str, rect: &Rect) {
        self.calls.push(DrawCall::FillRect(color.to_string(), *rect));
    }
    fn fill_path(&mut self, path: &[PathSegment], style: &PathStyle) {
        self.calls.push(DrawCall::Path(path.to_vec(), style.clone()));
    }
    fn draw_text(&mut self, text: &Text) {
        self.calls.push(DrawCall::Text(text.clone()));
    }
}

/// A game with its collaborators, driven tick by tick
pub struct Harness {
    pub state: GameState,
    pub input: InputState,
    pub rng: StdRng,
    pub audio: RecordingAudio,
    pub overlay: RecordingOverlay,
}

pub fn arena() -> Size {
    Size {
        width: 800.0,
        height: 600.0,
    }
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

impl Harness {
    /// Fresh game, nothing spawned yet
    pub fn new() -> Self {
        Harness {
            state: GameState::new(arena(), false),
            input: InputState::default(),
            rng: rng(),
            audio: RecordingAudio::default(),
            overlay: RecordingOverlay::default(),
        }
    }

    /// Fresh game past the title card, first enemy spawned
    pub fn begun() -> Self {
        let mut harness = Harness::new();
        let mut fx = Effects::new(&mut harness.audio, &mut harness.overlay);
        harness.state.begin(&mut harness.rng, &mut fx);
        harness
    }

    pub fn tick(&mut self) -> Tick {
        let mut fx = Effects::new(&mut self.audio, &mut self.overlay);
        self.state.tick(&mut self.input, &mut self.rng, &mut fx)
    }

    pub fn ticks(&mut self, count: u32) -> Vec<Tick> {
        (0..count).map(|_| self.tick()).collect()
    }

    pub fn restart(&mut self) {
        let placeholder = GameState::new(arena(), false);
        let finished = std::mem::replace(&mut self.state, placeholder);
        let mut fx = Effects::new(&mut self.audio, &mut self.overlay);
        self.state = finished.restart(&mut fx);
    }
}
