//! Capabilities the simulation drives but does not own.
//!
//! Every call is best effort: implementations swallow and log their own
//! failures, nothing is reported back into the simulation.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Track {
    Music,
    Shoot,
    Hit,
    Kill,
    Victory,
    Intro,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    Score,
    GameOver,
    KillBanner,
    Crawl,
    Title,
    Subtitle,
}

pub trait Audio {
    fn play_loop(&mut self, track: Track);
    fn play_once(&mut self, track: Track);
    /// Pause and rewind
    fn stop(&mut self, track: Track);
    fn set_volume(&mut self, track: Track, volume: f64);
}

pub trait Overlay {
    /// `None` keeps whatever text the panel already holds
    fn show(&mut self, panel: Panel, text: Option<&str>);
    fn hide(&mut self, panel: Panel);
    fn set_style(&mut self, panel: Panel, property: &str, value: &str);
}

/// Both collaborators, handed to the simulation for the length of one call
pub struct Effects<'a> {
    pub audio: &'a mut dyn Audio,
    pub overlay: &'a mut dyn Overlay,
}

impl<'a> Effects<'a> {
    pub fn new(audio: &'a mut dyn Audio, overlay: &'a mut dyn Overlay) -> Self {
        Effects { audio, overlay }
    }
}
