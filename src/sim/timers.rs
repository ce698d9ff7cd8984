use crate::consts::*;
use crate::sim::collab::{Effects, Panel, Track};

/// An effect fired by a one-shot timer
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cue {
    Play(Track),
    Volume(Track, f64),
    Hide(Panel),
}

impl Cue {
    fn fire(self, fx: &mut Effects<'_>) {
        match self {
            Cue::Play(track) => fx.audio.play_once(track),
            Cue::Volume(track, volume) => fx.audio.set_volume(track, volume),
            Cue::Hide(panel) => fx.overlay.hide(panel),
        }
    }
}

/// One-shot timers counted in ticks. They belong to the game state, so a
/// restart drops every timer still pending.
#[derive(Debug, Default, Clone)]
pub struct Schedule {
    pending: Vec<(u32, Cue)>,
}

impl Schedule {
    /// Fires `cue` on the `ticks`-th call to `advance` from now
    pub fn after(&mut self, ticks: u32, cue: Cue) {
        self.pending.push((ticks, cue));
    }

    pub fn advance(&mut self, fx: &mut Effects<'_>) {
        let mut due = Vec::new();
        self.pending.retain_mut(|(ticks, cue)| {
            *ticks = ticks.saturating_sub(1);
            if *ticks == 0 {
                due.push(*cue);
                false
            } else {
                true
            }
        });
        for cue in due {
            cue.fire(fx);
        }
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Score milestone animation, written into the score panel's transform
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ScorePulse {
    remaining: u32,
}

impl ScorePulse {
    pub fn start(&mut self) {
        self.remaining = SCORE_PULSE_TICKS;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0
    }

    pub fn scale(&self) -> f64 {
        1.0 + (f64::from(self.remaining) * SCORE_PULSE_FREQUENCY).sin() * SCORE_PULSE_AMPLITUDE
    }

    pub fn advance(&mut self, fx: &mut Effects<'_>) {
        if !self.is_active() {
            return;
        }
        fx.overlay
            .set_style(Panel::Score, "transform", &format!("scale({})", self.scale()));
        self.remaining -= 1;
        if self.remaining == 0 {
            fx.overlay.set_style(Panel::Score, "transform", "scale(1)");
        }
    }
}
