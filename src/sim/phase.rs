use crate::consts::*;
use crate::sim::collab::{Effects, Panel, Track};

/// ┌──────────────────── Phase Transition Flow ─────────────────────┐
/// │  From Phase          →  Event    →  To Phase                   │
/// ├────────────────────────────────────────────────────────────────┤
/// │  Playing             →  Defeat   →  DefeatFreeze               │
/// │  Playing             →  Victory  →  VictoryHeart               │
/// │  -------                ------                                 │
/// │  DefeatFreeze        →  Update   →  (restart when elapsed)     │
/// │  VictoryHeart        →  Update   →  VictoryCrawlWait (at 0)    │
/// │  VictoryCrawlWait    →  Update   →  VictoryCrawlActive (420)   │
/// │  VictoryCrawlActive  →  Update   →  VictoryImageSequence       │
/// │  VictoryImageSequence→  Update   →  itself, forever            │
/// └────────────────────────────────────────────────────────────────┘
/// Each phase carries only the counters it needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    Playing,
    DefeatFreeze(Freeze),
    VictoryHeart(HeartPulse),
    VictoryCrawlWait(Crawl),
    VictoryCrawlActive(Crawl),
    VictoryImageSequence(ImageSequence),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Defeat,
    Victory,
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freeze {
    pub remaining: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeartPulse {
    pub remaining: u32,
}

impl HeartPulse {
    /// Fully opaque, then a linear fade over the last `HEART_FADE_TICKS`
    pub fn alpha(&self) -> f64 {
        if self.remaining > HEART_FADE_TICKS {
            1.0
        } else {
            f64::from(self.remaining) / f64::from(HEART_FADE_TICKS)
        }
    }

    /// Multiplier applied to the heart size
    pub fn beat(&self) -> f64 {
        1.0 + (f64::from(self.remaining) * HEART_BEAT_FREQUENCY).sin() * HEART_BEAT_AMPLITUDE
    }
}

/// Ticks since the heart finished, shared by both crawl phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crawl {
    pub elapsed: u32,
}

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ImageSequence {
    pub elapsed: u32,
    pub background: f64,
    pub foreground: f64,
    pub caption: f64,
}

impl ImageSequence {
    /// background, then foreground, then caption; each saturates at 1.0
    fn step(mut self) -> Self {
        self.elapsed += 1;
        if self.elapsed < BACKGROUND_FADE_END {
            self.background = fade_in(self.background, SLOW_FADE_STEP);
        } else if self.elapsed < FOREGROUND_FADE_END {
            self.background = 1.0;
            self.foreground = fade_in(self.foreground, SLOW_FADE_STEP);
        } else if self.elapsed < CAPTION_FADE_END {
            self.background = 1.0;
            self.foreground = 1.0;
            self.caption = fade_in(self.caption, FAST_FADE_STEP);
        } else {
            self.background = 1.0;
            self.foreground = 1.0;
            self.caption = 1.0;
        }
        self
    }
}

fn fade_in(opacity: f64, step: f64) -> f64 {
    (opacity + step).min(1.0)
}

impl Phase {
    pub fn is_playing(&self) -> bool {
        matches!(self, Phase::Playing)
    }

    /// True on the tick the defeat freeze runs out
    pub fn restart_due(&self) -> bool {
        matches!(self, Phase::DefeatFreeze(Freeze { remaining: 0 }))
    }

    /// Consumes the phase and returns the next one. Unsupported pairs (a second
    /// defeat, a victory after a defeat) keep the current phase.
    pub fn transition(self, event: Event, fx: &mut Effects<'_>) -> Self {
        match (self, event) {
            (Phase::Playing, Event::Defeat) => {
                log::info!("Defeat");
                fx.audio.stop(Track::Music);
                fx.overlay.show(Panel::GameOver, Some(text::DEFEAT));
                Phase::DefeatFreeze(Freeze {
                    remaining: DEFEAT_FREEZE_TICKS,
                })
            }
            (Phase::Playing, Event::Victory) => {
                log::info!("Victory");
                fx.audio.play_once(Track::Victory);
                fx.audio.stop(Track::Music);
                fx.overlay.show(Panel::GameOver, Some(text::VICTORY));
                Phase::VictoryHeart(HeartPulse {
                    remaining: HEART_PULSE_TICKS,
                })
            }
            (Phase::DefeatFreeze(freeze), Event::Update) => Phase::DefeatFreeze(Freeze {
                remaining: freeze.remaining.saturating_sub(1),
            }),
            // the tick that ends the heart already counts as the first crawl tick
            (Phase::VictoryHeart(HeartPulse { remaining: 0 }), Event::Update) => {
                Phase::VictoryCrawlWait(Crawl { elapsed: 0 }).transition(Event::Update, fx)
            }
            (Phase::VictoryHeart(heart), Event::Update) => Phase::VictoryHeart(HeartPulse {
                remaining: heart.remaining - 1,
            }),
            (Phase::VictoryCrawlWait(crawl), Event::Update) => {
                let crawl = Crawl {
                    elapsed: crawl.elapsed + 1,
                };
                if crawl.elapsed == CRAWL_SHOW_TICK {
                    log::info!("End crawl activated");
                    fx.overlay.show(Panel::Crawl, Some(text::CRAWL));
                    Phase::VictoryCrawlActive(crawl)
                } else {
                    Phase::VictoryCrawlWait(crawl)
                }
            }
            (Phase::VictoryCrawlActive(crawl), Event::Update) => {
                if crawl.elapsed >= IMAGE_SEQUENCE_TICK {
                    Phase::VictoryImageSequence(ImageSequence::default().step())
                } else {
                    Phase::VictoryCrawlActive(Crawl {
                        elapsed: crawl.elapsed + 1,
                    })
                }
            }
            (Phase::VictoryImageSequence(sequence), Event::Update) => {
                Phase::VictoryImageSequence(sequence.step())
            }
            (phase, _) => phase,
        }
    }
}
