//! HTML audio elements behind the `Audio` capability.
//!
//! Browsers may refuse `play()` (autoplay policy). Sound effects log the
//! rejection and carry on; `play_to_end` reports it so a blocked intro is
//! skipped instead of waited on.

use crate::browser;
use crate::consts::*;
use crate::sim::{Audio, Track};
use anyhow::{anyhow, Result};
use futures::future::{self, Either};
use futures::pin_mut;
use std::collections::HashMap;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{HtmlAudioElement, HtmlMediaElement};

const TRACKS: [(Track, &str, f64); 6] = [
    (Track::Music, assets::MUSIC, MUSIC_VOLUME),
    (Track::Shoot, assets::SHOOT, SHOOT_VOLUME),
    (Track::Hit, assets::SHOOT, SHOOT_VOLUME),
    (Track::Kill, assets::KILL, KILL_VOLUME),
    (Track::Victory, assets::VICTORY, VICTORY_VOLUME),
    (Track::Intro, assets::INTRO, INTRO_VOLUME),
];

pub struct WebAudio {
    tracks: HashMap<Track, HtmlAudioElement>,
}

impl WebAudio {
    pub fn new() -> Result<Self> {
        let mut tracks = HashMap::new();
        for (track, source, volume) in TRACKS {
            let element = HtmlAudioElement::new_with_src(source)
                .map_err(|err| anyhow!("Could not create audio for {} : {:#?}", source, err))?;
            element.set_volume(volume);
            element.set_loop(track == Track::Music);
            tracks.insert(track, element);
        }
        Ok(WebAudio { tracks })
    }

    pub fn element(&self, track: Track) -> Option<&HtmlAudioElement> {
        self.tracks.get(&track)
    }

    /// Shots overlap, so each one plays on its own copy of the element
    fn overlapping_copy(element: &HtmlAudioElement) -> Option<HtmlAudioElement> {
        let copy = element
            .clone_node()
            .ok()
            .and_then(|node| node.dyn_into::<HtmlAudioElement>().ok());
        if let Some(copy) = &copy {
            copy.set_volume(element.volume());
        }
        copy
    }
}

/// Resolves once playback has actually started, or fails if the browser
/// refuses it
pub async fn start_media(element: &HtmlMediaElement, label: &str) -> Result<()> {
    let promise = element
        .play()
        .map_err(|err| anyhow!("Audio failed ({}) : {:#?}", label, err))?;
    JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|err| anyhow!("Audio blocked ({}) : {:#?}", label, err))
}

/// Starts playback without waiting for it
pub fn play_media(element: &HtmlMediaElement, label: &'static str) {
    let element = element.clone();
    browser::spawn_local(async move {
        if let Err(err) = start_media(&element, label).await {
            log::warn!("{:#}", err);
        }
    });
}

/// Plays `element` through to its `ended` event. A refused `play()` or a
/// media `error` event resolves early with an error.
pub async fn play_to_end(element: &HtmlMediaElement, label: &str) -> Result<()> {
    let finished = async {
        start_media(element, label).await?;
        browser::next_event(element, "ended").await
    };
    let failed = async {
        browser::next_event(element, "error").await?;
        Err::<(), _>(anyhow!("Media error ({})", label))
    };
    pin_mut!(finished, failed);

    match future::select(finished, failed).await {
        Either::Left((outcome, _)) | Either::Right((outcome, _)) => outcome,
    }
}

fn label(track: Track) -> &'static str {
    match track {
        Track::Music => "music",
        Track::Shoot => "shoot",
        Track::Hit => "hit",
        Track::Kill => "kill",
        Track::Victory => "victory",
        Track::Intro => "intro",
    }
}

impl Audio for WebAudio {
    fn play_loop(&mut self, track: Track) {
        if let Some(element) = self.tracks.get(&track) {
            element.set_loop(true);
            play_media(element, label(track));
        }
    }

    fn play_once(&mut self, track: Track) {
        let Some(element) = self.tracks.get(&track) else {
            return;
        };
        match track {
            Track::Shoot | Track::Hit => {
                if let Some(copy) = Self::overlapping_copy(element) {
                    play_media(&copy, label(track));
                }
            }
            _ => {
                element.set_current_time(0.0);
                play_media(element, label(track));
            }
        }
    }

    fn stop(&mut self, track: Track) {
        if let Some(element) = self.tracks.get(&track) {
            if let Err(err) = element.pause() {
                log::warn!("Could not pause {} : {:#?}", label(track), err);
            }
            element.set_current_time(0.0);
        }
    }

    fn set_volume(&mut self, track: Track, volume: f64) {
        if let Some(element) = self.tracks.get(&track) {
            element.set_volume(volume);
        }
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;
    use web_sys::HtmlVideoElement;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    async fn unplayable_video_resolves_instead_of_hanging() {
        let video = browser::document()
            .unwrap()
            .create_element("video")
            .unwrap()
            .dyn_into::<HtmlVideoElement>()
            .unwrap();
        video.set_src("data:,not-a-video");

        let outcome = play_to_end(&video, "broken video").await;

        assert!(outcome.is_err());
    }
}
