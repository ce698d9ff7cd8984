use crate::browser;
use crate::sim::{Overlay, Panel};
use std::collections::HashMap;
use web_sys::HtmlElement;

const PANELS: [Panel; 6] = [
    Panel::Score,
    Panel::GameOver,
    Panel::KillBanner,
    Panel::Crawl,
    Panel::Title,
    Panel::Subtitle,
];

fn element_id(panel: Panel) -> &'static str {
    match panel {
        Panel::Score => "score",
        Panel::GameOver => "game-over",
        Panel::KillBanner => "kill-text",
        Panel::Crawl => "end-crawl",
        Panel::Title => "title",
        Panel::Subtitle => "subtitle",
    }
}

/// Text panels laid over the canvas. The page owns their markup and styling;
/// a panel missing from the page is skipped.
#[derive(Clone)]
pub struct DomOverlay {
    panels: HashMap<Panel, HtmlElement>,
}

impl DomOverlay {
    pub fn new() -> Self {
        let panels = PANELS
            .into_iter()
            .filter_map(|panel| match browser::element_by_id::<HtmlElement>(element_id(panel)) {
                Ok(element) => Some((panel, element)),
                Err(err) => {
                    log::warn!("Overlay: {:#?}", err);
                    None
                }
            })
            .collect();
        DomOverlay { panels }
    }
}

impl Overlay for DomOverlay {
    fn show(&mut self, panel: Panel, text: Option<&str>) {
        if let Some(element) = self.panels.get(&panel) {
            if let Some(text) = text {
                element.set_inner_text(text);
            }
            if let Err(err) = browser::set_display(element, true) {
                log::warn!("Overlay: {:#?}", err);
            }
        }
    }

    fn hide(&mut self, panel: Panel) {
        if let Some(element) = self.panels.get(&panel) {
            if let Err(err) = browser::set_display(element, false) {
                log::warn!("Overlay: {:#?}", err);
            }
        }
    }

    fn set_style(&mut self, panel: Panel, property: &str, value: &str) {
        if let Some(element) = self.panels.get(&panel) {
            if let Err(err) = element.style().set_property(property, value) {
                log::warn!("Overlay: could not set {} : {:#?}", property, err);
            }
        }
    }
}
