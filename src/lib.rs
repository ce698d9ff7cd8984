// ==================== Imports ====================
use wasm_bindgen::prelude::*;

mod audio;
mod browser;
pub mod consts;
pub mod engine;
mod game;
mod overlay;
pub mod sim;

use engine::GameLoop;
use game::HeartShooter;

// ==================== Main Functions ====================
/// Main entry for Webassembly module
/// - installs panic hook and console logger
/// - loads every asset, then plays the intro
/// - starts the tick loop
#[wasm_bindgen]
pub fn main_js() -> Result<(), JsValue> {
    // better panic messages in the browser console
    console_error_panic_hook::set_once();

    #[cfg(target_arch = "wasm32")]
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Logger already set : {}", err).into());
    }

    browser::spawn_local(async move {
        if let Err(err) = GameLoop::start(HeartShooter::new()).await {
            log::error!("Could not start the game : {:#?}", err);
        }
    });

    Ok(())
}
