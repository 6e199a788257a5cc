//! Browser bindings
//!
//! JS owns the canvas, the sprite sheet and `requestAnimationFrame`. It hands
//! us the measured viewport once the sprites decode, forwards presses, calls
//! `frame` every animation frame and draws the returned scene.

use wasm_bindgen::prelude::*;

use crate::config::{Tuning, Viewport};
use crate::persistence::LocalStorageStore;
use crate::platform::{AssetGate, AssetLoader, InputSignal};
use crate::session::Session;
use crate::sim::GameEvent;

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Flappy Core starting...");
}

#[wasm_bindgen]
pub struct WebGame {
    session: Session,
    loader: Option<AssetLoader>,
    last_events: Vec<GameEvent>,
}

#[wasm_bindgen]
impl WebGame {
    /// `tuning_json` may be empty for the default tuning
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: &str) -> Result<WebGame, JsValue> {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let (loader, gate) = AssetGate::channel();
        let session = Session::new(tuning, gate).with_store(LocalStorageStore);
        Ok(Self {
            session,
            loader: Some(loader),
            last_events: Vec::new(),
        })
    }

    /// Sprites are decoded; `width`/`height` are the canvas size in device pixels
    pub fn assets_loaded(&mut self, width: f32, height: f32, scale: f32) {
        if let Some(loader) = self.loader.take() {
            loader.finish(Viewport::new(width, height, scale));
        }
    }

    pub fn assets_failed(&mut self, reason: &str) {
        if let Some(loader) = self.loader.take() {
            loader.fail(reason);
        }
    }

    pub fn press(&mut self) {
        self.session.signal(InputSignal::Press);
    }

    /// Advance by `dt` seconds. Returns the number of events raised.
    pub fn frame(&mut self, dt: f32) -> usize {
        self.last_events = self.session.update(dt);
        self.last_events.len()
    }

    /// The scene to draw, or `null` while loading
    pub fn scene_json(&self) -> Result<JsValue, JsValue> {
        match self.session.scene() {
            Some(scene) => scene
                .to_json()
                .map(|json| JsValue::from_str(&json))
                .map_err(|e| JsValue::from_str(&e.to_string())),
            None => Ok(JsValue::NULL),
        }
    }

    /// Did the last frame score a point (for the ding)
    pub fn scored(&self) -> bool {
        self.last_events
            .iter()
            .any(|e| matches!(e, GameEvent::Scored(_)))
    }

    /// Did the last frame end a run
    pub fn crashed(&self) -> bool {
        self.last_events
            .iter()
            .any(|e| matches!(e, GameEvent::Crashed(_)))
    }

    /// Startup failure shown instead of the game, if any
    pub fn error(&self) -> Option<String> {
        self.session.error().map(|e| e.to_string())
    }
}
