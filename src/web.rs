//! Browser bindings
//!
//! The page owns the canvas, the buttons and `requestAnimationFrame`. It calls
//! [`WebRunner::frame`] once per refresh and only re-requests a frame while
//! that returns true.

use wasm_bindgen::prelude::*;

use crate::FrameDriver;
use crate::sim::{Viewport, World};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    // Fails only if a logger is already installed
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Dune Dash starting...");
}

/// Handle the page holds on to
#[wasm_bindgen]
pub struct WebRunner {
    driver: FrameDriver,
}

#[wasm_bindgen]
impl WebRunner {
    /// Create a runner. `tuning_json` may be empty to use the defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, tuning_json: &str) -> Result<WebRunner, JsValue> {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let seed = js_sys::Date::now() as u64;
        log::info!("New run, seed {}", seed);
        let world = World::new(seed, tuning, Viewport::new(width, height));
        Ok(WebRunner {
            driver: FrameDriver::new(world),
        })
    }

    /// Step one frame; false means stop requesting animation frames
    pub fn frame(&mut self) -> bool {
        self.driver.frame()
    }

    /// Key press or touch start
    pub fn request_jump(&mut self) {
        self.driver.request_jump();
    }

    pub fn pause(&mut self) -> bool {
        self.driver.pause()
    }

    /// True when the page should restart its frame loop
    pub fn resume(&mut self) -> bool {
        self.driver.resume()
    }

    pub fn restart(&mut self) {
        self.driver.restart();
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.driver.resize(width, height);
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.driver.set_autopilot(enabled);
    }

    pub fn score(&self) -> f64 {
        self.driver.score() as f64
    }

    /// JSON snapshot for the page renderer
    pub fn view_json(&self) -> Result<String, JsValue> {
        self.driver
            .view()
            .to_json()
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}
