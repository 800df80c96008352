//! strategy-web
//!
//! Leptos-based WASM landing page: hero, strategy form, survey and the
//! legal/contact modals. Validation and prompt building live in
//! `strategy-core`; this crate only wires them to the DOM.

mod api;
mod app;
mod browser;
mod components;
mod form;
mod pages;
mod survey;

pub use app::App;

use wasm_bindgen::prelude::*;

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    leptos::mount::mount_to_body(App);
}
