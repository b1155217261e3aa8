//! egui/eframe user interface
//!
//! The app shell, the store-to-widget binding layer, and the widgets.

mod app;
mod bindings;
pub mod components;
mod theme;

pub use app::MurmurApp;
pub use bindings::UiBindings;
pub use theme::Theme;
