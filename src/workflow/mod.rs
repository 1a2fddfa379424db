pub mod screen_controller;

pub use screen_controller::{Outcome, ScreenController, UiEvent};
