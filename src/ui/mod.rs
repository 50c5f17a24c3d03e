// UI module - egui overlays of the windowed front end

mod genesis;
mod stats;
mod ui;

pub use genesis::draw_genesis_screen;
pub use ui::{UIState, draw_ui, process_egui};
