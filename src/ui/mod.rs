//! Terminal output: the full-screen chat view and styled plain-text output
//! for the non-interactive commands.

mod render;
pub mod spinner;
mod style;
pub mod terminal;
pub mod theme;

pub use render::{INPUT_HEIGHT, render};
pub use style::Style;
