//! Plain-text output around the full-screen session.

use crate::ui::Style;

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}
