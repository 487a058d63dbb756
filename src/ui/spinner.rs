use std::time::Duration;

/// Braille frames of the busy indicator.
pub const FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// How often the animation advances.
pub const TICK_INTERVAL: Duration = Duration::from_millis(80);

/// Frame shown for an animation phase.
pub fn frame(phase: usize) -> &'static str {
    FRAMES[phase % FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_wraps_around() {
        assert_eq!(frame(0), "⠋");
        assert_eq!(frame(FRAMES.len()), "⠋");
        assert_eq!(frame(FRAMES.len() + 1), "⠙");
    }
}
