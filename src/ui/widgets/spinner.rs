/// Frames of the loading spinner, advanced once per tick.
///
pub const FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn frame(index: usize) -> &'static str {
    FRAMES[index % FRAMES.len()]
}
