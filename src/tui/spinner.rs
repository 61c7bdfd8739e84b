use crate::app::SPINNER_FRAME_COUNT;

const BRAILLE_FRAMES: [&str; SPINNER_FRAME_COUNT] =
    ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub fn frame(idx: usize) -> &'static str {
    BRAILLE_FRAMES[idx % BRAILLE_FRAMES.len()]
}
