/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
}

/// Wrap text in a color code when color output is enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render a fixed-width bar for a 0-100 percentage
pub fn progress_bar(percent: u32, width: usize) -> String {
    let filled = (percent.min(100) as usize * width + 50) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_without_color_is_plain() {
        assert_eq!(paint("7 days", Color::GREEN, false), "7 days");
        assert_eq!(paint("x", Color::BOLD, true), "\x1b[1mx\x1b[0m");
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "[----------]");
        assert_eq!(progress_bar(43, 10), "[####------]");
        assert_eq!(progress_bar(100, 10), "[##########]");
        assert_eq!(progress_bar(250, 4), "[####]");
    }
}
