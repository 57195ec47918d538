// ANSI styling sequences used when output goes to a terminal.

/// Reset terminal styling to defaults.
pub const STYLE_RESET: &str = crate::csi!("0m");
/// Bold text.
pub const STYLE_BOLD: &str = crate::csi!("1m");
/// Italic text.
pub const STYLE_ITALIC: &str = crate::csi!("3m");
/// Light gray foreground.
pub const FG_LIGHT_GRAY: &str = crate::csi!("37m");
/// Red foreground, used for error lines.
pub const FG_RED: &str = crate::csi!("31m");
/// Bold green, used for the prompt.
pub const PROMPT_STYLE: &str = crate::csi!("1;32m");

/// Wrap `text` in `style` when `enabled`, otherwise return it untouched.
pub fn paint(text: &str, style: &str, enabled: bool) -> String {
    if enabled {
        format!("{style}{text}{STYLE_RESET}")
    } else {
        text.to_string()
    }
}
