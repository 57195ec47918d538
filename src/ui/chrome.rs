use crate::ui::ansi::{FG_LIGHT_GRAY, PROMPT_STYLE, STYLE_BOLD, STYLE_ITALIC, STYLE_RESET, paint};
use crate::ui::width_util::WidthUtil;

const INNER_WIDTH: usize = 44;

/// Screen-level text: the startup banner and the prompt.
#[derive(Debug, Default, Clone)]
pub struct UiChrome {
    util: WidthUtil,
    color: bool,
}

impl UiChrome {
    pub fn new(color: bool) -> Self {
        Self {
            util: WidthUtil::default(),
            color,
        }
    }

    pub fn banner(&self) -> String {
        let version = env!("CARGO_PKG_VERSION");
        let (title, subtitle) = if self.color {
            (
                format!(
                    "{STYLE_BOLD}N O T C H{STYLE_RESET} {FG_LIGHT_GRAY}(v{version}){STYLE_RESET}"
                ),
                format!("{STYLE_ITALIC}Type 'help' to list commands{STYLE_RESET}"),
            )
        } else {
            (
                format!("N O T C H (v{version})"),
                "Type 'help' to list commands".to_string(),
            )
        };

        let mut lines = Vec::with_capacity(6);
        lines.push(format!("╭{}╮", "─".repeat(INNER_WIDTH)));
        lines.push(format!("│{}│", " ".repeat(INNER_WIDTH)));
        lines.push(format!("│{}│", self.center_in_box(&title, INNER_WIDTH)));
        lines.push(format!("│{}│", self.center_in_box(&subtitle, INNER_WIDTH)));
        lines.push(format!("│{}│", " ".repeat(INNER_WIDTH)));
        lines.push(format!("╰{}╯", "─".repeat(INNER_WIDTH)));
        lines.join("\n")
    }

    pub fn prompt(&self, prompt: &str) -> String {
        paint(prompt, PROMPT_STYLE, self.color)
    }

    fn center_in_box(&self, content: &str, width: usize) -> String {
        let content_width = self.util.visible_width(content);
        if content_width >= width {
            return content.to_string();
        }
        let left = (width - content_width) / 2;
        let right = width - content_width - left;
        format!("{}{}{}", " ".repeat(left), content, " ".repeat(right))
    }
}
