use std::fmt::Write;

use crate::ui::width_util::WidthUtil;

/// Renders titled, column-aligned tables into a `String`.
#[derive(Debug, Default, Clone)]
pub struct TablePrinter {
    util: WidthUtil,
    max_width: Option<usize>,
}

impl TablePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Separators never run past the current terminal width.
    pub fn for_terminal() -> Self {
        let util = WidthUtil::default();
        let max_width = Some(util.terminal_width());
        Self { util, max_width }
    }

    /// With no headers each row is joined as-is; an empty `rows` prints
    /// `empty_message` under the title when one is given.
    pub fn render<T: AsRef<str>>(
        &self,
        title: &str,
        headers: &[&str],
        rows: &[Vec<T>],
        empty_message: Option<&str>,
    ) -> String {
        let col_widths = self.col_widths(headers, rows);
        let mut width = self.natural_width(&col_widths);
        let mut out = String::new();

        if rows.is_empty() {
            if let Some(msg) = empty_message {
                width = width
                    .max(self.util.visible_width(title))
                    .max(self.util.visible_width(msg));
                self.banner(&mut out, title, width);
                line(&mut out, msg);
                self.separator(&mut out, width);
                return out;
            }
        }

        width = width.max(self.util.visible_width(title));
        self.banner(&mut out, title, width);
        if !headers.is_empty() {
            line(&mut out, &self.build_line(headers, &col_widths));
            self.separator(&mut out, width);
        }
        for row in rows {
            let text = if headers.is_empty() {
                row.iter().map(|c| c.as_ref()).collect::<Vec<_>>().join(" | ")
            } else {
                self.build_line(row, &col_widths)
            };
            line(&mut out, &text);
        }
        self.separator(&mut out, width);
        out
    }

    fn col_widths<T: AsRef<str>>(&self, headers: &[&str], rows: &[Vec<T>]) -> Vec<usize> {
        let mut widths: Vec<usize> = headers.iter().map(|h| self.util.visible_width(h)).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(self.util.visible_width(cell.as_ref()));
            }
        }
        widths
    }

    fn natural_width(&self, col_widths: &[usize]) -> usize {
        if col_widths.is_empty() {
            return 0;
        }
        col_widths.iter().sum::<usize>() + (col_widths.len() - 1) * 3
    }

    fn build_line<T: AsRef<str>>(&self, cells: &[T], col_widths: &[usize]) -> String {
        let last = col_widths.len().saturating_sub(1);
        cells
            .iter()
            .enumerate()
            .take(col_widths.len())
            .map(|(i, cell)| {
                // no trailing padding on the last column
                if i == last {
                    cell.as_ref().to_string()
                } else {
                    self.util.pad_visible(cell.as_ref(), col_widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join(" | ")
    }

    fn banner(&self, out: &mut String, title: &str, width: usize) {
        self.separator(out, width);
        line(out, &title.to_uppercase());
        self.separator(out, width);
    }

    fn separator(&self, out: &mut String, width: usize) {
        let width = match self.max_width {
            Some(max) => width.min(max),
            None => width,
        };
        line(out, &"-".repeat(width.max(1)));
    }
}

fn line(out: &mut String, s: &str) {
    let _ = writeln!(out, "{s}");
}
