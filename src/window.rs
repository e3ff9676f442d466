use unicode_width::UnicodeWidthChar;

/// The trailing lines of the latest fetch, already cut to the interior width.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ContentWindow {
    lines: Vec<String>,
}

impl ContentWindow {
    /// Selects at most `lines` trailing lines of `content`, each truncated
    /// to `width` display columns.
    ///
    /// A terminating newline does not count as an extra empty line, so a
    /// file ending in `\n` shows its last `lines` lines of text.
    pub fn new(content: &str, lines: usize, width: usize) -> Self {
        let all: Vec<&str> = content.lines().collect();
        let start = all.len().saturating_sub(lines);

        Self {
            lines: all[start..]
                .iter()
                .map(|line| truncate(line, width))
                .collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Hard cut at `width` display columns. Control characters become a space so
/// the cursor cannot leave the row mid-print.
pub fn truncate(line: &str, width: usize) -> String {
    let mut out = String::with_capacity(line.len().min(width));
    let mut used = 0;

    for c in line.chars() {
        let c = if c.is_control() { ' ' } else { c };
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }

    out
}
