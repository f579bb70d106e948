use unicode_width::UnicodeWidthStr;

/// Marker used when the configured one is empty.
pub const DEFAULT_MARKER: &str = "...";

/// Unit a truncation limit is measured in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Words,
    Chars,
}

impl Unit {
    /// Count `s` in this unit.
    pub fn count(self, s: &str) -> usize {
        match self {
            Unit::Words => word_count(s),
            Unit::Chars => char_count(s),
        }
    }
}

pub fn trim_spaces(s: &str) -> &str {
    s.trim()
}

pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

pub fn char_count(s: &str) -> usize {
    s.chars().count()
}

/// Shorten `s` to its first `max` units and append `marker`.
///
/// The marker is appended even when `s` already fits within `max`; callers
/// decide separately whether the shortened form is ever displayed.
pub fn ellipse(s: &str, max: usize, unit: Unit, marker: &str) -> String {
    let trimmed = trim_spaces(s);
    let marker = if marker.is_empty() {
        DEFAULT_MARKER
    } else {
        marker
    };

    let mut out = match unit {
        Unit::Chars => trimmed.chars().take(max).collect::<String>(),
        Unit::Words => trimmed
            .split_whitespace()
            .take(max)
            .collect::<Vec<_>>()
            .join(" "),
    };
    out.push_str(marker);
    out
}

/// Drop `<...>` tags, keeping only the text a reader would see.
pub fn strip_markup(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                // Tags like <br> separate words
                out.push(' ');
            }
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }

    out
}

pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Greedy word wrap at `max_width` columns.
///
/// Words wider than a line get a line of their own. Always returns at least
/// one (possibly empty) line.
pub fn wrap_words(s: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;

    for word in s.split_whitespace() {
        let word_width = display_width(word);
        let space = usize::from(!current.is_empty());

        if !current.is_empty() && current_width + space + word_width > max_width {
            lines.push(std::mem::take(&mut current));
            current_width = 0;
        }

        if !current.is_empty() {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }

    lines
}
