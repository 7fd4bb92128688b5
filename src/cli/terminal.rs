//! Terminal capability detection and styling

use owo_colors::{OwoColorize, colors::css};

/// Columns assumed when the terminal width cannot be detected.
const FALLBACK_WIDTH: usize = 100;

/// Whether coloured output should be enabled.
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// The terminal width in columns, or a fallback when output is not a
/// terminal.
pub fn width() -> usize {
    terminal_size::terminal_size().map_or(FALLBACK_WIDTH, |(w, _)| usize::from(w.0))
}

/// Extension trait for styling console output
pub trait Colorize {
    /// Green
    fn success(&self) -> String;
    /// Amber
    fn warning(&self) -> String;
    /// Bold blue, for section headings
    fn heading(&self) -> String;
    /// Dimmed
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Green>().to_string())
    }

    fn warning(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Orange>().to_string())
    }

    fn heading(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::LightBlue>().bold().to_string())
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), |s| s.dimmed().to_string())
    }
}

fn paint(text: &str, style: impl FnOnce(&str) -> String) -> String {
    if supports_color() {
        style(text)
    } else {
        text.to_string()
    }
}

/// Shortens `value` to at most `max` characters, marking the cut with `…`.
pub fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }
    let kept: String = value.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::truncate;

    #[test_case("Alice", 10, "Alice"; "fits")]
    #[test_case("Alice", 5, "Alice"; "exact")]
    #[test_case("Information Technology", 8, "Informa…"; "cut")]
    #[test_case("Zoë Ångström", 4, "Zoë…"; "multibyte")]
    fn truncates_to_width(input: &str, max: usize, expected: &str) {
        assert_eq!(truncate(input, max), expected);
    }
}
