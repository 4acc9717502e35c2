use anyhow::Error;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

/// Extract the most relevant error message from a chained error.
pub(crate) fn surface_error(err: &Error) -> String {
    err.chain()
        .last()
        .map(|cause| cause.to_string())
        .unwrap_or_else(|| err.to_string())
}

/// Collapse line breaks so a stored value always fits a single table row.
pub(crate) fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Terminal columns `text` occupies (wide characters count twice), clamped
/// to `u16` for cursor arithmetic.
pub(crate) fn display_width(text: &str) -> u16 {
    u16::try_from(Span::raw(text).width()).unwrap_or(u16::MAX)
}

/// Footer key hint: `[Key]` in bold cyan followed by its label.
pub(crate) fn key_hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    let key_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    [Span::styled(key, key_style), Span::raw(label)]
}
