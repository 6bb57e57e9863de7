use ratatui::prelude::*;
use unicode_width::UnicodeWidthStr;

use super::theme;

pub fn truncate_string(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        s.to_string()
    } else {
        let mut result = String::new();
        let mut width = 0;
        for c in s.chars() {
            let cw = unicode_width::UnicodeWidthChar::width(c).unwrap_or(0);
            if width + cw + 1 > max_width {
                result.push('…');
                break;
            }
            result.push(c);
            width += cw;
        }
        result
    }
}

/// Word-wrap text to fit within a given width
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    if max_width == 0 {
        return vec![text.to_string()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.chars().count();

        if current_width == 0 {
            current_line = word.to_string();
            current_width = word_width;
        } else if current_width + 1 + word_width <= max_width {
            current_line.push(' ');
            current_line.push_str(word);
            current_width += 1 + word_width;
        } else {
            lines.push(current_line);
            current_line = word.to_string();
            current_width = word_width;
        }
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// A form row: a left label gutter plus the widget's spans. The label turns
/// accent when its widget has focus.
pub fn field_line(label: &str, focused: bool, value_spans: Vec<Span<'static>>) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(theme::ACCENT).bold()
    } else {
        Style::default().fg(theme::TEXT_MUTED)
    };
    let mut spans = vec![Span::styled(format!(" {:<9}", label), label_style)];
    spans.extend(value_spans);
    Line::from(spans)
}

/// Spans for a left/right cycling selector: `◄ value ►`.
pub fn selector_spans(value: &str, focused: bool) -> Vec<Span<'static>> {
    let arrow_style = if focused {
        Style::default().fg(theme::ACCENT)
    } else {
        Style::default().fg(theme::TEXT_MUTED)
    };
    let value_style = if focused {
        Style::default().fg(theme::BG_BASE).bg(theme::ACCENT).bold()
    } else {
        Style::default().fg(theme::TEXT_SECONDARY).bg(theme::BG_ELEVATED)
    };
    vec![
        Span::styled("◄ ", arrow_style),
        Span::styled(format!(" {} ", value), value_style),
        Span::styled(" ►", arrow_style),
    ]
}

/// Spans for a single-line text field. When focused, the window slides so
/// the block cursor stays visible even in values longer than the field.
pub fn input_spans(value: &str, cursor: usize, width: usize, focused: bool) -> Vec<Span<'static>> {
    let field_style = Style::default().fg(theme::TEXT).bg(theme::BG_INPUT);
    if width == 0 {
        return vec![Span::styled(String::new(), field_style)];
    }

    if !focused {
        let shown = truncate_string(value, width);
        let pad = width.saturating_sub(shown.width());
        return vec![
            Span::styled(shown, Style::default().fg(theme::TEXT_SECONDARY).bg(theme::BG_INPUT)),
            Span::styled(" ".repeat(pad), field_style),
        ];
    }

    let chars: Vec<char> = value.chars().collect();
    let cursor = cursor.min(chars.len());
    // Slide the window left edge so the cursor column is always inside it
    let start = (cursor + 1).saturating_sub(width);
    let end = (start + width).min(chars.len());

    let before: String = chars[start..cursor].iter().collect();
    let at: String = chars.get(cursor).map(|c| c.to_string()).unwrap_or_else(|| " ".to_string());
    let after: String = if cursor < end { chars[cursor + 1..end].iter().collect() } else { String::new() };

    let used = before.width() + at.width() + after.width();
    let pad = width.saturating_sub(used);
    vec![
        Span::styled(before, field_style),
        Span::styled(at, Style::default().fg(theme::BG_BASE).bg(theme::ACCENT)),
        Span::styled(after, field_style),
        Span::styled(" ".repeat(pad), field_style),
    ]
}
