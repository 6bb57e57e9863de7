use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use fab_mod_fabric::descriptions;

use crate::state::{Focus, State};
use super::{helpers, theme};

pub const FORM_HEIGHT: u16 = 15;

/// Rows of the pattern list window.
const PATTERN_ROWS: usize = 6;

/// Columns taken by the label gutter.
const LABEL_WIDTH: usize = 10;

pub fn render_form(frame: &mut Frame, state: &State, area: Rect) {
    let form_focused = state.focus != Focus::Files;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Generación ")
        .border_style(Style::default().fg(if form_focused { theme::BORDER_FOCUS } else { theme::BORDER }))
        .style(Style::default().bg(theme::BG_SURFACE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + 1);
    let mut lines: Vec<Line> = Vec::new();

    lines.push(helpers::field_line(
        "Modo",
        state.focus == Focus::Mode,
        helpers::selector_spans(state.mode.label(), state.focus == Focus::Mode),
    ));
    lines.push(helpers::field_line(
        "Modelo",
        state.focus == Focus::Model,
        helpers::selector_spans(state.selected_model().unwrap_or("(ninguno)"), state.focus == Focus::Model),
    ));
    lines.push(helpers::field_line(
        "Entrada",
        state.focus == Focus::Prompt,
        helpers::input_spans(state.prompt(), state.cursor, input_width, state.focus == Focus::Prompt),
    ));
    lines.push(Line::from(""));

    render_pattern_list(state, inner.width as usize, &mut lines);

    let paragraph = Paragraph::new(lines);
    frame.render_widget(paragraph, inner);
}

/// The windowed pattern list plus the selected pattern's description.
fn render_pattern_list(state: &State, width: usize, lines: &mut Vec<Line<'static>>) {
    let pattern_focused = state.focus == Focus::Pattern;
    let patterns = state.patterns();
    let indent = " ".repeat(LABEL_WIDTH);

    let label_style = if pattern_focused {
        Style::default().fg(theme::ACCENT).bold()
    } else {
        Style::default().fg(theme::TEXT_MUTED)
    };
    let counter = if patterns.is_empty() {
        String::new()
    } else {
        format!("{}/{}", state.pattern_index + 1, patterns.len())
    };
    lines.push(Line::from(vec![
        Span::styled(format!(" {:<9}", "Patrón"), label_style),
        Span::styled(counter, Style::default().fg(theme::TEXT_MUTED)),
    ]));

    if patterns.is_empty() {
        lines.push(Line::from(Span::styled(
            format!("{}(catálogo vacío · Ctrl+R recarga)", indent),
            Style::default().fg(theme::TEXT_MUTED),
        )));
        return;
    }

    // Window the list around the selection
    let mut start = state.pattern_index.saturating_sub(PATTERN_ROWS / 2);
    if start + PATTERN_ROWS > patterns.len() {
        start = patterns.len().saturating_sub(PATTERN_ROWS);
    }
    for (i, name) in patterns.iter().enumerate().skip(start).take(PATTERN_ROWS) {
        let selected = i == state.pattern_index;
        let marker = if selected { "❯ " } else { "  " };
        let row_style = if selected && pattern_focused {
            Style::default().fg(theme::ACCENT).bold()
        } else if selected {
            Style::default().fg(theme::TEXT).bold()
        } else {
            Style::default().fg(theme::TEXT_SECONDARY)
        };
        lines.push(Line::from(vec![
            Span::raw(indent.clone()),
            Span::styled(format!("{}{}", marker, name), row_style),
        ]));
    }

    // Description of the selected pattern
    let description = state
        .selected_pattern()
        .and_then(descriptions::describe)
        .unwrap_or("Sin descripción registrada.");
    let desc_width = width.saturating_sub(LABEL_WIDTH + 2);
    let desc_style = Style::default().fg(theme::TEXT_MUTED);
    let wrapped = helpers::wrap_text(description, desc_width);
    lines.push(Line::from(Span::styled(format!("{}{}", indent, wrapped[0]), desc_style)));
    if wrapped.len() > 1 {
        let rest = wrapped[1..].join(" ");
        lines.push(Line::from(Span::styled(
            format!("{}{}", indent, helpers::truncate_string(&rest, desc_width)),
            desc_style,
        )));
    }
}
