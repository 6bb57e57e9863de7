use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{Focus, State};
use super::{helpers, theme};

/// Lines reserved for the key hints under the list.
const HELP_HEIGHT: u16 = 4;

pub fn render_files(frame: &mut Frame, state: &State, area: Rect) {
    let focused = state.focus == Focus::Files;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Resultados ({}) ", state.files.len()))
        .border_style(Style::default().fg(if focused { theme::BORDER_FOCUS } else { theme::BORDER }))
        .style(Style::default().bg(theme::BG_SURFACE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let panel_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),              // Result list
            Constraint::Length(HELP_HEIGHT), // Key hints
        ])
        .split(inner);

    render_list(frame, state, focused, panel_layout[0]);
    render_help(frame, panel_layout[1]);
}

fn render_list(frame: &mut Frame, state: &State, focused: bool, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();

    if state.files.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "  (sin resultados todavía)",
            Style::default().fg(theme::TEXT_MUTED).italic(),
        )));
        frame.render_widget(Paragraph::new(lines), area);
        return;
    }

    // Two lines per entry: file name, then its first heading
    let visible = (area.height as usize / 2).max(1);
    let mut start = state.file_index.saturating_sub(visible / 2);
    if start + visible > state.files.len() {
        start = state.files.len().saturating_sub(visible);
    }

    let desc_width = (area.width as usize).saturating_sub(4);
    for (i, (name, description)) in state.files.iter().enumerate().skip(start).take(visible) {
        let selected = i == state.file_index;
        let marker = if selected { "❯ " } else { "  " };
        let name_style = if selected && focused {
            Style::default().fg(theme::ACCENT).bold()
        } else if selected {
            Style::default().fg(theme::TEXT).bold()
        } else {
            Style::default().fg(theme::TEXT_SECONDARY)
        };
        lines.push(Line::from(Span::styled(format!(" {}{}", marker, name), name_style)));
        lines.push(Line::from(Span::styled(
            format!("    {}", helpers::truncate_string(description, desc_width)),
            Style::default().fg(theme::TEXT_MUTED),
        )));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let key_style = Style::default().fg(theme::ACCENT);
    let label_style = Style::default().fg(theme::TEXT_MUTED);
    let help_lines = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled("  Enter", key_style),
            Span::styled(" vista previa", label_style),
        ]),
        Line::from(vec![
            Span::styled("  p", key_style),
            Span::styled(" exportar PDF  ", label_style),
            Span::styled("x", key_style),
            Span::styled(" borrar", label_style),
        ]),
        Line::from(vec![
            Span::styled("  r", key_style),
            Span::styled(" actualizar  ", label_style),
            Span::styled("Esc", key_style),
            Span::styled(" cerrar", label_style),
        ]),
    ];
    frame.render_widget(Paragraph::new(help_lines), area);
}
