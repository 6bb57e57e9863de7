use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Wrap},
};

use crate::state::State;
use super::theme;

/// The shared output panel under both forms: command echo, generated
/// content, transcription stats, previews.
pub fn render_output(frame: &mut Frame, state: &State, area: Rect) {
    let viewport = area.height.saturating_sub(2) as usize;
    let title = if state.output.len() > viewport && viewport > 0 {
        let first = state.scroll + 1;
        let last = (state.scroll + viewport).min(state.output.len());
        format!(" {} · {}-{} de {} ", state.output_title, first, last, state.output.len())
    } else {
        format!(" {} ", state.output_title)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(theme::BORDER))
        .style(Style::default().bg(theme::BG_SURFACE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if state.output.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "  Sin salida todavía.",
                Style::default().fg(theme::TEXT_MUTED).italic(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "  Ctrl+G genera · Ctrl+T cambia de pantalla · Ctrl+F resultados · Ctrl+Q salir",
                Style::default().fg(theme::TEXT_MUTED).italic(),
            )),
        ]);
        frame.render_widget(hint, inner);
        return;
    }

    let lines: Vec<Line> = state
        .output
        .iter()
        .map(|raw| {
            if raw.starts_with("$ ") {
                Line::from(Span::styled(raw.clone(), Style::default().fg(theme::ACCENT).bold()))
            } else {
                Line::from(Span::styled(raw.clone(), Style::default().fg(theme::TEXT_SECONDARY)))
            }
        })
        .collect();

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((state.scroll as u16, 0));
    frame.render_widget(paragraph, inner);

    if state.output.len() > viewport {
        let scrollbar = Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .style(Style::default().fg(theme::BG_ELEVATED))
            .thumb_style(Style::default().fg(theme::ACCENT_DIM));
        let mut scrollbar_state = ScrollbarState::new(state.output.len().saturating_sub(viewport))
            .position(state.scroll);
        frame.render_stateful_widget(
            scrollbar,
            area.inner(Margin { horizontal: 0, vertical: 1 }),
            &mut scrollbar_state,
        );
    }
}
