use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

use crate::state::{Focus, State};
use super::{helpers, theme};

pub const FORM_HEIGHT: u16 = 10;

const LABEL_WIDTH: usize = 10;

pub fn render_form(frame: &mut Frame, state: &State, area: Rect) {
    let form_focused = state.focus != Focus::Files;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Transcripción ")
        .border_style(Style::default().fg(if form_focused { theme::BORDER_FOCUS } else { theme::BORDER }))
        .style(Style::default().bg(theme::BG_SURFACE));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let input_width = (inner.width as usize).saturating_sub(LABEL_WIDTH + 1);
    let path_focused = state.focus == Focus::MediaPath;
    let path_spans = if state.media_path.is_empty() && !path_focused {
        vec![Span::styled(
            "(ruta del archivo de audio o vídeo)",
            Style::default().fg(theme::TEXT_MUTED).bg(theme::BG_INPUT),
        )]
    } else {
        helpers::input_spans(&state.media_path, state.cursor, input_width, path_focused)
    };

    let hint_style = Style::default().fg(theme::TEXT_MUTED);
    let lines: Vec<Line> = vec![
        helpers::field_line("Archivo", path_focused, path_spans),
        Line::from(""),
        helpers::field_line(
            "Modelo",
            state.focus == Focus::WhisperModel,
            helpers::selector_spans(
                state.selected_whisper_model().unwrap_or("(ninguno)"),
                state.focus == Focus::WhisperModel,
            ),
        ),
        helpers::field_line(
            "Tarea",
            state.focus == Focus::Task,
            helpers::selector_spans(state.task.label(), state.focus == Focus::Task),
        ),
        Line::from(""),
        Line::from(Span::styled(" La transcripción bloquea la interfaz hasta terminar.", hint_style)),
        Line::from(Span::styled(" El archivo de salida se escribe junto al de entrada.", hint_style)),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}
