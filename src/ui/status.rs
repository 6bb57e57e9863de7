use ratatui::{prelude::*, widgets::Paragraph};

use crate::state::{Screen, State, Tone};
use super::{helpers, theme};

pub fn render_status_bar(frame: &mut Frame, state: &State, area: Rect) {
    let base_style = Style::default().bg(theme::BG_BASE).fg(theme::TEXT_MUTED);

    let mut spans = vec![Span::styled(" ", base_style)];

    // Busy badge while an external command runs, READY-style badge otherwise
    if let Some(label) = state.busy {
        spans.push(Span::styled(
            format!(" {} ", label),
            Style::default().fg(theme::BG_BASE).bg(theme::WARNING).bold(),
        ));
    } else {
        spans.push(Span::styled(
            " LISTO ",
            Style::default().fg(theme::BG_BASE).bg(theme::TEXT_MUTED).bold(),
        ));
    }
    spans.push(Span::styled(" ", base_style));

    // Active screen card
    let screen_label = match state.screen {
        Screen::Generate => "Fabric",
        Screen::Transcribe => "Transcripción",
    };
    spans.push(Span::styled(
        format!(" {} ", screen_label),
        Style::default().fg(theme::BG_BASE).bg(theme::ACCENT_DIM).bold(),
    ));
    spans.push(Span::styled(" ", base_style));

    // Current selection cards
    let card_style = Style::default().fg(theme::TEXT).bg(theme::BG_ELEVATED);
    match state.screen {
        Screen::Generate => {
            if let Some(pattern) = state.selected_pattern() {
                spans.push(Span::styled(format!(" {} ", pattern), card_style));
                spans.push(Span::styled(" ", base_style));
            }
            if let Some(model) = state.selected_model() {
                spans.push(Span::styled(format!(" {} ", model), card_style));
                spans.push(Span::styled(" ", base_style));
            }
        }
        Screen::Transcribe => {
            if let Some(model) = state.selected_whisper_model() {
                spans.push(Span::styled(format!(" whisper:{} ", model), card_style));
                spans.push(Span::styled(" ", base_style));
            }
        }
    }

    // Right side: last status message, colored by tone
    let left_width: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let available = (area.width as usize).saturating_sub(left_width + 1);
    let (right_text, right_style) = match &state.status {
        Some((tone, message)) => {
            let color = match tone {
                Tone::Info => theme::TEXT_SECONDARY,
                Tone::Success => theme::SUCCESS,
                Tone::Warn => theme::WARNING,
                Tone::Error => theme::ERROR,
            };
            (
                format!("{} ", helpers::truncate_string(message, available)),
                Style::default().bg(theme::BG_BASE).fg(color),
            )
        }
        None => (String::new(), base_style),
    };

    let right_width = right_text.chars().count();
    let padding = (area.width as usize).saturating_sub(left_width + right_width);
    spans.push(Span::styled(" ".repeat(padding), base_style));
    spans.push(Span::styled(right_text, right_style));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
