mod files;
mod generate;
mod helpers;
mod output;
mod status;
mod theme;
mod transcribe;

use ratatui::{prelude::*, widgets::Block};

use fab_base::constants::{SIDEBAR_WIDTH, STATUS_BAR_HEIGHT};

use crate::state::{Screen, State};

pub fn render(frame: &mut Frame, state: &State) {
    let area = frame.area();

    // Fill base background
    frame.render_widget(Block::default().style(Style::default().bg(theme::BG_BASE)), area);

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),                    // Body
            Constraint::Length(STATUS_BAR_HEIGHT), // Status bar
        ])
        .split(area);

    render_body(frame, state, main_layout[0]);
    status::render_status_bar(frame, state, main_layout[1]);
}

fn render_body(frame: &mut Frame, state: &State, area: Rect) {
    if state.files_open {
        let body_layout = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(SIDEBAR_WIDTH), // Results panel
                Constraint::Min(1),                // Active screen
            ])
            .split(area);
        files::render_files(frame, state, body_layout[0]);
        render_screen(frame, state, body_layout[1]);
    } else {
        render_screen(frame, state, area);
    }
}

fn render_screen(frame: &mut Frame, state: &State, area: Rect) {
    let form_height = match state.screen {
        Screen::Generate => generate::FORM_HEIGHT,
        Screen::Transcribe => transcribe::FORM_HEIGHT,
    };
    let screen_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(form_height), // Form
            Constraint::Min(3),              // Output panel
        ])
        .split(area);

    match state.screen {
        Screen::Generate => generate::render_form(frame, state, screen_layout[0]),
        Screen::Transcribe => transcribe::render_form(frame, state, screen_layout[0]),
    }
    output::render_output(frame, state, screen_layout[1]);
}
