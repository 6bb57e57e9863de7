use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};

use fab_base::constants::{SCROLL_ARROW_AMOUNT, SCROLL_PAGE_AMOUNT};

use crate::app::actions::Action;
use crate::state::{Focus, State};

/// Map a terminal event to an action. `None` means quit.
pub fn handle_event(event: &Event, state: &State) -> Option<Action> {
    match event {
        Event::Key(key) => {
            let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

            // Global Ctrl shortcuts (always handled first)
            if ctrl {
                match key.code {
                    KeyCode::Char('q') => return None, // Quit
                    KeyCode::Char('t') => return Some(Action::SwitchScreen),
                    KeyCode::Char('f') => return Some(Action::ToggleFilesPanel),
                    KeyCode::Char('g') => return Some(Action::RunPrimary),
                    KeyCode::Char('r') => return Some(Action::Refresh),
                    _ => {}
                }
            }

            // The results panel swallows keys while it has focus
            if state.focus == Focus::Files {
                return Some(handle_files_key(key));
            }

            let shift = key.modifiers.contains(KeyModifiers::SHIFT);
            let action = match key.code {
                KeyCode::Tab if shift => Action::FocusPrev,
                KeyCode::Tab => Action::FocusNext,
                KeyCode::BackTab => Action::FocusPrev, // Shift+Tab on some terminals
                KeyCode::Enter if state.focus.is_text_input() => Action::RunPrimary,
                KeyCode::Left => match state.focus {
                    Focus::Mode => Action::ModePrev,
                    Focus::Model => Action::ModelPrev,
                    Focus::WhisperModel => Action::WhisperModelPrev,
                    Focus::Task => Action::TaskPrev,
                    Focus::Prompt | Focus::MediaPath => Action::CursorLeft,
                    _ => Action::None,
                },
                KeyCode::Right => match state.focus {
                    Focus::Mode => Action::ModeNext,
                    Focus::Model => Action::ModelNext,
                    Focus::WhisperModel => Action::WhisperModelNext,
                    Focus::Task => Action::TaskNext,
                    Focus::Prompt | Focus::MediaPath => Action::CursorRight,
                    _ => Action::None,
                },
                KeyCode::Up if state.focus == Focus::Pattern => Action::PatternUp(SCROLL_ARROW_AMOUNT),
                KeyCode::Down if state.focus == Focus::Pattern => Action::PatternDown(SCROLL_ARROW_AMOUNT),
                KeyCode::PageUp if state.focus == Focus::Pattern => Action::PatternUp(SCROLL_PAGE_AMOUNT),
                KeyCode::PageDown if state.focus == Focus::Pattern => Action::PatternDown(SCROLL_PAGE_AMOUNT),
                KeyCode::Up => Action::ScrollUp(SCROLL_ARROW_AMOUNT),
                KeyCode::Down => Action::ScrollDown(SCROLL_ARROW_AMOUNT),
                KeyCode::PageUp => Action::ScrollUp(SCROLL_PAGE_AMOUNT),
                KeyCode::PageDown => Action::ScrollDown(SCROLL_PAGE_AMOUNT),
                KeyCode::Home if state.focus.is_text_input() => Action::CursorHome,
                KeyCode::End if state.focus.is_text_input() => Action::CursorEnd,
                KeyCode::Backspace if state.focus.is_text_input() => Action::DeleteBack,
                KeyCode::Delete if state.focus.is_text_input() => Action::DeleteForward,
                KeyCode::Char(c) if state.focus.is_text_input() && !ctrl => Action::InsertChar(c),
                _ => Action::None,
            };
            Some(action)
        }
        // Bracketed paste lands in the focused text field.
        // Normalize line endings: terminals may send \r\n or \r instead of \n
        Event::Paste(text) => {
            let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
            Some(Action::PasteText(normalized))
        }
        _ => Some(Action::None),
    }
}

/// Keys while the results panel has focus.
fn handle_files_key(key: &KeyEvent) -> Action {
    match key.code {
        KeyCode::Up => Action::FileUp,
        KeyCode::Down => Action::FileDown,
        KeyCode::Enter => Action::PreviewSelected,
        KeyCode::Char('p') => Action::ExportPdfSelected,
        KeyCode::Char('x') => Action::DeleteSelected,
        KeyCode::Char('r') => Action::RefreshFiles,
        KeyCode::Esc | KeyCode::Tab | KeyCode::BackTab => Action::ToggleFilesPanel,
        KeyCode::PageUp => Action::ScrollUp(SCROLL_PAGE_AMOUNT),
        KeyCode::PageDown => Action::ScrollDown(SCROLL_PAGE_AMOUNT),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fab_base::config::AppConfig;

    fn state() -> State {
        State::new(&AppConfig::default())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    #[test]
    fn test_ctrl_q_quits() {
        assert_eq!(handle_event(&ctrl('q'), &state()), None);
    }

    #[test]
    fn test_global_shortcuts() {
        let s = state();
        assert_eq!(handle_event(&ctrl('t'), &s), Some(Action::SwitchScreen));
        assert_eq!(handle_event(&ctrl('f'), &s), Some(Action::ToggleFilesPanel));
        assert_eq!(handle_event(&ctrl('g'), &s), Some(Action::RunPrimary));
        assert_eq!(handle_event(&ctrl('r'), &s), Some(Action::Refresh));
    }

    #[test]
    fn test_global_shortcuts_work_inside_files_panel() {
        let mut s = state();
        s.toggle_files();
        assert_eq!(handle_event(&ctrl('t'), &s), Some(Action::SwitchScreen));
        assert_eq!(handle_event(&ctrl('q'), &s), None);
    }

    #[test]
    fn test_tab_cycles_focus() {
        let s = state();
        assert_eq!(handle_event(&key(KeyCode::Tab), &s), Some(Action::FocusNext));
        assert_eq!(handle_event(&key(KeyCode::BackTab), &s), Some(Action::FocusPrev));
    }

    #[test]
    fn test_arrows_depend_on_focus() {
        let mut s = state();
        // Mode selector
        assert_eq!(handle_event(&key(KeyCode::Left), &s), Some(Action::ModePrev));
        assert_eq!(handle_event(&key(KeyCode::Right), &s), Some(Action::ModeNext));
        // Up/Down fall through to output scrolling
        assert_eq!(handle_event(&key(KeyCode::Up), &s), Some(Action::ScrollUp(1)));

        s.focus = Focus::Pattern;
        assert_eq!(handle_event(&key(KeyCode::Up), &s), Some(Action::PatternUp(1)));
        assert_eq!(handle_event(&key(KeyCode::PageDown), &s), Some(Action::PatternDown(10)));

        s.focus = Focus::Prompt;
        assert_eq!(handle_event(&key(KeyCode::Left), &s), Some(Action::CursorLeft));
        assert_eq!(handle_event(&key(KeyCode::Down), &s), Some(Action::ScrollDown(1)));
    }

    #[test]
    fn test_typing_goes_to_focused_input() {
        let mut s = state();
        s.focus = Focus::Prompt;
        assert_eq!(handle_event(&key(KeyCode::Char('a')), &s), Some(Action::InsertChar('a')));
        assert_eq!(handle_event(&key(KeyCode::Backspace), &s), Some(Action::DeleteBack));
        assert_eq!(handle_event(&key(KeyCode::Enter), &s), Some(Action::RunPrimary));

        // No text focus: the same keys are inert
        s.focus = Focus::Model;
        assert_eq!(handle_event(&key(KeyCode::Char('a')), &s), Some(Action::None));
        assert_eq!(handle_event(&key(KeyCode::Backspace), &s), Some(Action::None));
    }

    #[test]
    fn test_files_panel_keys() {
        let mut s = state();
        s.toggle_files();
        assert_eq!(handle_event(&key(KeyCode::Up), &s), Some(Action::FileUp));
        assert_eq!(handle_event(&key(KeyCode::Down), &s), Some(Action::FileDown));
        assert_eq!(handle_event(&key(KeyCode::Enter), &s), Some(Action::PreviewSelected));
        assert_eq!(handle_event(&key(KeyCode::Char('p')), &s), Some(Action::ExportPdfSelected));
        assert_eq!(handle_event(&key(KeyCode::Char('x')), &s), Some(Action::DeleteSelected));
        assert_eq!(handle_event(&key(KeyCode::Char('r')), &s), Some(Action::RefreshFiles));
        assert_eq!(handle_event(&key(KeyCode::Esc), &s), Some(Action::ToggleFilesPanel));
        assert_eq!(handle_event(&key(KeyCode::Tab), &s), Some(Action::ToggleFilesPanel));
    }

    #[test]
    fn test_paste_normalizes_line_endings() {
        let s = state();
        let action = handle_event(&Event::Paste("uno\r\ndos\rtres".to_string()), &s);
        assert_eq!(action, Some(Action::PasteText("uno\ndos\ntres".to_string())));
    }

    #[test]
    fn test_resize_is_ignored() {
        let s = state();
        assert_eq!(handle_event(&Event::Resize(80, 24), &s), Some(Action::None));
    }
}
