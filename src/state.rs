//! UI state and the pure transitions the event loop applies to it.
//!
//! Everything here is side-effect free; the app layer owns the store, the
//! config and the external tools, and copies results into this struct.

use fab_base::config::AppConfig;
use fab_base::constants::{DEFAULT_PROMPT, DEFAULT_WEB_URL, DEFAULT_YOUTUBE_URL};
use fab_mod_fabric::{InputMode, PatternCatalog};
use fab_mod_whisper::{Transcription, build_srt, build_transcript_lines, srt_file_name, subtitles_file_name, transcript_file_name};

/// Which page is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Generate,
    Transcribe,
}

/// Which widget receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Mode,
    Pattern,
    Model,
    Prompt,
    MediaPath,
    WhisperModel,
    Task,
    Files,
}

impl Focus {
    pub fn is_text_input(self) -> bool {
        matches!(self, Focus::Prompt | Focus::MediaPath)
    }
}

/// Which artifact a transcription run writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscribeTask {
    Transcript,
    Srt,
    Subtitles,
}

impl TranscribeTask {
    pub const ALL: [TranscribeTask; 3] =
        [TranscribeTask::Transcript, TranscribeTask::Srt, TranscribeTask::Subtitles];

    pub fn label(&self) -> &'static str {
        match self {
            TranscribeTask::Transcript => "Transcripción",
            TranscribeTask::Srt => "Subtítulos SRT",
            TranscribeTask::Subtitles => "Subtítulos TXT",
        }
    }

    /// Output file name next to the media file, derived from its stem.
    pub fn output_file_name(&self, stem: &str) -> String {
        match self {
            TranscribeTask::Transcript => transcript_file_name(stem),
            TranscribeTask::Srt => srt_file_name(stem),
            TranscribeTask::Subtitles => subtitles_file_name(stem),
        }
    }

    /// The artifact body for a finished transcription.
    pub fn build_content(&self, transcription: &Transcription) -> String {
        match self {
            TranscribeTask::Transcript => transcription.text.clone(),
            TranscribeTask::Srt => build_srt(&transcription.segments),
            TranscribeTask::Subtitles => build_transcript_lines(&transcription.segments),
        }
    }
}

/// Color family for the status bar message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Info,
    Success,
    Warn,
    Error,
}

pub struct State {
    pub screen: Screen,
    pub focus: Focus,

    // Generate form. One input buffer per mode so switching modes never
    // loses what the user typed.
    pub mode: InputMode,
    pub prompt_texto: String,
    pub prompt_youtube: String,
    pub prompt_url: String,
    /// Char position of the cursor in the focused text field.
    pub cursor: usize,
    pub pattern_index: usize,
    pub model_index: usize,
    pub models: Vec<String>,
    pub catalog: Option<PatternCatalog>,

    // Transcribe form
    pub media_path: String,
    pub whisper_model_index: usize,
    pub whisper_models: Vec<String>,
    pub task: TranscribeTask,

    // Output panel
    pub output_title: String,
    pub output: Vec<String>,
    pub scroll: usize,

    // Results panel
    pub files_open: bool,
    /// (id, extracted description) pairs, sorted by id.
    pub files: Vec<(String, String)>,
    pub file_index: usize,
    return_focus: Focus,

    // Status bar
    pub status: Option<(Tone, String)>,
    /// Badge drawn while a blocking external call runs.
    pub busy: Option<&'static str>,
    pub dirty: bool,
}

impl State {
    pub fn new(config: &AppConfig) -> Self {
        let whisper_model_index =
            config.whisper_models.iter().position(|m| m == "base").unwrap_or(0);
        Self {
            screen: Screen::Generate,
            focus: Focus::Mode,
            mode: InputMode::Texto,
            prompt_texto: DEFAULT_PROMPT.to_string(),
            prompt_youtube: DEFAULT_YOUTUBE_URL.to_string(),
            prompt_url: DEFAULT_WEB_URL.to_string(),
            cursor: 0,
            pattern_index: 0,
            model_index: 0,
            models: config.models.clone(),
            catalog: None,
            media_path: String::new(),
            whisper_model_index,
            whisper_models: config.whisper_models.clone(),
            task: TranscribeTask::Transcript,
            output_title: "Salida".to_string(),
            output: Vec::new(),
            scroll: 0,
            files_open: false,
            files: Vec::new(),
            file_index: 0,
            return_focus: Focus::Mode,
            status: None,
            busy: None,
            dirty: true,
        }
    }

    /// The input buffer the generate screen edits in the current mode.
    pub fn prompt(&self) -> &str {
        match self.mode {
            InputMode::Texto => &self.prompt_texto,
            InputMode::YouTube => &self.prompt_youtube,
            InputMode::Url => &self.prompt_url,
        }
    }

    fn prompt_mut(&mut self) -> &mut String {
        match self.mode {
            InputMode::Texto => &mut self.prompt_texto,
            InputMode::YouTube => &mut self.prompt_youtube,
            InputMode::Url => &mut self.prompt_url,
        }
    }

    pub fn patterns(&self) -> &[String] {
        self.catalog.as_ref().map(|c| c.patterns.as_slice()).unwrap_or(&[])
    }

    pub fn selected_pattern(&self) -> Option<&str> {
        self.patterns().get(self.pattern_index).map(String::as_str)
    }

    pub fn selected_model(&self) -> Option<&str> {
        self.models.get(self.model_index).map(String::as_str)
    }

    pub fn selected_whisper_model(&self) -> Option<&str> {
        self.whisper_models.get(self.whisper_model_index).map(String::as_str)
    }

    pub fn selected_file_id(&self) -> Option<&str> {
        self.files.get(self.file_index).map(|(id, _)| id.as_str())
    }

    // --- Focus ---

    fn focus_ring(&self) -> &'static [Focus] {
        match self.screen {
            Screen::Generate => &[Focus::Mode, Focus::Pattern, Focus::Model, Focus::Prompt],
            Screen::Transcribe => &[Focus::MediaPath, Focus::WhisperModel, Focus::Task],
        }
    }

    fn set_focus(&mut self, focus: Focus) {
        self.focus = focus;
        match focus {
            Focus::Prompt => self.cursor = self.prompt().chars().count(),
            Focus::MediaPath => self.cursor = self.media_path.chars().count(),
            _ => {}
        }
    }

    pub fn focus_next(&mut self) {
        if self.focus == Focus::Files {
            return;
        }
        let ring = self.focus_ring();
        let i = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.set_focus(ring[(i + 1) % ring.len()]);
    }

    pub fn focus_prev(&mut self) {
        if self.focus == Focus::Files {
            return;
        }
        let ring = self.focus_ring();
        let i = ring.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.set_focus(ring[(i + ring.len() - 1) % ring.len()]);
    }

    pub fn switch_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Generate => Screen::Transcribe,
            Screen::Transcribe => Screen::Generate,
        };
        let first = self.focus_ring()[0];
        if self.focus == Focus::Files {
            // Keep the panel focused; leaving it later lands on the new screen
            self.return_focus = first;
        } else {
            self.set_focus(first);
        }
    }

    pub fn toggle_files(&mut self) {
        if self.files_open {
            self.files_open = false;
            if self.focus == Focus::Files {
                self.set_focus(self.return_focus);
            }
        } else {
            self.files_open = true;
            self.return_focus = self.focus;
            self.focus = Focus::Files;
        }
    }

    // --- Selectors ---

    pub fn mode_next(&mut self) {
        let i = InputMode::ALL.iter().position(|m| *m == self.mode).unwrap_or(0);
        self.mode = InputMode::ALL[(i + 1) % InputMode::ALL.len()];
        self.cursor = self.prompt().chars().count();
    }

    pub fn mode_prev(&mut self) {
        let i = InputMode::ALL.iter().position(|m| *m == self.mode).unwrap_or(0);
        self.mode = InputMode::ALL[(i + InputMode::ALL.len() - 1) % InputMode::ALL.len()];
        self.cursor = self.prompt().chars().count();
    }

    pub fn model_next(&mut self) {
        if !self.models.is_empty() {
            self.model_index = (self.model_index + 1) % self.models.len();
        }
    }

    pub fn model_prev(&mut self) {
        if !self.models.is_empty() {
            self.model_index = (self.model_index + self.models.len() - 1) % self.models.len();
        }
    }

    pub fn whisper_model_next(&mut self) {
        if !self.whisper_models.is_empty() {
            self.whisper_model_index = (self.whisper_model_index + 1) % self.whisper_models.len();
        }
    }

    pub fn whisper_model_prev(&mut self) {
        if !self.whisper_models.is_empty() {
            self.whisper_model_index =
                (self.whisper_model_index + self.whisper_models.len() - 1) % self.whisper_models.len();
        }
    }

    pub fn task_next(&mut self) {
        let i = TranscribeTask::ALL.iter().position(|t| *t == self.task).unwrap_or(0);
        self.task = TranscribeTask::ALL[(i + 1) % TranscribeTask::ALL.len()];
    }

    pub fn task_prev(&mut self) {
        let i = TranscribeTask::ALL.iter().position(|t| *t == self.task).unwrap_or(0);
        self.task = TranscribeTask::ALL[(i + TranscribeTask::ALL.len() - 1) % TranscribeTask::ALL.len()];
    }

    /// Pattern selection moves saturate instead of wrapping: the list is long
    /// and wrapping around 200 entries on one extra keypress is disorienting.
    pub fn pattern_up(&mut self, n: usize) {
        self.pattern_index = self.pattern_index.saturating_sub(n);
    }

    pub fn pattern_down(&mut self, n: usize) {
        let len = self.patterns().len();
        if len > 0 {
            self.pattern_index = (self.pattern_index + n).min(len - 1);
        }
    }

    pub fn file_up(&mut self) {
        self.file_index = self.file_index.saturating_sub(1);
    }

    pub fn file_down(&mut self) {
        if !self.files.is_empty() {
            self.file_index = (self.file_index + 1).min(self.files.len() - 1);
        }
    }

    // --- Text editing ---

    fn active_text(&self) -> Option<&str> {
        match self.focus {
            Focus::Prompt => Some(self.prompt()),
            Focus::MediaPath => Some(&self.media_path),
            _ => None,
        }
    }

    fn active_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Prompt => Some(self.prompt_mut()),
            Focus::MediaPath => Some(&mut self.media_path),
            _ => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        let cursor = self.cursor;
        if let Some(text) = self.active_text_mut() {
            let byte = byte_index(text, cursor);
            text.insert(byte, c);
            self.cursor = cursor + 1;
        }
    }

    /// Insert pasted text at the cursor. The fields are single-line, so any
    /// line break in the paste becomes a space.
    pub fn insert_text(&mut self, pasted: &str) {
        let cursor = self.cursor;
        let flat = pasted.replace('\n', " ");
        if let Some(text) = self.active_text_mut() {
            let byte = byte_index(text, cursor);
            text.insert_str(byte, &flat);
            self.cursor = cursor + flat.chars().count();
        }
    }

    pub fn delete_back(&mut self) {
        let cursor = self.cursor;
        if cursor == 0 {
            return;
        }
        if let Some(text) = self.active_text_mut() {
            let byte = byte_index(text, cursor - 1);
            text.remove(byte);
            self.cursor = cursor - 1;
        }
    }

    pub fn delete_forward(&mut self) {
        let cursor = self.cursor;
        if let Some(text) = self.active_text_mut() {
            if cursor < text.chars().count() {
                let byte = byte_index(text, cursor);
                text.remove(byte);
            }
        }
    }

    pub fn cursor_left(&mut self) {
        if self.active_text().is_some() {
            self.cursor = self.cursor.saturating_sub(1);
        }
    }

    pub fn cursor_right(&mut self) {
        if let Some(text) = self.active_text() {
            self.cursor = (self.cursor + 1).min(text.chars().count());
        }
    }

    pub fn cursor_home(&mut self) {
        if self.active_text().is_some() {
            self.cursor = 0;
        }
    }

    pub fn cursor_end(&mut self) {
        if let Some(text) = self.active_text() {
            self.cursor = text.chars().count();
        }
    }

    // --- Output panel ---

    pub fn set_output(&mut self, title: impl Into<String>, lines: Vec<String>) {
        self.output_title = title.into();
        self.output = lines;
        self.scroll = 0;
    }

    pub fn push_output(&mut self, line: impl Into<String>) {
        self.output.push(line.into());
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.scroll = self.scroll.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.scroll = (self.scroll + n).min(self.output.len().saturating_sub(1));
    }

    // --- Status bar ---

    pub fn set_status(&mut self, tone: Tone, message: impl Into<String>) {
        self.status = Some((tone, message.into()));
    }
}

/// Byte offset of the given char position, clamped to the end.
fn byte_index(text: &str, char_pos: usize) -> usize {
    text.char_indices().nth(char_pos).map(|(i, _)| i).unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> State {
        State::new(&AppConfig::default())
    }

    fn state_with_patterns(patterns: &[&str]) -> State {
        let mut s = state();
        s.catalog = Some(PatternCatalog::new(patterns.iter().map(|p| p.to_string()).collect()));
        s
    }

    #[test]
    fn test_new_defaults() {
        let s = state();
        assert_eq!(s.screen, Screen::Generate);
        assert_eq!(s.focus, Focus::Mode);
        assert_eq!(s.mode, InputMode::Texto);
        assert_eq!(s.prompt(), "Haz un chiste con manzanas");
        // whisper default lands on "base"
        assert_eq!(s.selected_whisper_model(), Some("base"));
    }

    #[test]
    fn test_focus_cycles_generate_form() {
        let mut s = state();
        s.focus_next();
        assert_eq!(s.focus, Focus::Pattern);
        s.focus_next();
        assert_eq!(s.focus, Focus::Model);
        s.focus_next();
        assert_eq!(s.focus, Focus::Prompt);
        s.focus_next();
        assert_eq!(s.focus, Focus::Mode);
        s.focus_prev();
        assert_eq!(s.focus, Focus::Prompt);
    }

    #[test]
    fn test_focusing_prompt_puts_cursor_at_end() {
        let mut s = state();
        s.focus_next();
        s.focus_next();
        s.focus_next();
        assert_eq!(s.focus, Focus::Prompt);
        assert_eq!(s.cursor, s.prompt().chars().count());
    }

    #[test]
    fn test_switch_screen_resets_focus() {
        let mut s = state();
        s.switch_screen();
        assert_eq!(s.screen, Screen::Transcribe);
        assert_eq!(s.focus, Focus::MediaPath);
        s.switch_screen();
        assert_eq!(s.screen, Screen::Generate);
        assert_eq!(s.focus, Focus::Mode);
    }

    #[test]
    fn test_mode_cycle_swaps_buffers_and_keeps_edits() {
        let mut s = state();
        s.mode_next();
        assert_eq!(s.mode, InputMode::YouTube);
        assert!(s.prompt().starts_with("https://www.youtube.com/"));
        s.mode_next();
        assert_eq!(s.mode, InputMode::Url);
        s.mode_next();
        assert_eq!(s.mode, InputMode::Texto);

        // Edits survive a round trip through the other modes
        s.focus = Focus::Prompt;
        s.cursor = s.prompt().chars().count();
        s.insert_char('!');
        let edited = s.prompt().to_string();
        s.mode_next();
        s.mode_prev();
        assert_eq!(s.prompt(), edited);
    }

    #[test]
    fn test_model_selector_wraps() {
        let mut s = state();
        assert_eq!(s.selected_model(), Some("gpt-4o-mini"));
        s.model_prev();
        assert_eq!(s.model_index, 2);
        s.model_next();
        assert_eq!(s.model_index, 0);
    }

    #[test]
    fn test_task_selector_cycles() {
        let mut s = state();
        s.task_next();
        assert_eq!(s.task, TranscribeTask::Srt);
        s.task_next();
        assert_eq!(s.task, TranscribeTask::Subtitles);
        s.task_next();
        assert_eq!(s.task, TranscribeTask::Transcript);
        s.task_prev();
        assert_eq!(s.task, TranscribeTask::Subtitles);
    }

    #[test]
    fn test_pattern_moves_saturate() {
        let mut s = state_with_patterns(&["a", "b", "c"]);
        s.pattern_up(5);
        assert_eq!(s.pattern_index, 0);
        s.pattern_down(10);
        assert_eq!(s.pattern_index, 2);
        assert_eq!(s.selected_pattern(), Some("c"));
    }

    #[test]
    fn test_pattern_moves_without_catalog() {
        let mut s = state();
        s.pattern_down(3);
        assert_eq!(s.pattern_index, 0);
        assert_eq!(s.selected_pattern(), None);
    }

    #[test]
    fn test_insert_and_delete_multibyte() {
        let mut s = state();
        s.focus = Focus::MediaPath;
        s.cursor = 0;
        for c in "canción.mp3".chars() {
            s.insert_char(c);
        }
        assert_eq!(s.media_path, "canción.mp3");
        assert_eq!(s.cursor, 11);
        s.cursor = 7;
        s.delete_back();
        assert_eq!(s.media_path, "canció.mp3");
        assert_eq!(s.cursor, 6);
        s.delete_forward();
        assert_eq!(s.media_path, "canciómp3");
    }

    #[test]
    fn test_paste_flattens_newlines() {
        let mut s = state();
        s.focus = Focus::MediaPath;
        s.insert_text("linea uno\nlinea dos");
        assert_eq!(s.media_path, "linea uno linea dos");
        assert_eq!(s.cursor, 19);
    }

    #[test]
    fn test_typing_ignored_without_text_focus() {
        let mut s = state();
        assert_eq!(s.focus, Focus::Mode);
        s.insert_char('x');
        s.delete_back();
        assert_eq!(s.prompt(), "Haz un chiste con manzanas");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut s = state();
        s.focus = Focus::MediaPath;
        s.media_path = "abc".to_string();
        s.cursor = 0;
        s.cursor_left();
        assert_eq!(s.cursor, 0);
        s.cursor_end();
        assert_eq!(s.cursor, 3);
        s.cursor_right();
        assert_eq!(s.cursor, 3);
        s.cursor_home();
        assert_eq!(s.cursor, 0);
    }

    #[test]
    fn test_files_panel_focus_round_trip() {
        let mut s = state();
        s.focus = Focus::Model;
        s.toggle_files();
        assert!(s.files_open);
        assert_eq!(s.focus, Focus::Files);
        // Tab does nothing while the panel is focused
        s.focus_next();
        assert_eq!(s.focus, Focus::Files);
        s.toggle_files();
        assert!(!s.files_open);
        assert_eq!(s.focus, Focus::Model);
    }

    #[test]
    fn test_screen_switch_under_files_panel() {
        let mut s = state();
        s.toggle_files();
        s.switch_screen();
        assert_eq!(s.focus, Focus::Files);
        s.toggle_files();
        // Leaving the panel lands on the new screen's first field
        assert_eq!(s.focus, Focus::MediaPath);
    }

    #[test]
    fn test_scroll_clamps_to_output() {
        let mut s = state();
        s.set_output("Salida", vec!["a".into(), "b".into(), "c".into()]);
        s.scroll_down(10);
        assert_eq!(s.scroll, 2);
        s.scroll_up(1);
        assert_eq!(s.scroll, 1);
        s.set_output("Salida", Vec::new());
        assert_eq!(s.scroll, 0);
        s.scroll_down(1);
        assert_eq!(s.scroll, 0);
    }

    #[test]
    fn test_file_selection_clamps() {
        let mut s = state();
        s.files = vec![
            ("resultado_20250101_000000.md".into(), "uno".into()),
            ("resultado_20250102_000000.md".into(), "dos".into()),
        ];
        s.file_down();
        s.file_down();
        assert_eq!(s.file_index, 1);
        assert_eq!(s.selected_file_id(), Some("resultado_20250102_000000.md"));
        s.file_up();
        s.file_up();
        assert_eq!(s.file_index, 0);
    }

    #[test]
    fn test_task_artifacts() {
        let transcription = Transcription {
            text: " Hola mundo.".to_string(),
            segments: vec![fab_mod_whisper::Segment {
                start: 0.0,
                end: 1.5,
                text: " Hola mundo.".to_string(),
            }],
            language: Some("es".to_string()),
            duration: None,
        };
        assert_eq!(TranscribeTask::Transcript.output_file_name("charla"), "charla_transcripcion.txt");
        assert_eq!(TranscribeTask::Srt.output_file_name("charla"), "charla.srt");
        assert_eq!(TranscribeTask::Subtitles.output_file_name("charla"), "charla_subtitulos.txt");
        assert_eq!(TranscribeTask::Transcript.build_content(&transcription), " Hola mundo.");
        assert_eq!(
            TranscribeTask::Srt.build_content(&transcription),
            "1\n00:00:00,000 --> 00:00:01,500\nHola mundo.\n\n"
        );
        assert_eq!(TranscribeTask::Subtitles.build_content(&transcription), "Hola mundo.");
    }
}
