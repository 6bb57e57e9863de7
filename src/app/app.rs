use std::io;
use std::time::{Duration, Instant};

use crossterm::event;
use ratatui::prelude::*;

use fab_base::config::AppConfig;
use fab_base::process;
use fab_mod_fabric::{GenerationRequest, build_command, catalog};
use fab_mod_results::{DESCRIPTION_FALLBACK, ResultStore};
use fab_mod_whisper::TranscriptionStats;

use crate::app::actions::Action;
use crate::app::events::handle_event;
use crate::state::{Screen, State, Tone};
use crate::ui;

pub struct App {
    pub state: State,
    config: AppConfig,
    store: ResultStore,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        let store = ResultStore::new(config.results_dir.clone());
        let state = State::new(&config);
        Self { state, config, store }
    }

    /// Blocking event loop: draw when something changed, then wait for the
    /// next terminal event. External tools run inline and freeze the UI by
    /// design; a busy frame is drawn before each of those calls.
    pub fn run(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        self.refresh_files();
        self.refresh_catalog();

        loop {
            if self.state.dirty {
                terminal.draw(|frame| ui::render(frame, &self.state))?;
                self.state.dirty = false;
            }

            let evt = event::read()?;
            let Some(action) = handle_event(&evt, &self.state) else {
                break; // User quit
            };
            self.handle_action(terminal, action)?;
            self.state.dirty = true;
        }

        Ok(())
    }

    fn handle_action(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        action: Action,
    ) -> io::Result<()> {
        match action {
            Action::None => {}
            Action::SwitchScreen => self.state.switch_screen(),
            Action::ToggleFilesPanel => self.state.toggle_files(),
            Action::FocusNext => self.state.focus_next(),
            Action::FocusPrev => self.state.focus_prev(),
            Action::ModePrev => self.state.mode_prev(),
            Action::ModeNext => self.state.mode_next(),
            Action::ModelPrev => self.state.model_prev(),
            Action::ModelNext => self.state.model_next(),
            Action::WhisperModelPrev => self.state.whisper_model_prev(),
            Action::WhisperModelNext => self.state.whisper_model_next(),
            Action::TaskPrev => self.state.task_prev(),
            Action::TaskNext => self.state.task_next(),
            Action::PatternUp(n) => self.state.pattern_up(n),
            Action::PatternDown(n) => self.state.pattern_down(n),
            Action::InsertChar(c) => self.state.insert_char(c),
            Action::PasteText(text) => self.state.insert_text(&text),
            Action::DeleteBack => self.state.delete_back(),
            Action::DeleteForward => self.state.delete_forward(),
            Action::CursorLeft => self.state.cursor_left(),
            Action::CursorRight => self.state.cursor_right(),
            Action::CursorHome => self.state.cursor_home(),
            Action::CursorEnd => self.state.cursor_end(),
            Action::ScrollUp(n) => self.state.scroll_up(n),
            Action::ScrollDown(n) => self.state.scroll_down(n),
            Action::FileUp => self.state.file_up(),
            Action::FileDown => self.state.file_down(),
            Action::RunPrimary => match self.state.screen {
                Screen::Generate => self.generate(terminal)?,
                Screen::Transcribe => self.transcribe(terminal)?,
            },
            Action::PreviewSelected => self.preview_selected(),
            Action::ExportPdfSelected => self.export_selected_pdf(terminal)?,
            Action::DeleteSelected => self.delete_selected(),
            Action::Refresh => {
                self.refresh_files();
                self.draw_busy(terminal, "CATÁLOGO")?;
                self.refresh_catalog();
                self.state.busy = None;
            }
            Action::RefreshFiles => {
                self.refresh_files();
                self.state.set_status(Tone::Info, format!("{} resultados", self.state.files.len()));
            }
        }
        Ok(())
    }

    /// Draw one frame with a busy badge so the user sees why input is dead
    /// while the following blocking call runs.
    fn draw_busy(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        label: &'static str,
    ) -> io::Result<()> {
        self.state.busy = Some(label);
        terminal.draw(|frame| ui::render(frame, &self.state))?;
        Ok(())
    }

    /// Run fabric for the current form: build the command, show it, execute,
    /// and on success persist the markdown plus its PDF sibling.
    fn generate(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        let ttl = Duration::from_secs(self.config.catalog_ttl_secs);
        let stale = match &self.state.catalog {
            Some(catalog) => catalog.is_stale(ttl),
            None => true,
        };
        if stale {
            self.draw_busy(terminal, "CATÁLOGO")?;
            self.refresh_catalog();
            self.state.busy = None;
        }

        let Some(pattern) = self.state.selected_pattern().map(str::to_string) else {
            self.state.set_status(Tone::Error, "No hay patrones disponibles (Ctrl+R reintenta)");
            return Ok(());
        };
        let Some(model) = self.state.selected_model().map(str::to_string) else {
            self.state.set_status(Tone::Error, "No hay modelos configurados");
            return Ok(());
        };
        let prompt = self.state.prompt().to_string();
        if prompt.trim().is_empty() {
            self.state.set_status(Tone::Warn, "La entrada está vacía");
            return Ok(());
        }

        let request = GenerationRequest { mode: self.state.mode, prompt, pattern, model };
        let command = match build_command(&request, &self.config.fabric_bin, &self.config.language) {
            Ok(command) => command,
            Err(message) => {
                self.state.set_status(Tone::Error, message);
                return Ok(());
            }
        };

        self.state.set_output("Salida", vec![format!("$ {}", command), String::new()]);
        self.draw_busy(terminal, "GENERANDO")?;
        let result = process::run_shell(&command);
        self.state.busy = None;

        let out = match result {
            Ok(out) => out,
            Err(e) => {
                self.state.push_output(process::spawn_error_message("bash", &e));
                self.state.set_status(Tone::Error, "No se pudo ejecutar el comando");
                return Ok(());
            }
        };

        if !out.success() {
            for line in out.stderr.lines() {
                self.state.push_output(line);
            }
            self.state
                .set_status(Tone::Error, format!("fabric falló (código {})", out.code.unwrap_or(-1)));
            return Ok(());
        }

        let text = out.stdout;
        if text.trim().is_empty() {
            self.state.set_status(Tone::Warn, "No se generó ningún resultado");
            return Ok(());
        }

        for line in text.lines() {
            self.state.push_output(line);
        }

        let id = match self.store.save(&text) {
            Ok(id) => id,
            Err(e) => {
                self.state.set_status(Tone::Error, format!("No se pudo guardar el resultado: {}", e));
                return Ok(());
            }
        };

        self.draw_busy(terminal, "PDF")?;
        let rendered = self.store.render_pdf(&id);
        self.state.busy = None;
        self.refresh_files();

        self.state.push_output("");
        self.state.push_output(format!("Guardado: {}", self.store.markdown_path(&id).display()));
        match rendered {
            Ok(pdf_path) => {
                self.state.push_output(format!("PDF: {}", pdf_path.display()));
                self.state.set_status(Tone::Success, format!("Resultado guardado: {}", id));
            }
            Err(message) => {
                self.state.push_output(format!("PDF falló: {}", message));
                self.state.set_status(Tone::Warn, format!("Markdown guardado, PDF falló: {}", id));
            }
        }
        Ok(())
    }

    /// Run whisper on the media path and write the artifact the task selector
    /// asks for, then show the stats block.
    fn transcribe(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        let media = self.state.media_path.trim().to_string();
        if media.is_empty() {
            self.state.set_status(Tone::Warn, "Escribe la ruta del archivo a transcribir");
            return Ok(());
        }
        let media_path = std::path::PathBuf::from(&media);
        let Some(model) = self.state.selected_whisper_model().map(str::to_string) else {
            self.state.set_status(Tone::Error, "No hay modelos de whisper configurados");
            return Ok(());
        };
        let Some(stem) = media_path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
            self.state
                .set_status(Tone::Error, format!("El archivo '{}' no tiene nombre utilizable", media));
            return Ok(());
        };

        self.state.set_output(
            "Transcripción",
            vec![format!("Archivo: {}", media), format!("Modelo: {}", model), String::new()],
        );
        self.draw_busy(terminal, "TRANSCRIBIENDO")?;
        let started = Instant::now();
        let result =
            fab_mod_whisper::transcribe(&self.config.whisper_bin, &media_path, &model, &self.config.language);
        let elapsed = started.elapsed().as_secs_f64();
        self.state.busy = None;

        let transcription = match result {
            Ok(transcription) => transcription,
            Err(message) => {
                self.state.push_output(message);
                self.state.set_status(Tone::Error, "La transcripción falló");
                return Ok(());
            }
        };

        let content = self.state.task.build_content(&transcription);
        let target = media_path.with_file_name(self.state.task.output_file_name(&stem));
        if let Err(e) = std::fs::write(&target, &content) {
            self.state.set_status(Tone::Error, format!("write {}: {}", target.display(), e));
            return Ok(());
        }

        let stats = TranscriptionStats {
            elapsed_secs: elapsed,
            input_bytes: std::fs::metadata(&media_path).map(|m| m.len()).unwrap_or(0),
            output_bytes: std::fs::metadata(&target).map(|m| m.len()).unwrap_or(0),
            output_lines: content.lines().count(),
            duration_secs: transcription.duration,
        };

        self.state.push_output(format!("Archivo generado: {}", target.display()));
        self.state.push_output("");
        for line in stats.lines() {
            self.state.push_output(line);
        }
        self.state.set_status(Tone::Success, format!("Transcripción guardada: {}", target.display()));
        Ok(())
    }

    /// Load the selected result into the output panel.
    fn preview_selected(&mut self) {
        let Some(id) = self.state.selected_file_id().map(str::to_string) else {
            return;
        };
        match self.store.read(&id) {
            Ok(content) => {
                let lines = content.lines().map(str::to_string).collect();
                self.state.set_output(format!("Vista previa · {}", id), lines);
            }
            Err(e) => self.state.set_status(Tone::Error, format!("read {}: {}", id, e)),
        }
    }

    /// Re-render the selected result's PDF from its current markdown.
    fn export_selected_pdf(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
        let Some(id) = self.state.selected_file_id().map(str::to_string) else {
            return Ok(());
        };
        self.draw_busy(terminal, "PDF")?;
        let result = self.store.render_pdf(&id);
        self.state.busy = None;
        match result {
            Ok(pdf_path) => {
                self.state.set_status(Tone::Success, format!("PDF generado: {}", pdf_path.display()))
            }
            Err(message) => self.state.set_status(Tone::Error, message),
        }
        Ok(())
    }

    /// Delete the selected result (markdown plus PDF sibling).
    fn delete_selected(&mut self) {
        let Some(id) = self.state.selected_file_id().map(str::to_string) else {
            return;
        };
        match self.store.delete(&id) {
            Ok(()) => {
                self.refresh_files();
                self.state.set_status(Tone::Info, format!("Borrado: {}", id));
            }
            Err(e) => self.state.set_status(Tone::Error, format!("No se pudo borrar {}: {}", id, e)),
        }
    }

    /// Re-list the results directory. Ids embed the save timestamp, so name
    /// order is chronological.
    fn refresh_files(&mut self) {
        let mut ids = self.store.list();
        ids.sort();
        let files: Vec<(String, String)> = ids
            .into_iter()
            .map(|id| {
                let description =
                    self.store.describe(&id).unwrap_or_else(|_| DESCRIPTION_FALLBACK.to_string());
                (id, description)
            })
            .collect();
        if self.state.file_index >= files.len() {
            self.state.file_index = files.len().saturating_sub(1);
        }
        self.state.files = files;
    }

    /// Fetch `fabric -l`. On failure the previous catalog (if any) stays.
    fn refresh_catalog(&mut self) {
        match catalog::fetch(&self.config.fabric_bin) {
            Ok(fetched) => {
                let count = fetched.patterns.len();
                if self.state.pattern_index >= count {
                    self.state.pattern_index = count.saturating_sub(1);
                }
                self.state.catalog = Some(fetched);
                self.state.set_status(Tone::Info, format!("{} patrones disponibles", count));
            }
            Err(message) => self.state.set_status(Tone::Error, message),
        }
    }
}
