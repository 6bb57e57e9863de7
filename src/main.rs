mod app;
mod state;
mod ui;

use std::io;
use std::path::{Path, PathBuf};

use crossterm::{
    ExecutableCommand,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use fab_base::config::AppConfig;
use fab_base::constants::{APP_DIR, ERRORS_DIR};
use fab_mod_whisper::TranscriptionStats;

use app::App;
use state::TranscribeTask;

fn main() -> io::Result<()> {
    // .env carries API keys that the spawned fabric/whisper processes inherit
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().collect();

    // Handle render subcommand (markdown → PDF without the TUI)
    if args.len() >= 2 && args[1] == "render" {
        return run_render(&args[2..]);
    }

    // Handle transcribe subcommand (headless whisper run)
    if args.len() >= 2 && args[1] == "transcribe" {
        return run_transcribe(&args[2..]);
    }

    // Panic hook: restore terminal state and log the panic to disk.
    // Without this, a panic leaves the terminal in raw mode + alternate screen,
    // which corrupts the session and the error is lost.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(DisableBracketedPaste);
        let _ = io::stdout().execute(LeaveAlternateScreen);

        let error_dir = Path::new(APP_DIR).join(ERRORS_DIR);
        let _ = std::fs::create_dir_all(&error_dir);
        let ts = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let backtrace = std::backtrace::Backtrace::force_capture();
        let msg = format!("[{}] {}\n\n{}\n\n---\n", ts, info, backtrace);
        let log_path = error_dir.join("panic.log");
        let _ = std::fs::OpenOptions::new().create(true).append(true).open(&log_path).and_then(|mut f| {
            use std::io::Write;
            f.write_all(msg.as_bytes())
        });

        default_hook(info);
    }));

    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    io::stdout().execute(EnableBracketedPaste)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

    let mut app = App::new(AppConfig::load());
    app.run(&mut terminal)?;

    // Cleanup
    disable_raw_mode()?;
    io::stdout().execute(DisableBracketedPaste)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the render subcommand: convert a saved markdown result to PDF.
/// Usage: fabrica render <archivo.md> [--output <salida.pdf>]
fn run_render(args: &[String]) -> io::Result<()> {
    if args.is_empty() {
        eprintln!("Uso: fabrica render <archivo.md> [--output <salida.pdf>]");
        std::process::exit(1);
    }

    let source = PathBuf::from(&args[0]);
    let mut output: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--output" | "-o" if i + 1 < args.len() => {
                output = Some(args[i + 1].clone());
                i += 2;
            }
            _ => {
                eprintln!("Argumento desconocido: {}", args[i]);
                std::process::exit(1);
            }
        }
    }

    let target = output.map(PathBuf::from).unwrap_or_else(|| source.with_extension("pdf"));

    let markdown = match std::fs::read_to_string(&source) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("No se pudo leer {}: {}", source.display(), e);
            std::process::exit(1);
        }
    };

    match fab_mod_pdf::render_markdown(&markdown) {
        Ok(bytes) => {
            if let Err(e) = std::fs::write(&target, bytes) {
                eprintln!("No se pudo escribir {}: {}", target.display(), e);
                std::process::exit(1);
            }
            println!("PDF generado: {}", target.display());
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }
}

/// Run the transcribe subcommand: whisper on a media file without the TUI.
/// Usage: fabrica transcribe <medio> [--model <tamaño>] [--srt|--txt]
fn run_transcribe(args: &[String]) -> io::Result<()> {
    if args.is_empty() {
        eprintln!("Uso: fabrica transcribe <medio> [--model <tamaño>] [--srt|--txt]");
        std::process::exit(1);
    }

    let config = AppConfig::load();
    let media = PathBuf::from(&args[0]);
    let mut model: Option<String> = None;
    let mut task = TranscribeTask::Transcript;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--model" if i + 1 < args.len() => {
                model = Some(args[i + 1].clone());
                i += 2;
            }
            "--srt" => {
                task = TranscribeTask::Srt;
                i += 1;
            }
            "--txt" => {
                task = TranscribeTask::Subtitles;
                i += 1;
            }
            _ => {
                eprintln!("Argumento desconocido: {}", args[i]);
                std::process::exit(1);
            }
        }
    }

    let model = model.unwrap_or_else(|| default_whisper_model(&config));
    let stem = match media.file_stem().and_then(|s| s.to_str()) {
        Some(stem) => stem.to_string(),
        None => {
            eprintln!("El archivo '{}' no tiene nombre utilizable", media.display());
            std::process::exit(1);
        }
    };

    let started = std::time::Instant::now();
    let transcription =
        match fab_mod_whisper::transcribe(&config.whisper_bin, &media, &model, &config.language) {
            Ok(transcription) => transcription,
            Err(err) => {
                eprintln!("{}", err);
                std::process::exit(1);
            }
        };

    let content = task.build_content(&transcription);
    let target = media.with_file_name(task.output_file_name(&stem));
    if let Err(e) = std::fs::write(&target, &content) {
        eprintln!("No se pudo escribir {}: {}", target.display(), e);
        std::process::exit(1);
    }

    let stats = TranscriptionStats {
        elapsed_secs: started.elapsed().as_secs_f64(),
        input_bytes: std::fs::metadata(&media).map(|m| m.len()).unwrap_or(0),
        output_bytes: std::fs::metadata(&target).map(|m| m.len()).unwrap_or(0),
        output_lines: content.lines().count(),
        duration_secs: transcription.duration,
    };

    println!("Archivo generado: {}", target.display());
    for line in stats.lines() {
        println!("{}", line);
    }
    Ok(())
}

/// Model used when `--model` is not given: prefer "base" from the configured
/// list, then the first entry.
fn default_whisper_model(config: &AppConfig) -> String {
    config
        .whisper_models
        .iter()
        .find(|m| m.as_str() == "base")
        .or_else(|| config.whisper_models.first())
        .cloned()
        .unwrap_or_else(|| "base".to_string())
}
