//! Runs the Whisper CLI and parses its JSON result.
//!
//! The CLI is invoked with `--output_format json --output_dir <tmp>`; the
//! JSON file it drops there is read back, parsed, and removed. Transcription
//! is blocking and has no deadline: big files on big models take minutes.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use fab_base::process;

/// One timed segment of a transcription.
#[derive(Debug, Clone, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub text: String,
}

/// Parsed Whisper output. Unknown JSON fields are ignored; `duration` is
/// absent in most Whisper builds, so the stat that shows it is optional.
#[derive(Debug, Clone, Deserialize)]
pub struct Transcription {
    pub text: String,
    #[serde(default)]
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub duration: Option<f64>,
}

/// Transcribe a media file. `model` is a Whisper size ("tiny".."large").
pub fn transcribe(whisper_bin: &str, media: &Path, model: &str, language: &str) -> Result<Transcription, String> {
    let out_dir = std::env::temp_dir().join(format!("fabrica_whisper_{}", std::process::id()));
    fs::create_dir_all(&out_dir).map_err(|e| format!("mkdir {}: {}", out_dir.display(), e))?;

    let args: Vec<&OsStr> = vec![
        media.as_os_str(),
        OsStr::new("--model"),
        OsStr::new(model),
        OsStr::new("--language"),
        OsStr::new(language),
        OsStr::new("--output_format"),
        OsStr::new("json"),
        OsStr::new("--output_dir"),
        out_dir.as_os_str(),
    ];
    let out = process::run_program(whisper_bin, args).map_err(|e| process::spawn_error_message(whisper_bin, &e))?;
    if !out.success() {
        let detail = if out.stderr.trim().is_empty() {
            format!("código de salida {}", out.code.unwrap_or(-1))
        } else {
            out.stderr.trim().to_string()
        };
        return Err(format!("whisper falló: {}", detail));
    }

    let json_path = json_output_path(&out_dir, media)?;
    let raw = fs::read_to_string(&json_path).map_err(|e| format!("read {}: {}", json_path.display(), e))?;
    let transcription =
        serde_json::from_str(&raw).map_err(|e| format!("salida JSON de whisper inválida: {}", e))?;
    let _ = fs::remove_file(&json_path);
    Ok(transcription)
}

/// Where the CLI writes its JSON for a given input: `<out_dir>/<stem>.json`.
fn json_output_path(out_dir: &Path, media: &Path) -> Result<PathBuf, String> {
    let stem = media
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("el archivo '{}' no tiene nombre utilizable", media.display()))?;
    Ok(out_dir.join(format!("{}.json", stem)))
}

/// Output file name for the plain transcript of `stem`.
pub fn transcript_file_name(stem: &str) -> String {
    format!("{}_transcripcion.txt", stem)
}

/// Output file name for the SRT subtitles of `stem`.
pub fn srt_file_name(stem: &str) -> String {
    format!("{}.srt", stem)
}

/// Output file name for the plain-text subtitles of `stem`.
pub fn subtitles_file_name(stem: &str) -> String {
    format!("{}_subtitulos.txt", stem)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_whisper_json() {
        let raw = r#"{
            "text": " Hola mundo. Segunda frase.",
            "segments": [
                {"id": 0, "seek": 0, "start": 0.0, "end": 2.5, "text": " Hola mundo.",
                 "tokens": [1, 2], "temperature": 0.0, "avg_logprob": -0.3,
                 "compression_ratio": 1.1, "no_speech_prob": 0.01},
                {"id": 1, "seek": 200, "start": 2.5, "end": 5.0, "text": " Segunda frase.",
                 "tokens": [3], "temperature": 0.0, "avg_logprob": -0.2,
                 "compression_ratio": 1.0, "no_speech_prob": 0.02}
            ],
            "language": "es"
        }"#;
        let t: Transcription = serde_json::from_str(raw).unwrap();
        assert_eq!(t.text, " Hola mundo. Segunda frase.");
        assert_eq!(t.segments.len(), 2);
        assert_eq!(t.segments[1].start, 2.5);
        assert_eq!(t.language.as_deref(), Some("es"));
        assert!(t.duration.is_none());
    }

    #[test]
    fn test_parse_minimal_json() {
        let t: Transcription = serde_json::from_str(r#"{"text": "hola"}"#).unwrap();
        assert_eq!(t.text, "hola");
        assert!(t.segments.is_empty());
        assert!(t.language.is_none());
    }

    #[test]
    fn test_parse_duration_when_present() {
        let t: Transcription =
            serde_json::from_str(r#"{"text": "x", "duration": 12.75, "segments": []}"#).unwrap();
        assert_eq!(t.duration, Some(12.75));
    }

    #[test]
    fn test_json_output_path_uses_stem() {
        let out = json_output_path(Path::new("/tmp/w"), Path::new("/media/charla.mp4")).unwrap();
        assert_eq!(out, PathBuf::from("/tmp/w/charla.json"));
        let out = json_output_path(Path::new("/tmp/w"), Path::new("audio")).unwrap();
        assert_eq!(out, PathBuf::from("/tmp/w/audio.json"));
    }

    #[test]
    fn test_output_file_names() {
        assert_eq!(transcript_file_name("charla"), "charla_transcripcion.txt");
        assert_eq!(srt_file_name("charla"), "charla.srt");
        assert_eq!(subtitles_file_name("charla"), "charla_subtitulos.txt");
    }

    #[test]
    fn test_transcribe_missing_binary() {
        let err = transcribe("fabrica-no-such-whisper", Path::new("a.mp3"), "base", "es").unwrap_err();
        assert!(err.contains("No se encontró"), "got: {}", err);
    }
}
