//! Media transcription through an external Whisper CLI.
//!
//! `engine` drives the subprocess and parses its JSON output; `subtitles`
//! turns the timed segments into SRT and plain-text subtitle formats;
//! `stats` formats the numbers shown after a run.

pub mod engine;
pub mod stats;
pub mod subtitles;

pub use engine::{Segment, Transcription, srt_file_name, subtitles_file_name, transcribe, transcript_file_name};
pub use stats::TranscriptionStats;
pub use subtitles::{build_srt, build_transcript_lines, format_timestamp};
