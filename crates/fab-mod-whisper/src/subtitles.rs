//! Subtitle formats built from timed segments.

use crate::engine::Segment;

/// SRT timestamp: `HH:MM:SS,mmm`, truncating (not rounding) each component.
pub fn format_timestamp(seconds: f64) -> String {
    let hours = (seconds / 3600.0) as u64;
    let minutes = ((seconds % 3600.0) / 60.0) as u64;
    let secs = (seconds % 60.0) as u64;
    let millis = (seconds.fract() * 1000.0) as u64;
    format!("{:02}:{:02}:{:02},{:03}", hours, minutes, secs, millis)
}

/// SRT document: blocks of `index`, `start --> end`, trimmed text, blank line.
/// Indices start at 1.
pub fn build_srt(segments: &[Segment]) -> String {
    let mut out = String::new();
    for (i, segment) in segments.iter().enumerate() {
        out.push_str(&format!(
            "{}\n{} --> {}\n{}\n\n",
            i + 1,
            format_timestamp(segment.start),
            format_timestamp(segment.end),
            segment.text.trim()
        ));
    }
    out
}

/// Plain-text subtitles: one trimmed segment text per line.
pub fn build_transcript_lines(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.trim()).collect::<Vec<_>>().join("\n")
}
