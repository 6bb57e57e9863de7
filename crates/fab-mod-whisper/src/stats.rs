//! Formats the statistics block shown after a transcription run.

/// Elapsed seconds in three units: "2.50 s | 0.04 min | 0.00 h".
pub fn format_time(seconds: f64) -> String {
    format!("{:.2} s | {:.2} min | {:.2} h", seconds, seconds / 60.0, seconds / 3600.0)
}

/// Byte size in four units: "2048 bytes | 2.00 KB | 0.00 MB | 0.0000 GB".
pub fn format_size(bytes: u64) -> String {
    let kb = bytes as f64 / 1024.0;
    let mb = kb / 1024.0;
    let gb = mb / 1024.0;
    format!("{:.0} bytes | {:.2} KB | {:.2} MB | {:.4} GB", bytes as f64, kb, mb, gb)
}

/// Numbers collected around one transcription run.
#[derive(Debug, Clone)]
pub struct TranscriptionStats {
    pub elapsed_secs: f64,
    pub input_bytes: u64,
    pub output_bytes: u64,
    pub output_lines: usize,
    /// Media duration if the Whisper build reported one.
    pub duration_secs: Option<f64>,
}

impl TranscriptionStats {
    /// One display line per stat; the duration line only when known.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Tiempo de procesamiento: {}", format_time(self.elapsed_secs)),
            format!("Peso del archivo de entrada: {}", format_size(self.input_bytes)),
            format!("Tamaño del archivo de salida: {}", format_size(self.output_bytes)),
            format!("Cantidad de líneas: {}", self.output_lines),
        ];
        if let Some(duration) = self.duration_secs {
            lines.push(format!("Duración del audio/video: {}", format_time(duration)));
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_time_units() {
        assert_eq!(format_time(7200.0), "7200.00 s | 120.00 min | 2.00 h");
        assert_eq!(format_time(6.0), "6.00 s | 0.10 min | 0.00 h");
    }

    #[test]
    fn test_format_size_units() {
        assert_eq!(format_size(1_048_576), "1048576 bytes | 1024.00 KB | 1.00 MB | 0.0010 GB");
        assert_eq!(format_size(0), "0 bytes | 0.00 KB | 0.00 MB | 0.0000 GB");
    }

    #[test]
    fn test_lines_without_duration() {
        let stats = TranscriptionStats {
            elapsed_secs: 6.0,
            input_bytes: 2048,
            output_bytes: 512,
            output_lines: 10,
            duration_secs: None,
        };
        let lines = stats.lines();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("Tiempo de procesamiento: 6.00 s"));
        assert_eq!(lines[3], "Cantidad de líneas: 10");
    }

    #[test]
    fn test_lines_with_duration() {
        let stats = TranscriptionStats {
            elapsed_secs: 6.0,
            input_bytes: 2048,
            output_bytes: 512,
            output_lines: 10,
            duration_secs: Some(7200.0),
        };
        let lines = stats.lines();
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[4], "Duración del audio/video: 7200.00 s | 120.00 min | 2.00 h");
    }
}
