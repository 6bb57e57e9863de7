use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, Local};
use regex::Regex;

/// Returned by `describe` when a result has no RESUMEN/IDEAS section.
pub const DESCRIPTION_FALLBACK: &str = "No se encontró descripción";

static DESCRIPTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)# RESUMEN\s*(.*?)\s*# IDEAS").expect("invalid description regex"));

/// File name for a result saved at the given local time.
///
/// Second resolution only: two saves within the same second map to the same
/// name and the later one overwrites the earlier.
pub fn timestamp_name(t: DateTime<Local>) -> String {
    format!("resultado_{}.md", t.format("%Y%m%d_%H%M%S"))
}

/// Short description of a result: the text between the `# RESUMEN` and
/// `# IDEAS` markers, or a fixed fallback when the markers are absent.
pub fn describe_content(content: &str) -> String {
    match DESCRIPTION_RE.captures(content).and_then(|c| c.get(1)) {
        Some(m) => m.as_str().trim().to_string(),
        None => DESCRIPTION_FALLBACK.to_string(),
    }
}

/// A flat directory of result documents. Ids are markdown file names.
#[derive(Debug, Clone)]
pub struct ResultStore {
    dir: PathBuf,
}

impl ResultStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn markdown_path(&self, id: &str) -> PathBuf {
        self.dir.join(id)
    }

    pub fn pdf_path(&self, id: &str) -> PathBuf {
        self.dir.join(id).with_extension("pdf")
    }

    /// Write a new result and return its id. Creates the directory on first
    /// use.
    pub fn save(&self, content: &str) -> io::Result<String> {
        fs::create_dir_all(&self.dir)?;
        let name = timestamp_name(Local::now());
        fs::write(self.dir.join(&name), content)?;
        Ok(name)
    }

    /// Markdown ids in directory enumeration order. The order is whatever the
    /// filesystem yields; callers that want chronological order sort by name.
    /// A missing directory lists as empty.
    pub fn list(&self) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = fs::read_dir(&self.dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|e| e == "md")
                    && let Some(name) = path.file_name().and_then(|s| s.to_str())
                {
                    names.push(name.to_string());
                }
            }
        }
        names
    }

    pub fn read(&self, id: &str) -> io::Result<String> {
        fs::read_to_string(self.markdown_path(id))
    }

    pub fn describe(&self, id: &str) -> io::Result<String> {
        Ok(describe_content(&self.read(id)?))
    }

    /// Render the markdown to its PDF sibling, overwriting any previous
    /// render, and return the PDF path.
    pub fn render_pdf(&self, id: &str) -> Result<PathBuf, String> {
        let md_path = self.markdown_path(id);
        let content = fs::read_to_string(&md_path).map_err(|e| format!("read {}: {}", md_path.display(), e))?;
        let pdf_bytes = fab_mod_pdf::render_markdown(&content)?;
        let pdf_path = self.pdf_path(id);
        fs::write(&pdf_path, &pdf_bytes).map_err(|e| format!("write {}: {}", pdf_path.display(), e))?;
        Ok(pdf_path)
    }

    /// Remove a result's markdown and, if present, its PDF sibling.
    pub fn delete(&self, id: &str) -> io::Result<()> {
        fs::remove_file(self.markdown_path(id))?;
        let pdf = self.pdf_path(id);
        if pdf.exists() {
            fs::remove_file(&pdf)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn store() -> (tempfile::TempDir, ResultStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::new(dir.path().join("resultados"));
        (dir, store)
    }

    #[test]
    fn test_timestamp_name_format() {
        let t = Local.with_ymd_and_hms(2025, 3, 9, 14, 5, 9).unwrap();
        assert_eq!(timestamp_name(t), "resultado_20250309_140509.md");
    }

    #[test]
    fn test_same_second_maps_to_same_name() {
        let t = Local.with_ymd_and_hms(2025, 3, 9, 14, 5, 9).unwrap();
        assert_eq!(timestamp_name(t), timestamp_name(t));
        let later = Local.with_ymd_and_hms(2025, 3, 9, 14, 5, 10).unwrap();
        assert_ne!(timestamp_name(t), timestamp_name(later));
    }

    #[test]
    fn test_save_creates_dir_and_lists() {
        let (_tmp, store) = store();
        let id = store.save("# Hola\ncontenido").unwrap();
        assert!(id.starts_with("resultado_") && id.ends_with(".md"));
        assert_eq!(store.list(), vec![id.clone()]);
        assert_eq!(store.read(&id).unwrap(), "# Hola\ncontenido");
    }

    #[test]
    fn test_save_overwrites_same_name() {
        let (_tmp, store) = store();
        let id = store.save("primero").unwrap();
        // A second save in the same second reuses the name; simulate one.
        fs::write(store.markdown_path(&id), "segundo").unwrap();
        assert_eq!(store.list().len(), 1);
        assert_eq!(store.read(&id).unwrap(), "segundo");
    }

    #[test]
    fn test_list_missing_dir_is_empty() {
        let (_tmp, store) = store();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_list_ignores_other_files() {
        let (_tmp, store) = store();
        let id = store.save("x").unwrap();
        fs::write(store.dir().join("notas.txt"), "no").unwrap();
        fs::write(store.dir().join(id.replace(".md", ".pdf")), "no").unwrap();
        assert_eq!(store.list(), vec![id]);
    }

    #[test]
    fn test_describe_extracts_between_markers() {
        let content = "# RESUMEN\n\nUn resumen breve.\n\n# IDEAS\n- una\n- dos\n";
        assert_eq!(describe_content(content), "Un resumen breve.");
        // Text before the first marker is ignored
        let content = "intro\n# RESUMEN\nEl resumen\n# IDEAS\nmás";
        assert_eq!(describe_content(content), "El resumen");
    }

    #[test]
    fn test_describe_spans_lines() {
        let content = "# RESUMEN\nlinea uno\nlinea dos\n# IDEAS\n";
        assert_eq!(describe_content(content), "linea uno\nlinea dos");
    }

    #[test]
    fn test_describe_takes_first_match() {
        let content = "# RESUMEN\na\n# IDEAS\n# RESUMEN\nb\n# IDEAS\n";
        assert_eq!(describe_content(content), "a");
    }

    #[test]
    fn test_describe_fallback_without_markers() {
        assert_eq!(describe_content("# OTRA COSA\ntexto"), DESCRIPTION_FALLBACK);
        assert_eq!(describe_content("# RESUMEN\nsolo resumen"), DESCRIPTION_FALLBACK);
        assert_eq!(describe_content(""), DESCRIPTION_FALLBACK);
    }

    #[test]
    fn test_describe_is_idempotent() {
        let (_tmp, store) = store();
        let id = store.save("# RESUMEN\nestable\n# IDEAS\n").unwrap();
        let first = store.describe(&id).unwrap();
        let second = store.describe(&id).unwrap();
        assert_eq!(first, "estable");
        assert_eq!(first, second);
        // Describing never mutates the file.
        assert_eq!(store.read(&id).unwrap(), "# RESUMEN\nestable\n# IDEAS\n");
    }

    #[test]
    fn test_render_pdf_writes_sibling() {
        let (_tmp, store) = store();
        let id = store.save("# RESUMEN\nalgo\n# IDEAS\nidea").unwrap();
        let pdf_path = store.render_pdf(&id).unwrap();
        assert_eq!(pdf_path, store.pdf_path(&id));
        let bytes = fs::read(&pdf_path).unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn test_render_pdf_is_reproducible() {
        let (_tmp, store) = store();
        let id = store.save("# Título\n\ncuerpo áéñ").unwrap();
        let first = fs::read(store.render_pdf(&id).unwrap()).unwrap();
        let second = fs::read(store.render_pdf(&id).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_pdf_missing_id() {
        let (_tmp, store) = store();
        let err = store.render_pdf("resultado_no_existe.md").unwrap_err();
        assert!(err.starts_with("read "), "got: {}", err);
    }

    #[test]
    fn test_delete_removes_both_files() {
        let (_tmp, store) = store();
        let id = store.save("# RESUMEN\nx\n# IDEAS\n").unwrap();
        store.render_pdf(&id).unwrap();
        store.delete(&id).unwrap();
        assert!(store.list().is_empty());
        assert!(!store.pdf_path(&id).exists());
    }

    #[test]
    fn test_delete_without_pdf_is_fine() {
        let (_tmp, store) = store();
        let id = store.save("sin pdf").unwrap();
        store.delete(&id).unwrap();
        assert!(store.list().is_empty());
    }

    #[test]
    fn test_delete_missing_id_errors() {
        let (_tmp, store) = store();
        store.save("algo").unwrap();
        let err = store.delete("resultado_00000000_000000.md").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
