//! In-memory typst compilation for result PDFs.
//!
//! Implements a minimal `typst::World` for compiling generated markup to PDF.
//! The whole document lives in memory: one synthetic main source, no project
//! root, no file or network access, and only the fonts embedded at compile
//! time. That keeps rendering deterministic: the same markup always yields
//! byte-identical PDF output.

use std::sync::LazyLock;

use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::layout::PagedDocument;
use typst::syntax::{FileId, Source, VirtualPath};
use typst::text::{Font, FontBook, FontInfo};
use typst::utils::LazyHash;
use typst::{Library, World};

/// Compile typst markup to PDF bytes, or a readable compile error.
pub fn compile_markup(markup: &str) -> Result<Vec<u8>, String> {
    let world = RenderWorld::new(markup);
    let result = typst::compile::<PagedDocument>(&world);

    let warnings: Vec<String> = result.warnings.iter().map(|w| format!("warning: {}", w.message)).collect();

    let compiled = match result.output {
        Ok(document) => {
            typst_pdf::pdf(&document, &typst_pdf::PdfOptions::default()).map_err(|errors| {
                let mut msg = String::new();
                for diag in errors.iter() {
                    msg.push_str(&format!("pdf error: {}\n", diag.message));
                }
                msg
            })
        }
        Err(errors) => {
            let mut msg = String::new();
            for diag in errors.iter() {
                msg.push_str(&format!("error: {}\n", diag.message));
                for hint in &diag.hints {
                    msg.push_str(&format!("  hint: {}\n", hint));
                }
            }
            if !warnings.is_empty() {
                msg.push_str(&warnings.join("\n"));
                msg.push('\n');
            }
            Err(msg)
        }
    };

    // Typst memoizes across calls; cap the cache so a long session doesn't
    // accumulate every document ever rendered.
    comemo::evict(10);

    compiled
}

static LIBRARY: LazyLock<LazyHash<Library>> = LazyLock::new(|| LazyHash::new(Library::default()));

struct EmbeddedFonts {
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
}

/// Fonts shipped inside the binary. No system font discovery: results must
/// render the same on every machine.
static FONTS: LazyLock<EmbeddedFonts> = LazyLock::new(|| {
    let mut book = FontBook::new();
    let mut fonts = Vec::new();
    for data in typst_assets::fonts() {
        let bytes = Bytes::new(data);
        for (i, info) in FontInfo::iter(&bytes).enumerate() {
            book.push(info);
            if let Some(font) = Font::new(bytes.clone(), i as u32) {
                fonts.push(font);
            }
        }
    }
    EmbeddedFonts { book: LazyHash::new(book), fonts }
});

/// In-memory World: a single main source and nothing else.
struct RenderWorld {
    source: Source,
}

impl RenderWorld {
    fn new(markup: &str) -> Self {
        let id = FileId::new(None, VirtualPath::new("/render.typ"));
        Self { source: Source::new(id, markup.to_string()) }
    }
}

impl World for RenderWorld {
    fn library(&self) -> &LazyHash<Library> {
        &LIBRARY
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &FONTS.book
    }

    fn main(&self) -> FileId {
        self.source.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.source.id() {
            Ok(self.source.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().to_path_buf()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        // Generated markup never imports files.
        Err(FileError::NotFound(id.vpath().as_rootless_path().to_path_buf()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        FONTS.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        // No clock: rendering must not depend on when it runs.
        None
    }
}
