//! Markdown-to-PDF rendering with an embedded typst engine.
//!
//! `markup` translates result markdown into typst markup with the fixed
//! header/footer layout; `compiler` turns that markup into PDF bytes without
//! touching the filesystem or the network.

pub mod compiler;
pub mod markup;

pub use compiler::compile_markup;
pub use markup::build_markup;

/// Render result markdown straight to PDF bytes.
pub fn render_markdown(markdown: &str) -> Result<Vec<u8>, String> {
    compile_markup(&build_markup(markdown))
}
