//! Translates result markdown into typst markup with the fixed page layout.
//!
//! The translation is line-oriented: `# ` and `## ` prefixes become bold
//! headings, blank lines become vertical space, everything else is 12pt body
//! text. Content always passes through typst string literals, never through
//! markup, so nothing in a result can inject typst code. Text is first forced
//! into the Latin-1 repertoire; characters outside it are replaced with `?`.

/// Caption printed centered in every page header.
pub const HEADER_CAPTION: &str = "Generado por Fabric AI";

/// Replace every character outside the Latin-1 repertoire with `?`.
pub fn latin1_lossy(text: &str) -> String {
    text.chars().map(|c| if (c as u32) <= 0xFF { c } else { '?' }).collect()
}

/// Escape a string for a typst string literal. Control characters other than
/// tab use `\u{..}` escapes so they can never terminate the literal.
fn escape_str(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            c if c.is_control() && c != '\t' => {
                out.push_str(&format!("\\u{{{:x}}}", c as u32));
            }
            c => out.push(c),
        }
    }
    out
}

/// Build the complete typst document for a piece of result markdown.
pub fn build_markup(markdown: &str) -> String {
    let mut out = String::with_capacity(markdown.len() + 512);
    out.push_str("#set page(\n");
    out.push_str("  paper: \"a4\",\n");
    out.push_str("  margin: (top: 3cm, bottom: 2.5cm, left: 2.5cm, right: 2.5cm),\n");
    out.push_str("  header: align(center, text(size: 12pt, weight: \"bold\", \"");
    out.push_str(&escape_str(HEADER_CAPTION));
    out.push_str("\")),\n");
    out.push_str("  footer: align(center, text(size: 8pt, style: \"italic\")[Página #context counter(page).display()]),\n");
    out.push_str(")\n");
    out.push_str("#set text(size: 12pt)\n");
    out.push_str("#set par(leading: 0.65em)\n");
    out.push_str("#set block(spacing: 0.65em)\n\n");

    for line in markdown.split('\n') {
        let line = latin1_lossy(line);
        if let Some(title) = line.strip_prefix("# ") {
            out.push_str("#block(text(size: 16pt, weight: \"bold\", \"");
            out.push_str(&escape_str(title));
            out.push_str("\"))\n");
        } else if let Some(title) = line.strip_prefix("## ") {
            out.push_str("#block(text(size: 14pt, weight: \"bold\", \"");
            out.push_str(&escape_str(title));
            out.push_str("\"))\n");
        } else if line.is_empty() {
            out.push_str("#v(5mm)\n");
        } else {
            out.push_str("#block(text(size: 12pt, \"");
            out.push_str(&escape_str(&line));
            out.push_str("\"))\n");
        }
    }
    out
}
