//! Builds the command lines handed to `bash -c`.
//!
//! Free text gets shell-quoted before interpolation. URLs (YouTube and web)
//! are wrapped in plain single quotes without escaping, matching the trust
//! model for user-supplied URLs: a URL containing a single quote breaks the
//! command rather than being smuggled through.

use std::fmt;

/// Where the content to process comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Free text, piped into fabric through `echo`.
    Texto,
    /// YouTube video URL, passed via `fabric -y`.
    YouTube,
    /// Web page URL, passed via `fabric -u`.
    Url,
}

impl InputMode {
    pub const ALL: [InputMode; 3] = [InputMode::Texto, InputMode::YouTube, InputMode::Url];

    pub fn label(&self) -> &'static str {
        match self {
            InputMode::Texto => "Texto",
            InputMode::YouTube => "YouTube",
            InputMode::Url => "URL",
        }
    }
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One fabric invocation: the user's input plus the picked pattern and model.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub mode: InputMode,
    /// Free text in Texto mode, a URL otherwise.
    pub prompt: String,
    /// Fabric pattern name, e.g. "summarize".
    pub pattern: String,
    /// Model entry as picked, possibly still carrying a "[n] " prefix.
    pub model: String,
}

/// Strip a bracketed index prefix ("[2] gpt-4o" -> "gpt-4o") from a model
/// entry. Entries without the prefix pass through unchanged.
pub fn normalize_model(model: &str) -> &str {
    match model.split_once("] ") {
        Some((_, name)) => name,
        None => model,
    }
}

/// Build the command line for a request.
///
/// Fails only when Texto input cannot be shell-quoted (embedded NUL byte).
pub fn build_command(req: &GenerationRequest, fabric_bin: &str, language: &str) -> Result<String, String> {
    let model = normalize_model(&req.model);
    match req.mode {
        InputMode::Texto => {
            let safe_prompt = shlex::try_quote(&req.prompt)
                .map_err(|_| "El texto contiene un byte nulo y no puede pasarse al shell".to_string())?;
            Ok(format!(
                "echo {} | {} --pattern {} --model {} --language={}",
                safe_prompt, fabric_bin, req.pattern, model, language
            ))
        }
        InputMode::YouTube => Ok(format!(
            "{} -y '{}' --pattern {} --model {} --language={}",
            fabric_bin, req.prompt, req.pattern, model, language
        )),
        InputMode::Url => Ok(format!(
            "{} -u '{}' --pattern {} --model {} --language={}",
            fabric_bin, req.prompt, req.pattern, model, language
        )),
    }
}
