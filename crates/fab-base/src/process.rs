//! Blocking subprocess execution for the external tools fabrica drives.
//!
//! Everything here runs synchronously and without a deadline: a fabric call
//! against a slow model can take minutes, and the caller waits for it.

use std::io;
use std::process::{Command, Stdio};

/// Captured output of a finished subprocess.
#[derive(Debug, Clone)]
pub struct ShellOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code, None if the process was killed by a signal.
    pub code: Option<i32>,
}

impl ShellOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Run a full command line through `bash -c` and wait for it to finish.
pub fn run_shell(command_line: &str) -> io::Result<ShellOutput> {
    let mut cmd = Command::new("bash");
    cmd.arg("-c").arg(command_line);
    run(cmd)
}

/// Run a program with explicit arguments, bypassing the shell.
pub fn run_program<I, S>(program: &str, args: I) -> io::Result<ShellOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    let mut cmd = Command::new(program);
    cmd.args(args);
    run(cmd)
}

fn run(mut cmd: Command) -> io::Result<ShellOutput> {
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped()).stdin(Stdio::null());
    let output = cmd.spawn()?.wait_with_output()?;
    Ok(ShellOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        code: output.status.code(),
    })
}

/// Human-readable message for a spawn failure, special-casing a missing binary.
pub fn spawn_error_message(program: &str, err: &io::Error) -> String {
    if err.kind() == io::ErrorKind::NotFound {
        format!("No se encontró el ejecutable '{}'. ¿Está instalado y en el PATH?", program)
    } else {
        format!("No se pudo ejecutar '{}': {}", program, err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_shell_captures_stdout() {
        let out = run_shell("echo hola").unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hola");
        assert!(out.stderr.is_empty());
    }

    #[test]
    fn test_run_shell_captures_stderr_and_code() {
        let out = run_shell("echo fallo >&2; exit 3").unwrap();
        assert!(!out.success());
        assert_eq!(out.code, Some(3));
        assert_eq!(out.stderr.trim(), "fallo");
    }

    #[test]
    fn test_run_shell_pipeline() {
        let out = run_shell("printf 'a\\nb\\nc\\n' | wc -l").unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "3");
    }

    #[test]
    fn test_run_program_no_shell_interpretation() {
        // The argument reaches the program verbatim, $HOME included.
        let out = run_program("echo", ["$HOME"]).unwrap();
        assert_eq!(out.stdout.trim(), "$HOME");
    }

    #[test]
    fn test_run_program_missing_binary() {
        let err = run_program("fabrica-no-such-binary", ["x"]).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        let msg = spawn_error_message("fabrica-no-such-binary", &err);
        assert!(msg.contains("No se encontró"));
    }
}
