//! Output sinks for the rendered migration

use std::io::{self, Write};
use std::process::{Command, Stdio};

use migrant_core::{MigrantError, MigrantResult, OutputSink};

// ============================================================================
// WriterSink
// ============================================================================

/// Writes the migration to any `Write` (stdout in practice)
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    name: &'static str,
    writer: W,
}

impl WriterSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new("stdout", io::stdout())
    }
}

impl<W: Write> WriterSink<W> {
    pub fn new(name: &'static str, writer: W) -> Self {
        Self { name, writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn name(&self) -> &str {
        self.name
    }

    fn emit(&mut self, text: &str) -> MigrantResult<()> {
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        Ok(())
    }
}

// ============================================================================
// ClipboardSink
// ============================================================================

/// Pipes the migration into a clipboard command such as `pbcopy`
///
/// The command line is split on whitespace; the first word is the
/// program, the rest its arguments (`xclip -selection clipboard`).
#[derive(Debug, Clone)]
pub struct ClipboardSink {
    command: String,
}

impl ClipboardSink {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    fn error(&self, message: impl Into<String>) -> MigrantError {
        MigrantError::Clipboard {
            command: self.command.clone(),
            message: message.into(),
        }
    }
}

impl OutputSink for ClipboardSink {
    fn name(&self) -> &str {
        "clipboard"
    }

    fn emit(&mut self, text: &str) -> MigrantResult<()> {
        let mut words = self.command.split_whitespace();
        let program = words.next().ok_or_else(|| self.error("empty command"))?;

        let mut child = Command::new(program)
            .args(words)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| self.error(e.to_string()))?;

        if let Some(mut stdin) = child.stdin.take() {
            // a command that exits early is judged by its status below
            match stdin.write_all(text.as_bytes()) {
                Err(e) if e.kind() != io::ErrorKind::BrokenPipe => {
                    return Err(self.error(e.to_string()));
                }
                _ => {}
            }
        }

        let status = child.wait().map_err(|e| self.error(e.to_string()))?;
        if !status.success() {
            return Err(self.error(format!("exited with {}", status)));
        }

        tracing::debug!(command = %self.command, bytes = text.len(), "copied to clipboard");
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writer_sink() {
        let mut sink = WriterSink::new("buffer", Vec::new());
        sink.emit("<?php\n").unwrap();
        assert_eq!(sink.name(), "buffer");
        assert_eq!(sink.into_inner(), b"<?php\n");
    }

    #[test]
    fn test_clipboard_empty_command() {
        let err = ClipboardSink::new("  ").emit("x").unwrap_err();
        assert!(err.to_string().contains("empty command"));
    }

    #[test]
    fn test_clipboard_missing_program() {
        let err = ClipboardSink::new("migrant-no-such-clipboard-tool")
            .emit("x")
            .unwrap_err();
        assert!(matches!(err, MigrantError::Clipboard { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_clipboard_command_receives_text() {
        assert!(ClipboardSink::new("cat").emit("<?php\n").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn test_clipboard_failing_command() {
        let err = ClipboardSink::new("false").emit("x").unwrap_err();
        assert!(err.to_string().contains("exited with"));
    }
}
