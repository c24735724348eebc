//! Output formatting utilities for CLI commands.

use serde::Serialize;
use std::io::Write;

use crate::cli::{CommandContext, OutputFormat};
use crate::error::CliError;

/// Trait for types that can be formatted for output
pub trait FormattedOutput {
    fn format_text(&self) -> String;
    fn format_json(&self) -> Result<String, serde_json::Error>;
}

/// Print formatted output to stdout
pub fn print_output<T>(ctx: &CommandContext, value: &T) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
{
    write_output(ctx.format, value, std::io::stdout().lock())
}

/// Print formatted output to a writer
pub fn write_output<T, W>(format: OutputFormat, value: &T, mut writer: W) -> Result<(), CliError>
where
    T: FormattedOutput + Serialize,
    W: Write,
{
    let output = match format {
        OutputFormat::Text => value.format_text(),
        OutputFormat::Json => value
            .format_json()
            .map_err(|e| CliError::Other(anyhow::anyhow!("JSON serialization failed: {}", e)))?,
    };

    if format == OutputFormat::Text && output.is_empty() {
        return Ok(());
    }

    writeln!(writer, "{}", output)
        .map_err(|e| CliError::Other(anyhow::Error::new(e).context("failed to write output")))?;
    Ok(())
}

/// Helper for success status outputs
#[derive(Debug, Serialize)]
pub struct StatusOutput {
    pub status: String,
    pub message: String,
}

impl StatusOutput {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
        }
    }

    pub fn unchanged(message: impl Into<String>) -> Self {
        Self {
            status: "unchanged".to_string(),
            message: message.into(),
        }
    }
}

impl FormattedOutput for StatusOutput {
    fn format_text(&self) -> String {
        match self.status.as_str() {
            "success" => format!("✓ {}", self.message),
            _ => format!("{}: {}", self.status, self.message),
        }
    }

    fn format_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(format: OutputFormat, value: &StatusOutput) -> String {
        let mut buf = Vec::new();
        write_output(format, value, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_status_text() {
        assert_eq!(render(OutputFormat::Text, &StatusOutput::success("saved")), "✓ saved\n");
        assert_eq!(
            render(OutputFormat::Text, &StatusOutput::unchanged("nothing to do")),
            "unchanged: nothing to do\n"
        );
    }

    #[test]
    fn test_status_json() {
        let out = render(OutputFormat::Json, &StatusOutput::success("saved"));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["message"], "saved");
    }
}
