//! Output layer shared by every `rc` command.
//!
//! Commands receive an [`OutputMode`] and render pretty output for people,
//! compact rows for pipes, or stable JSON for scripts. Results go to stdout,
//! errors to stderr; every renderer is written against `&mut dyn Write` so it
//! can be exercised on a buffer.
//!
//! # Output mode resolution
//!
//! Precedence (highest wins):
//! 1. `--format`, then the hidden `--json` flag
//! 2. `FORMAT` env var: `pretty` | `text` | `json`
//! 3. `output` in the user config file
//! 4. [`OutputMode::Pretty`] when stdout is a TTY, [`OutputMode::Text`] otherwise

use clap::ValueEnum;
use raphael_core::contact::ContactError;
use raphael_core::error::ErrorCode;
use raphael_core::store::CatalogError;
use serde::Serialize;
use std::io::{self, IsTerminal, Write};

pub const PRETTY_RULE_WIDTH: usize = 72;

pub fn pretty_rule(w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", "-".repeat(PRETTY_RULE_WIDTH))
}

/// Heading followed by a rule.
pub fn pretty_section(w: &mut dyn Write, heading: &str) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    pretty_rule(w)
}

pub fn pretty_kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<12} {}", format!("{key}:"), value.as_ref())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Framed sections and aligned columns for a terminal.
    Pretty,
    /// Plain two-space separated rows for pipes.
    Text,
    /// Machine-readable JSON.
    Json,
}

impl OutputMode {
    pub const fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }

    /// Same names `--format` accepts, any case. Unknown names yield `None`.
    fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name.trim(), true).ok()
    }
}

fn resolve_output_mode_inner(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    format_env: Option<&str>,
    config_output: Option<&str>,
    is_tty: bool,
) -> OutputMode {
    let fallback = if is_tty {
        OutputMode::Pretty
    } else {
        OutputMode::Text
    };
    format_flag
        .or_else(|| json_flag.then_some(OutputMode::Json))
        .or_else(|| format_env.and_then(OutputMode::from_name))
        .or_else(|| config_output.and_then(OutputMode::from_name))
        .unwrap_or(fallback)
}

/// Resolve the output mode from flags, `FORMAT`, user config and the TTY.
pub fn resolve_output_mode(
    format_flag: Option<OutputMode>,
    json_flag: bool,
    config_output: Option<&str>,
) -> OutputMode {
    let format_env = std::env::var("FORMAT").ok();
    resolve_output_mode_inner(
        format_flag,
        json_flag,
        format_env.as_deref(),
        config_output,
        io::stdout().is_terminal(),
    )
}

/// A listing row. JSON mode serializes rows as they are; the other modes
/// draw one row at a time.
pub trait Renderable: Serialize {
    /// Column names printed above text rows, in `write_row` order.
    const HEADERS: &'static [&'static str] = &[];

    fn write_card(&self, w: &mut dyn Write) -> io::Result<()>;

    fn write_row(&self, w: &mut dyn Write) -> io::Result<()>;
}

/// Render a list of rows to stdout. An empty text listing prints nothing,
/// not even the header.
pub fn render_list<R: Renderable>(items: &[R], mode: OutputMode) -> io::Result<()> {
    write_list(&mut io::stdout().lock(), items, mode)
}

fn write_list<R: Renderable>(out: &mut dyn Write, items: &[R], mode: OutputMode) -> io::Result<()> {
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut *out, items).map_err(io::Error::other)?;
            writeln!(out)
        }
        OutputMode::Text => {
            if !items.is_empty() && !R::HEADERS.is_empty() {
                writeln!(out, "{}", R::HEADERS.join("  "))?;
            }
            items.iter().try_for_each(|item| item.write_row(out))
        }
        OutputMode::Pretty => items.iter().try_for_each(|item| item.write_card(out)),
    }
}

/// Render a value with separate text and pretty renderers.
pub fn render_mode<T: Serialize>(
    mode: OutputMode,
    value: &T,
    text_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
    pretty_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    write_value(&mut io::stdout().lock(), mode, value, |value, out| {
        if mode == OutputMode::Text {
            text_fn(value, out)
        } else {
            pretty_fn(value, out)
        }
    })
}

/// Render a value whose text and pretty forms are the same.
pub fn render<T: Serialize>(
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    write_value(&mut io::stdout().lock(), mode, value, human_fn)
}

fn write_value<T: Serialize>(
    out: &mut dyn Write,
    mode: OutputMode,
    value: &T,
    human_fn: impl FnOnce(&T, &mut dyn Write) -> io::Result<()>,
) -> anyhow::Result<()> {
    if mode.is_json() {
        serde_json::to_writer_pretty(&mut *out, value)?;
        writeln!(out)?;
    } else {
        human_fn(value, out)?;
    }
    Ok(())
}

/// Failure report written to stderr before a command exits non-zero.
#[derive(Debug, Serialize)]
pub struct CliError {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// Stable `E####` code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl CliError {
    /// Message plus the code's registered hint.
    pub fn coded(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            suggestion: code.hint().map(str::to_string),
            error_code: Some(code.code().to_string()),
        }
    }

    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl From<&CatalogError> for CliError {
    fn from(err: &CatalogError) -> Self {
        Self::coded(err.error_code(), err.to_string()).with_suggestion(err.suggestion())
    }
}

impl From<&ContactError> for CliError {
    fn from(err: &ContactError) -> Self {
        Self::coded(err.error_code(), err.to_string())
    }
}

/// Render an error to stderr in the requested format.
pub fn render_error(mode: OutputMode, error: &CliError) -> anyhow::Result<()> {
    write_error(&mut io::stderr().lock(), mode, error)?;
    Ok(())
}

fn write_error(out: &mut dyn Write, mode: OutputMode, error: &CliError) -> io::Result<()> {
    if mode.is_json() {
        let envelope = serde_json::json!({ "error": error });
        serde_json::to_writer_pretty(&mut *out, &envelope).map_err(io::Error::other)?;
        return writeln!(out);
    }

    let code = error
        .error_code
        .as_deref()
        .map(|code| format!("[{code}]"))
        .unwrap_or_default();
    writeln!(out, "error{code}: {}", error.message)?;
    if let Some(suggestion) = &error.suggestion {
        writeln!(out, "  suggestion: {suggestion}")?;
    }
    Ok(())
}
