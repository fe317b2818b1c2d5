use crate::error::{Result, ToolError};
use crate::services::{ClipboardSource, KeystrokeReplayer, KeystrokeSynthesizer, ReplaySummary, ReplayTimings};
use crate::{tool_error, utils::prompt};
use std::io::{BufRead, Write};
use std::time::Duration;
use tracing::info;

const SEPARATOR_WIDTH: usize = 40;

#[derive(Debug, Clone, Default)]
pub struct PasteOptions {
    /// Переопределение задержки между символами
    pub delay: Option<Duration>,
    /// Только показать содержимое буфера
    pub preview: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    Previewed,
    Cancelled,
    Replayed(ReplaySummary),
}

/// Разобрать задержку в секундах из командной строки
pub fn parse_delay(raw: &str) -> Result<Duration> {
    let seconds: f64 = raw
        .trim()
        .parse()
        .map_err(|_| tool_error!(invalid_delay, "'{}' не является числом", raw))?;

    if !seconds.is_finite() {
        return Err(tool_error!(invalid_delay, "'{}' не является конечным числом", raw));
    }
    if seconds < 0.0 {
        return Err(tool_error!(invalid_delay, "{} < 0, задержка не может быть отрицательной", seconds));
    }

    Duration::try_from_secs_f64(seconds).map_err(|e| tool_error!(invalid_delay, "{}: {}", raw, e))
}

/// Прочитать буфер обмена и ввести его в активное окно
///
/// Синтезатор создаётся только после подтверждения, поэтому в режиме
/// предпросмотра и при отказе ни одно событие ввода не отправляется.
pub async fn run_paste<F, R, W>(
    clipboard: &mut dyn ClipboardSource,
    make_synthesizer: F,
    timings: ReplayTimings,
    options: &PasteOptions,
    input: &mut R,
    out: &mut W,
) -> Result<PasteOutcome>
where
    F: FnOnce() -> Result<Box<dyn KeystrokeSynthesizer>>,
    R: BufRead,
    W: Write,
{
    let text = clipboard.read_text()?;

    if text.trim().is_empty() {
        return Err(ToolError::EmptyClipboard);
    }

    let total = text.chars().count();
    writeln!(out, "Буфер обмена содержит {} символов", total)?;
    info!("Прочитано {} символов из буфера обмена", total);

    if options.preview {
        let separator = "-".repeat(SEPARATOR_WIDTH);
        writeln!(out, "Содержимое буфера обмена:")?;
        writeln!(out, "{}", separator)?;
        writeln!(out, "{}", text)?;
        writeln!(out, "{}", separator)?;
        return Ok(PasteOutcome::Previewed);
    }

    if !prompt::confirm("Ввести это в консоль VNC?", input, out)? {
        writeln!(out, "Отменено.")?;
        return Ok(PasteOutcome::Cancelled);
    }

    let timings = match options.delay {
        Some(delay) => timings.with_delay(delay),
        None => timings,
    };

    let mut replayer = KeystrokeReplayer::new(make_synthesizer()?, timings);
    let summary = replayer.replay(&text, out).await;

    Ok(PasteOutcome::Replayed(summary))
}
