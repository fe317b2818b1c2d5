use crate::config::ReplayConfig;
use crate::debug_if_enabled;
use crate::events::{KeystrokeEvent, ReplayProgress};
use crate::services::synthesizer::KeystrokeSynthesizer;
use std::io::Write;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Тайминги вставки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayTimings {
    pub grace_period: Duration,
    pub per_char_delay: Duration,
    pub progress_interval: usize,
}

impl ReplayTimings {
    pub fn from_config(config: &ReplayConfig) -> Self {
        Self {
            grace_period: config.grace_period(),
            per_char_delay: config.delay(),
            progress_interval: config.progress_interval,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.per_char_delay = delay;
        self
    }
}

impl Default for ReplayTimings {
    fn default() -> Self {
        Self::from_config(&crate::config::Config::default().replay)
    }
}

/// Итог одного прогона
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplaySummary {
    pub total: usize,
    pub dispatched: usize,
    pub failed: Vec<usize>,
    pub progress_marks: Vec<usize>,
}

/// Посимвольный ввод текста в активное окно
pub struct KeystrokeReplayer {
    synthesizer: Box<dyn KeystrokeSynthesizer>,
    timings: ReplayTimings,
}

impl KeystrokeReplayer {
    pub fn new(synthesizer: Box<dyn KeystrokeSynthesizer>, timings: ReplayTimings) -> Self {
        info!(
            "Инициализация KeystrokeReplayer (бэкенд: {}, задержка: {:?})",
            synthesizer.name(),
            timings.per_char_delay
        );
        Self { synthesizer, timings }
    }

    /// Ввести текст по одному событию на символ, строго по порядку
    ///
    /// Ошибка ввода отдельного символа не прерывает прогон: символ пропускается,
    /// пауза и подсчёт прогресса выполняются как обычно.
    pub async fn replay<W: Write>(&mut self, text: &str, out: &mut W) -> ReplaySummary {
        let total = text.chars().count();
        let mut summary = ReplaySummary {
            total,
            ..ReplaySummary::default()
        };

        report(out, ReplayProgress::Started { total });
        report_line(
            out,
            &format!(
                "Переключитесь на окно VNC! Начало через {} с...",
                self.timings.grace_period.as_secs_f64()
            ),
        );
        warn!("Ожидание {:?} перед началом ввода", self.timings.grace_period);
        sleep(self.timings.grace_period).await;

        for (i, c) in text.chars().enumerate() {
            let event = KeystrokeEvent::classify(c);
            debug_if_enabled!("Символ #{} {:?} -> {}", i, c, event);

            if let Err(e) = self.synthesizer.synthesize(event).await {
                warn!("Символ #{} пропущен: {}", i, e);
                report_line(out, &format!("Ошибка ввода символа: {:?}", c));
                summary.failed.push(i);
            }
            summary.dispatched += 1;

            if summary.dispatched % self.timings.progress_interval == 0 {
                report(
                    out,
                    ReplayProgress::Advanced {
                        dispatched: summary.dispatched,
                        total,
                    },
                );
                summary.progress_marks.push(summary.dispatched);
            }

            sleep(self.timings.per_char_delay).await;
        }

        report(out, ReplayProgress::Finished { total: summary.dispatched });
        info!(
            "Ввод завершён: {} символов, ошибок: {}",
            summary.dispatched,
            summary.failed.len()
        );

        summary
    }
}

fn report<W: Write>(out: &mut W, progress: ReplayProgress) {
    report_line(out, &progress.to_string());
}

fn report_line<W: Write>(out: &mut W, line: &str) {
    if let Err(e) = writeln!(out, "{}", line).and_then(|_| out.flush()) {
        warn!("Не удалось вывести сообщение в терминал: {}", e);
    }
}
