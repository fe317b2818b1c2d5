pub mod keystroke;

pub use keystroke::KeystrokeEvent;

/// Событие прогресса вставки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayProgress {
    Started { total: usize },
    Advanced { dispatched: usize, total: usize },
    Finished { total: usize },
}

impl std::fmt::Display for ReplayProgress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReplayProgress::Started { total } => {
                write!(f, "Начинаю ввод {} символов...", total)
            }
            ReplayProgress::Advanced { dispatched, total } => {
                write!(f, "Прогресс: {}/{} символов", dispatched, total)
            }
            ReplayProgress::Finished { total } => {
                write!(f, "Ввод завершён: {} символов", total)
            }
        }
    }
}
