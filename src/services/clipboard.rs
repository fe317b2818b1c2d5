use crate::config::Config;
use crate::error::Result;
use crate::tool_error;
use crate::utils::{CommandRunner, ExternalCommand};
use std::sync::Arc;
use tracing::debug;

/// Источник текста буфера обмена
pub trait ClipboardSource {
    fn read_text(&mut self) -> Result<String>;
}

/// Чтение через pbpaste (macOS)
pub struct PbpasteClipboard {
    runner: Arc<dyn CommandRunner>,
}

impl PbpasteClipboard {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }
}

impl ClipboardSource for PbpasteClipboard {
    fn read_text(&mut self) -> Result<String> {
        let text = self
            .runner
            .run_checked(&ExternalCommand::new("pbpaste"))
            .map_err(|e| tool_error!(clipboard, "{}", e))?;

        debug!("pbpaste вернул {} байт", text.len());
        Ok(text)
    }
}

/// Чтение через arboard (X11/Wayland/macOS/Windows)
pub struct ArboardClipboard;

impl ClipboardSource for ArboardClipboard {
    fn read_text(&mut self) -> Result<String> {
        // arboard требует новый экземпляр Clipboard для каждой операции
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| tool_error!(clipboard, "инициализация: {}", e))?;

        clipboard
            .get_text()
            .map_err(|e| tool_error!(clipboard, "чтение текста: {}", e))
    }
}

pub fn create_clipboard(
    config: &Config,
    runner: Arc<dyn CommandRunner>,
) -> Result<Box<dyn ClipboardSource>> {
    match config.clipboard.backend.as_str() {
        "pbpaste" => Ok(Box::new(PbpasteClipboard::new(runner))),
        "arboard" => Ok(Box::new(ArboardClipboard)),
        other => Err(tool_error!(internal, "Неизвестный бэкенд буфера обмена: {}", other)),
    }
}

#[cfg(test)]
pub mod fake {
    use super::*;

    /// Буфер обмена с заранее заданным содержимым
    pub struct StaticClipboard(pub Option<String>);

    impl ClipboardSource for StaticClipboard {
        fn read_text(&mut self) -> Result<String> {
            self.0
                .clone()
                .ok_or_else(|| tool_error!(clipboard, "буфер недоступен"))
        }
    }
}
