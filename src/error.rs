use thiserror::Error;

#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Ошибка ввода-вывода: {0}")]
    Io(#[from] std::io::Error),

    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    #[error("Ошибка uinput: {0}")]
    Uinput(String),

    #[error("Не удалось прочитать буфер обмена: {0}")]
    Clipboard(String),

    #[error("Буфер обмена пуст")]
    EmptyClipboard,

    #[error("Не удалось ввести символ {character:?}: {reason}")]
    Synthesis { character: char, reason: String },

    #[error("Команда `{command}` завершилась с ошибкой: {stderr}")]
    CommandFailed { command: String, stderr: String },

    #[error("Недопустимая задержка: {0}")]
    InvalidDelay(String),

    #[error("Неизвестный режим прокси '{mode}', доступны: {available}")]
    InvalidProxyMode { mode: String, available: String },

    #[error("nix-daemon не запустился")]
    DaemonUnavailable,

    #[error("Недостаточно прав доступа: {0}")]
    Permission(String),

    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl ToolError {
    pub fn synthesis(character: char, reason: impl Into<String>) -> Self {
        ToolError::Synthesis {
            character,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;

// Удобные макросы для создания ошибок
#[macro_export]
macro_rules! tool_error {
    (clipboard, $($arg:tt)*) => {
        $crate::error::ToolError::Clipboard(format!($($arg)*))
    };
    (uinput, $($arg:tt)*) => {
        $crate::error::ToolError::Uinput(format!($($arg)*))
    };
    (invalid_delay, $($arg:tt)*) => {
        $crate::error::ToolError::InvalidDelay(format!($($arg)*))
    };
    (permission, $($arg:tt)*) => {
        $crate::error::ToolError::Permission(format!($($arg)*))
    };
    (internal, $($arg:tt)*) => {
        $crate::error::ToolError::Internal(format!($($arg)*))
    };
}
