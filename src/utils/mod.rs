pub mod command;
pub mod permissions;
pub mod prompt;

pub use command::{CommandOutput, CommandRunner, ExternalCommand, SystemRunner};

// ✅ Макросы условного логирования для оптимизации производительности
#[macro_export]
macro_rules! debug_if_enabled {
    ($($arg:tt)*) => {
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!($($arg)*);
        }
    };
}
