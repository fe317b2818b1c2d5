use crate::config::Config;
use crate::error::Result;
use crate::events::KeystrokeEvent;
use crate::tool_error;
use crate::utils::CommandRunner;
use std::sync::Arc;

/// Trait for backends that deliver one keystroke event to the focused window
#[async_trait::async_trait]
pub trait KeystrokeSynthesizer: Send {
    /// Backend name for logs
    fn name(&self) -> &'static str;

    /// Deliver a single classified event
    async fn synthesize(&mut self, event: KeystrokeEvent) -> Result<()>;
}

/// Factory function to create a synthesizer based on the configured backend and the dry_run flag
pub fn create_synthesizer(
    config: &Config,
    runner: Arc<dyn CommandRunner>,
    dry_run: bool,
) -> Result<Box<dyn KeystrokeSynthesizer>> {
    if dry_run {
        return Ok(Box::new(super::dry_run::DryRunSynthesizer::new()));
    }

    match config.replay.backend.as_str() {
        "osascript" => Ok(Box::new(super::osascript::OsascriptSynthesizer::new(runner))),
        "xdotool" => Ok(Box::new(super::xdotool::XdotoolSynthesizer::new(runner))),
        #[cfg(target_os = "linux")]
        "uinput" => Ok(Box::new(super::virtual_device::VirtualDevice::new(
            "console-utils Virtual Keyboard",
        )?)),
        other => Err(tool_error!(
            internal,
            "Бэкенд ввода '{}' недоступен на этой платформе",
            other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::utils::command::fake::RecordingRunner;

    #[test]
    fn test_unknown_backend_is_internal_error() {
        let runner: Arc<dyn CommandRunner> = Arc::new(RecordingRunner::succeeding());
        let mut config = Config::default();
        config.replay.backend = "ydotool".to_string();

        let err = create_synthesizer(&config, runner.clone(), false).err().unwrap();
        assert!(matches!(err, ToolError::Internal(ref m) if m.contains("'ydotool'")));

        // В сухом запуске бэкенд не выбирается
        assert!(create_synthesizer(&config, runner, true).is_ok());
    }
}
