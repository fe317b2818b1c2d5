use crate::error::{Result, ToolError};
use crate::events::KeystrokeEvent;
use crate::mappings::applescript;
use crate::utils::{CommandRunner, ExternalCommand};
use std::sync::Arc;

use super::r#trait::KeystrokeSynthesizer;

/// Ввод через AppleScript и System Events (macOS)
pub struct OsascriptSynthesizer {
    runner: Arc<dyn CommandRunner>,
}

impl OsascriptSynthesizer {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn command_for(event: KeystrokeEvent) -> ExternalCommand {
        ExternalCommand::new("osascript")
            .arg("-e")
            .arg(applescript::render(event))
    }
}

#[async_trait::async_trait]
impl KeystrokeSynthesizer for OsascriptSynthesizer {
    fn name(&self) -> &'static str {
        "osascript"
    }

    async fn synthesize(&mut self, event: KeystrokeEvent) -> Result<()> {
        self.runner
            .run_checked(&Self::command_for(event))
            .map(|_| ())
            .map_err(|e| ToolError::synthesis(event.source_char(), e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::command::fake::RecordingRunner;
    use crate::utils::CommandOutput;

    #[tokio::test]
    async fn test_one_osascript_call_per_event() {
        let runner = Arc::new(RecordingRunner::succeeding());
        let mut synth = OsascriptSynthesizer::new(runner.clone());

        synth.synthesize(KeystrokeEvent::CommitKey).await.unwrap();
        synth.synthesize(KeystrokeEvent::EscapedLiteral('"')).await.unwrap();

        let calls = runner.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].program, "osascript");
        assert_eq!(
            calls[0].args,
            vec!["-e", r#"tell application "System Events" to key code 36"#]
        );
        assert_eq!(
            calls[1].args[1],
            r#"tell application "System Events" to keystroke "\"""#
        );
    }

    #[tokio::test]
    async fn test_failure_reports_character() {
        let runner = Arc::new(RecordingRunner::with_handler(|_| {
            CommandOutput::failed("execution error: not allowed assistive access")
        }));
        let mut synth = OsascriptSynthesizer::new(runner);

        let err = synth.synthesize(KeystrokeEvent::Literal('x')).await.unwrap_err();
        assert!(matches!(err, ToolError::Synthesis { character: 'x', .. }));
    }
}
