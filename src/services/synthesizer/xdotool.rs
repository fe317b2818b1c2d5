use crate::error::{Result, ToolError};
use crate::events::KeystrokeEvent;
use crate::utils::{CommandRunner, ExternalCommand};
use std::sync::Arc;

use super::r#trait::KeystrokeSynthesizer;

/// Ввод через xdotool (X11)
pub struct XdotoolSynthesizer {
    runner: Arc<dyn CommandRunner>,
}

impl XdotoolSynthesizer {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    fn command_for(event: KeystrokeEvent) -> ExternalCommand {
        let xdotool = ExternalCommand::new("xdotool");
        match event {
            KeystrokeEvent::CommitKey => xdotool.args(["key", "Return"]),
            KeystrokeEvent::TabKey => xdotool.args(["key", "Tab"]),
            KeystrokeEvent::PunctuationKey => xdotool.args(["key", "period"]),
            // Аргументы передаются без shell, экранирование не нужно
            KeystrokeEvent::EscapedLiteral(c) | KeystrokeEvent::Literal(c) => {
                xdotool.args(["type", "--"]).arg(c.to_string())
            }
        }
    }
}

#[async_trait::async_trait]
impl KeystrokeSynthesizer for XdotoolSynthesizer {
    fn name(&self) -> &'static str {
        "xdotool"
    }

    async fn synthesize(&mut self, event: KeystrokeEvent) -> Result<()> {
        self.runner
            .run_checked(&Self::command_for(event))
            .map(|_| ())
            .map_err(|e| ToolError::synthesis(event.source_char(), e.to_string()))
    }
}
