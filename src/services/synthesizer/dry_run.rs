use crate::error::Result;
use crate::events::KeystrokeEvent;
use tracing::info;

use super::r#trait::KeystrokeSynthesizer;

/// Ничего не вводит, только пишет события в лог
pub struct DryRunSynthesizer {
    emitted: usize,
}

impl DryRunSynthesizer {
    pub fn new() -> Self {
        info!("Dry-run режим - ввод символов отключен");
        Self { emitted: 0 }
    }
}

#[async_trait::async_trait]
impl KeystrokeSynthesizer for DryRunSynthesizer {
    fn name(&self) -> &'static str {
        "dry-run"
    }

    async fn synthesize(&mut self, event: KeystrokeEvent) -> Result<()> {
        self.emitted += 1;
        info!("[DRY RUN] #{} {}", self.emitted, event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_always_succeeds() {
        let mut synth = DryRunSynthesizer::new();
        for c in "a.\n\"".chars() {
            synth.synthesize(KeystrokeEvent::classify(c)).await.unwrap();
        }
        assert_eq!(synth.emitted, 4);
    }
}
