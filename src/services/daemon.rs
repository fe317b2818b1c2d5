use crate::error::{Result, ToolError};
use crate::utils::{CommandRunner, ExternalCommand};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

/// Перезапуск nix-daemon через launchctl и проверка, что он отвечает
pub struct DaemonReloader {
    runner: Arc<dyn CommandRunner>,
    plist: PathBuf,
    label: String,
    settle_wait: Duration,
    dry_run: bool,
}

impl DaemonReloader {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        plist: impl Into<PathBuf>,
        label: impl Into<String>,
        settle_wait: Duration,
        dry_run: bool,
    ) -> Self {
        Self {
            runner,
            plist: plist.into(),
            label: label.into(),
            settle_wait,
            dry_run,
        }
    }

    pub fn reload_commands(&self) -> [ExternalCommand; 2] {
        let plist = self.plist.display().to_string();
        [
            ExternalCommand::new("launchctl").args(["unload", plist.as_str()]),
            ExternalCommand::new("launchctl").args(["load", plist.as_str()]),
        ]
    }

    fn version_command() -> ExternalCommand {
        ExternalCommand::new("nix").args(["daemon", "--version"])
    }

    /// unload + load, ошибки launchctl только логируются
    pub fn reload<W: Write>(&self, out: &mut W) -> Result<()> {
        info!("Перезагрузка {}", self.label);

        for command in self.reload_commands() {
            if self.dry_run {
                writeln!(out, "[DRY RUN] {}", command)?;
                continue;
            }

            writeln!(out, "{}", command)?;
            match self.runner.run(&command) {
                Ok(output) if !output.success => {
                    warn!("{} завершился с ошибкой: {}", command, output.stderr.trim());
                }
                Ok(_) => {}
                Err(e) => warn!("{}", e),
            }
        }

        Ok(())
    }

    /// Проверить демон, при неудаче подождать и проверить ещё один раз
    pub async fn check_running<W: Write>(&self, out: &mut W) -> Result<()> {
        let version_check = Self::version_command();

        if self.dry_run {
            writeln!(out, "[DRY RUN] {}", version_check)?;
            return Ok(());
        }

        writeln!(out, "Проверка состояния {}...", self.label)?;
        if self.is_responding(&version_check) {
            writeln!(out, "nix-daemon запущен")?;
            return Ok(());
        }

        writeln!(
            out,
            "nix-daemon ещё не готов, ждём {} с...",
            self.settle_wait.as_secs_f64()
        )?;
        sleep(self.settle_wait).await;

        if self.is_responding(&version_check) {
            writeln!(out, "nix-daemon запущен")?;
            Ok(())
        } else {
            Err(ToolError::DaemonUnavailable)
        }
    }

    fn is_responding(&self, version_check: &ExternalCommand) -> bool {
        match self.runner.run_checked(version_check) {
            Ok(version) => {
                info!("{}", version.trim());
                true
            }
            Err(e) => {
                warn!("{}", e);
                false
            }
        }
    }
}
