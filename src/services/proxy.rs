use crate::config::Config;
use crate::error::{Result, ToolError};
use crate::utils::{CommandRunner, ExternalCommand};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

/// curl понимает только имена в нижнем регистре
pub const PROXY_VARIABLES: [&str; 2] = ["http_proxy", "https_proxy"];

const ENVIRONMENT_KEY: &str = "EnvironmentVariables";
const WRITABLE_MODE: u32 = 0o644;
const READ_ONLY_MODE: u32 = 0o444;

/// Что сделать с переменными прокси в plist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProxyAction {
    Set { mode: String, url: String },
    Unset,
}

impl ProxyAction {
    /// Найти пресет по имени режима
    pub fn resolve(config: &Config, mode: &str, unset: bool) -> Result<Self> {
        if unset {
            return Ok(ProxyAction::Unset);
        }

        match config.proxy_url(mode) {
            Some(url) => Ok(ProxyAction::Set {
                mode: mode.to_string(),
                url: url.to_string(),
            }),
            None => Err(ToolError::InvalidProxyMode {
                mode: mode.to_string(),
                available: config.proxy_modes().join(", "),
            }),
        }
    }
}

/// Правка launchd plist через plutil
pub struct ProxyPatcher {
    runner: Arc<dyn CommandRunner>,
    plist: PathBuf,
    dry_run: bool,
}

impl ProxyPatcher {
    pub fn new(runner: Arc<dyn CommandRunner>, plist: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            runner,
            plist: plist.into(),
            dry_run,
        }
    }

    /// Команды plutil для выбранного действия
    pub fn plutil_commands(&self, action: &ProxyAction) -> Vec<ExternalCommand> {
        let plist = self.plist.display().to_string();

        PROXY_VARIABLES
            .iter()
            .map(|variable| {
                let key_path = format!("{}.{}", ENVIRONMENT_KEY, variable);
                match action {
                    ProxyAction::Set { url, .. } => ExternalCommand::new("plutil")
                        .args(["-replace", key_path.as_str(), "-string", url.as_str(), plist.as_str()]),
                    ProxyAction::Unset => ExternalCommand::new("plutil")
                        .args(["-remove", key_path.as_str(), plist.as_str()]),
                }
            })
            .collect()
    }

    pub fn apply<W: Write>(&self, action: &ProxyAction, out: &mut W) -> Result<()> {
        let commands = self.plutil_commands(action);

        if self.dry_run {
            for command in &commands {
                writeln!(out, "[DRY RUN] {}", command)?;
            }
            return Ok(());
        }

        set_mode(&self.plist, WRITABLE_MODE)?;

        let patched = commands
            .iter()
            .try_for_each(|command| self.run_plutil(command, action));

        // Возвращаем файл в read-only даже если plutil упал
        if let Err(e) = set_mode(&self.plist, READ_ONLY_MODE) {
            warn!("Не удалось вернуть права {:o} для {}: {}", READ_ONLY_MODE, self.plist.display(), e);
            patched?;
            return Err(e);
        }

        patched?;
        info!("plist {} обновлён", self.plist.display());
        Ok(())
    }

    fn run_plutil(&self, command: &ExternalCommand, action: &ProxyAction) -> Result<()> {
        match self.runner.run_checked(command) {
            Ok(_) => Ok(()),
            // Ключа может не быть, удалять нечего
            Err(e) if *action == ProxyAction::Unset => {
                warn!("{}: {}", command, e);
                Ok(())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(path: &Path, _mode: u32) -> Result<()> {
    fs::metadata(path)?;
    Ok(())
}
