use crate::config::Config;
use crate::error::Result;
use crate::services::{DaemonReloader, ProxyAction, ProxyPatcher};
use crate::utils::{permissions, CommandRunner};
use std::io::Write;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ProxyOptions {
    pub mode: String,
    pub unset: bool,
}

/// Прописать прокси в plist nix-daemon, перезапустить демон и проверить его
pub async fn run_proxy<W: Write>(
    config: &Config,
    runner: Arc<dyn CommandRunner>,
    options: &ProxyOptions,
    dry_run: bool,
    out: &mut W,
) -> Result<()> {
    let action = ProxyAction::resolve(config, &options.mode, options.unset)?;
    let plist = &config.proxy.plist_path;

    match &action {
        ProxyAction::Set { mode, url } => {
            writeln!(out, "Прокси для nix-daemon: режим {} ({})", mode, url)?
        }
        ProxyAction::Unset => writeln!(out, "Удаление прокси из настроек nix-daemon")?,
    }

    if !dry_run {
        permissions::check_plist_access(plist)?;
    }

    ProxyPatcher::new(runner.clone(), plist, dry_run).apply(&action, out)?;

    let reloader = DaemonReloader::new(
        runner,
        plist,
        &config.proxy.daemon_label,
        config.proxy.settle_wait(),
        dry_run,
    );
    reloader.reload(out)?;
    reloader.check_running(out).await?;

    info!("Настройка прокси завершена");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::utils::command::fake::RecordingRunner;
    use crate::utils::CommandOutput;

    fn config_for(plist: &std::path::Path) -> Config {
        let mut config = Config::default();
        config.proxy.plist_path = plist.to_path_buf();
        config.proxy.settle_wait_ms = 0;
        config
    }

    #[tokio::test]
    async fn test_full_sequence_in_order() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = config_for(file.path());
        let runner = Arc::new(RecordingRunner::succeeding());
        let options = ProxyOptions {
            mode: "network".to_string(),
            unset: false,
        };
        let mut out = Vec::new();

        run_proxy(&config, runner.clone(), &options, false, &mut out).await.unwrap();

        let programs: Vec<(String, String)> = runner
            .calls()
            .iter()
            .map(|c| (c.program.clone(), c.args[0].clone()))
            .collect();
        assert_eq!(
            programs,
            vec![
                ("plutil".to_string(), "-replace".to_string()),
                ("plutil".to_string(), "-replace".to_string()),
                ("launchctl".to_string(), "unload".to_string()),
                ("launchctl".to_string(), "load".to_string()),
                ("nix".to_string(), "daemon".to_string()),
            ]
        );
        assert!(runner.calls()[0].args.contains(&"http://10.0.0.5:7890".to_string()));
        assert!(String::from_utf8(out).unwrap().contains("nix-daemon запущен"));
    }

    #[tokio::test]
    async fn test_invalid_mode_touches_nothing() {
        let runner = Arc::new(RecordingRunner::succeeding());
        let options = ProxyOptions {
            mode: "vpn".to_string(),
            unset: false,
        };

        let err = run_proxy(&Config::default(), runner.clone(), &options, false, &mut Vec::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::InvalidProxyMode { .. }));
        assert!(runner.calls().is_empty());
    }

    #[tokio::test]
    async fn test_daemon_down_is_fatal() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = config_for(file.path());
        let runner = Arc::new(RecordingRunner::with_handler(|cmd| {
            if cmd.program == "nix" {
                CommandOutput::failed("cannot connect to daemon")
            } else {
                CommandOutput::ok("")
            }
        }));
        let options = ProxyOptions {
            mode: "local".to_string(),
            unset: false,
        };

        let err = run_proxy(&config, runner.clone(), &options, false, &mut Vec::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ToolError::DaemonUnavailable));
        let checks = runner.calls().iter().filter(|c| c.program == "nix").count();
        assert_eq!(checks, 2);
    }

    #[tokio::test]
    async fn test_dry_run_skips_missing_plist() {
        let config = config_for(std::path::Path::new("/nonexistent/org.nixos.nix-daemon.plist"));
        let runner = Arc::new(RecordingRunner::succeeding());
        let options = ProxyOptions {
            mode: "local".to_string(),
            unset: false,
        };

        run_proxy(&config, runner.clone(), &options, true, &mut Vec::new()).await.unwrap();
        assert!(runner.calls().is_empty());
    }
}
