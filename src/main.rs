use anyhow::Result;
use clap::{Parser, Subcommand};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
mod commands;
mod config;
mod error;
mod events;
pub mod mappings;
mod services;
mod utils;

use commands::{PasteOptions, PasteOutcome, ProxyOptions};
use config::Config;
use services::{create_clipboard, create_synthesizer, ReplayTimings};
use utils::{CommandRunner, SystemRunner};

#[derive(Parser, Debug)]
#[command(name = "console-utils")]
#[command(about = "Утилиты для удалённых консолей и nix-daemon")]
struct Args {
    /// Путь к файлу конфигурации
    #[arg(short, long, default_value = "console-utils.toml", global = true)]
    config: String,

    /// Режим сухого запуска (без реальных действий)
    #[arg(long, global = true)]
    dry_run: bool,

    /// Уровень логирования (по умолчанию из конфигурации)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Ввести содержимое буфера обмена посимвольно (для консолей VNC)
    Paste {
        /// Задержка между символами в секундах (по умолчанию 0.05)
        #[arg(short, long, value_parser = parse_delay_arg)]
        delay: Option<Duration>,

        /// Только показать содержимое буфера обмена
        #[arg(short, long)]
        preview: bool,
    },

    /// Прописать HTTP прокси для nix-daemon и перезапустить его
    Proxy {
        /// Имя пресета прокси (local, network или свой из конфигурации)
        #[arg(default_value = "local")]
        mode: String,

        /// Удалить переменные прокси вместо установки
        #[arg(long)]
        unset: bool,
    },
}

fn parse_delay_arg(raw: &str) -> std::result::Result<Duration, String> {
    commands::parse_delay(raw).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Загрузка конфигурации
    let config = Config::load(&args.config)?;

    // Инициализация системы логирования
    let level = args.log_level.as_deref().unwrap_or(&config.logging.level);
    init_tracing(level, &config.logging.format)?;

    info!("Запуск console-utils v{}", env!("CARGO_PKG_VERSION"));
    info!("Конфигурация загружена из: {}", args.config);

    if args.dry_run {
        warn!("Режим сухого запуска - реальные действия отключены");
    }

    let runner: Arc<dyn CommandRunner> = Arc::new(SystemRunner);
    let mut stdout = io::stdout();

    match args.command {
        Command::Paste { delay, preview } => {
            let mut clipboard = create_clipboard(&config, runner.clone())?;
            let options = PasteOptions { delay, preview };
            let mut stdin = io::stdin().lock();

            let outcome = commands::run_paste(
                clipboard.as_mut(),
                || create_synthesizer(&config, runner.clone(), args.dry_run),
                ReplayTimings::from_config(&config.replay),
                &options,
                &mut stdin,
                &mut stdout,
            )
            .await?;

            if let PasteOutcome::Replayed(summary) = outcome {
                info!(
                    "Отправлено {} событий, отметок прогресса: {}",
                    summary.dispatched,
                    summary.progress_marks.len()
                );
                if !summary.failed.is_empty() {
                    warn!("Не удалось ввести {} из {} символов", summary.failed.len(), summary.total);
                }
            }
        }
        Command::Proxy { mode, unset } => {
            let options = ProxyOptions { mode, unset };
            commands::run_proxy(&config, runner, &options, args.dry_run, &mut stdout).await?;
        }
    }

    Ok(())
}

fn init_tracing(level: &str, format: &str) -> Result<()> {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))?;

    // stdout занят сообщениями для оператора, логи идут в stderr
    let fmt_layer = tracing_subscriber::fmt::layer().with_writer(io::stderr);

    let registry = tracing_subscriber::registry().with(filter);
    if format == "pretty" {
        registry.with(fmt_layer.pretty()).init();
    } else {
        registry.with(fmt_layer.compact()).init();
    }

    Ok(())
}
