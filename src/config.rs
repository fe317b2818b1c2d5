use anyhow::{Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub logging: LoggingConfig,
    pub replay: ReplayConfig,
    pub clipboard: ClipboardConfig,
    pub proxy: ProxyConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReplayConfig {
    /// Пауза после каждого символа
    pub delay_ms: u64,
    /// Пауза перед первым символом, чтобы успеть переключиться на окно VNC
    pub grace_period_ms: u64,
    /// Как часто (в символах) печатать прогресс
    pub progress_interval: usize,
    /// osascript | xdotool | uinput
    pub backend: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ClipboardConfig {
    /// pbpaste | arboard
    pub backend: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProxyConfig {
    pub plist_path: PathBuf,
    pub daemon_label: String,
    pub settle_wait_ms: u64,
    pub presets: BTreeMap<String, String>,
}

impl ReplayConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    pub fn grace_period(&self) -> Duration {
        Duration::from_millis(self.grace_period_ms)
    }
}

impl ProxyConfig {
    pub fn settle_wait(&self) -> Duration {
        Duration::from_millis(self.settle_wait_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut presets = BTreeMap::new();
        presets.insert("local".to_string(), "http://127.0.0.1:7890".to_string());
        presets.insert("network".to_string(), "http://10.0.0.5:7890".to_string());

        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "compact".to_string(),
            },
            replay: ReplayConfig {
                delay_ms: 50,
                grace_period_ms: 3000,
                progress_interval: 50,
                backend: default_synth_backend().to_string(),
            },
            clipboard: ClipboardConfig {
                backend: "pbpaste".to_string(),
            },
            proxy: ProxyConfig {
                plist_path: PathBuf::from("/Library/LaunchDaemons/org.nixos.nix-daemon.plist"),
                daemon_label: "org.nixos.nix-daemon".to_string(),
                settle_wait_ms: 3000,
                presets,
            },
        }
    }
}

fn default_synth_backend() -> &'static str {
    if cfg!(target_os = "macos") {
        "osascript"
    } else {
        "xdotool"
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();

        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(config_path))
            .merge(Env::prefixed("CONSOLE_UTILS_").split("__"));

        let config: Config = figment
            .extract()
            .with_context(|| format!("Не удалось загрузить конфигурацию из {:?}", config_path))?;

        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        // Валидация настроек логирования
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => anyhow::bail!("Неверный уровень логирования: {}", self.logging.level),
        }

        match self.logging.format.as_str() {
            "compact" | "pretty" => {}
            _ => anyhow::bail!("Неверный формат логирования: {}", self.logging.format),
        }

        // Валидация настроек вставки
        match self.replay.backend.as_str() {
            "osascript" | "xdotool" | "uinput" => {}
            _ => anyhow::bail!("Неизвестный бэкенд ввода: {}", self.replay.backend),
        }

        if self.replay.progress_interval == 0 {
            anyhow::bail!("progress_interval должно быть больше 0");
        }

        match self.clipboard.backend.as_str() {
            "pbpaste" | "arboard" => {}
            _ => anyhow::bail!("Неизвестный бэкенд буфера обмена: {}", self.clipboard.backend),
        }

        // Валидация пресетов прокси
        if self.proxy.presets.is_empty() {
            anyhow::bail!("Не задано ни одного пресета прокси");
        }

        for (name, url) in &self.proxy.presets {
            if url.trim().is_empty() {
                anyhow::bail!("Пустой адрес прокси в пресете '{}'", name);
            }
        }

        Ok(())
    }

    /// Получить адрес прокси по имени пресета
    pub fn proxy_url(&self, mode: &str) -> Option<&str> {
        self.proxy.presets.get(mode).map(String::as_str)
    }

    pub fn proxy_modes(&self) -> Vec<&str> {
        self.proxy.presets.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_validation() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.replay.delay(), Duration::from_millis(50));
        assert_eq!(config.replay.grace_period(), Duration::from_secs(3));
        assert_eq!(config.replay.progress_interval, 50);
    }

    #[test]
    fn test_proxy_presets() {
        let config = Config::default();
        assert_eq!(config.proxy_url("local"), Some("http://127.0.0.1:7890"));
        assert_eq!(config.proxy_url("network"), Some("http://10.0.0.5:7890"));
        assert_eq!(config.proxy_url("office"), None);
        assert_eq!(config.proxy_modes(), vec!["local", "network"]);
    }

    #[test]
    fn test_invalid_backend_rejected() {
        let mut config = Config::default();
        config.replay.backend = "sendkeys".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.clipboard.backend = "xsel".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_progress_interval_rejected() {
        let mut config = Config::default();
        config.replay.progress_interval = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let config = Config::load("/nonexistent/console-utils.toml").unwrap();
        assert_eq!(config.replay.delay_ms, 50);
        assert_eq!(config.clipboard.backend, "pbpaste");
    }

    #[test]
    fn test_load_merges_toml_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[replay]
delay_ms = 10
backend = "uinput"

[proxy.presets]
office = "http://10.1.1.1:3128"
"#
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.replay.delay_ms, 10);
        assert_eq!(config.replay.backend, "uinput");
        // Незаданные поля берутся из значений по умолчанию
        assert_eq!(config.replay.grace_period_ms, 3000);
        assert_eq!(config.proxy_url("office"), Some("http://10.1.1.1:3128"));
        assert_eq!(config.proxy_url("local"), Some("http://127.0.0.1:7890"));
    }
}
