use crate::error::Result;
use crate::tool_error;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Проверить доступ к /dev/uinput перед созданием виртуальной клавиатуры
#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
pub fn check_uinput_access() -> Result<()> {
    check_uinput_device(Path::new("/dev/uinput"))
}

fn check_uinput_device(uinput_device: &Path) -> Result<()> {
    #[cfg(unix)]
    use std::os::unix::fs::PermissionsExt;

    if !uinput_device.exists() {
        return Err(tool_error!(
            permission,
            "{} не существует, загрузите модуль: sudo modprobe uinput",
            uinput_device.display()
        ));
    }

    match fs::metadata(uinput_device) {
        Ok(metadata) => {
            #[cfg(unix)]
            {
                let mode = metadata.permissions().mode();

                // Проверяем права доступа (обычно 660 или 666)
                if mode & 0o006 == 0 && mode & 0o060 == 0 && !is_root() {
                    return Err(tool_error!(
                        permission,
                        "Нет прав доступа к {}. Добавьте пользователя в группу 'uinput' или 'input'",
                        uinput_device.display()
                    ));
                }
            }
            #[cfg(not(unix))]
            let _ = metadata;

            info!("Доступ к {} подтвержден", uinput_device.display());
            Ok(())
        }
        Err(e) => Err(tool_error!(
            permission,
            "Не удалось проверить права доступа к {}: {}",
            uinput_device.display(),
            e
        )),
    }
}

/// Проверить, что plist демона существует и его можно будет перезаписать
pub fn check_plist_access(plist: &Path) -> Result<()> {
    if !plist.is_file() {
        return Err(tool_error!(permission, "Файл {} не найден", plist.display()));
    }

    if !is_root() {
        warn!("⚠️  Приложение запущено не от root!");
        warn!("   Для изменения {} обычно нужен sudo", plist.display());
    }

    Ok(())
}

fn is_root() -> bool {
    std::env::var("USER").map(|user| user == "root").unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;

    #[test]
    fn test_missing_uinput_device() {
        let err = check_uinput_device(Path::new("/nonexistent/uinput")).unwrap_err();
        assert!(matches!(err, ToolError::Permission(ref m) if m.contains("modprobe")));
    }

    #[test]
    fn test_missing_plist() {
        assert!(check_plist_access(Path::new("/nonexistent/org.nixos.nix-daemon.plist")).is_err());
    }

    #[test]
    fn test_existing_plist() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(check_plist_access(file.path()).is_ok());
    }
}
