use crate::error::{Result, ToolError};
use crate::events::KeystrokeEvent;
use crate::mappings::char_to_evdev_code::{KEY_DOT, KEY_ENTER, KEY_LEFTSHIFT, KEY_TAB};
use crate::mappings::{CharToEvdevCode, KeyChord};
use crate::tool_error;
use crate::utils::permissions;
use tracing::{debug, info};

use super::r#trait::KeystrokeSynthesizer;

const EV_SYN: i32 = 0;
const EV_KEY: i32 = 1;

/// Виртуальная клавиатура uinput (Linux)
pub struct VirtualDevice {
    device: uinput::Device,
    device_name: String,
}

impl VirtualDevice {
    pub fn new(device_name: &str) -> Result<Self> {
        info!("Инициализация VirtualDevice '{}'", device_name);

        permissions::check_uinput_access()?;
        let device = Self::create_virtual_device(device_name)?;

        Ok(Self {
            device,
            device_name: device_name.to_string(),
        })
    }

    fn create_virtual_device(device_name: &str) -> Result<uinput::Device> {
        info!("Создание виртуального устройства uinput '{}' для инъекции клавиш", device_name);

        let virtual_device = uinput::default()
            .and_then(|builder| builder.name(device_name))
            .and_then(|builder| builder.event(uinput::event::Keyboard::All))
            .and_then(|builder| builder.create())
            .map_err(|e| tool_error!(uinput, "Не удалось создать виртуальное устройство '{}': {}", device_name, e))?;

        info!("Виртуальное устройство '{}' создано успешно", device_name);
        Ok(virtual_device)
    }

    fn chord_for(event: KeystrokeEvent) -> Result<KeyChord> {
        match event {
            KeystrokeEvent::CommitKey => Ok(KeyChord { code: KEY_ENTER, shift: false }),
            KeystrokeEvent::TabKey => Ok(KeyChord { code: KEY_TAB, shift: false }),
            KeystrokeEvent::PunctuationKey => Ok(KeyChord { code: KEY_DOT, shift: false }),
            KeystrokeEvent::EscapedLiteral(c) | KeystrokeEvent::Literal(c) => {
                CharToEvdevCode::translate(c).map_err(|e| ToolError::synthesis(c, e))
            }
        }
    }

    fn write_key(&mut self, code: u16, value: i32) -> Result<()> {
        self.device
            .write(EV_KEY, code as i32, value)
            .map_err(|e| tool_error!(uinput, "Не удалось отправить событие клавиши {}: {}", code, e))?;

        // Синхронизируем события
        self.device
            .write(EV_SYN, 0, 0)
            .map_err(|e| tool_error!(uinput, "Не удалось синхронизировать события: {}", e))?;

        Ok(())
    }

    /// Нажать и отпустить клавишу, при необходимости с Shift
    fn tap(&mut self, chord: KeyChord) -> Result<()> {
        if chord.shift {
            self.write_key(KEY_LEFTSHIFT, 1)?;
        }

        let result = self
            .write_key(chord.code, 1)
            .and_then(|_| self.write_key(chord.code, 0));

        // Shift отпускаем в любом случае, чтобы не залип
        if chord.shift {
            self.write_key(KEY_LEFTSHIFT, 0)?;
        }

        result
    }
}

#[async_trait::async_trait]
impl KeystrokeSynthesizer for VirtualDevice {
    fn name(&self) -> &'static str {
        "uinput"
    }

    async fn synthesize(&mut self, event: KeystrokeEvent) -> Result<()> {
        let chord = Self::chord_for(event)?;
        debug!("Виртуальное событие {} -> KEY_{} (shift: {})", event, chord.code, chord.shift);

        self.tap(chord)
            .map_err(|e| ToolError::synthesis(event.source_char(), e.to_string()))
    }
}

impl Drop for VirtualDevice {
    fn drop(&mut self) {
        info!("Закрытие виртуального устройства '{}'", self.device_name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_keys_use_dedicated_codes() {
        assert_eq!(VirtualDevice::chord_for(KeystrokeEvent::CommitKey).unwrap().code, KEY_ENTER);
        assert_eq!(VirtualDevice::chord_for(KeystrokeEvent::TabKey).unwrap().code, KEY_TAB);
        assert_eq!(VirtualDevice::chord_for(KeystrokeEvent::PunctuationKey).unwrap().code, KEY_DOT);
    }

    #[test]
    fn test_escaped_literal_maps_to_layout_key() {
        let quote = VirtualDevice::chord_for(KeystrokeEvent::EscapedLiteral('"')).unwrap();
        assert_eq!(quote, KeyChord { code: 40, shift: true });
    }

    #[test]
    fn test_unmapped_char_is_synthesis_error() {
        let err = VirtualDevice::chord_for(KeystrokeEvent::Literal('ж')).unwrap_err();
        assert!(matches!(err, ToolError::Synthesis { character: 'ж', .. }));
    }
}
