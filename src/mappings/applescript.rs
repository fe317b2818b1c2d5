use crate::events::KeystrokeEvent;

// Виртуальные коды клавиш macOS (Carbon kVK_*)
pub const KEY_CODE_RETURN: u16 = 36;
pub const KEY_CODE_TAB: u16 = 48;
pub const KEY_CODE_PERIOD: u16 = 47;

/// Экранировать символ для строкового литерала AppleScript
pub fn escape_literal(c: char) -> String {
    match c {
        '\\' => "\\\\".to_string(),
        '"' => "\\\"".to_string(),
        c => c.to_string(),
    }
}

/// Построить скрипт System Events для одного события
pub fn render(event: KeystrokeEvent) -> String {
    match event {
        KeystrokeEvent::CommitKey => key_code_script(KEY_CODE_RETURN),
        KeystrokeEvent::TabKey => key_code_script(KEY_CODE_TAB),
        KeystrokeEvent::PunctuationKey => key_code_script(KEY_CODE_PERIOD),
        KeystrokeEvent::EscapedLiteral(c) => keystroke_script(&escape_literal(c)),
        KeystrokeEvent::Literal(c) => keystroke_script(&c.to_string()),
    }
}

fn key_code_script(code: u16) -> String {
    format!("tell application \"System Events\" to key code {}", code)
}

fn keystroke_script(text: &str) -> String {
    format!("tell application \"System Events\" to keystroke \"{}\"", text)
}
