use serde::{Deserialize, Serialize};
use std::fmt;

/// Описание события ввода для одного символа буфера
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeystrokeEvent {
    /// Перевод строки - клавиша Return
    CommitKey,
    /// Табуляция - клавиша Tab
    TabKey,
    /// Точка - отдельная клавиша, а не keystroke
    PunctuationKey,
    /// Символ, который нужно экранировать внутри строкового литерала (`"` и `\`)
    EscapedLiteral(char),
    /// Любой другой символ
    Literal(char),
}

/// Символ, для которого выделена собственная клавиша
pub const PUNCTUATION_CHAR: char = '.';

/// Символы, требующие экранирования
pub const ESCAPABLE_CHARS: [char; 2] = ['"', '\\'];

impl KeystrokeEvent {
    /// Классифицировать символ по таблице правил
    pub fn classify(c: char) -> Self {
        match c {
            '\n' => KeystrokeEvent::CommitKey,
            '\t' => KeystrokeEvent::TabKey,
            PUNCTUATION_CHAR => KeystrokeEvent::PunctuationKey,
            c if ESCAPABLE_CHARS.contains(&c) => KeystrokeEvent::EscapedLiteral(c),
            c => KeystrokeEvent::Literal(c),
        }
    }

    /// Символ, из которого было получено событие
    pub fn source_char(&self) -> char {
        match self {
            KeystrokeEvent::CommitKey => '\n',
            KeystrokeEvent::TabKey => '\t',
            KeystrokeEvent::PunctuationKey => PUNCTUATION_CHAR,
            KeystrokeEvent::EscapedLiteral(c) | KeystrokeEvent::Literal(c) => *c,
        }
    }
}

impl fmt::Display for KeystrokeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeystrokeEvent::CommitKey => write!(f, "KEY_RETURN"),
            KeystrokeEvent::TabKey => write!(f, "KEY_TAB"),
            KeystrokeEvent::PunctuationKey => write!(f, "KEY_PERIOD"),
            KeystrokeEvent::EscapedLiteral(c) => write!(f, "escaped {:?}", c),
            KeystrokeEvent::Literal(c) => write!(f, "literal {:?}", c),
        }
    }
}
