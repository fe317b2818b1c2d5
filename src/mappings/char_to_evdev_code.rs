use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const KEY_TAB: u16 = 15;
pub const KEY_ENTER: u16 = 28;
pub const KEY_LEFTSHIFT: u16 = 42;
pub const KEY_DOT: u16 = 52;

/// Код клавиши и признак зажатого Shift
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub code: u16,
    pub shift: bool,
}

impl KeyChord {
    const fn plain(code: u16) -> Self {
        Self { code, shift: false }
    }

    const fn shifted(code: u16) -> Self {
        Self { code, shift: true }
    }
}

// Раскладка US QWERTY: символ -> evdev код
static CHAR_TO_CHORD: Lazy<HashMap<char, KeyChord>> = Lazy::new(|| {
    let mut map = HashMap::new();

    // Буквенные клавиши
    let letters: [(char, u16); 26] = [
        ('a', 30), ('b', 48), ('c', 46), ('d', 32), ('e', 18), ('f', 33),
        ('g', 34), ('h', 35), ('i', 23), ('j', 36), ('k', 37), ('l', 38),
        ('m', 50), ('n', 49), ('o', 24), ('p', 25), ('q', 16), ('r', 19),
        ('s', 31), ('t', 20), ('u', 22), ('v', 47), ('w', 17), ('x', 45),
        ('y', 21), ('z', 44),
    ];
    for (c, code) in letters {
        map.insert(c, KeyChord::plain(code));
        map.insert(c.to_ascii_uppercase(), KeyChord::shifted(code));
    }

    // Цифровой ряд и символы над цифрами
    let digits: [(char, char, u16); 10] = [
        ('1', '!', 2), ('2', '@', 3), ('3', '#', 4), ('4', '$', 5), ('5', '%', 6),
        ('6', '^', 7), ('7', '&', 8), ('8', '*', 9), ('9', '(', 10), ('0', ')', 11),
    ];
    for (c, shifted, code) in digits {
        map.insert(c, KeyChord::plain(code));
        map.insert(shifted, KeyChord::shifted(code));
    }

    // Знаки пунктуации
    let punctuation: [(char, char, u16); 11] = [
        ('-', '_', 12),   // KEY_MINUS
        ('=', '+', 13),   // KEY_EQUAL
        ('[', '{', 26),   // KEY_LEFTBRACE
        (']', '}', 27),   // KEY_RIGHTBRACE
        ('\\', '|', 43),  // KEY_BACKSLASH
        (';', ':', 39),   // KEY_SEMICOLON
        ('\'', '"', 40),  // KEY_APOSTROPHE
        ('`', '~', 41),   // KEY_GRAVE
        (',', '<', 51),   // KEY_COMMA
        ('.', '>', 52),   // KEY_DOT
        ('/', '?', 53),   // KEY_SLASH
    ];
    for (c, shifted, code) in punctuation {
        map.insert(c, KeyChord::plain(code));
        map.insert(shifted, KeyChord::shifted(code));
    }

    // Специальные клавиши
    map.insert(' ', KeyChord::plain(57));   // KEY_SPACE
    map.insert('\t', KeyChord::plain(KEY_TAB));
    map.insert('\n', KeyChord::plain(KEY_ENTER));

    map
});

/// Преобразование символов в evdev коды
pub struct CharToEvdevCode;

impl CharToEvdevCode {
    /// Получить код клавиши (и Shift) для символа
    pub fn translate(c: char) -> Result<KeyChord, String> {
        CHAR_TO_CHORD
            .get(&c)
            .copied()
            .ok_or_else(|| format!("Символ {:?} отсутствует в раскладке US", c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_char_mapping() {
        assert_eq!(CharToEvdevCode::translate('a').unwrap(), KeyChord::plain(30));
        assert_eq!(CharToEvdevCode::translate(' ').unwrap(), KeyChord::plain(57));
        assert_eq!(CharToEvdevCode::translate('\n').unwrap().code, KEY_ENTER);
    }

    #[test]
    fn test_uppercase_needs_shift() {
        assert_eq!(CharToEvdevCode::translate('A').unwrap(), KeyChord::shifted(30));
        assert_eq!(CharToEvdevCode::translate('Z').unwrap(), KeyChord::shifted(44));
    }

    #[test]
    fn test_punctuation_pairs() {
        assert_eq!(CharToEvdevCode::translate('"').unwrap(), KeyChord::shifted(40));
        assert_eq!(CharToEvdevCode::translate('\\').unwrap(), KeyChord::plain(43));
        assert_eq!(CharToEvdevCode::translate('|').unwrap(), KeyChord::shifted(43));
        assert_eq!(CharToEvdevCode::translate('.').unwrap().code, KEY_DOT);
        assert_eq!(CharToEvdevCode::translate('!').unwrap(), KeyChord::shifted(2));
    }

    #[test]
    fn test_unknown_char() {
        assert!(CharToEvdevCode::translate('ж').is_err());
        assert!(CharToEvdevCode::translate('€').is_err());
    }
}
