use std::io::{self, BufRead, Write};

/// Задать вопрос оператору и дождаться ответа "y"/"yes"
///
/// Любой другой ответ, пустая строка или EOF считаются отказом.
pub fn confirm<R: BufRead, W: Write>(question: &str, input: &mut R, out: &mut W) -> io::Result<bool> {
    write!(out, "{} (y/N): ", question)?;
    out.flush()?;

    let mut answer = String::new();
    if input.read_line(&mut answer)? == 0 {
        return Ok(false);
    }

    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn ask(answer: &str) -> (bool, String) {
        let mut input = Cursor::new(answer.as_bytes().to_vec());
        let mut out = Vec::new();
        let confirmed = confirm("Продолжить?", &mut input, &mut out).unwrap();
        (confirmed, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_affirmative_answers() {
        assert!(ask("y\n").0);
        assert!(ask("Y\n").0);
        assert!(ask("yes\r\n").0);
    }

    #[test]
    fn test_everything_else_declines() {
        assert!(!ask("\n").0);
        assert!(!ask("n\n").0);
        assert!(!ask("yep\n").0);
        assert!(!ask("").0);
    }

    #[test]
    fn test_prompt_written() {
        let (_, out) = ask("n\n");
        assert_eq!(out, "Продолжить? (y/N): ");
    }
}
