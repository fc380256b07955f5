use crate::mappings::KeyTokenToKeysym;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Единица синтетического ввода, накапливаемая медиатором до flush
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyInput {
    /// Обычный текст, печатается как есть
    Text(String),
    /// Одиночная клавиша: символ или токен в угловых скобках (`<enter>`)
    Key(String),
}

impl KeyInput {
    /// Разбить строку на текст и встроенные токены специальных клавиш.
    ///
    /// Неизвестные `<...>` остаются частью текста.
    pub fn parse_sequence(text: &str) -> Vec<KeyInput> {
        let mut result = Vec::new();
        let mut buffer = String::new();
        let mut rest = text;

        while let Some(start) = rest.find('<') {
            let (before, tail) = rest.split_at(start);
            buffer.push_str(before);

            match tail.find('>') {
                Some(end) if KeyTokenToKeysym::is_token(&tail[..=end]) => {
                    if !buffer.is_empty() {
                        result.push(KeyInput::Text(std::mem::take(&mut buffer)));
                    }
                    result.push(KeyInput::Key(tail[..=end].to_string()));
                    rest = &tail[end + 1..];
                }
                _ => {
                    buffer.push('<');
                    rest = &tail[1..];
                }
            }
        }

        buffer.push_str(rest);
        if !buffer.is_empty() {
            result.push(KeyInput::Text(buffer));
        }

        result
    }
}

impl fmt::Display for KeyInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyInput::Text(text) => write!(f, "text({:?})", text),
            KeyInput::Key(key) => write!(f, "key({})", key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_text() {
        assert_eq!(
            KeyInput::parse_sequence("hello"),
            vec![KeyInput::Text("hello".to_string())]
        );
        assert!(KeyInput::parse_sequence("").is_empty());
    }

    #[test]
    fn test_parse_embedded_tokens() {
        assert_eq!(
            KeyInput::parse_sequence("ls -l<enter>exit<Enter>"),
            vec![
                KeyInput::Text("ls -l".to_string()),
                KeyInput::Key("<enter>".to_string()),
                KeyInput::Text("exit".to_string()),
                KeyInput::Key("<Enter>".to_string()),
            ]
        );
    }

    #[test]
    fn test_unknown_tokens_stay_text() {
        assert_eq!(
            KeyInput::parse_sequence("a < b <html> c>"),
            vec![KeyInput::Text("a < b <html> c>".to_string())]
        );
        assert_eq!(
            KeyInput::parse_sequence("<<tab>"),
            vec![
                KeyInput::Text("<".to_string()),
                KeyInput::Key("<tab>".to_string()),
            ]
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(KeyInput::Key("<tab>".into()).to_string(), "key(<tab>)");
        assert_eq!(KeyInput::Text("x".into()).to_string(), "text(\"x\")");
    }
}
