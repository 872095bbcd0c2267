//! Key event tokens and the rule for committing them to text

use super::error::{KeyboardError, Result};
use std::fmt;

/// A single simulated keystroke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// One printable character
    Char(char),
    /// Space bar
    Space,
    /// Return key, commits a newline
    Enter,
    /// Removes the last committed character
    Backspace,
}

impl KeyEvent {
    /// Parse a key token as produced by a virtual keyboard button.
    ///
    /// Accepts the named keys `"Space"`, `"Enter"` and `"Backspace"`, or a
    /// token holding exactly one printable character. Anything else is
    /// rejected with [`KeyboardError::InvalidKeyEvent`].
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "Space" => return Ok(Self::Space),
            "Enter" => return Ok(Self::Enter),
            "Backspace" => return Ok(Self::Backspace),
            _ => {}
        }

        let mut chars = token.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if c != '\n' => Self::from_char(c),
            _ => Err(KeyboardError::invalid_key(token)),
        }
    }

    /// Map a raw character to its key event.
    ///
    /// A space becomes [`KeyEvent::Space`] and a newline [`KeyEvent::Enter`];
    /// other control characters are rejected.
    pub fn from_char(c: char) -> Result<Self> {
        match c {
            ' ' => Ok(Self::Space),
            '\n' => Ok(Self::Enter),
            c if c.is_control() => Err(KeyboardError::invalid_key(c.to_string())),
            c => Ok(Self::Char(c)),
        }
    }

    /// Reject a hand-built `Char` that carries a control character
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::Char(c) if c.is_control() => Err(KeyboardError::invalid_key(c.to_string())),
            _ => Ok(()),
        }
    }

    /// Commit this key to `text`.
    ///
    /// Backspace on empty text is a no-op.
    pub fn apply_to(&self, text: &mut String) {
        match self {
            Self::Backspace => {
                text.pop();
            }
            Self::Enter => text.push('\n'),
            Self::Space => text.push(' '),
            Self::Char(c) => text.push(*c),
        }
    }

    /// Short label for display on a key cap or badge
    pub fn label(&self) -> String {
        match self {
            Self::Char(c) => c.to_string(),
            Self::Space => "␣".to_string(),
            Self::Enter => "⏎".to_string(),
            Self::Backspace => "⌫".to_string(),
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Char(c) => write!(f, "{}", c),
            Self::Space => write!(f, "Space"),
            Self::Enter => write!(f, "Enter"),
            Self::Backspace => write!(f, "Backspace"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_named_keys() {
        assert_eq!(KeyEvent::parse("Space"), Ok(KeyEvent::Space));
        assert_eq!(KeyEvent::parse("Enter"), Ok(KeyEvent::Enter));
        assert_eq!(KeyEvent::parse("Backspace"), Ok(KeyEvent::Backspace));
    }

    #[test]
    fn parse_single_characters() {
        assert_eq!(KeyEvent::parse("Q"), Ok(KeyEvent::Char('Q')));
        assert_eq!(KeyEvent::parse("7"), Ok(KeyEvent::Char('7')));
        assert_eq!(KeyEvent::parse("é"), Ok(KeyEvent::Char('é')));
        assert_eq!(KeyEvent::parse(" "), Ok(KeyEvent::Space));
    }

    #[test]
    fn parse_rejects_multi_character_tokens() {
        let err = KeyEvent::parse("Hello World!").unwrap_err();
        assert_eq!(err, KeyboardError::invalid_key("Hello World!"));

        assert!(KeyEvent::parse("space").is_err());
        assert!(KeyEvent::parse("").is_err());
        assert!(KeyEvent::parse("\t").is_err());
        assert!(KeyEvent::parse("\n").is_err());
    }

    #[test]
    fn from_char_maps_whitespace() {
        assert_eq!(KeyEvent::from_char(' '), Ok(KeyEvent::Space));
        assert_eq!(KeyEvent::from_char('\n'), Ok(KeyEvent::Enter));
        assert!(KeyEvent::from_char('\u{7}').is_err());
    }

    #[test]
    fn validate_rejects_control_char() {
        assert!(KeyEvent::Char('\u{1b}').validate().is_err());
        assert!(KeyEvent::Char('a').validate().is_ok());
        assert!(KeyEvent::Backspace.validate().is_ok());
    }

    #[test]
    fn apply_appends_and_removes() {
        let mut text = String::new();
        KeyEvent::Char('H').apply_to(&mut text);
        KeyEvent::Char('i').apply_to(&mut text);
        KeyEvent::Space.apply_to(&mut text);
        KeyEvent::Enter.apply_to(&mut text);
        assert_eq!(text, "Hi \n");

        KeyEvent::Backspace.apply_to(&mut text);
        KeyEvent::Backspace.apply_to(&mut text);
        assert_eq!(text, "Hi");
    }

    #[test]
    fn backspace_on_empty_text_is_noop() {
        let mut text = String::new();
        KeyEvent::Backspace.apply_to(&mut text);
        assert_eq!(text, "");
    }

    #[test]
    fn backspace_removes_whole_multibyte_char() {
        let mut text = String::from("né");
        KeyEvent::Backspace.apply_to(&mut text);
        assert_eq!(text, "n");
    }

    #[test]
    fn display_round_trips_through_parse() {
        for event in [KeyEvent::Space, KeyEvent::Enter, KeyEvent::Backspace, KeyEvent::Char('x')] {
            assert_eq!(KeyEvent::parse(&event.to_string()), Ok(event));
        }
    }
}
