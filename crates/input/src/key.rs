use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Keys the camera controls can be bound to.
///
/// Independent of any windowing library. The desktop app maps its native
/// key codes onto this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Up,
    Down,
    Left,
    Right,
    Space,
    Shift,
    Control,
    Escape,
    Enter,
}

impl Key {
    const LETTERS: [Key; 26] = [
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::L,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::V,
        Key::W,
        Key::X,
        Key::Y,
        Key::Z,
    ];

    /// The letter key for an ASCII letter, either case.
    pub fn from_letter(c: char) -> Option<Key> {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        let index = (c.to_ascii_lowercase() as u8 - b'a') as usize;
        Some(Self::LETTERS[index])
    }

    pub fn name(self) -> &'static str {
        match self {
            Key::A => "a",
            Key::B => "b",
            Key::C => "c",
            Key::D => "d",
            Key::E => "e",
            Key::F => "f",
            Key::G => "g",
            Key::H => "h",
            Key::I => "i",
            Key::J => "j",
            Key::K => "k",
            Key::L => "l",
            Key::M => "m",
            Key::N => "n",
            Key::O => "o",
            Key::P => "p",
            Key::Q => "q",
            Key::R => "r",
            Key::S => "s",
            Key::T => "t",
            Key::U => "u",
            Key::V => "v",
            Key::W => "w",
            Key::X => "x",
            Key::Y => "y",
            Key::Z => "z",
            Key::Up => "up",
            Key::Down => "down",
            Key::Left => "left",
            Key::Right => "right",
            Key::Space => "space",
            Key::Shift => "shift",
            Key::Control => "control",
            Key::Escape => "escape",
            Key::Enter => "enter",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown key: {0:?}")]
pub struct ParseKeyError(pub String);

impl FromStr for Key {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        let key = match lower.as_str() {
            "up" | "arrowup" => Key::Up,
            "down" | "arrowdown" => Key::Down,
            "left" | "arrowleft" => Key::Left,
            "right" | "arrowright" => Key::Right,
            "space" => Key::Space,
            "shift" => Key::Shift,
            "control" | "ctrl" => Key::Control,
            "escape" | "esc" => Key::Escape,
            "enter" | "return" => Key::Enter,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => {
                        Key::from_letter(c).ok_or_else(|| ParseKeyError(s.to_string()))?
                    }
                    _ => return Err(ParseKeyError(s.to_string())),
                }
            }
        };
        Ok(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_letters_and_named_keys() {
        assert_eq!("w".parse::<Key>(), Ok(Key::W));
        assert_eq!("W".parse::<Key>(), Ok(Key::W));
        assert_eq!("up".parse::<Key>(), Ok(Key::Up));
        assert_eq!("ArrowLeft".parse::<Key>(), Ok(Key::Left));
        assert_eq!("esc".parse::<Key>(), Ok(Key::Escape));
        assert_eq!("ctrl".parse::<Key>(), Ok(Key::Control));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!("f13".parse::<Key>().is_err());
        assert!("1".parse::<Key>().is_err());
        assert!("".parse::<Key>().is_err());
    }

    #[test]
    fn names_round_trip() {
        for c in 'a'..='z' {
            let key = Key::from_letter(c).unwrap();
            assert_eq!(key.name(), c.to_string());
            assert_eq!(key.name().parse::<Key>(), Ok(key));
        }
        for key in [Key::Up, Key::Shift, Key::Escape, Key::Enter] {
            assert_eq!(key.to_string().parse::<Key>(), Ok(key));
        }
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let yaml = serde_yaml::to_string(&Key::Space).unwrap();
        assert_eq!(yaml.trim(), "space");
        let key: Key = serde_yaml::from_str("q").unwrap();
        assert_eq!(key, Key::Q);
    }
}
