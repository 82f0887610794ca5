//! Identifiers for the things an effector can press: keyboard keys, consumer-control (media)
//! codes and mouse buttons.
use serde::Deserialize;
use std::{convert::TryFrom, fmt, str::FromStr};
use thiserror::Error;

/// A key on the virtual keyboard
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Keycode {
    Special(SpecialKey),
    Modifier(Modifier),
    Layout(char), // literal key (ex: "a", "b", etc.)
    /// Platform specific key code
    Raw(u16),
}

#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq)]
pub enum SpecialKey {
    Backspace,
    CapsLock,
    Delete,
    DownArrow,
    End,
    Escape,
    F1,
    F10,
    F11,
    F12,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    Home,
    LeftArrow,
    PageDown,
    PageUp,
    Return,
    RightArrow,
    Space,
    Tab,
    UpArrow,
}

#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq)]
pub enum Modifier {
    Alt,
    Control,
    /// Command on MacOS, the Windows key elsewhere
    Meta,
    Option, // for MacOS
    Shift,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown keycode name: {0:?}")]
pub struct UnknownKeycode(pub String);

const SPECIAL_NAMES: &[(&str, SpecialKey)] = &[
    ("BACKSPACE", SpecialKey::Backspace),
    ("CAPS_LOCK", SpecialKey::CapsLock),
    ("DELETE", SpecialKey::Delete),
    ("DOWN_ARROW", SpecialKey::DownArrow),
    ("END", SpecialKey::End),
    ("ESCAPE", SpecialKey::Escape),
    ("F1", SpecialKey::F1),
    ("F2", SpecialKey::F2),
    ("F3", SpecialKey::F3),
    ("F4", SpecialKey::F4),
    ("F5", SpecialKey::F5),
    ("F6", SpecialKey::F6),
    ("F7", SpecialKey::F7),
    ("F8", SpecialKey::F8),
    ("F9", SpecialKey::F9),
    ("F10", SpecialKey::F10),
    ("F11", SpecialKey::F11),
    ("F12", SpecialKey::F12),
    ("HOME", SpecialKey::Home),
    ("LEFT_ARROW", SpecialKey::LeftArrow),
    ("PAGE_DOWN", SpecialKey::PageDown),
    ("PAGE_UP", SpecialKey::PageUp),
    ("ENTER", SpecialKey::Return),
    ("RETURN", SpecialKey::Return),
    ("RIGHT_ARROW", SpecialKey::RightArrow),
    ("SPACEBAR", SpecialKey::Space),
    ("SPACE", SpecialKey::Space),
    ("TAB", SpecialKey::Tab),
    ("UP_ARROW", SpecialKey::UpArrow),
];

const MODIFIER_NAMES: &[(&str, Modifier)] = &[
    ("ALT", Modifier::Alt),
    ("CONTROL", Modifier::Control),
    ("COMMAND", Modifier::Meta),
    ("GUI", Modifier::Meta),
    ("WINDOWS", Modifier::Meta),
    ("OPTION", Modifier::Option),
    ("SHIFT", Modifier::Shift),
];

const DIGIT_NAMES: [&str; 10] = [
    "ZERO", "ONE", "TWO", "THREE", "FOUR", "FIVE", "SIX", "SEVEN", "EIGHT", "NINE",
];

impl FromStr for Keycode {
    type Err = UnknownKeycode;

    /// Parses the upper case key names used in layout files (ex: "CONTROL", "LEFT_ARROW", "Q").
    /// Hex numbers (ex: "0x7e") are raw key codes.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        if let Some(&(_, key)) = SPECIAL_NAMES.iter().find(|(n, _)| *n == name) {
            return Ok(Keycode::Special(key));
        }
        if let Some(&(_, m)) = MODIFIER_NAMES.iter().find(|(n, _)| *n == name) {
            return Ok(Keycode::Modifier(m));
        }
        if let Some(digit) = DIGIT_NAMES.iter().position(|n| *n == name) {
            return Ok(Keycode::Layout((b'0' + digit as u8) as char));
        }
        if let Some(hex) = name.strip_prefix("0x") {
            return u16::from_str_radix(hex, 16)
                .map(Keycode::Raw)
                .map_err(|_| UnknownKeycode(name.to_string()));
        }

        let mut chars = name.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_whitespace() => Ok(Keycode::Layout(c.to_ascii_lowercase())),
            _ => Err(UnknownKeycode(name.to_string())),
        }
    }
}

impl TryFrom<String> for Keycode {
    type Error = UnknownKeycode;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

impl fmt::Display for Keycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Keycode::Special(key) => {
                let name = SPECIAL_NAMES
                    .iter()
                    .find(|(_, k)| k == key)
                    .map_or("?", |(n, _)| n);
                f.write_str(name)
            }
            Keycode::Modifier(m) => {
                let name = MODIFIER_NAMES
                    .iter()
                    .find(|(_, k)| k == m)
                    .map_or("?", |(n, _)| n);
                f.write_str(name)
            }
            Keycode::Layout(c) => write!(f, "{}", c.to_ascii_uppercase()),
            Keycode::Raw(code) => write!(f, "0x{:x}", code),
        }
    }
}

/// A consumer-control (media) function
#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsumerControlCode {
    Mute,
    PlayPause,
    ScanNextTrack,
    ScanPreviousTrack,
    Stop,
    Eject,
    FastForward,
    Rewind,
    VolumeIncrement,
    VolumeDecrement,
    BrightnessIncrement,
    BrightnessDecrement,
}

impl ConsumerControlCode {
    /// USB HID usage ID on the consumer page
    pub fn usage_id(self) -> u16 {
        match self {
            ConsumerControlCode::BrightnessIncrement => 0x6f,
            ConsumerControlCode::BrightnessDecrement => 0x70,
            ConsumerControlCode::FastForward => 0xb3,
            ConsumerControlCode::Rewind => 0xb4,
            ConsumerControlCode::ScanNextTrack => 0xb5,
            ConsumerControlCode::ScanPreviousTrack => 0xb6,
            ConsumerControlCode::Stop => 0xb7,
            ConsumerControlCode::Eject => 0xb8,
            ConsumerControlCode::PlayPause => 0xcd,
            ConsumerControlCode::Mute => 0xe2,
            ConsumerControlCode::VolumeIncrement => 0xe9,
            ConsumerControlCode::VolumeDecrement => 0xea,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Hash, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}
