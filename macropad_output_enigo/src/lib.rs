//! Performs commands on the host with enigo. Media keys, tones and sound files are not something
//! enigo can emit, so those fail with `EffectorError::Unsupported`.

use enigo::{Enigo, Key, KeyboardControllable, MouseButton, MouseControllable};
use macropad_core::{
    ConsumerControlCode, EffectorError, Effector, Keycode, Modifier, MouseButton as InternalButton,
    SpecialKey,
};

pub struct EnigoEffector {
    enigo: Enigo,
}

impl EnigoEffector {
    pub fn new() -> Self {
        Self {
            enigo: Enigo::new(),
        }
    }
}

impl Default for EnigoEffector {
    fn default() -> Self {
        Self::new()
    }
}

impl Effector for EnigoEffector {
    fn press_key(&mut self, key: Keycode) -> Result<(), EffectorError> {
        tracing::trace!("key down {}", key);
        self.enigo.key_down(from_keycode(key));
        Ok(())
    }

    fn release_key(&mut self, key: Keycode) -> Result<(), EffectorError> {
        tracing::trace!("key up {}", key);
        self.enigo.key_up(from_keycode(key));
        Ok(())
    }

    fn type_text(&mut self, text: &str) -> Result<(), EffectorError> {
        self.enigo.key_sequence(text);
        Ok(())
    }

    fn press_media(&mut self, _code: ConsumerControlCode) -> Result<(), EffectorError> {
        Err(EffectorError::Unsupported("media keys"))
    }

    fn release_media(&mut self) -> Result<(), EffectorError> {
        // nothing was ever pressed
        Ok(())
    }

    fn press_mouse_button(&mut self, button: InternalButton) -> Result<(), EffectorError> {
        self.enigo.mouse_down(from_button(button));
        Ok(())
    }

    fn release_mouse_button(&mut self, button: InternalButton) -> Result<(), EffectorError> {
        self.enigo.mouse_up(from_button(button));
        Ok(())
    }

    fn move_mouse(&mut self, dx: i32, dy: i32) -> Result<(), EffectorError> {
        self.enigo.mouse_move_relative(dx, dy);
        Ok(())
    }

    fn scroll(&mut self, lines: i32) -> Result<(), EffectorError> {
        // positive lines scroll up, enigo scrolls down for positive lengths
        self.enigo.mouse_scroll_y(-lines);
        Ok(())
    }

    fn start_tone(&mut self, _frequency: u32) -> Result<(), EffectorError> {
        Err(EffectorError::Unsupported("tones"))
    }

    fn stop_tone(&mut self) -> Result<(), EffectorError> {
        // no tone can be playing
        Ok(())
    }

    fn play_file(&mut self, _file: &str) -> Result<(), EffectorError> {
        Err(EffectorError::Unsupported("sound files"))
    }
}

fn from_keycode(key: Keycode) -> Key {
    match key {
        Keycode::Special(special_key) => match special_key {
            SpecialKey::Backspace => Key::Backspace,
            SpecialKey::CapsLock => Key::CapsLock,
            SpecialKey::Delete => Key::Delete,
            SpecialKey::DownArrow => Key::DownArrow,
            SpecialKey::End => Key::End,
            SpecialKey::Escape => Key::Escape,
            SpecialKey::F1 => Key::F1,
            SpecialKey::F10 => Key::F10,
            SpecialKey::F11 => Key::F11,
            SpecialKey::F12 => Key::F12,
            SpecialKey::F2 => Key::F2,
            SpecialKey::F3 => Key::F3,
            SpecialKey::F4 => Key::F4,
            SpecialKey::F5 => Key::F5,
            SpecialKey::F6 => Key::F6,
            SpecialKey::F7 => Key::F7,
            SpecialKey::F8 => Key::F8,
            SpecialKey::F9 => Key::F9,
            SpecialKey::Home => Key::Home,
            SpecialKey::LeftArrow => Key::LeftArrow,
            SpecialKey::PageDown => Key::PageDown,
            SpecialKey::PageUp => Key::PageUp,
            SpecialKey::Return => Key::Return,
            SpecialKey::RightArrow => Key::RightArrow,
            SpecialKey::Space => Key::Space,
            SpecialKey::Tab => Key::Tab,
            #[cfg(target_os = "macos")]
            SpecialKey::UpArrow => Key::Raw(0x7e), // NOTE: enigo sends the wrong code on macos
            #[cfg(not(target_os = "macos"))]
            SpecialKey::UpArrow => Key::UpArrow,
        },
        Keycode::Modifier(modifier) => match modifier {
            Modifier::Alt => Key::Alt,
            Modifier::Control => Key::Control,
            Modifier::Meta => Key::Meta,
            Modifier::Option => Key::Option,
            Modifier::Shift => Key::Shift,
        },
        Keycode::Layout(c) => Key::Layout(c),
        Keycode::Raw(code) => Key::Raw(code),
    }
}

fn from_button(button: InternalButton) -> MouseButton {
    match button {
        InternalButton::Left => MouseButton::Left,
        InternalButton::Right => MouseButton::Right,
        InternalButton::Middle => MouseButton::Middle,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_keycode() {
        assert_eq!(from_keycode(Keycode::Layout('q')), Key::Layout('q'));
        assert_eq!(
            from_keycode(Keycode::Modifier(Modifier::Meta)),
            Key::Meta
        );
        assert_eq!(
            from_keycode(Keycode::Special(SpecialKey::PageUp)),
            Key::PageUp
        );
        assert_eq!(from_keycode(Keycode::Raw(0x31)), Key::Raw(0x31));
    }
}
