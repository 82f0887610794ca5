use std::{error::Error as StdError, thread, time::Duration};

mod app;
mod commands;
mod error;
mod key;
mod keycode;
mod keypad;
mod os;
pub mod recorder;
pub mod settings;

pub use app::{KeyApp, KEY_COUNT};
pub use commands::{Command, MacroCommand};
pub use error::{EffectorError, Error, Result};
pub use key::{Color, Key, MacroKey, PlainKey, SettingsValueKey};
pub use keycode::{ConsumerControlCode, Keycode, Modifier, MouseButton, SpecialKey, UnknownKeycode};
pub use keypad::Keypad;
pub use os::{OperatingSystem, OsCommands, OsSlot};
pub use settings::{MemorySettings, SettingValue, SettingsStore};

/// The device that performs the effects of commands (the keyboard, mouse, speaker, ...)
pub trait Effector {
    fn press_key(&mut self, key: Keycode) -> std::result::Result<(), EffectorError>;
    fn release_key(&mut self, key: Keycode) -> std::result::Result<(), EffectorError>;
    fn type_text(&mut self, text: &str) -> std::result::Result<(), EffectorError>;
    fn press_media(&mut self, code: ConsumerControlCode) -> std::result::Result<(), EffectorError>;
    /// Releases whatever media code is held
    fn release_media(&mut self) -> std::result::Result<(), EffectorError>;
    fn press_mouse_button(&mut self, button: MouseButton) -> std::result::Result<(), EffectorError>;
    fn release_mouse_button(&mut self, button: MouseButton)
        -> std::result::Result<(), EffectorError>;
    fn move_mouse(&mut self, dx: i32, dy: i32) -> std::result::Result<(), EffectorError>;
    fn scroll(&mut self, lines: i32) -> std::result::Result<(), EffectorError>;
    fn start_tone(&mut self, frequency: u32) -> std::result::Result<(), EffectorError>;
    fn stop_tone(&mut self) -> std::result::Result<(), EffectorError>;
    fn play_file(&mut self, file: &str) -> std::result::Result<(), EffectorError>;

    /// Blocks the control loop. Hosts with their own scheduler can yield here instead.
    fn wait(&mut self, duration: Duration) -> std::result::Result<(), EffectorError> {
        thread::sleep(duration);
        Ok(())
    }
}

/// Everything a key needs while it is pressed or drawn
pub struct Context<'a> {
    pub effector: &'a mut dyn Effector,
    pub settings: &'a mut dyn SettingsStore,
}

impl<'a> Context<'a> {
    pub fn new(effector: &'a mut dyn Effector, settings: &'a mut dyn SettingsStore) -> Self {
        Self { effector, settings }
    }

    /// The OS currently selected in the settings
    pub fn operating_system(&self) -> Result<OperatingSystem> {
        OperatingSystem::from_setting(self.settings.get(settings::OS_SETTING))
    }
}

/// Something physical happened on the keypad
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyDown(usize),
    KeyUp(usize),
    EncoderDown,
    EncoderUp,
    /// Positive is clockwise
    EncoderTurn(i32),
}

/// A keypad (or equivalent)
pub trait Machine {
    /// Waits until a new event is read. `None` once the machine has no more input.
    fn read(&mut self) -> std::result::Result<Option<InputEvent>, Box<dyn StdError>>;
}
