//! An effector that performs nothing and remembers everything. Useful for testing layouts and
//! for dry runs.
use crate::{
    keycode::{ConsumerControlCode, Keycode, MouseButton},
    EffectorError, Effector,
};
use std::time::Duration;

/// A single call made to the effector
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    PressKey(Keycode),
    ReleaseKey(Keycode),
    TypeText(String),
    PressMedia(ConsumerControlCode),
    ReleaseMedia,
    PressMouseButton(MouseButton),
    ReleaseMouseButton(MouseButton),
    MoveMouse(i32, i32),
    Scroll(i32),
    StartTone(u32),
    StopTone,
    PlayFile(String),
    Wait(Duration),
}

/// Everything that is currently held down or playing
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeviceState {
    /// Keys held, in the order they were pressed
    pub keys: Vec<Keycode>,
    pub buttons: Vec<MouseButton>,
    pub media: Option<ConsumerControlCode>,
    pub tone: Option<u32>,
}

#[derive(Debug, Default)]
pub struct RecordingEffector {
    calls: Vec<Call>,
    state: DeviceState,
    failure: Option<EffectorError>,
}

impl RecordingEffector {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    pub fn state(&self) -> &DeviceState {
        &self.state
    }

    /// Take the calls recorded so far, leaving the device state alone
    pub fn drain_calls(&mut self) -> Vec<Call> {
        std::mem::take(&mut self.calls)
    }

    /// Make every following call fail with `failure` (or succeed again with `None`)
    pub fn fail_with(&mut self, failure: Option<EffectorError>) {
        self.failure = failure;
    }

    fn record(&mut self, call: Call) -> Result<(), EffectorError> {
        if let Some(ref failure) = self.failure {
            return Err(failure.clone());
        }

        let state = &mut self.state;
        match call {
            Call::PressKey(key) => {
                if !state.keys.contains(&key) {
                    state.keys.push(key);
                }
            }
            Call::ReleaseKey(key) => state.keys.retain(|k| *k != key),
            Call::PressMedia(code) => state.media = Some(code),
            Call::ReleaseMedia => state.media = None,
            Call::PressMouseButton(button) => {
                if !state.buttons.contains(&button) {
                    state.buttons.push(button);
                }
            }
            Call::ReleaseMouseButton(button) => state.buttons.retain(|b| *b != button),
            Call::StartTone(frequency) => state.tone = Some(frequency),
            Call::StopTone => state.tone = None,
            Call::TypeText(_)
            | Call::MoveMouse(_, _)
            | Call::Scroll(_)
            | Call::PlayFile(_)
            | Call::Wait(_) => {}
        }

        self.calls.push(call);
        Ok(())
    }
}

impl Effector for RecordingEffector {
    fn press_key(&mut self, key: Keycode) -> Result<(), EffectorError> {
        self.record(Call::PressKey(key))
    }

    fn release_key(&mut self, key: Keycode) -> Result<(), EffectorError> {
        self.record(Call::ReleaseKey(key))
    }

    fn type_text(&mut self, text: &str) -> Result<(), EffectorError> {
        self.record(Call::TypeText(text.to_string()))
    }

    fn press_media(&mut self, code: ConsumerControlCode) -> Result<(), EffectorError> {
        self.record(Call::PressMedia(code))
    }

    fn release_media(&mut self) -> Result<(), EffectorError> {
        self.record(Call::ReleaseMedia)
    }

    fn press_mouse_button(&mut self, button: MouseButton) -> Result<(), EffectorError> {
        self.record(Call::PressMouseButton(button))
    }

    fn release_mouse_button(&mut self, button: MouseButton) -> Result<(), EffectorError> {
        self.record(Call::ReleaseMouseButton(button))
    }

    fn move_mouse(&mut self, dx: i32, dy: i32) -> Result<(), EffectorError> {
        self.record(Call::MoveMouse(dx, dy))
    }

    fn scroll(&mut self, lines: i32) -> Result<(), EffectorError> {
        self.record(Call::Scroll(lines))
    }

    fn start_tone(&mut self, frequency: u32) -> Result<(), EffectorError> {
        self.record(Call::StartTone(frequency))
    }

    fn stop_tone(&mut self) -> Result<(), EffectorError> {
        self.record(Call::StopTone)
    }

    fn play_file(&mut self, file: &str) -> Result<(), EffectorError> {
        self.record(Call::PlayFile(file.to_string()))
    }

    fn wait(&mut self, duration: Duration) -> Result<(), EffectorError> {
        self.record(Call::Wait(duration))
    }
}
