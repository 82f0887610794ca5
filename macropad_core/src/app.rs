use crate::{
    key::{Color, Key},
    Command, Context, Error, InputEvent, Result,
};
use serde::Deserialize;
use std::convert::TryFrom;

/// Number of keys on the keypad
pub const KEY_COUNT: usize = 12;

/// A full keypad layout: one (optional) key per slot, plus the commands bound to the rotary
/// encoder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "KeyAppRepr")]
pub struct KeyApp {
    name: String,
    keys: Vec<Option<Key>>,
    encoder_button: Option<Command>,
    encoder_increase: Option<Command>,
    encoder_decrease: Option<Command>,
}

#[derive(Deserialize)]
struct KeyAppRepr {
    name: String,
    /// `null` leaves a slot empty
    #[serde(default)]
    keys: Vec<Option<Key>>,
    #[serde(default)]
    encoder_button: Option<Command>,
    #[serde(default)]
    encoder_increase: Option<Command>,
    #[serde(default)]
    encoder_decrease: Option<Command>,
}

impl TryFrom<KeyAppRepr> for KeyApp {
    type Error = Error;

    fn try_from(repr: KeyAppRepr) -> Result<Self> {
        let KeyAppRepr {
            name,
            keys,
            encoder_button,
            encoder_increase,
            encoder_decrease,
        } = repr;
        KeyApp::new(&name, keys)
            .map(|app| app.with_encoder(encoder_button, encoder_increase, encoder_decrease))
    }
}

impl KeyApp {
    pub fn new(name: &str, keys: Vec<Option<Key>>) -> Result<Self> {
        if keys.len() > KEY_COUNT {
            return Err(Error::Layout(format!(
                "{:?} has {} keys but the keypad only has {}",
                name,
                keys.len(),
                KEY_COUNT
            )));
        }

        Ok(Self {
            name: name.to_owned(),
            keys,
            encoder_button: None,
            encoder_increase: None,
            encoder_decrease: None,
        })
    }

    pub fn with_encoder(
        self,
        button: Option<Command>,
        increase: Option<Command>,
        decrease: Option<Command>,
    ) -> Self {
        Self {
            encoder_button: button,
            encoder_increase: increase,
            encoder_decrease: decrease,
            ..self
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self, index: usize) -> Option<&Key> {
        self.keys.get(index).and_then(Option::as_ref)
    }

    /// Pressing an empty or nonexistent slot does nothing
    pub fn press_key(&self, index: usize, ctx: &mut Context<'_>) -> Result<()> {
        match self.key(index) {
            Some(key) => {
                tracing::debug!("key {} ({:?}) down", index, key.text(ctx));
                key.press(ctx)
            }
            None => Ok(()),
        }
    }

    pub fn release_key(&self, index: usize, ctx: &mut Context<'_>) -> Result<()> {
        match self.key(index) {
            Some(key) => {
                tracing::debug!("key {} up", index);
                key.release(ctx)
            }
            None => Ok(()),
        }
    }

    pub fn press_encoder(&self, ctx: &mut Context<'_>) -> Result<()> {
        match self.encoder_button {
            Some(ref command) => command.execute(ctx),
            None => Ok(()),
        }
    }

    pub fn release_encoder(&self, ctx: &mut Context<'_>) -> Result<()> {
        match self.encoder_button {
            Some(ref command) => command.undo(ctx),
            None => Ok(()),
        }
    }

    /// Each step of the encoder is a full press and release of the increase (clockwise) or
    /// decrease command
    pub fn rotate_encoder(&self, delta: i32, ctx: &mut Context<'_>) -> Result<()> {
        let steps = delta.unsigned_abs();
        let command = if delta > 0 {
            &self.encoder_increase
        } else {
            &self.encoder_decrease
        };

        if let Some(command) = command {
            tracing::debug!("encoder turned {}", delta);
            for _ in 0..steps {
                command.execute(ctx)?;
                command.undo(ctx)?;
            }
        }
        Ok(())
    }

    /// Text and color of every slot on the keypad, for the display and key lights
    pub fn labels(&self, ctx: &Context<'_>) -> Vec<(String, Color)> {
        (0..KEY_COUNT)
            .map(|i| match self.key(i) {
                Some(key) => (key.text(ctx), key.color(ctx)),
                None => (String::new(), Color::OFF),
            })
            .collect()
    }

    pub fn handle(&self, event: InputEvent, ctx: &mut Context<'_>) -> Result<()> {
        match event {
            InputEvent::KeyDown(index) => self.press_key(index, ctx),
            InputEvent::KeyUp(index) => self.release_key(index, ctx),
            InputEvent::EncoderDown => self.press_encoder(ctx),
            InputEvent::EncoderUp => self.release_encoder(ctx),
            InputEvent::EncoderTurn(delta) => self.rotate_encoder(delta, ctx),
        }
    }
}
