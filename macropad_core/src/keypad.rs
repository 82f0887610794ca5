//! A keypad running several apps. The app setting picks which app's keys are live; keys are
//! released in the app they were pressed in, even if pressing them switched apps.
use crate::{
    key::Color,
    settings::{SettingValue, APP_SETTING},
    Context, Error, InputEvent, KeyApp, Result,
};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct Keypad {
    apps: Vec<KeyApp>,
    /// Key index to the app it was pressed in
    held_keys: HashMap<usize, usize>,
    held_encoder: Option<usize>,
}

impl Keypad {
    /// The first app is active until something switches away from it
    pub fn new(apps: Vec<KeyApp>) -> Result<Self> {
        if apps.is_empty() {
            return Err(Error::Layout("a keypad needs at least one app".to_string()));
        }
        for (i, app) in apps.iter().enumerate() {
            if apps[..i].iter().any(|other| other.name() == app.name()) {
                return Err(Error::Layout(format!(
                    "more than one app is named {:?}",
                    app.name()
                )));
            }
        }

        Ok(Self {
            apps,
            held_keys: HashMap::new(),
            held_encoder: None,
        })
    }

    pub fn apps(&self) -> &[KeyApp] {
        &self.apps
    }

    fn find(&self, value: Option<SettingValue>) -> Option<usize> {
        match value {
            Some(SettingValue::Text(name)) => self.apps.iter().position(|app| app.name() == name),
            _ => None,
        }
    }

    fn current_index(&self, ctx: &Context<'_>) -> usize {
        self.find(ctx.settings.get(APP_SETTING)).unwrap_or(0)
    }

    /// The app whose keys are live
    pub fn current(&self, ctx: &Context<'_>) -> &KeyApp {
        &self.apps[self.current_index(ctx)]
    }

    pub fn labels(&self, ctx: &Context<'_>) -> Vec<(String, Color)> {
        self.current(ctx).labels(ctx)
    }

    pub fn handle(&mut self, event: InputEvent, ctx: &mut Context<'_>) -> Result<()> {
        let current = self.current_index(ctx);
        // keep the setting pointing at a real app so that switching away can be undone
        let name = SettingValue::from(self.apps[current].name());
        if ctx.settings.get(APP_SETTING).as_ref() != Some(&name) {
            if let Some(unknown) = ctx.settings.get(APP_SETTING) {
                tracing::warn!("no app named {}, using {}", unknown, name);
            }
            ctx.settings.put(APP_SETTING, name);
        }

        match event {
            InputEvent::KeyDown(index) => {
                self.held_keys.insert(index, current);
                self.apps[current].press_key(index, ctx)
            }
            InputEvent::KeyUp(index) => {
                let app = self.held_keys.remove(&index).unwrap_or(current);
                self.apps[app].release_key(index, ctx)
            }
            InputEvent::EncoderDown => {
                self.held_encoder = Some(current);
                self.apps[current].press_encoder(ctx)
            }
            InputEvent::EncoderUp => {
                let app = self.held_encoder.take().unwrap_or(current);
                self.apps[app].release_encoder(ctx)
            }
            InputEvent::EncoderTurn(delta) => self.apps[current].rotate_encoder(delta, ctx),
        }
    }
}
