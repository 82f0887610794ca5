//! What action should be taken when a key is pressed, and how to take it back when it is released
use crate::{
    keycode::{ConsumerControlCode, Keycode, MouseButton},
    os::OperatingSystem,
    settings::{SettingValue, APP_SETTING, PREVIOUS_APP_SETTING},
    Context, Result,
};
use serde::{Deserialize, Deserializer};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// Hold a key down until undone
    Press(Keycode),
    Release(Keycode),
    /// Run commands one after another. Undo also runs front to back.
    Sequence(Vec<Command>),
    /// Block for a while (given in seconds in layout files)
    Wait(#[serde(deserialize_with = "seconds")] Duration),
    /// Type a string with the host keyboard layout
    Text(String),
    Media(ConsumerControlCode),
    MouseClick(MouseButton),
    MouseMove(i32, i32),
    Scroll(i32),
    /// Play a tone at a frequency in Hz until undone
    Tone(u32),
    PlayFile(String),
    /// Choose a command depending on the OS setting
    PerOs(MacroCommand),
    /// Make the named app the active one, remembering the app that was active before
    SwitchApp(String),
    /// Go back to the app that was active before the current one
    PreviousApp,
}

impl Command {
    pub fn sequence<I: IntoIterator<Item = Command>>(commands: I) -> Self {
        Self::Sequence(commands.into_iter().collect())
    }

    pub fn text(text: &str) -> Self {
        Self::Text(text.to_owned())
    }

    pub fn execute(&self, ctx: &mut Context<'_>) -> Result<()> {
        tracing::trace!("execute {:?}", self);
        match self {
            Command::Press(key) => ctx.effector.press_key(*key)?,
            Command::Release(key) => ctx.effector.release_key(*key)?,
            Command::Sequence(commands) => {
                for command in commands {
                    command.execute(ctx)?;
                }
            }
            Command::Wait(duration) => ctx.effector.wait(*duration)?,
            Command::Text(text) => ctx.effector.type_text(text)?,
            Command::Media(code) => {
                // only one media code can be held at a time
                ctx.effector.release_media()?;
                ctx.effector.press_media(*code)?;
            }
            Command::MouseClick(button) => ctx.effector.press_mouse_button(*button)?,
            Command::MouseMove(dx, dy) => ctx.effector.move_mouse(*dx, *dy)?,
            Command::Scroll(lines) => ctx.effector.scroll(*lines)?,
            Command::Tone(frequency) => {
                ctx.effector.stop_tone()?;
                ctx.effector.start_tone(*frequency)?;
            }
            Command::PlayFile(file) => ctx.effector.play_file(file)?,
            Command::PerOs(command) => command.resolve(ctx.operating_system()?).execute(ctx)?,
            Command::SwitchApp(name) => switch_app(ctx, SettingValue::from(name.as_str())),
            Command::PreviousApp => match ctx.settings.get(PREVIOUS_APP_SETTING) {
                Some(previous) => switch_app(ctx, previous),
                None => tracing::debug!("no previous app to go back to"),
            },
        }

        Ok(())
    }

    /// Release whatever `execute` left held. Commands that hold nothing do nothing here.
    pub fn undo(&self, ctx: &mut Context<'_>) -> Result<()> {
        if !self.is_momentary() {
            tracing::trace!("nothing to undo for {:?}", self);
            return Ok(());
        }

        tracing::trace!("undo {:?}", self);
        match self {
            Command::Press(key) => ctx.effector.release_key(*key)?,
            Command::Sequence(commands) => {
                for command in commands {
                    command.undo(ctx)?;
                }
            }
            Command::Media(_) => ctx.effector.release_media()?,
            Command::MouseClick(button) => ctx.effector.release_mouse_button(*button)?,
            Command::Tone(_) => ctx.effector.stop_tone()?,
            Command::PerOs(command) => command.resolve(ctx.operating_system()?).undo(ctx)?,
            Command::Release(_)
            | Command::Wait(_)
            | Command::Text(_)
            | Command::MouseMove(_, _)
            | Command::Scroll(_)
            | Command::PlayFile(_)
            | Command::SwitchApp(_)
            | Command::PreviousApp => {}
        }

        Ok(())
    }

    /// Whether executing the command leaves something held that `undo` has to release
    pub fn is_momentary(&self) -> bool {
        match self {
            Command::Press(_) | Command::Media(_) | Command::MouseClick(_) | Command::Tone(_) => {
                true
            }
            Command::Sequence(commands) => commands.iter().any(Command::is_momentary),
            Command::PerOs(command) => command.commands().any(Command::is_momentary),
            _ => false,
        }
    }
}

fn switch_app(ctx: &mut Context<'_>, app: SettingValue) {
    let current = ctx.settings.get(APP_SETTING);
    if current.as_ref() == Some(&app) {
        return;
    }
    if let Some(current) = current {
        ctx.settings.put(PREVIOUS_APP_SETTING, current);
    }
    tracing::debug!("switching to app {}", app);
    ctx.settings.put(APP_SETTING, app);
}

/// A command with OS specific overrides. The override for the current OS runs if there is one,
/// otherwise the default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MacroCommand {
    default: Box<Command>,
    #[serde(rename = "LIN", default)]
    linux: Option<Box<Command>>,
    #[serde(rename = "MAC", default)]
    mac: Option<Box<Command>>,
    #[serde(rename = "WIN", default)]
    windows: Option<Box<Command>>,
}

impl MacroCommand {
    pub fn new(default: Command) -> Self {
        Self {
            default: Box::new(default),
            linux: None,
            mac: None,
            windows: None,
        }
    }

    pub fn with(self, os: OperatingSystem, command: Command) -> Self {
        let command = Some(Box::new(command));
        match os {
            OperatingSystem::Linux => Self {
                linux: command,
                ..self
            },
            OperatingSystem::Mac => Self {
                mac: command,
                ..self
            },
            OperatingSystem::Windows => Self {
                windows: command,
                ..self
            },
        }
    }

    pub fn resolve(&self, os: OperatingSystem) -> &Command {
        let command = match os {
            OperatingSystem::Linux => &self.linux,
            OperatingSystem::Mac => &self.mac,
            OperatingSystem::Windows => &self.windows,
        };
        command.as_deref().unwrap_or(&self.default)
    }

    fn commands(&self) -> impl Iterator<Item = &Command> {
        std::iter::once(&*self.default).chain(
            vec![&self.linux, &self.mac, &self.windows]
                .into_iter()
                .filter_map(|c| c.as_deref()),
        )
    }
}

fn seconds<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Duration, D::Error> {
    let secs = f64::deserialize(deserializer)?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "wait must be a non-negative number of seconds, got {}",
            secs
        )));
    }
    Ok(Duration::from_secs_f64(secs))
}
