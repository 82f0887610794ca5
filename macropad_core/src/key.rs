//! Keys bind what is shown on a physical key (text and color) to what happens when it is pressed.
use crate::{
    os::{OperatingSystem, OsCommands, OsSlot},
    settings::SettingValue,
    Command, Context, Result,
};
use serde::{Deserialize, Deserializer};
use std::{convert::TryFrom, fmt};

/// An RGB color packed as 0xRRGGBB. `0` is off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "ColorRepr")]
pub struct Color(pub u32);

impl Color {
    pub const OFF: Color = Color(0);
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0)
    }
}

/// Colors can be written as a number or as a "0x1ED760" or "#1ED760" string
#[derive(Deserialize)]
#[serde(untagged)]
enum ColorRepr {
    Int(u32),
    Hex(String),
}

impl TryFrom<ColorRepr> for Color {
    type Error = String;

    fn try_from(repr: ColorRepr) -> std::result::Result<Self, Self::Error> {
        let hex = match repr {
            ColorRepr::Int(n) => return Ok(Color(n)),
            ColorRepr::Hex(s) => s,
        };
        let digits = hex
            .strip_prefix("0x")
            .or_else(|| hex.strip_prefix('#'))
            .ok_or_else(|| format!("color must start with 0x or #: {:?}", hex))?;
        match u32::from_str_radix(digits, 16) {
            Ok(n) if n <= 0xff_ff_ff => Ok(Color(n)),
            _ => Err(format!("invalid color: {:?}", hex)),
        }
    }
}

/// Any key that can be placed on the keypad
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Key {
    #[serde(rename = "key")]
    Plain(PlainKey),
    Macro(MacroKey),
    Setting(SettingsValueKey),
}

impl Key {
    pub fn text(&self, ctx: &Context<'_>) -> String {
        match self {
            Key::Plain(key) => key.text.clone(),
            Key::Macro(key) => key.text.clone(),
            Key::Setting(key) => key.text(ctx),
        }
    }

    pub fn color(&self, ctx: &Context<'_>) -> Color {
        match self {
            Key::Plain(key) => key.color,
            Key::Macro(key) => key.color,
            Key::Setting(key) => key.color(ctx),
        }
    }

    pub fn press(&self, ctx: &mut Context<'_>) -> Result<()> {
        match self {
            Key::Plain(key) => key.press(ctx),
            Key::Macro(key) => key.press(ctx),
            Key::Setting(key) => {
                key.press(ctx);
                Ok(())
            }
        }
    }

    pub fn release(&self, ctx: &mut Context<'_>) -> Result<()> {
        match self {
            Key::Plain(key) => key.release(ctx),
            Key::Macro(key) => key.release(ctx),
            // nothing to release
            Key::Setting(_) => Ok(()),
        }
    }
}

impl From<PlainKey> for Key {
    fn from(key: PlainKey) -> Self {
        Key::Plain(key)
    }
}

impl From<MacroKey> for Key {
    fn from(key: MacroKey) -> Self {
        Key::Macro(key)
    }
}

impl From<SettingsValueKey> for Key {
    fn from(key: SettingsValueKey) -> Self {
        Key::Setting(key)
    }
}

/// A key with fixed text and color that runs a single command
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct PlainKey {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub command: Option<Command>,
}

impl PlainKey {
    pub fn new(text: &str, color: Color, command: Option<Command>) -> Self {
        Self {
            text: text.to_owned(),
            color,
            command,
        }
    }

    fn press(&self, ctx: &mut Context<'_>) -> Result<()> {
        match self.command {
            Some(ref command) => command.execute(ctx),
            None => Ok(()),
        }
    }

    fn release(&self, ctx: &mut Context<'_>) -> Result<()> {
        match self.command {
            Some(ref command) => command.undo(ctx),
            None => Ok(()),
        }
    }
}

/// A key with a command for each OS, on top of a default command.
///
/// The command registered for the current OS only decides *whether* something runs: when it is
/// present, the default command is executed, never the OS specific one. OS slots that are not
/// supplied hold the default command, so a key with only a default behaves like a `PlainKey`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "MacroKeyRepr")]
pub struct MacroKey {
    text: String,
    color: Color,
    command: Option<Command>,
    os_commands: OsCommands,
}

impl MacroKey {
    pub fn new(text: &str, color: Color, command: Option<Command>) -> Self {
        let os_commands = OsCommands::new(
            &command,
            OsSlot::Unsupplied,
            OsSlot::Unsupplied,
            OsSlot::Unsupplied,
        );
        Self {
            text: text.to_owned(),
            color,
            command,
            os_commands,
        }
    }

    /// Supply the command for one OS
    pub fn with_os_command<S: Into<OsSlot>>(mut self, os: OperatingSystem, slot: S) -> Self {
        self.os_commands.set(os, slot.into(), &self.command);
        self
    }

    /// The command registered for `os`
    pub fn os_command(&self, os: OperatingSystem) -> Option<&Command> {
        self.os_commands.get(os)
    }

    fn press(&self, ctx: &mut Context<'_>) -> Result<()> {
        let os = ctx.operating_system()?;
        if self.os_commands.get(os).is_some() {
            if let Some(ref command) = self.command {
                tracing::debug!("{:?} pressed for {}", self.text, os);
                command.execute(ctx)?;
            }
        }
        Ok(())
    }

    fn release(&self, ctx: &mut Context<'_>) -> Result<()> {
        let os = ctx.operating_system()?;
        if self.os_commands.get(os).is_some() {
            if let Some(ref command) = self.command {
                command.undo(ctx)?;
            }
        }
        Ok(())
    }
}

/// Layout file form of a macro key. A missing `*_command` field falls back to the default command,
/// while `null` binds nothing for that OS.
#[derive(Deserialize)]
struct MacroKeyRepr {
    #[serde(default)]
    text: String,
    #[serde(default)]
    color: Color,
    #[serde(default)]
    command: Option<Command>,
    #[serde(default, deserialize_with = "supplied")]
    linux_command: OsSlot,
    #[serde(default, deserialize_with = "supplied")]
    mac_command: OsSlot,
    #[serde(default, deserialize_with = "supplied")]
    windows_command: OsSlot,
}

fn supplied<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<OsSlot, D::Error> {
    Option::<Command>::deserialize(deserializer).map(OsSlot::Supplied)
}

impl From<MacroKeyRepr> for MacroKey {
    fn from(repr: MacroKeyRepr) -> Self {
        let os_commands = OsCommands::new(
            &repr.command,
            repr.linux_command,
            repr.mac_command,
            repr.windows_command,
        );
        Self {
            text: repr.text,
            color: repr.color,
            command: repr.command,
            os_commands,
        }
    }
}

/// A key that selects a value for a setting. It is highlighted while the setting holds its value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SettingsValueKey {
    #[serde(default)]
    text: String,
    #[serde(default)]
    color: Color,
    setting: String,
    value: SettingValue,
}

const MARKER: &str = ">";

impl SettingsValueKey {
    pub fn new<V: Into<SettingValue>>(text: &str, color: Color, setting: &str, value: V) -> Self {
        Self {
            text: text.to_owned(),
            color,
            setting: setting.to_owned(),
            value: value.into(),
        }
    }

    fn is_selected(&self, ctx: &Context<'_>) -> bool {
        ctx.settings.get(&self.setting).as_ref() == Some(&self.value)
    }

    fn text(&self, ctx: &Context<'_>) -> String {
        let marker = if self.is_selected(ctx) { MARKER } else { " " };
        format!("{} {}", marker, self.text)
    }

    fn color(&self, ctx: &Context<'_>) -> Color {
        if self.is_selected(ctx) {
            self.color
        } else {
            Color::OFF
        }
    }

    fn press(&self, ctx: &mut Context<'_>) {
        ctx.settings.put(&self.setting, self.value.clone());
    }
}
