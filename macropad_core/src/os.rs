use crate::{settings::SettingValue, Command, Error, Result};
use std::fmt;

/// Host operating systems a key can be configured for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatingSystem {
    Mac,
    Windows,
    Linux,
}

impl OperatingSystem {
    pub const ALL: [OperatingSystem; 3] = [
        OperatingSystem::Linux,
        OperatingSystem::Mac,
        OperatingSystem::Windows,
    ];

    /// The token stored in the OS setting
    pub fn token(self) -> &'static str {
        match self {
            OperatingSystem::Mac => "MAC",
            OperatingSystem::Windows => "WIN",
            OperatingSystem::Linux => "LIN",
        }
    }

    /// Resolve the value of the OS setting. Anything other than one of the exact tokens is an
    /// error, including an unset setting.
    pub fn from_setting(value: Option<SettingValue>) -> Result<Self> {
        if let Some(SettingValue::Text(ref token)) = value {
            if let Some(os) = Self::ALL.iter().find(|os| os.token() == token.as_str()) {
                return Ok(*os);
            }
        }
        Err(Error::UnknownOperatingSystem(value))
    }
}

impl fmt::Display for OperatingSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl From<OperatingSystem> for SettingValue {
    fn from(os: OperatingSystem) -> Self {
        SettingValue::Text(os.token().to_string())
    }
}

/// A per-OS command as given when building a key. `Unsupplied` falls back to the key's default
/// command, while `Supplied(None)` explicitly binds nothing for that OS.
#[derive(Debug, Clone, PartialEq)]
pub enum OsSlot {
    Unsupplied,
    Supplied(Option<Command>),
}

impl Default for OsSlot {
    fn default() -> Self {
        OsSlot::Unsupplied
    }
}

impl OsSlot {
    fn or_default(self, default: &Option<Command>) -> Option<Command> {
        match self {
            OsSlot::Unsupplied => default.clone(),
            OsSlot::Supplied(command) => command,
        }
    }
}

impl From<Command> for OsSlot {
    fn from(command: Command) -> Self {
        OsSlot::Supplied(Some(command))
    }
}

/// Commands resolved for every OS
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OsCommands {
    linux: Option<Command>,
    mac: Option<Command>,
    windows: Option<Command>,
}

impl OsCommands {
    /// Fill each slot, falling back to `default` for the slots that were not supplied
    pub fn new(default: &Option<Command>, linux: OsSlot, mac: OsSlot, windows: OsSlot) -> Self {
        Self {
            linux: linux.or_default(default),
            mac: mac.or_default(default),
            windows: windows.or_default(default),
        }
    }

    pub(crate) fn set(&mut self, os: OperatingSystem, slot: OsSlot, default: &Option<Command>) {
        let command = slot.or_default(default);
        match os {
            OperatingSystem::Linux => self.linux = command,
            OperatingSystem::Mac => self.mac = command,
            OperatingSystem::Windows => self.windows = command,
        }
    }

    pub fn get(&self, os: OperatingSystem) -> Option<&Command> {
        match os {
            OperatingSystem::Linux => self.linux.as_ref(),
            OperatingSystem::Mac => self.mac.as_ref(),
            OperatingSystem::Windows => self.windows.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Keycode;

    #[test]
    fn test_from_setting() {
        assert_eq!(
            OperatingSystem::from_setting(Some("MAC".into())),
            Ok(OperatingSystem::Mac)
        );
        assert_eq!(
            OperatingSystem::from_setting(Some("LIN".into())),
            Ok(OperatingSystem::Linux)
        );
        assert_eq!(
            OperatingSystem::from_setting(Some("mac".into())),
            Err(Error::UnknownOperatingSystem(Some("mac".into())))
        );
        assert_eq!(
            OperatingSystem::from_setting(Some(true.into())),
            Err(Error::UnknownOperatingSystem(Some(true.into())))
        );
        assert_eq!(
            OperatingSystem::from_setting(None),
            Err(Error::UnknownOperatingSystem(None))
        );
    }

    #[test]
    fn test_slots_fall_back_to_default() {
        let default = Some(Command::Press(Keycode::Layout('a')));
        let mac = Command::Press(Keycode::Layout('m'));
        let commands = OsCommands::new(
            &default,
            OsSlot::Unsupplied,
            mac.clone().into(),
            OsSlot::Supplied(None),
        );

        assert_eq!(commands.get(OperatingSystem::Linux), default.as_ref());
        assert_eq!(commands.get(OperatingSystem::Mac), Some(&mac));
        assert_eq!(commands.get(OperatingSystem::Windows), None);
    }
}
