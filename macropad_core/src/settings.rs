use serde::Deserialize;
use std::{collections::HashMap, fmt};

/// Name of the setting holding the host operating system
pub const OS_SETTING: &str = "OS";

/// Name of the app whose keys are active
pub const APP_SETTING: &str = "app";

/// Name of the app that was active before the current one
pub const PREVIOUS_APP_SETTING: &str = "previous app";

/// An opaque setting value. Values are only ever compared for exact equality, so `"1"` and `1`
/// are different values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::Text(s.to_string())
    }
}

impl From<String> for SettingValue {
    fn from(s: String) -> Self {
        SettingValue::Text(s)
    }
}

impl From<bool> for SettingValue {
    fn from(b: bool) -> Self {
        SettingValue::Bool(b)
    }
}

impl From<i64> for SettingValue {
    fn from(n: i64) -> Self {
        SettingValue::Int(n)
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Bool(b) => write!(f, "{}", b),
            SettingValue::Int(n) => write!(f, "{}", n),
            SettingValue::Text(s) => f.write_str(s),
        }
    }
}

/// Where keys read and write settings
pub trait SettingsStore {
    fn get(&self, name: &str) -> Option<SettingValue>;
    fn put(&mut self, name: &str, value: SettingValue);
}

/// Settings kept in memory for the lifetime of the process
#[derive(Debug, Default, Clone, PartialEq)]
pub struct MemorySettings {
    values: HashMap<String, SettingValue>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn with_values<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, SettingValue)>,
        K: Into<String>,
    {
        Self {
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self, name: &str) -> Option<SettingValue> {
        self.values.get(name).cloned()
    }

    fn put(&mut self, name: &str, value: SettingValue) {
        tracing::debug!("setting {:?} = {}", name, value);
        self.values.insert(name.to_string(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_overwrites() {
        let mut settings = MemorySettings::new();
        assert_eq!(settings.get(OS_SETTING), None);

        settings.put(OS_SETTING, "MAC".into());
        settings.put(OS_SETTING, "WIN".into());
        assert_eq!(settings.get(OS_SETTING), Some(SettingValue::from("WIN")));
    }

    #[test]
    fn test_values_are_not_coerced() {
        assert_ne!(SettingValue::from("1"), SettingValue::from(1i64));
        assert_ne!(SettingValue::from("true"), SettingValue::from(true));
    }

    #[test]
    fn test_untagged_values() {
        let values: Vec<SettingValue> = serde_json::from_str(r#"["MAC", true, 3]"#).unwrap();
        assert_eq!(
            values,
            vec![
                SettingValue::from("MAC"),
                SettingValue::from(true),
                SettingValue::from(3i64)
            ]
        );
    }
}
