use anyhow::{Context as _, Result};
use serde::Deserialize;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use macropad_core::{
    settings::OS_SETTING, Effector, KeyApp, Keypad, MemorySettings, OperatingSystem, SettingValue,
};
use macropad_output_enigo::EnigoEffector;

use crate::effector::StdoutEffector;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    output_effector: OutputEffectorType,
    /// Layout files, the first one is active at startup
    #[serde(default = "default_layouts")]
    layouts: Vec<String>,
    /// Initial value of every setting, OS included
    #[serde(default)]
    settings: HashMap<String, SettingValue>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_effector: Default::default(),
            layouts: default_layouts(),
            settings: HashMap::new(),
        }
    }
}

fn default_layouts() -> Vec<String> {
    vec!["spotify.json".to_string(), "settings.json".to_string()]
}

impl Config {
    /// Create an output effector from the config
    /// Accepts an override to ignore config and use stdout
    pub fn get_effector(&self, use_stdout: bool) -> Box<dyn Effector> {
        let output = if use_stdout {
            tracing::info!("Overriding config to output to stdout");
            &OutputEffectorType::Stdout
        } else {
            &self.output_effector
        };
        tracing::info!("Output to: {:?}", output);
        match output {
            OutputEffectorType::Enigo => Box::new(EnigoEffector::new()) as Box<dyn Effector>,
            OutputEffectorType::Stdout => Box::new(StdoutEffector::new()) as Box<dyn Effector>,
        }
    }

    /// Read every layout file in the config, with paths relative to `base_path`
    pub fn get_keypad(&self, base_path: &Path) -> Result<Keypad> {
        let apps = self
            .layouts
            .iter()
            .map(|layout| load_layout(&base_path.join(layout)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Keypad::new(apps)?)
    }

    /// Starting settings. The OS comes from the override if given, then the config, then the
    /// host the program is running on.
    pub fn get_settings(&self, os_override: Option<&str>) -> Result<MemorySettings> {
        let mut values = self.settings.clone();
        if let Some(os) = os_override {
            values.insert(OS_SETTING.to_string(), SettingValue::from(os));
        }
        values
            .entry(OS_SETTING.to_string())
            .or_insert_with(|| host_os().into());

        // fail early rather than on the first key press
        OperatingSystem::from_setting(values.get(OS_SETTING).cloned())?;
        Ok(MemorySettings::with_values(values))
    }
}

pub fn parse_layout(raw: &str) -> serde_json::Result<KeyApp> {
    serde_json::from_str::<KeyApp>(raw)
}

fn load_layout(path: &Path) -> Result<KeyApp> {
    tracing::info!("Loading {:?}", path);
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read layout file {:?}", path))?;
    parse_layout(&raw).with_context(|| format!("unable to parse layout file {:?}", path))
}

pub fn load(raw_str: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(raw_str)
}

/// Load the config at `path`, or the default config if there is no file there
pub fn load_file(path: &Path) -> Result<Config> {
    if !path.exists() {
        tracing::info!("No config at {:?}, using defaults", path);
        return Ok(Config::default());
    }
    tracing::info!("Loading config {:?}", path);
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("unable to read config file {:?}", path))?;
    load(&raw).with_context(|| format!("unable to parse config file {:?}", path))
}

/// Where to look for the config when none is passed in: the user's config directory if it has
/// one, otherwise the bundled runtime files
pub fn default_path() -> PathBuf {
    let user_config = dirs::config_dir().map(|dir| dir.join("macropad").join("config.toml"));
    match user_config {
        Some(path) if path.exists() => path,
        _ => Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("runtime_files")
            .join("config.toml"),
    }
}

fn host_os() -> OperatingSystem {
    if cfg!(target_os = "macos") {
        OperatingSystem::Mac
    } else if cfg!(target_os = "windows") {
        OperatingSystem::Windows
    } else {
        OperatingSystem::Linux
    }
}

#[derive(Debug, Deserialize)]
enum OutputEffectorType {
    Enigo,
    Stdout,
}

impl Default for OutputEffectorType {
    fn default() -> Self {
        Self::Stdout
    }
}
