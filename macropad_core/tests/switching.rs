use macropad_core::{
    recorder::RecordingEffector,
    settings::{APP_SETTING, OS_SETTING, PREVIOUS_APP_SETTING},
    Context, Error, InputEvent, KeyApp, Keypad, MemorySettings, SettingValue, SettingsStore,
};

/// Black box for a keypad with several apps
struct Blackbox {
    keypad: Keypad,
    effector: RecordingEffector,
    settings: MemorySettings,
}

impl Blackbox {
    fn new(raw_layouts: &[&str]) -> Self {
        let apps = raw_layouts
            .iter()
            .map(|raw| serde_json::from_str::<KeyApp>(raw).expect("Unable to parse layout"))
            .collect();
        Self {
            keypad: Keypad::new(apps).expect("Unable to build keypad"),
            effector: RecordingEffector::new(),
            settings: MemorySettings::with_values(vec![(OS_SETTING, SettingValue::from("LIN"))]),
        }
    }

    fn handle(&mut self, event: InputEvent) -> Result<(), Error> {
        let mut ctx = Context::new(&mut self.effector, &mut self.settings);
        self.keypad.handle(event, &mut ctx)
    }

    fn tap(&mut self, index: usize) -> Result<(), Error> {
        self.handle(InputEvent::KeyDown(index))?;
        self.handle(InputEvent::KeyUp(index))
    }

    fn current(&mut self) -> String {
        let ctx = Context::new(&mut self.effector, &mut self.settings);
        self.keypad.current(&ctx).name().to_string()
    }
}

const HOME: &str = r#"{
    "name": "Home",
    "keys": [
        {"type": "key", "text": "Spotify", "command": {"switch_app": "Spotify"}},
        {"type": "key", "text": "Settings", "command": {"switch_app": "Settings"}}
    ]
}"#;

const SPOTIFY: &str = r#"{
    "name": "Spotify",
    "keys": [
        {"type": "macro", "text": "Exit", "color": "0x500000",
         "command": {"sequence": [{"press": "CONTROL"}, {"press": "SHIFT"}, {"press": "Q"}, "previous_app"]},
         "mac_command": {"sequence": [{"press": "COMMAND"}, {"press": "Q"}, "previous_app"]}},
        {"type": "key", "text": "Settings", "command": {"switch_app": "Settings"}},
        {"type": "key", "text": "Back", "command": "previous_app"}
    ],
    "encoder_button": {"media": "MUTE"}
}"#;

const SETTINGS: &str = r#"{
    "name": "Settings",
    "keys": [
        {"type": "setting", "text": "Mac", "color": "0x555555", "setting": "OS", "value": "MAC"},
        {"type": "key", "text": "Back", "command": "previous_app"}
    ]
}"#;

#[test]
fn test_starts_in_first_app() {
    let mut bb = Blackbox::new(&[HOME, SPOTIFY, SETTINGS]);
    assert_eq!(bb.current(), "Home");
    // any event settles which app is active
    bb.tap(5).unwrap();
    assert_eq!(bb.current(), "Home");
    assert_eq!(bb.settings.get(APP_SETTING), Some(SettingValue::from("Home")));
}

#[test]
fn test_back_returns_to_previous_app() {
    let mut bb = Blackbox::new(&[HOME, SPOTIFY, SETTINGS]);
    bb.tap(0).unwrap();
    assert_eq!(bb.current(), "Spotify");

    bb.tap(1).unwrap();
    assert_eq!(bb.current(), "Settings");
    bb.tap(0).unwrap();
    assert_eq!(bb.settings.get(OS_SETTING), Some(SettingValue::from("MAC")));

    bb.tap(1).unwrap();
    assert_eq!(bb.current(), "Spotify");
    assert_eq!(
        bb.settings.get(PREVIOUS_APP_SETTING),
        Some(SettingValue::from("Settings"))
    );
}

#[test]
fn test_exit_releases_keys_in_the_app_it_left() {
    let mut bb = Blackbox::new(&[HOME, SPOTIFY, SETTINGS]);
    bb.tap(0).unwrap();

    bb.handle(InputEvent::KeyDown(0)).unwrap();
    assert_eq!(bb.current(), "Home");
    assert_eq!(bb.effector.state().keys.len(), 3);

    bb.handle(InputEvent::KeyUp(0)).unwrap();
    assert!(bb.effector.state().keys.is_empty());
}

#[test]
fn test_encoder_released_in_the_app_it_was_pressed_in() {
    let mut bb = Blackbox::new(&[HOME, SPOTIFY, SETTINGS]);
    bb.tap(0).unwrap();

    bb.handle(InputEvent::EncoderDown).unwrap();
    bb.tap(2).unwrap();
    assert_eq!(bb.current(), "Home");
    bb.handle(InputEvent::EncoderUp).unwrap();
    assert_eq!(bb.effector.state().media, None);
}
