use macropad_core::{
    recorder::{Call, RecordingEffector},
    settings::OS_SETTING,
    ConsumerControlCode, Context, Error, InputEvent, KeyApp, Keycode, MemorySettings, Modifier,
    SettingValue, SettingsStore,
};

/// Black box for testing a whole layout
struct Blackbox {
    app: KeyApp,
    effector: RecordingEffector,
    settings: MemorySettings,
}

impl Blackbox {
    /// Create a new black box from a layout definition in JSON
    fn new(raw_layout: &str, os: &str) -> Self {
        let app = serde_json::from_str(raw_layout).expect("Unable to parse layout");
        Self {
            app,
            effector: RecordingEffector::new(),
            settings: MemorySettings::with_values(vec![(OS_SETTING, SettingValue::from(os))]),
        }
    }

    fn handle(&mut self, event: InputEvent) -> Result<Vec<Call>, Error> {
        let mut ctx = Context::new(&mut self.effector, &mut self.settings);
        self.app.handle(event, &mut ctx)?;
        Ok(self.effector.drain_calls())
    }

    fn tap(&mut self, index: usize) -> Result<Vec<Call>, Error> {
        let mut calls = self.handle(InputEvent::KeyDown(index))?;
        calls.append(&mut self.handle(InputEvent::KeyUp(index))?);
        Ok(calls)
    }

    fn labels(&mut self) -> Vec<String> {
        let ctx = Context::new(&mut self.effector, &mut self.settings);
        self.app.labels(&ctx).into_iter().map(|(text, _)| text).collect()
    }
}

const SPOTIFY: &str = r#"{
    "name": "Spotify",
    "keys": [
        {"type": "macro", "text": "Exit", "color": "0x500000",
         "command": {"sequence": [{"press": "CONTROL"}, {"press": "SHIFT"}, {"press": "Q"}]},
         "mac_command": {"sequence": [{"press": "COMMAND"}, {"press": "Q"}]}},
        null,
        {"type": "key", "text": "Shuffle", "color": "0x101010",
         "command": {"sequence": [{"press": "CONTROL"}, {"press": "S"}]}},
        {"type": "key", "text": ">||", "color": "0x002000", "command": {"media": "PLAY_PAUSE"}},
        {"type": "setting", "text": "Mac", "color": "0x555555", "setting": "OS", "value": "MAC"},
        {"type": "setting", "text": "Win", "color": "0x00A4EF", "setting": "OS", "value": "WIN"},
        {"type": "key", "text": "Hi", "command": {"sequence": [{"text": "hi"}, {"wait": 0.1}]}}
    ],
    "encoder_button": {"media": "MUTE"},
    "encoder_increase": {"per_os": {
        "default": {"sequence": [{"press": "CONTROL"}, {"press": "UP_ARROW"}]},
        "MAC": {"sequence": [{"press": "COMMAND"}, {"press": "UP_ARROW"}]}
    }}
}"#;

fn ctrl() -> Keycode {
    Keycode::Modifier(Modifier::Control)
}

#[test]
fn test_macro_key_releases_everything() {
    let mut bb = Blackbox::new(SPOTIFY, "LIN");
    bb.handle(InputEvent::KeyDown(0)).unwrap();
    assert_eq!(bb.effector.state().keys.len(), 3);
    bb.handle(InputEvent::KeyUp(0)).unwrap();
    assert!(bb.effector.state().keys.is_empty());
}

#[test]
fn test_macro_key_on_mac_runs_default_command() {
    let mut bb = Blackbox::new(SPOTIFY, "MAC");
    let calls = bb.tap(0).unwrap();
    assert_eq!(calls[0], Call::PressKey(ctrl()));
    assert!(!calls.contains(&Call::PressKey(Keycode::Modifier(Modifier::Meta))));
}

#[test]
fn test_switching_os() {
    let mut bb = Blackbox::new(SPOTIFY, "LIN");
    assert_eq!(bb.labels()[4], "  Mac");

    bb.tap(4).unwrap();
    assert_eq!(bb.settings.get(OS_SETTING), Some(SettingValue::from("MAC")));
    assert_eq!(bb.labels()[4], "> Mac");
    assert_eq!(bb.labels()[5], "  Win");

    // encoder overrides do substitute the command
    let calls = bb.handle(InputEvent::EncoderTurn(1)).unwrap();
    assert_eq!(calls[0], Call::PressKey(Keycode::Modifier(Modifier::Meta)));
}

#[test]
fn test_media_and_encoder_button() {
    let mut bb = Blackbox::new(SPOTIFY, "WIN");
    bb.handle(InputEvent::KeyDown(3)).unwrap();
    bb.handle(InputEvent::EncoderDown).unwrap();
    assert_eq!(bb.effector.state().media, Some(ConsumerControlCode::Mute));

    bb.handle(InputEvent::EncoderUp).unwrap();
    assert_eq!(bb.effector.state().media, None);
}

#[test]
fn test_text_and_wait() {
    let mut bb = Blackbox::new(SPOTIFY, "WIN");
    let calls = bb.tap(6).unwrap();
    assert_eq!(
        calls,
        vec![
            Call::TypeText("hi".to_string()),
            Call::Wait(std::time::Duration::from_millis(100)),
        ]
    );
}

#[test]
fn test_unknown_os_is_reported() {
    let mut bb = Blackbox::new(SPOTIFY, "AMIGA");
    assert_eq!(
        bb.tap(0),
        Err(Error::UnknownOperatingSystem(Some("AMIGA".into())))
    );
    // plain keys do not look at the OS
    assert_eq!(bb.tap(2).unwrap().len(), 4);
}

#[test]
fn test_encoder_decrease_unbound() {
    let mut bb = Blackbox::new(SPOTIFY, "LIN");
    assert_eq!(bb.handle(InputEvent::EncoderTurn(-3)), Ok(vec![]));
}

#[test]
fn test_empty_slot() {
    let mut bb = Blackbox::new(SPOTIFY, "LIN");
    assert_eq!(bb.tap(1), Ok(vec![]));
    assert_eq!(bb.labels()[1], "");
}
