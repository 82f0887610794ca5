use macropad_core::{ConsumerControlCode, EffectorError, Effector, Keycode, MouseButton};
use std::{
    fmt,
    io::{self, Write},
    time::Duration,
};

/// Prints every effect instead of performing it. Waits still block.
pub struct StdoutEffector<W: Write = io::Stdout> {
    out: W,
}

impl StdoutEffector {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl<W: Write> StdoutEffector<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    fn print(&mut self, args: fmt::Arguments<'_>) -> Result<(), EffectorError> {
        writeln!(self.out, "{}", args).map_err(|e| EffectorError::Device(e.to_string()))
    }
}

impl<W: Write> Effector for StdoutEffector<W> {
    fn press_key(&mut self, key: Keycode) -> Result<(), EffectorError> {
        self.print(format_args!("press {}", key))
    }

    fn release_key(&mut self, key: Keycode) -> Result<(), EffectorError> {
        self.print(format_args!("release {}", key))
    }

    fn type_text(&mut self, text: &str) -> Result<(), EffectorError> {
        self.print(format_args!("type {:?}", text))
    }

    fn press_media(&mut self, code: ConsumerControlCode) -> Result<(), EffectorError> {
        self.print(format_args!(
            "press media {:?} (0x{:02x})",
            code,
            code.usage_id()
        ))
    }

    fn release_media(&mut self) -> Result<(), EffectorError> {
        self.print(format_args!("release media"))
    }

    fn press_mouse_button(&mut self, button: MouseButton) -> Result<(), EffectorError> {
        self.print(format_args!("press mouse {:?}", button))
    }

    fn release_mouse_button(&mut self, button: MouseButton) -> Result<(), EffectorError> {
        self.print(format_args!("release mouse {:?}", button))
    }

    fn move_mouse(&mut self, dx: i32, dy: i32) -> Result<(), EffectorError> {
        self.print(format_args!("move mouse by ({}, {})", dx, dy))
    }

    fn scroll(&mut self, lines: i32) -> Result<(), EffectorError> {
        self.print(format_args!("scroll {}", lines))
    }

    fn start_tone(&mut self, frequency: u32) -> Result<(), EffectorError> {
        self.print(format_args!("start tone {} Hz", frequency))
    }

    fn stop_tone(&mut self) -> Result<(), EffectorError> {
        self.print(format_args!("stop tone"))
    }

    fn play_file(&mut self, file: &str) -> Result<(), EffectorError> {
        self.print(format_args!("play {:?}", file))
    }

    fn wait(&mut self, duration: Duration) -> Result<(), EffectorError> {
        self.print(format_args!("wait {:?}", duration))?;
        std::thread::sleep(duration);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macropad_core::{Command, Context, Error, MemorySettings, Modifier};

    struct Unplugged;

    impl Write for Unplugged {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "unplugged"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_prints_effects() {
        let mut effector = StdoutEffector::with_writer(Vec::new());
        let mut settings = MemorySettings::new();
        let command = Command::sequence(vec![
            Command::Press(Keycode::Modifier(Modifier::Control)),
            Command::Media(ConsumerControlCode::PlayPause),
        ]);
        {
            let mut ctx = Context::new(&mut effector, &mut settings);
            command.execute(&mut ctx).unwrap();
        }

        let printed = String::from_utf8(effector.out).unwrap();
        assert_eq!(
            printed,
            "press CONTROL\nrelease media\npress media PlayPause (0xcd)\n"
        );
    }

    #[test]
    fn test_write_failure_is_a_device_error() {
        let mut effector = StdoutEffector::with_writer(Unplugged);
        let mut settings = MemorySettings::new();
        let mut ctx = Context::new(&mut effector, &mut settings);
        match Command::text("hi").execute(&mut ctx) {
            Err(Error::Effector(EffectorError::Device(_))) => {}
            other => panic!("expected a device error, got {:?}", other),
        }
    }
}
