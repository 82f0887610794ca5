use macropad_core::{InputEvent, Machine, KEY_COUNT};
use std::{collections::VecDeque, error::Error, io, io::Write};

/// Reads keypad events typed on stdin, one command per line:
///
/// - `d N` / `u N`: key N down / up
/// - `t N`: tap key N (down then up)
/// - `b`: click the encoder
/// - `+N` / `-N`: turn the encoder N steps clockwise / counterclockwise
/// - `q`: quit
pub struct StdinMachine {
    pending: VecDeque<InputEvent>,
}

impl StdinMachine {
    pub fn new() -> Self {
        Self {
            pending: VecDeque::new(),
        }
    }
}

impl Default for StdinMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl Machine for StdinMachine {
    fn read(&mut self) -> Result<Option<InputEvent>, Box<dyn Error>> {
        // keep prompting the user until a line produces events
        while self.pending.is_empty() {
            print!("Key> ");
            io::stdout().flush()?;

            let mut input = String::new();
            // blocks until input is read
            if io::stdin().read_line(&mut input)? == 0 {
                return Ok(None);
            }

            match parse_line(input.trim()) {
                Some(Line::Quit) => return Ok(None),
                Some(Line::Events(events)) => self.pending.extend(events),
                None => tracing::warn!("could not understand {:?}", input.trim()),
            }
        }

        Ok(self.pending.pop_front())
    }
}

#[derive(Debug, PartialEq)]
enum Line {
    Events(Vec<InputEvent>),
    Quit,
}

fn parse_line(line: &str) -> Option<Line> {
    fn key_index(arg: &str) -> Option<usize> {
        arg.trim().parse().ok().filter(|i| *i < KEY_COUNT)
    }

    if line == "q" {
        return Some(Line::Quit);
    }
    if line == "b" {
        return Some(Line::Events(vec![
            InputEvent::EncoderDown,
            InputEvent::EncoderUp,
        ]));
    }
    if line.starts_with('+') || line.starts_with('-') {
        let steps: i32 = line.parse().ok()?;
        return Some(Line::Events(vec![InputEvent::EncoderTurn(steps)]));
    }

    let mut parts = line.splitn(2, ' ');
    let events = match (parts.next()?, key_index(parts.next()?)?) {
        ("d", i) => vec![InputEvent::KeyDown(i)],
        ("u", i) => vec![InputEvent::KeyUp(i)],
        ("t", i) => vec![InputEvent::KeyDown(i), InputEvent::KeyUp(i)],
        _ => return None,
    };
    Some(Line::Events(events))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(
            parse_line("d 3"),
            Some(Line::Events(vec![InputEvent::KeyDown(3)]))
        );
        assert_eq!(
            parse_line("t 11"),
            Some(Line::Events(vec![
                InputEvent::KeyDown(11),
                InputEvent::KeyUp(11)
            ]))
        );
        assert_eq!(
            parse_line("-2"),
            Some(Line::Events(vec![InputEvent::EncoderTurn(-2)]))
        );
        assert_eq!(
            parse_line("+1"),
            Some(Line::Events(vec![InputEvent::EncoderTurn(1)]))
        );
        assert_eq!(parse_line("q"), Some(Line::Quit));
    }

    #[test]
    fn test_parse_invalid_line() {
        assert_eq!(parse_line("d 12"), None);
        assert_eq!(parse_line("x 1"), None);
        assert_eq!(parse_line("d"), None);
        assert_eq!(parse_line("+"), None);
        assert_eq!(parse_line(""), None);
    }
}
