use std::io::Write;

use anyhow::{Context, Result};

/// Downstream key injector. Receives one named key per emitted action.
pub trait KeySink {
    fn press_and_release(&mut self, key: &str) -> Result<()>;
}

/// Writes one key name per line for an external injector to consume.
pub struct StdoutKeySink<W: Write> {
    out: W,
}

impl<W: Write> StdoutKeySink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: Write> KeySink for StdoutKeySink<W> {
    fn press_and_release(&mut self, key: &str) -> Result<()> {
        writeln!(self.out, "{key}").context("failed to write key")?;
        self.out.flush().context("failed to flush key output")?;
        Ok(())
    }
}

#[cfg(test)]
#[derive(Default)]
pub(crate) struct RecordingKeySink {
    pub pressed: Vec<String>,
}

#[cfg(test)]
impl KeySink for RecordingKeySink {
    fn press_and_release(&mut self, key: &str) -> Result<()> {
        self.pressed.push(key.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_writes_one_key_per_line() {
        let mut sink = StdoutKeySink::new(Vec::new());
        sink.press_and_release("left").unwrap();
        sink.press_and_release("up").unwrap();
        assert_eq!(String::from_utf8(sink.out).unwrap(), "left\nup\n");
    }
}
