// Serial monitor log

use crate::scheduler::Millis;

/// One `Serial.print`/`Serial.println` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SerialEntry {
    pub timestamp: Millis,
    pub text: String,
    pub newline: bool,
}

/// Position in a [`SerialLog`]: entry count and baud rate at some step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SerialMark {
    pub len: usize,
    pub baud: Option<u32>,
}

/// Append-only log of serial output for the current run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SerialLog {
    entries: Vec<SerialEntry>,
    baud: Option<u32>,
}

impl SerialLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rate passed to `Serial.begin`
    pub fn begin(&mut self, baud: u32) {
        self.baud = Some(baud);
    }

    pub fn baud(&self) -> Option<u32> {
        self.baud
    }

    /// Current position, cheap enough to record every step
    pub fn mark(&self) -> SerialMark {
        SerialMark {
            len: self.entries.len(),
            baud: self.baud,
        }
    }

    /// The log as it stood at `mark`
    pub fn at(&self, mark: SerialMark) -> SerialLog {
        let len = mark.len.min(self.entries.len());
        SerialLog {
            entries: self.entries[..len].to_vec(),
            baud: mark.baud,
        }
    }

    pub fn append(&mut self, timestamp: Millis, text: String, newline: bool) {
        self.entries.push(SerialEntry {
            timestamp,
            text,
            newline,
        });
    }

    pub fn entries(&self) -> &[SerialEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.baud = None;
    }

    /// Monitor lines: `print` fragments join until a `println`, each line
    /// stamped with the time its first fragment arrived
    pub fn lines(&self) -> Vec<(Millis, String)> {
        let mut lines: Vec<(Millis, String)> = Vec::new();
        let mut open = false;

        for entry in &self.entries {
            for (i, part) in entry.text.split('\n').enumerate() {
                // Embedded `\n` always starts a fresh line
                if i > 0 {
                    open = false;
                }
                match lines.last_mut() {
                    Some(last) if open => last.1.push_str(part),
                    _ => lines.push((entry.timestamp, part.to_string())),
                }
                open = true;
            }
            if entry.newline {
                open = false;
            }
        }

        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn print_fragments_join_until_println() {
        let mut log = SerialLog::new();
        log.append(10, "Sensor: ".into(), false);
        log.append(20, "42".into(), true);
        log.append(30, "next".into(), false);
        assert_eq!(
            log.lines(),
            vec![(10, "Sensor: 42".to_string()), (30, "next".to_string())]
        );
    }

    #[test]
    fn empty_println_is_a_blank_line() {
        let mut log = SerialLog::new();
        log.append(0, "a".into(), true);
        log.append(5, String::new(), true);
        log.append(9, "b".into(), true);
        let text: Vec<String> = log.lines().into_iter().map(|(_, s)| s).collect();
        assert_eq!(text, vec!["a", "", "b"]);
    }

    #[test]
    fn mark_restores_earlier_view() {
        let mut log = SerialLog::new();
        log.append(0, "one".into(), true);
        let mark = log.mark();
        log.begin(9600);
        log.append(5, "two".into(), true);

        let earlier = log.at(mark);
        assert_eq!(earlier.len(), 1);
        assert_eq!(earlier.baud(), None);
        assert_eq!(earlier.lines(), vec![(0, "one".to_string())]);
        assert_eq!(log.at(log.mark()), log);
    }

    #[test]
    fn clear_forgets_baud() {
        let mut log = SerialLog::new();
        log.begin(9600);
        log.append(0, "x".into(), false);
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.baud(), None);
    }
}
