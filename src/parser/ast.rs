// Program model for the sketch simulator

use std::fmt;

/// Source location information for step highlighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SourceLocation {
    pub line: usize,
}

impl SourceLocation {
    pub fn new(line: usize) -> Self {
        Self { line }
    }
}

/// Pin identifier: a numbered pin or a symbolic name such as `A0`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PinId {
    Number(i64),
    Named(String),
}

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinId::Number(n) => write!(f, "{}", n),
            PinId::Named(name) => f.write_str(name),
        }
    }
}

impl From<i64> for PinId {
    fn from(n: i64) -> Self {
        PinId::Number(n)
    }
}

impl From<&str> for PinId {
    fn from(name: &str) -> Self {
        PinId::Named(name.to_string())
    }
}

/// Pin direction as set by `pinMode`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PinMode {
    #[default]
    Unset,
    Input,
    InputPullup,
    Output,
}

impl fmt::Display for PinMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PinMode::Unset => "-",
            PinMode::Input => "INPUT",
            PinMode::InputPullup => "INPUT_PULLUP",
            PinMode::Output => "OUTPUT",
        };
        f.write_str(s)
    }
}

/// Digital logic level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Level {
    #[default]
    Low,
    High,
}

impl Level {
    pub fn is_high(self) -> bool {
        self == Level::High
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Low => f.write_str("LOW"),
            Level::High => f.write_str("HIGH"),
        }
    }
}

/// One classified, fixed-arity instruction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    SetPinMode { pin: PinId, mode: PinMode },
    WriteDigitalPin { pin: PinId, value: Level },
    Delay { duration_ms: u64 },
    SerialBegin { baud: u32 },
    /// `newline` distinguishes `Serial.println` from `Serial.print`
    SerialPrint { text: String, newline: bool },
    Unrecognized,
}

/// A statement together with the raw line it was classified from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementNode {
    pub stmt: Statement,
    pub text: String,
    pub location: SourceLocation,
}

/// The two structural sections of a sketch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    Setup,
    Loop,
}

/// A parsed sketch; immutable once built by the parser
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub setup: Vec<StatementNode>,
    pub loop_body: Vec<StatementNode>,
}

impl Program {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statements of the given block
    pub fn block(&self, block: Block) -> &[StatementNode] {
        match block {
            Block::Setup => &self.setup,
            Block::Loop => &self.loop_body,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.setup.is_empty() && self.loop_body.is_empty()
    }

    /// Number of statements the classifier could not recognise
    pub fn unrecognized_count(&self) -> usize {
        self.setup
            .iter()
            .chain(&self.loop_body)
            .filter(|node| node.stmt == Statement::Unrecognized)
            .count()
    }
}
