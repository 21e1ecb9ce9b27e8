//! Line-oriented block parser
//!
//! This module provides [`Parser`], which splits a sketch into its `setup` and
//! `loop` statement lists. It never fails: text outside the two blocks,
//! comments, and blank lines are dropped, and lines it cannot make sense of
//! are kept as [`Statement::Unrecognized`](super::ast::Statement::Unrecognized)
//! so the cursor stays aligned with the source.
//!
//! # Block tracking
//!
//! A line containing `void setup(` or `void loop(` opens the matching block.
//! Braces are counted with a signed depth; the block closes when the depth
//! returns to zero. The opening brace may sit on the signature line or on a
//! line of its own.

use super::ast::{Block, Program, SourceLocation, StatementNode};
use super::classify::{classify, strip_trailing_comment};

/// Parse sketch text into a [`Program`]
pub fn parse(source: &str) -> Program {
    Parser::new().parse_program(source)
}

/// Block-tracking state while scanning lines
#[derive(Debug, Default)]
pub struct Parser {
    current_block: Option<Block>,
    brace_depth: i32,
    in_block_comment: bool,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the whole source, one line at a time
    pub fn parse_program(&mut self, source: &str) -> Program {
        let mut program = Program::new();

        for (index, raw) in source.lines().enumerate() {
            let Some(line) = self.strip_comments(raw) else {
                continue;
            };
            self.parse_line(&line, SourceLocation::new(index + 1), &mut program);
        }

        program
    }

    /// Drop `/* */` spans and blank or `//` lines; `None` means skip the line
    fn strip_comments(&mut self, raw: &str) -> Option<String> {
        let mut rest = raw;
        let mut kept = String::new();

        loop {
            if self.in_block_comment {
                match rest.find("*/") {
                    Some(end) => {
                        self.in_block_comment = false;
                        rest = &rest[end + 2..];
                    }
                    None => break,
                }
            } else {
                match find_outside_strings(rest, "/*") {
                    Some(start) => {
                        kept.push_str(&rest[..start]);
                        self.in_block_comment = true;
                        rest = &rest[start + 2..];
                    }
                    None => {
                        kept.push_str(rest);
                        break;
                    }
                }
            }
        }

        let trimmed = kept.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn parse_line(&mut self, line: &str, location: SourceLocation, program: &mut Program) {
        let code = strip_trailing_comment(line).trim();
        let delta = brace_delta(code);

        if let Some(block) = block_signature(code) {
            self.current_block = Some(block);
            self.brace_depth = delta;
            // `void loop() {}` opens and closes on one line
            if code.contains('{') && self.brace_depth <= 0 {
                self.close_block();
            }
            return;
        }

        let Some(block) = self.current_block else {
            return;
        };

        if code.chars().all(|c| c == '{' || c == '}' || c.is_whitespace()) {
            self.apply_delta(delta);
            return;
        }

        if self.brace_depth > 0 {
            let node = StatementNode {
                stmt: classify(line),
                text: line.to_string(),
                location,
            };
            match block {
                Block::Setup => program.setup.push(node),
                Block::Loop => program.loop_body.push(node),
            }
        }

        self.apply_delta(delta);
    }

    fn apply_delta(&mut self, delta: i32) {
        let was_open = self.brace_depth > 0;
        self.brace_depth += delta;
        if was_open && self.brace_depth <= 0 {
            self.close_block();
        }
    }

    fn close_block(&mut self) {
        self.current_block = None;
        self.brace_depth = 0;
    }
}

fn block_signature(code: &str) -> Option<Block> {
    let code = without_strings(code);
    if !code.contains("void") {
        return None;
    }
    if code.contains("setup(") {
        Some(Block::Setup)
    } else if code.contains("loop(") {
        Some(Block::Loop)
    } else {
        None
    }
}

/// Byte offset of `pat` outside string literals
fn find_outside_strings(code: &str, pat: &str) -> Option<usize> {
    let bytes = code.as_bytes();
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_string => i += 1,
            b'"' => in_string = !in_string,
            _ if !in_string && bytes[i..].starts_with(pat.as_bytes()) => return Some(i),
            _ => {}
        }
        i += 1;
    }

    None
}

/// `code` with the contents of string literals removed (quotes kept)
fn without_strings(code: &str) -> String {
    let mut out = String::with_capacity(code.len());
    let mut in_string = false;
    let mut escaped = false;

    for c in code.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => {
                in_string = !in_string;
                out.push(c);
            }
            _ if in_string => {}
            _ => out.push(c),
        }
    }

    out
}

/// Opening minus closing braces, ignoring braces inside string literals
fn brace_delta(code: &str) -> i32 {
    let mut delta = 0;
    let mut in_string = false;
    let mut escaped = false;

    for c in code.chars() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if in_string => escaped = true,
            '"' => in_string = !in_string,
            '{' if !in_string => delta += 1,
            '}' if !in_string => delta -= 1,
            _ => {}
        }
    }

    delta
}
