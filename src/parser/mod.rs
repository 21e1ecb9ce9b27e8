//! Sketch source parser
//!
//! This module turns sketch text into a [`Program`](ast::Program):
//! - [`parse`]: Line-oriented block tracking (source text → `setup`/`loop` lists)
//! - [`classify`]: Keyword matching (one line → [`Statement`](ast::Statement))
//! - [`ast`]: Program model definitions
//!
//! # Supported vocabulary
//!
//! Microcontroller teaching sketches use a tiny, stylized grammar:
//! - Blocks: `void setup() { ... }` and `void loop() { ... }`
//! - Statements: `pinMode`, `digitalWrite`, `delay`, `delayMicroseconds`,
//!   `Serial.begin`, `Serial.print`, `Serial.println`
//! - Literal arguments only: no variables, expressions, or user functions
//!
//! # Implementation
//!
//! There is no tokenizer and no error path. Anything outside the vocabulary is
//! kept as an unrecognized statement and skipped at execution time.

pub mod ast;
pub mod classify;
pub mod parse;

pub use parse::parse;
