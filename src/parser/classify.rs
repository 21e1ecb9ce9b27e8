//! Statement classifier
//!
//! Turns one raw source line into a [`Statement`] by literal keyword matching.
//! There is no expression grammar: a line is recognised only when it is a
//! single call to a known function with literal arguments of the expected
//! arity. Everything else becomes [`Statement::Unrecognized`], so
//! classification is total and never fails.

use super::ast::{Level, PinId, PinMode, Statement};

/// Pin number that `LED_BUILTIN` resolves to on the simulated board
pub const LED_BUILTIN_PIN: i64 = 13;

/// Classify a single trimmed or untrimmed source line
pub fn classify(line: &str) -> Statement {
    let code = strip_trailing_comment(line).trim();
    let code = code.strip_suffix(';').unwrap_or(code).trim_end();

    let Some((name, args)) = split_call(code) else {
        return Statement::Unrecognized;
    };

    match (name, args.as_slice()) {
        ("pinMode", [pin, mode]) => match (parse_pin(pin), parse_mode(mode)) {
            (Some(pin), Some(mode)) => Statement::SetPinMode { pin, mode },
            _ => Statement::Unrecognized,
        },
        ("digitalWrite", [pin, value]) => match (parse_pin(pin), parse_level(value)) {
            (Some(pin), Some(value)) => Statement::WriteDigitalPin { pin, value },
            _ => Statement::Unrecognized,
        },
        ("delay", [ms]) => match parse_unsigned(ms) {
            Some(duration_ms) => Statement::Delay { duration_ms },
            None => Statement::Unrecognized,
        },
        ("delayMicroseconds", [us]) => match parse_unsigned(us) {
            Some(us) => Statement::Delay {
                duration_ms: us.div_ceil(1000),
            },
            None => Statement::Unrecognized,
        },
        ("Serial.begin", [baud]) => match parse_unsigned(baud).and_then(|b| u32::try_from(b).ok()) {
            Some(baud) => Statement::SerialBegin { baud },
            None => Statement::Unrecognized,
        },
        ("Serial.print", [arg]) => match parse_printable(arg) {
            Some(text) => Statement::SerialPrint {
                text,
                newline: false,
            },
            None => Statement::Unrecognized,
        },
        ("Serial.println", []) => Statement::SerialPrint {
            text: String::new(),
            newline: true,
        },
        ("Serial.println", [arg]) => match parse_printable(arg) {
            Some(text) => Statement::SerialPrint {
                text,
                newline: true,
            },
            None => Statement::Unrecognized,
        },
        _ => Statement::Unrecognized,
    }
}

/// Remove a `//` comment that is not inside a string literal
pub(crate) fn strip_trailing_comment(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut in_string = false;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_string => i += 1, // skip escaped char
            b'"' => in_string = !in_string,
            b'/' if !in_string && bytes.get(i + 1) == Some(&b'/') => return &line[..i],
            _ => {}
        }
        i += 1;
    }

    line
}

/// Split `name(arg, arg)` into the callee name and its raw arguments
fn split_call(code: &str) -> Option<(&str, Vec<&str>)> {
    let open = code.find('(')?;
    let inner = code[open + 1..].strip_suffix(')')?;
    let name = code[..open].trim();

    if name.is_empty() {
        return None;
    }

    Some((name, split_args(inner)?))
}

/// Split on commas outside string literals; `None` on an unterminated string
fn split_args(inner: &str) -> Option<Vec<&str>> {
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }

    let bytes = inner.as_bytes();
    let mut args = Vec::new();
    let mut in_string = false;
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'\\' if in_string => i += 1,
            b'"' => in_string = !in_string,
            b',' if !in_string => {
                args.push(inner[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }

    if in_string {
        return None;
    }

    args.push(inner[start..].trim());
    Some(args)
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_pin(arg: &str) -> Option<PinId> {
    if let Ok(n) = arg.parse::<i64>() {
        return Some(PinId::Number(n));
    }
    if arg == "LED_BUILTIN" {
        return Some(PinId::Number(LED_BUILTIN_PIN));
    }
    is_identifier(arg).then(|| PinId::Named(arg.to_string()))
}

fn parse_mode(arg: &str) -> Option<PinMode> {
    match arg {
        "INPUT" => Some(PinMode::Input),
        "INPUT_PULLUP" => Some(PinMode::InputPullup),
        "OUTPUT" => Some(PinMode::Output),
        _ => None,
    }
}

fn parse_level(arg: &str) -> Option<Level> {
    match arg {
        "HIGH" | "1" | "true" => Some(Level::High),
        "LOW" | "0" | "false" => Some(Level::Low),
        _ => None,
    }
}

/// Unsigned integer literal, tolerating `U`/`L` suffixes (`1000UL`)
fn parse_unsigned(arg: &str) -> Option<u64> {
    let digits = arg.trim_end_matches(&['u', 'U', 'l', 'L'][..]);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// A string literal or an integer literal
fn parse_printable(arg: &str) -> Option<String> {
    if let Some(body) = arg
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        return unescape(body);
    }
    arg.parse::<i64>().ok().map(|n| n.to_string())
}

fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next()? {
                'n' => out.push('\n'),
                't' => out.push('\t'),
                '\\' => out.push('\\'),
                '"' => out.push('"'),
                other => {
                    out.push('\\');
                    out.push(other);
                }
            },
            // An unescaped quote means two literals were glued together
            '"' => return None,
            c => out.push(c),
        }
    }

    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_inside_string_is_kept() {
        assert_eq!(
            strip_trailing_comment(r#"Serial.print("a//b"); // note"#),
            r#"Serial.print("a//b"); "#
        );
    }

    #[test]
    fn args_split_outside_strings() {
        assert_eq!(split_args(r#""a, b", 3"#), Some(vec![r#""a, b""#, "3"]));
        assert_eq!(split_args(r#""open"#), None);
        assert_eq!(split_args("  "), Some(vec![]));
    }

    #[test]
    fn unsigned_suffixes() {
        assert_eq!(parse_unsigned("1000UL"), Some(1000));
        assert_eq!(parse_unsigned("-1"), None);
        assert_eq!(parse_unsigned("x"), None);
    }
}
