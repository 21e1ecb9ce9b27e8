// Parser and classifier tests

use sketchtty::parser::ast::{Level, PinId, PinMode, Statement};
use sketchtty::parser::classify::classify;
use sketchtty::parser::parse;

fn stmts(nodes: &[sketchtty::parser::ast::StatementNode]) -> Vec<Statement> {
    nodes.iter().map(|n| n.stmt.clone()).collect()
}

#[test]
fn test_blink_blocks() {
    let source = r#"
// Arduino Code
void setup() {
  pinMode(13, OUTPUT);
}

void loop() {
  digitalWrite(13, HIGH);
  delay(1000);
  digitalWrite(13, LOW);
  delay(1000);
}
"#;

    let program = parse(source);

    assert_eq!(
        stmts(&program.setup),
        vec![Statement::SetPinMode {
            pin: PinId::Number(13),
            mode: PinMode::Output
        }]
    );
    assert_eq!(
        stmts(&program.loop_body),
        vec![
            Statement::WriteDigitalPin {
                pin: PinId::Number(13),
                value: Level::High
            },
            Statement::Delay { duration_ms: 1000 },
            Statement::WriteDigitalPin {
                pin: PinId::Number(13),
                value: Level::Low
            },
            Statement::Delay { duration_ms: 1000 },
        ]
    );
}

#[test]
fn test_line_numbers_are_kept() {
    let source = "void setup() {\n\n  pinMode(2, INPUT);\n}\n";
    let program = parse(source);
    assert_eq!(program.setup[0].location.line, 3);
    assert_eq!(program.setup[0].text, "pinMode(2, INPUT);");
}

#[test]
fn test_brace_on_own_line() {
    let source = "void setup()\n{\n  pinMode(7, OUTPUT);\n}\nvoid loop()\n{\n  delay(5);\n}\n";
    let program = parse(source);
    assert_eq!(program.setup.len(), 1);
    assert_eq!(
        stmts(&program.loop_body),
        vec![Statement::Delay { duration_ms: 5 }]
    );
}

#[test]
fn test_text_outside_blocks_is_dropped() {
    let source = r#"
#include <Servo.h>
int ledPin = 13;
digitalWrite(13, HIGH);
void setup() {
  Serial.begin(9600);
}
delay(50);
void loop() {}
"#;
    let program = parse(source);
    assert_eq!(
        stmts(&program.setup),
        vec![Statement::SerialBegin { baud: 9600 }]
    );
    assert!(program.loop_body.is_empty());
}

#[test]
fn test_comments_are_dropped() {
    let source = r#"
void loop() {
  // digitalWrite(13, HIGH);
  /* delay(100);
     delay(200); */
  delay(300); // trailing comment
  /* inline */ delay(400);
}
"#;
    let program = parse(source);
    assert_eq!(
        stmts(&program.loop_body),
        vec![
            Statement::Delay { duration_ms: 300 },
            Statement::Delay { duration_ms: 400 },
        ]
    );
}

#[test]
fn test_block_comment_after_string_statement() {
    let source = r#"
void setup() {
  Serial.println("a"); /* note */
  Serial.print("/* kept */"); // trailing
  delay(5); /* note */
}
"#;
    let program = parse(source);
    assert_eq!(
        stmts(&program.setup),
        vec![
            Statement::SerialPrint {
                text: "a".to_string(),
                newline: true
            },
            Statement::SerialPrint {
                text: "/* kept */".to_string(),
                newline: false
            },
            Statement::Delay { duration_ms: 5 },
        ]
    );
}

#[test]
fn test_signature_text_inside_string_stays_in_block() {
    let source = r#"
void loop() {
  Serial.println("void setup() {");
  delay(10);
}
"#;
    let program = parse(source);
    assert!(program.setup.is_empty());
    assert_eq!(
        stmts(&program.loop_body),
        vec![
            Statement::SerialPrint {
                text: "void setup() {".to_string(),
                newline: true
            },
            Statement::Delay { duration_ms: 10 },
        ]
    );
}

#[test]
fn test_nested_braces_flatten() {
    let source = r#"
void loop() {
  for (int i = 0; i < 3; i++) {
    digitalWrite(13, HIGH);
  }
  delay(10);
}
"#;
    let program = parse(source);
    assert_eq!(
        stmts(&program.loop_body),
        vec![
            Statement::Unrecognized,
            Statement::WriteDigitalPin {
                pin: PinId::Number(13),
                value: Level::High
            },
            Statement::Delay { duration_ms: 10 },
        ]
    );
    assert_eq!(program.unrecognized_count(), 1);
}

#[test]
fn test_closing_brace_after_statement_closes_block() {
    let source = "void setup() {\n  pinMode(3, OUTPUT); }\n  delay(9);\n";
    let program = parse(source);
    assert_eq!(program.setup.len(), 1);
    assert!(program.loop_body.is_empty());
}

#[test]
fn test_empty_and_garbage_sources() {
    assert!(parse("").is_empty());
    assert!(parse("}}}{{{ not a sketch").is_empty());
    assert!(parse("void setup() {").is_empty());
}

#[test]
fn test_classify_pins() {
    assert_eq!(
        classify("digitalWrite(LED_BUILTIN, HIGH);"),
        Statement::WriteDigitalPin {
            pin: PinId::Number(13),
            value: Level::High
        }
    );
    assert_eq!(
        classify("pinMode(A0, INPUT_PULLUP);"),
        Statement::SetPinMode {
            pin: PinId::Named("A0".to_string()),
            mode: PinMode::InputPullup
        }
    );
    // Out-of-range pins are accepted as-is
    assert_eq!(
        classify("digitalWrite(99, 1)"),
        Statement::WriteDigitalPin {
            pin: PinId::Number(99),
            value: Level::High
        }
    );
    assert_eq!(classify("digitalWrite(13, MAYBE);"), Statement::Unrecognized);
    assert_eq!(classify("pinMode(13, SIDEWAYS);"), Statement::Unrecognized);
    assert_eq!(classify("digitalWrite(13);"), Statement::Unrecognized);
}

#[test]
fn test_classify_delays() {
    assert_eq!(
        classify("delay(250);"),
        Statement::Delay { duration_ms: 250 }
    );
    assert_eq!(
        classify("delay(1000UL);"),
        Statement::Delay { duration_ms: 1000 }
    );
    assert_eq!(
        classify("delayMicroseconds(1500);"),
        Statement::Delay { duration_ms: 2 }
    );
    assert_eq!(classify("delay(-5);"), Statement::Unrecognized);
    assert_eq!(classify("delay(wait);"), Statement::Unrecognized);
    assert_eq!(classify("delay(1 + 2);"), Statement::Unrecognized);
}

#[test]
fn test_classify_serial() {
    assert_eq!(
        classify(r#"Serial.print("hi");"#),
        Statement::SerialPrint {
            text: "hi".to_string(),
            newline: false
        }
    );
    assert_eq!(
        classify(r#"Serial.println("a, \"b\"");"#),
        Statement::SerialPrint {
            text: "a, \"b\"".to_string(),
            newline: true
        }
    );
    assert_eq!(
        classify("Serial.println(42);"),
        Statement::SerialPrint {
            text: "42".to_string(),
            newline: true
        }
    );
    assert_eq!(
        classify("Serial.println();"),
        Statement::SerialPrint {
            text: String::new(),
            newline: true
        }
    );
    assert_eq!(classify("Serial.println(sensorValue);"), Statement::Unrecognized);
    assert_eq!(classify(r#"Serial.print("unterminated);"#), Statement::Unrecognized);
    assert_eq!(
        classify("Serial.begin(115200);"),
        Statement::SerialBegin { baud: 115200 }
    );
}

#[test]
fn test_classify_unknown_calls() {
    assert_eq!(classify("int x = analogRead(A0);"), Statement::Unrecognized);
    assert_eq!(classify("myServo.write(90);"), Statement::Unrecognized);
    assert_eq!(classify("x++;"), Statement::Unrecognized);
    assert_eq!(classify(""), Statement::Unrecognized);
}
