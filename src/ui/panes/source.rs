//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the sketch being
//! simulated with basic syntax highlighting and execution indicators.
//!
//! # Features
//!
//! - Syntax highlighting for sketch keywords, constants, strings, and comments
//! - Current line highlighting (last executed statement)
//! - Dimmed marker on lines the classifier did not recognise
//! - Scroll state that keeps the current line at a fixed row while running

use super::utils::{pane_block, visible_height};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Simple syntax highlighting for sketch code
fn highlight_source_code(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut current_word = String::new();

    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut i = 0;

    while i < chars.len() {
        let (byte_pos, c) = chars[i];

        // Handle comments
        if c == '/' && chars.get(i + 1).is_some_and(|&(_, n)| n == '/' || n == '*') {
            if !current_word.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut current_word)));
            }
            spans.push(Span::styled(
                &line[byte_pos..],
                Style::default().fg(DEFAULT_THEME.comment),
            ));
            return Line::from(spans);
        }

        // Handle strings
        if c == '"' {
            if !current_word.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut current_word)));
            }
            let mut end = i + 1;
            while end < chars.len() && chars[end].1 != '"' {
                end += if chars[end].1 == '\\' { 2 } else { 1 };
            }
            end = (end + 1).min(chars.len());
            let end_byte = chars.get(end).map_or(line.len(), |&(pos, _)| pos);
            spans.push(Span::styled(
                &line[byte_pos..end_byte],
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        // Handle non-identifier characters (delimiters)
        if !c.is_alphanumeric() && c != '_' && c != '.' {
            if !current_word.is_empty() {
                let style = get_keyword_style(&current_word, c == '(');
                spans.push(Span::styled(std::mem::take(&mut current_word), style));
            }

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.primary),
                _ => Style::default().fg(DEFAULT_THEME.fg),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    if !current_word.is_empty() {
        let style = get_keyword_style(&current_word, false);
        spans.push(Span::styled(current_word, style));
    }

    Line::from(spans)
}

fn get_keyword_style(word: &str, is_function: bool) -> Style {
    match word {
        "void" | "int" | "long" | "unsigned" | "bool" | "byte" | "char" | "float" => {
            Style::default().fg(DEFAULT_THEME.type_name)
        }
        "if" | "else" | "while" | "for" | "return" | "const" => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        "HIGH" | "LOW" | "INPUT" | "OUTPUT" | "INPUT_PULLUP" | "LED_BUILTIN" | "true"
        | "false" => Style::default().fg(DEFAULT_THEME.number),
        _ if word.chars().all(|c| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.number)
        }
        _ if is_function => Style::default().fg(DEFAULT_THEME.function),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    }
}

/// Scroll state for the source pane
pub struct SourceScrollState {
    pub offset: usize,
    pub target_line_row: Option<usize>,
}

impl SourceScrollState {
    pub fn new() -> Self {
        Self {
            offset: 0,
            target_line_row: None,
        }
    }
}

impl Default for SourceScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Data needed to render the source pane
pub struct SourceRenderData<'a> {
    pub source_code: &'a str,
    /// 1-based line of the last executed statement
    pub current_line: Option<usize>,
    /// 1-based lines kept as unrecognized statements
    pub unrecognized_lines: &'a [usize],
    pub is_gated: bool,
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    data: SourceRenderData,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let block = pane_block(" Sketch ", is_focused);

    let lines: Vec<&str> = data.source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = visible_height(area);

    // Initialize target_line_row to center if not set
    let target_row = scroll_state
        .target_line_row
        .unwrap_or(visible_height / 2)
        .min(visible_height.saturating_sub(1));
    scroll_state.target_line_row = Some(target_row);

    // Keep the current line at the target visual row
    if let Some(current_line) = data.current_line.filter(|&l| l > 0 && l <= total_lines) {
        scroll_state.offset = (current_line - 1).saturating_sub(target_row);
    }
    if total_lines > visible_height {
        scroll_state.offset = scroll_state.offset.min(total_lines - visible_height);
    } else {
        scroll_state.offset = 0;
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_current = data.current_line == Some(line_num);
            let is_unrecognized = data.unrecognized_lines.contains(&line_num);

            let marker = if is_current && data.is_gated {
                "⏸"
            } else if is_current {
                "▶"
            } else if is_unrecognized {
                "·"
            } else {
                " "
            };

            let num_style = if is_current {
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };

            let mut content_line = highlight_source_code(line);
            if is_current {
                let bg = Style::default().bg(DEFAULT_THEME.current_line_bg);
                for span in &mut content_line.spans {
                    span.style = span.style.patch(bg);
                }
            } else if is_unrecognized {
                for span in &mut content_line.spans {
                    span.style = span.style.add_modifier(Modifier::DIM);
                }
            }

            let mut final_spans = vec![Span::styled(format!("{:4}{} ", line_num, marker), num_style)];
            final_spans.extend(content_line.spans);

            Line::from(final_spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &Line) -> Vec<String> {
        line.spans.iter().map(|s| s.content.to_string()).collect()
    }

    #[test]
    fn comment_is_one_span() {
        let line = highlight_source_code("delay(10); // wait");
        assert_eq!(texts(&line).last().map(String::as_str), Some("// wait"));
    }

    #[test]
    fn string_with_escape_stays_whole() {
        let line = highlight_source_code(r#"Serial.print("a\"b");"#);
        assert!(texts(&line).contains(&r#""a\"b""#.to_string()));
    }
}
