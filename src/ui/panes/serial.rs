//! Serial monitor pane rendering

use super::utils::{clamp_scroll, format_millis, pane_block, visible_height};
use crate::board::serial::SerialLog;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{List, ListItem, Padding, Paragraph},
    Frame,
};

/// Scroll state for the serial pane; `usize::MAX` pins it to the bottom
pub struct SerialScrollState {
    pub offset: usize,
}

/// Data needed to render the serial pane
pub struct SerialRenderData<'a> {
    pub serial: &'a SerialLog,
    pub show_timestamps: bool,
    /// Lines hidden by the user's clear action
    pub hidden_lines: usize,
}

/// Render the serial monitor pane
pub fn render_serial_pane(
    frame: &mut Frame,
    area: Rect,
    data: SerialRenderData,
    is_focused: bool,
    scroll_state: &mut SerialScrollState,
) {
    let title = match data.serial.baud() {
        Some(baud) => format!(" Serial Monitor @ {} baud ", baud),
        None => " Serial Monitor ".to_string(),
    };
    let block = pane_block(&title, is_focused);

    let lines = data.serial.lines();
    let lines = lines.get(data.hidden_lines..).unwrap_or_default();

    if lines.is_empty() {
        let paragraph = Paragraph::new("(no output)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let visible_height = visible_height(area);
    clamp_scroll(&mut scroll_state.offset, lines.len(), visible_height);

    let visible_items: Vec<ListItem> = lines
        .iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(timestamp, text)| {
            let mut spans = Vec::new();
            if data.show_timestamps {
                spans.push(Span::styled(
                    format!("[{}] ", format_millis(*timestamp)),
                    Style::default().fg(DEFAULT_THEME.comment),
                ));
            }
            spans.push(Span::styled(
                text.clone(),
                Style::default().fg(DEFAULT_THEME.fg),
            ));
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(visible_items).block(block);
    frame.render_widget(list, area);
}
