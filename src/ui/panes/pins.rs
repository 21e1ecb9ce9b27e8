//! Pin state pane rendering
//!
//! Lists every pin the sketch has configured or written, numbered pins first,
//! with its mode and level. Pins that peripherals are bound to show the bound
//! device ids so the link between a write and a lit LED is visible.

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::board::{peripherals::PeripheralRegistry, pins::PinState};
use crate::parser::ast::{Level, PinMode};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// Scroll state for the pins pane
pub struct PinsScrollState {
    pub offset: usize,
}

/// Data needed to render the pins pane
pub struct PinsRenderData<'a> {
    pub pins: &'a PinState,
    pub peripherals: &'a PeripheralRegistry,
}

/// Render the pins pane
pub fn render_pins_pane(
    frame: &mut Frame,
    area: Rect,
    data: PinsRenderData,
    is_focused: bool,
    scroll_state: &mut PinsScrollState,
) {
    let block = pane_block(" Pins ", is_focused);

    let mut all_items = Vec::new();
    if data.pins.is_empty() {
        all_items.push(
            ListItem::new("(no pins used)").style(Style::default().fg(DEFAULT_THEME.comment)),
        );
    }

    for (id, pin) in data.pins.sorted() {
        let level_style = match pin.level {
            Level::High => Style::default()
                .fg(DEFAULT_THEME.level_high)
                .add_modifier(Modifier::BOLD),
            Level::Low => Style::default().fg(DEFAULT_THEME.level_low),
        };
        let mode_style = if pin.mode == PinMode::Unset {
            Style::default().fg(DEFAULT_THEME.comment)
        } else {
            Style::default().fg(DEFAULT_THEME.type_name)
        };

        let mut spans = vec![
            Span::styled(
                format!("{:>4} ", id.to_string()),
                Style::default().fg(DEFAULT_THEME.function),
            ),
            Span::styled(format!("{:<13}", pin.mode.to_string()), mode_style),
            Span::styled(if pin.level.is_high() { "● " } else { "○ " }, level_style),
            Span::styled(format!("{:<4}", pin.level.to_string()), level_style),
        ];

        let bound: Vec<&str> = data
            .peripherals
            .on_pin(id)
            .map(|b| b.peripheral.id.as_str())
            .collect();
        if !bound.is_empty() {
            spans.push(Span::styled(
                format!("  → {}", bound.join(", ")),
                Style::default().fg(DEFAULT_THEME.comment),
            ));
        }

        all_items.push(ListItem::new(Line::from(spans)));
    }

    let visible_height = visible_height(area);
    clamp_scroll(&mut scroll_state.offset, all_items.len(), visible_height);

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(scroll_state.offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
