//! Peripheral pane rendering
//!
//! Shows each bound device with the level it currently mirrors. A lit device
//! is drawn in its own color; a dark one is greyed out.

use super::utils::{clamp_scroll, pane_block, visible_height};
use crate::board::peripherals::PeripheralRegistry;
use crate::ui::theme::{peripheral_color, DEFAULT_THEME};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem},
    Frame,
};

/// Scroll state for the peripherals pane
pub struct PeripheralsScrollState {
    pub offset: usize,
}

/// Render the peripherals pane
pub fn render_peripherals_pane(
    frame: &mut Frame,
    area: Rect,
    peripherals: &PeripheralRegistry,
    is_focused: bool,
    scroll_state: &mut PeripheralsScrollState,
) {
    let block = pane_block(" Peripherals ", is_focused);

    let mut all_items = Vec::new();
    if peripherals.is_empty() {
        all_items.push(
            ListItem::new("(nothing attached)").style(Style::default().fg(DEFAULT_THEME.comment)),
        );
    }

    for binding in peripherals.iter() {
        let p = &binding.peripheral;
        let (glyph, style) = if binding.is_active() {
            (
                "◉",
                Style::default()
                    .fg(peripheral_color(p.kind))
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("◯", Style::default().fg(DEFAULT_THEME.level_low))
        };

        all_items.push(ListItem::new(Line::from(vec![
            Span::styled(format!(" {} ", glyph), style),
            Span::styled(format!("{:<14}", p.id), Style::default().fg(DEFAULT_THEME.fg)),
            Span::styled(
                format!("{:<11}", p.kind.label()),
                Style::default().fg(DEFAULT_THEME.type_name),
            ),
            Span::styled(
                format!("pin {:<4}", p.pin.to_string()),
                Style::default().fg(DEFAULT_THEME.function),
            ),
            Span::styled(
                format!(" @{},{}", p.position.0, p.position.1),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
        ])));
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
