//! Status bar rendering with keybindings and state indicators

use super::utils::format_millis;
use crate::interpreter::state::Phase;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Where the displayed state comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunIndicator {
    Stopped,
    Running,
    Paused,
    /// Reviewing history, `n` steps behind the newest
    Reviewing(usize),
}

/// Data needed to render the status bar
pub struct StatusRenderData<'a> {
    pub message: &'a str,
    pub phase: Phase,
    pub cursor: usize,
    pub steps_executed: u64,
    pub sim_time: u64,
    pub indicator: RunIndicator,
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: StatusRenderData) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    // Left side: phase, step counter and message
    let phase_text = match data.phase {
        Phase::RunningSetup | Phase::RunningLoop => format!(
            " {} #{} · step {} · {} ",
            data.phase,
            data.cursor,
            data.steps_executed,
            format_millis(data.sim_time)
        ),
        _ => format!(" {} ", data.phase),
    };

    let phase_bg = match data.phase {
        Phase::Idle => DEFAULT_THEME.comment,
        Phase::Halted => DEFAULT_THEME.error,
        Phase::RunningSetup => DEFAULT_THEME.secondary,
        Phase::RunningLoop => DEFAULT_THEME.primary,
    };

    let left_spans = vec![
        Span::styled(
            phase_text,
            Style::default()
                .bg(phase_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            " | ",
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.comment),
        ),
        Span::styled(
            format!(" {} ", data.message),
            Style::default()
                .bg(DEFAULT_THEME.current_line_bg)
                .fg(DEFAULT_THEME.fg),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    // Right side: keybinds with visual grouping
    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.current_line_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = Vec::new();
    for (i, (key, desc)) in [
        (" ⎵ ", " run/stop "),
        (" p ", " pause "),
        (" → ", " step "),
        (" ← ", " review "),
        (" r ", " restart "),
        (" q ", " quit "),
    ]
    .into_iter()
    .enumerate()
    {
        if i > 0 {
            right_spans.push(Span::styled("│", sep_style));
            right_spans.push(Span::styled(" ", desc_style));
        }
        right_spans.push(Span::styled(key, key_style));
        right_spans.push(Span::styled(desc, desc_style));
    }

    let badge = match data.indicator {
        RunIndicator::Running => Some((" ▶ RUNNING ".to_string(), DEFAULT_THEME.success)),
        RunIndicator::Paused => Some((" ⏸ PAUSED ".to_string(), DEFAULT_THEME.secondary)),
        RunIndicator::Reviewing(back) => {
            Some((format!(" ⟲ -{} ", back), DEFAULT_THEME.secondary))
        }
        RunIndicator::Stopped => None,
    };

    if let Some((text, bg)) = badge {
        right_spans.push(Span::styled("│", sep_style));
        right_spans.push(Span::styled(
            text,
            Style::default()
                .bg(bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.current_line_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
