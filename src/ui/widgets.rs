use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_INTERVAL_MS: u128 = 100;

pub fn render_spinner(frame: &mut Frame, app: &App, area: Rect) {
    // Frame index comes from elapsed time, so drawing never mutates state
    let elapsed = app.started_at.elapsed().as_millis();
    #[allow(clippy::cast_possible_truncation)]
    let index = (elapsed / SPINNER_INTERVAL_MS) as usize % SPINNER_FRAMES.len();

    let text = vec![
        Line::from(""),
        Line::from(""),
        Line::from(vec![
            Span::raw("   "),
            Span::styled(
                SPINNER_FRAMES[index],
                Style::default().fg(Color::Magenta),
            ),
            Span::raw(" Crunching numbers ..."),
        ]),
    ];

    frame.render_widget(Paragraph::new(text), area);
}

pub fn render_viewport(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Blue));

    // Account for borders and wrapping to find the true visual height
    let available_width = (area.width.saturating_sub(2)).max(1) as usize;
    let mut total_visual_lines = 0;
    for line in app.displayed_text.lines() {
        let line_width = line.chars().count();
        if line_width == 0 {
            total_visual_lines += 1;
        } else {
            total_visual_lines += line_width.div_ceil(available_width);
        }
    }

    let visible_height = area.height.saturating_sub(2) as usize;
    let max_scroll = total_visual_lines.saturating_sub(visible_height);
    let actual_scroll = app.scroll_offset.min(max_scroll);

    // Sync the clamped scroll back so repeated keypresses stay in range
    if app.scroll_offset != actual_scroll {
        app.scroll_offset = actual_scroll;
    }

    let viewport = Paragraph::new(app.displayed_text.as_str())
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((u16::try_from(actual_scroll).unwrap_or(u16::MAX), 0));

    frame.render_widget(viewport, area);
}

pub fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    let text = if app.is_loading {
        "Esc/Ctrl+C: Quit"
    } else {
        "Up/Down: Scroll | PgUp/PgDn: Page | Esc/Ctrl+C: Quit"
    };

    let bar = Paragraph::new(text)
        .alignment(ratatui::layout::Alignment::Center)
        .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM));

    frame.render_widget(bar, area);
}
