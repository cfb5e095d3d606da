pub mod widgets;

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Response viewport (flexible)
            Constraint::Length(1), // Bottom keymap bar
        ])
        .split(frame.area());

    if app.is_loading {
        widgets::render_spinner(frame, app, chunks[0]);
    } else {
        widgets::render_viewport(frame, app, chunks[0]);
    }
    widgets::render_bottom_bar(frame, app, chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Session;
    use crate::events::ResponseEvent;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn test_app() -> App {
        App::new(Session {
            api_key: "key".to_string(),
            model: "gemini-pro".to_string(),
            prompt: "Ping".to_string(),
        })
    }

    fn draw(app: &mut App) -> Terminal<TestBackend> {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_render_loading_shows_spinner_caption() {
        let mut app = test_app();
        let terminal = draw(&mut app);
        assert!(buffer_text(&terminal).contains("Crunching numbers ..."));
    }

    #[test]
    fn test_render_displaying_shows_response() {
        let mut app = test_app();
        app.on_event(ResponseEvent::ContentReady("Pong".to_string()));
        let terminal = draw(&mut app);
        let text = buffer_text(&terminal);
        assert!(text.contains("Pong"));
        assert!(!text.contains("Crunching numbers"));
    }

    #[test]
    fn test_render_displaying_shows_error_text() {
        let mut app = test_app();
        app.on_event(ResponseEvent::Failure("connection refused".to_string()));
        let terminal = draw(&mut app);
        assert!(buffer_text(&terminal).contains("Error: connection refused"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut app = test_app();
        app.on_event(ResponseEvent::ContentReady("Pong".to_string()));
        for _ in 0..3 {
            draw(&mut app);
        }
        assert!(!app.is_loading);
        assert_eq!(app.displayed_text, "Pong");
    }

    #[test]
    fn test_render_clamps_scroll_offset() {
        let mut app = test_app();
        app.on_event(ResponseEvent::ContentReady("short".to_string()));
        app.scroll_to_bottom();
        draw(&mut app);
        // One line of content fits the viewport, so the clamp lands on zero
        assert_eq!(app.scroll_offset, 0);
    }
}
