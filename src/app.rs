use std::time::Instant;

use crate::cli::Session;
use crate::events::ResponseEvent;

/// Controller state for one prompt/response session.
///
/// Starts in a loading state and transitions exactly once to displaying
/// either the response text or an error message. `UserCancel` ends the
/// session from either state.
#[derive(Debug)]
pub struct App {
    pub session: Session,
    pub is_loading: bool,
    pub displayed_text: String,
    pub should_quit: bool,
    pub scroll_offset: usize,
    pub started_at: Instant,
    unreported_error: Option<String>,
}

impl App {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            is_loading: true,
            displayed_text: String::new(),
            should_quit: false,
            scroll_offset: 0,
            started_at: Instant::now(),
            unreported_error: None,
        }
    }

    /// Apply one lifecycle event. Only the first `ContentReady` or `Failure`
    /// takes effect; a session gets a single reply.
    pub fn on_event(&mut self, event: ResponseEvent) {
        match event {
            ResponseEvent::ContentReady(text) => {
                if !self.is_loading || self.should_quit {
                    return;
                }
                self.is_loading = false;
                self.displayed_text = text;
            }
            ResponseEvent::Failure(error) => {
                if !self.is_loading || self.should_quit {
                    return;
                }
                self.is_loading = false;
                self.displayed_text = format!("Error: {error}");
                self.unreported_error = Some(error);
            }
            ResponseEvent::UserCancel => {
                self.quit();
            }
        }
    }

    /// One-shot handle for propagating a request failure upward. Returns the
    /// error on the first call after a `Failure` event and `None` afterwards.
    pub fn take_unreported_error(&mut self) -> Option<String> {
        self.unreported_error.take()
    }

    pub const fn quit(&mut self) {
        self.should_quit = true;
    }

    pub const fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    pub fn scroll_down(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_add(amount);
    }

    pub const fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub const fn scroll_to_bottom(&mut self) {
        // The rendering code clamps this to the maximum possible scroll
        self.scroll_offset = usize::MAX;
    }
}
