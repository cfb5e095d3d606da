mod api;
mod app;
mod cli;
mod events;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, prelude::*};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing_subscriber::EnvFilter;

use api::GeminiClient;
use app::App;
use cli::Cli;
use events::ResponseEvent;

const REQUEST_TIMEOUT_SECS: u64 = 300;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("gai=error".parse()?)
                .add_directive("reqwest=warn".parse()?),
        )
        .with_writer(io::stderr)
        .init();

    let session = match Cli::parse().into_session() {
        Ok(session) => session,
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    };

    let client = GeminiClient::new(session.api_key.clone(), REQUEST_TIMEOUT_SECS)?;
    let mut app = App::new(session);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Channel for the single completion event
    let (tx, mut rx) = mpsc::unbounded_channel::<ResponseEvent>();

    // The one outbound request for this session
    let request_task = start_request(&app, &client, &tx);

    let res = run_app(&mut terminal, &mut app, &mut rx);

    // Restore terminal before reporting anything
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Cancellation drops any in-flight result on the floor
    request_task.abort();

    if let Some(error) = app.take_unreported_error() {
        tracing::error!("Error generating a response from Gemini AI: {error}");
    }

    if let Err(err) = res {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// Spawn the session's single request. The result comes back into the event
/// loop as one `ContentReady` or `Failure`.
fn start_request(
    app: &App,
    client: &GeminiClient,
    event_tx: &mpsc::UnboundedSender<ResponseEvent>,
) -> JoinHandle<()> {
    let client = client.clone();
    let model = app.session.model.clone();
    let prompt = app.session.prompt.clone();
    let tx = event_tx.clone();

    tokio::spawn(async move {
        match client.generate_content(&model, &prompt).await {
            Ok(text) => {
                let _ = tx.send(ResponseEvent::ContentReady(text));
            }
            Err(err) => {
                let _ = tx.send(ResponseEvent::Failure(err.to_string()));
            }
        }
    })
}

fn handle_keyboard_input(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
    match key {
        KeyCode::Esc => app.on_event(ResponseEvent::UserCancel),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            app.on_event(ResponseEvent::UserCancel);
        }

        // Navigation keys move the viewport without touching session state
        KeyCode::Up => app.scroll_up(1),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::PageUp => app.scroll_up(10),
        KeyCode::PageDown => app.scroll_down(10),
        KeyCode::Home => app.scroll_to_top(),
        KeyCode::End => app.scroll_to_bottom(),

        _ => {}
    }
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_rx: &mut mpsc::UnboundedReceiver<ResponseEvent>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::render(f, app))?;

        // Check for the completion event first
        if let Ok(app_event) = event_rx.try_recv() {
            app.on_event(app_event);
        }

        // Poll keyboard with a short timeout to keep the spinner animating
        if event::poll(Duration::from_millis(16))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_keyboard_input(app, key.code, key.modifiers);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
