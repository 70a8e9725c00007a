use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use scry::app::{App, Focus, InputMode, StatusLevel};
use scry::config::{self, Endpoint};
use scry::infrastructure::runtime::{RuntimeBridge, RuntimeCommand, RuntimeEvent};
use scry::ui;

#[derive(Debug, Parser)]
#[command(
    name = "scry",
    version,
    about = "Scry: a local-first Substrate node TUI dashboard"
)]
struct Args {
    /// HTTP JSON-RPC endpoint (e.g. http://localhost:9933)
    #[arg(long)]
    rpc: Option<String>,

    /// Serve a scripted in-memory chain instead of connecting
    #[arg(long)]
    mock: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = config::load();
    let endpoints = endpoints_from_args_and_config(&args, &config);
    let initial_endpoint = if args.mock {
        "mock".to_string()
    } else {
        endpoints
            .first()
            .map(|endpoint| endpoint.display())
            .unwrap_or_default()
    };

    let mut stdout = io::stdout();
    enable_raw_mode()?;
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create the runtime bridge
    let runtime = RuntimeBridge::new(endpoints.clone(), args.mock)?;

    let mut app = App::new();
    app.endpoint = initial_endpoint;
    app.endpoints = endpoints;
    app.set_status("Connecting…", StatusLevel::Info);

    let res = run_app(&mut terminal, app, runtime);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    runtime: RuntimeBridge,
) -> Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        pump_background(&mut app, &runtime);
        terminal.draw(|f| ui::draw(f, &mut app))?;
        if app.should_quit {
            let _ = runtime.send(RuntimeCommand::Shutdown);
            return Ok(());
        }

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                handle_key(&mut app, key);
            }
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick();
            last_tick = Instant::now();
        }

        pump_background(&mut app, &runtime);
    }
}

fn pump_background(app: &mut App, runtime: &RuntimeBridge) {
    // Process runtime events
    for event in runtime.poll_events() {
        match event {
            RuntimeEvent::Connected {
                endpoint,
                chain,
                accounts,
            } => app.apply_connected(endpoint, chain, accounts),
            RuntimeEvent::NewHead { chain, header } => app.ingest_head(chain, header),
            RuntimeEvent::SearchResolved { seq, status } => app.search.apply_resolved(seq, status),
            RuntimeEvent::SearchCompleted { seq, report } => {
                app.search.apply_completed(seq, report)
            }
            RuntimeEvent::SearchFailed { seq, message } => app.search.apply_failed(seq, &message),
            RuntimeEvent::Error { message } => app.apply_runtime_error(message),
        }
    }

    // Process pending commands
    if let Some(request) = app.take_search_request() {
        let _ = runtime.send(RuntimeCommand::Search {
            seq: request.seq,
            mode: request.mode,
            param: request.param,
        });
    }
    if let Some(index) = app.take_endpoint_switch_request() {
        let _ = runtime.send(RuntimeCommand::SwitchEndpoint { index });
    }
}

fn endpoints_from_args_and_config(args: &Args, config: &config::Config) -> Vec<Endpoint> {
    use std::collections::BTreeSet;

    let mut endpoints = Vec::new();
    let mut seen = BTreeSet::<String>::new();

    let mut push = |endpoints: &mut Vec<Endpoint>, name: Option<String>, url: String| {
        if seen.insert(url.to_lowercase()) {
            endpoints.push(Endpoint { name, url });
        }
    };

    // CLI argument takes precedence
    if let Some(rpc) = args.rpc.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        push(
            &mut endpoints,
            Some("cli".to_string()),
            config::normalize_url(rpc),
        );
    }

    // Config file endpoints
    for entry in &config.endpoints {
        if let Some(url) = entry.url.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            push(&mut endpoints, entry.name.clone(), config::normalize_url(url));
        }
    }

    // Default fallback
    if endpoints.is_empty() {
        push(
            &mut endpoints,
            Some("local".to_string()),
            config::normalize_url("localhost:9933"),
        );
    }

    endpoints
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    if app.help_open {
        if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q')) {
            app.help_open = false;
        }
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => app.should_quit = true,
        KeyCode::Char('?') => app.help_open = true,
        KeyCode::Char('m') => {
            app.search.toggle_mode();
            app.set_status(
                format!("Search {}", app.search.mode.title()),
                StatusLevel::Info,
            );
        }
        KeyCode::Char('/') | KeyCode::Char('i') => {
            app.focus = Focus::Search;
            app.input_mode = InputMode::Editing;
        }
        KeyCode::Enter => {
            if app.focus == Focus::Search {
                app.submit_search();
            }
        }
        KeyCode::Tab => app.focus = app.focus.next(),
        KeyCode::Char('[') => app.cycle_endpoint(false),
        KeyCode::Char(']') => app.cycle_endpoint(true),
        KeyCode::Char('y') => copy_to_clipboard(app),
        KeyCode::Up | KeyCode::Char('k') => app.move_selection_up(),
        KeyCode::Down | KeyCode::Char('j') => app.move_selection_down(),
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            app.submit_search();
        }
        KeyCode::Backspace => {
            app.search.param_text.pop();
        }
        KeyCode::Char(ch) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                return;
            }
            app.search.param_text.push(ch);
        }
        _ => {}
    }
}

fn copy_to_clipboard(app: &mut App) {
    use arboard::Clipboard;

    let Some(text) = app.copy_payload() else {
        app.set_status("Nothing to copy", StatusLevel::Warn);
        return;
    };

    match Clipboard::new() {
        Ok(mut clipboard) => {
            if clipboard.set_text(&text).is_ok() {
                let shown = if text.len() > 24 {
                    format!("{}…", &text[..24])
                } else {
                    text
                };
                app.set_status(format!("Copied: {shown}"), StatusLevel::Info);
            } else {
                app.set_status("Failed to copy to clipboard", StatusLevel::Error);
            }
        }
        Err(_) => {
            app.set_status("Clipboard not available", StatusLevel::Error);
        }
    }
}
