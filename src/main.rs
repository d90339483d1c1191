use tscan::api::ApiError;
use tscan::app::{App, Overlay};
use tscan::config::Config;
use tscan::feeds::{self, FeedData, FeedKind, FeedRequest, FilterField};
use tscan::logging::setup_logging;
use tscan::network::Network;
use tscan::ui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ratatui::{
    crossterm::{
        event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
        ExecutableCommand,
    },
    prelude::*,
};
use std::io::stdout;
use tokio::sync::mpsc;
use tui_input::backend::crossterm::EventHandler;

/// Terminal account explorer for Etherscan-compatible APIs
#[derive(Debug, Parser)]
#[command(name = "tscan", version, about)]
struct Cli {
    /// Network to explore (eth or bsc); saved as the new default
    #[arg(short, long)]
    network: Option<Network>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Store the explorer API key
    SetKey { key: String },
    /// Store the default network (eth or bsc)
    SetNetwork { network: Network },
    /// Print the config location and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::load()?;

    match cli.command {
        Some(Command::SetKey { key }) => {
            config.set_api_key(key.trim().to_string())?;
            println!("API key saved");
            return Ok(());
        }
        Some(Command::SetNetwork { network }) => {
            config.set_network(network)?;
            println!("Network set to {} ({})", network.label(), network.id());
            return Ok(());
        }
        Some(Command::Config) => {
            print_config(&config);
            return Ok(());
        }
        None => {}
    }

    let _guard = setup_logging(&Config::log_dir()?)?;

    if let Some(network) = cli.network {
        config
            .set_network(network)
            .context("Failed to save network")?;
    }

    run_tui(config).await
}

fn print_config(config: &Config) {
    let network = config.network();
    let path = config
        .path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "(in memory)".to_string());
    let key = match config.api_key() {
        Some(key) => format!("{}…", key.chars().take(4).collect::<String>()),
        None => "not set".to_string(),
    };

    println!("Config:  {path}");
    println!("Network: {} ({})", network.label(), network.id());
    println!("API URL: {}", config.api_url(network));
    println!("API key: {key}");
    println!("Theme:   {}", config.theme().as_str());
}

/// Messages from async tasks back to the main loop
enum AsyncMessage {
    Feed {
        kind: FeedKind,
        generation: u64,
        result: Result<FeedData, ApiError>,
    },
}

async fn run_tui(config: Config) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let mut app = App::new(config);
    tracing::info!(network = app.network().id(), "starting");

    let (tx, mut rx) = mpsc::channel::<AsyncMessage>(32);

    let result = run_event_loop(&mut terminal, &mut app, tx, &mut rx).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

/// Spawn one task per request; results come back through the channel
fn spawn_requests(app: &App, requests: Vec<FeedRequest>, tx: &mpsc::Sender<AsyncMessage>) {
    if requests.is_empty() {
        return;
    }
    let Some(client) = app.client.clone() else {
        tracing::warn!("no explorer client, dropping {} requests", requests.len());
        return;
    };

    for request in requests {
        let client = client.clone();
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = feeds::fetch(&client, &request).await;
            if let Err(e) = &result {
                tracing::warn!(kind = ?request.kind, error = %e, "feed request failed");
            }
            let _ = tx
                .send(AsyncMessage::Feed {
                    kind: request.kind,
                    generation: request.generation,
                    result,
                })
                .await;
        });
    }
}

async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    tx: mpsc::Sender<AsyncMessage>,
    rx: &mut mpsc::Receiver<AsyncMessage>,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Check for async results
        while let Ok(msg) = rx.try_recv() {
            match msg {
                AsyncMessage::Feed {
                    kind,
                    generation,
                    result,
                } => {
                    app.apply_feed_result(kind, generation, result.map_err(|e| e.to_string()));
                }
            }
        }

        // Poll for input events
        if event::poll(std::time::Duration::from_millis(50))? {
            let ev = event::read()?;

            if let Event::Key(key) = &ev {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                let requests = handle_key(app, key, &ev);
                spawn_requests(app, requests, &tx);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key(app: &mut App, key: &KeyEvent, ev: &Event) -> Vec<FeedRequest> {
    // Global keys
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => app.should_quit = true,
            KeyCode::Char('t') => app.toggle_theme(),
            KeyCode::Char('n') => app.open_network_menu(),
            KeyCode::Char('p') => app.open_section_menu(),
            _ => {}
        }
        return Vec::new();
    }

    if let Some(Overlay::Filter { .. }) = app.overlay {
        return match key.code {
            KeyCode::Esc => {
                app.close_overlay();
                Vec::new()
            }
            KeyCode::Enter => app.overlay_confirm(),
            _ => {
                app.filter_input.handle_event(ev);
                Vec::new()
            }
        };
    }

    if app.overlay.is_some() {
        return match key.code {
            KeyCode::Esc => {
                app.close_overlay();
                Vec::new()
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.overlay_prev();
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.overlay_next();
                Vec::new()
            }
            KeyCode::Enter => app.overlay_confirm(),
            _ => Vec::new(),
        };
    }

    if key.code == KeyCode::Esc {
        app.should_quit = true;
        return Vec::new();
    }

    if app.is_on_home() {
        handle_home_key(app, key, ev)
    } else {
        handle_result_key(app, key)
    }
}

fn handle_home_key(app: &mut App, key: &KeyEvent, ev: &Event) -> Vec<FeedRequest> {
    if app.needs_key_setup() {
        match key.code {
            KeyCode::Enter => {
                if let Err(e) = app.submit_api_key() {
                    app.set_error(e);
                }
            }
            _ => {
                app.key_input.handle_event(ev);
            }
        }
        return Vec::new();
    }

    // Search mode with history
    match key.code {
        KeyCode::Enter => {
            // Check if a history item is selected
            if let Some(query) = app.get_selected_history_query() {
                app.clear_history_selection();
                // Add to history again to move it to top
                if let Err(e) = app.config.add_recent_search(query.clone()) {
                    tracing::warn!(error = %format!("{e:#}"), "failed to persist config");
                }
                return app.execute_search(&query);
            }
            if let Some(query) = app.submit_search() {
                return app.execute_search(&query);
            }
        }
        KeyCode::Up => app.select_history_prev(),
        KeyCode::Down => app.select_history_next(),
        KeyCode::Delete | KeyCode::Backspace if app.selected_history_index.is_some() => {
            app.delete_selected_history();
        }
        _ => {
            // Any other key returns focus to the search bar
            app.clear_history_selection();
            app.search_input.handle_event(ev);
        }
    }
    Vec::new()
}

fn handle_result_key(app: &mut App, key: &KeyEvent) -> Vec<FeedRequest> {
    let single = match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_prev();
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next();
            None
        }
        KeyCode::Tab => app.next_tab(),
        KeyCode::BackTab => app.prev_tab(),
        KeyCode::Char('n') | KeyCode::Right => app.next_page(),
        KeyCode::Char('p') | KeyCode::Left => app.prev_page(),
        KeyCode::Char('s') => app.toggle_sort(),
        KeyCode::Char('u') => app.toggle_block_type(),
        KeyCode::Char('g') => app.cycle_tag(),
        KeyCode::Char('c') => {
            app.open_filter(FilterField::Contract);
            None
        }
        KeyCode::Char('f') => {
            app.open_filter(FilterField::BlockRange);
            None
        }
        KeyCode::Char('o') => {
            app.open_filter(FilterField::PageSize);
            None
        }
        KeyCode::Char('a') => {
            app.open_filter(FilterField::HistoryBlock);
            None
        }
        KeyCode::Char('r') => return app.refresh(),
        KeyCode::Enter => {
            return match app.get_selected_link() {
                Some(link) => app.navigate_to_link(link),
                None => Vec::new(),
            };
        }
        KeyCode::Backspace | KeyCode::Char('b') => return app.go_back(),
        KeyCode::Char('h') => {
            app.go_home();
            None
        }
        _ => None,
    };
    single.into_iter().collect()
}
