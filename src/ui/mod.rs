mod account_page;
mod dialog;
mod feed_page;
mod helper;
mod rows;
pub mod theme;

use account_page::draw_account_result;
use dialog::{draw_filter_prompt, draw_overlay};
use feed_page::draw_list_result;
use helper::*;
use theme::Palette;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Overlay, Screen};
use crate::menu::Section;

const TITLE_ART: &str = r#"
████████╗███████╗ ██████╗ █████╗ ███╗   ██╗
╚══██╔══╝██╔════╝██╔════╝██╔══██╗████╗  ██║
   ██║   ███████╗██║     ███████║██╔██╗ ██║
   ██║   ╚════██║██║     ██╔══██║██║╚██╗██║
   ██║   ███████║╚██████╗██║  ██║██║ ╚████║
   ╚═╝   ╚══════╝ ╚═════╝╚═╝  ╚═╝╚═╝  ╚═══╝
"#;

const SUBTITLE: &str = "Terminal Account Explorer";

const NAV_HELP: &str = "↑↓ navigate • Enter open • b back • h home • r refresh";
const NAV_HELP_NO_LIST: &str = "b back • h home • Esc quit";
const HEADER_HINTS: &str = "^n network • ^p pages • ^t theme ";

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let palette = Palette::for_mode(app.theme());

    frame.render_widget(Block::default().style(palette.base()), area);

    let status_height = u16::from(app.status.is_some());
    let chunks = Layout::vertical([
        Constraint::Length(1),             // Header
        Constraint::Min(0),                // Screen
        Constraint::Length(status_height), // Status
    ])
    .split(area);

    draw_header(frame, app, chunks[0], palette);

    let coin = app.network().coin();
    match &app.screen {
        Screen::Home => draw_home(frame, app, chunks[1], palette),
        Screen::Account(result) => draw_account_result(frame, chunks[1], result, coin, palette),
        screen @ (Screen::MultiBalance(_) | Screen::Transaction(_) | Screen::Block(_)) => {
            draw_list_result(frame, chunks[1], screen, coin, palette)
        }
        Screen::Section(section) => draw_section(frame, chunks[1], section, palette),
        Screen::Error(msg) => draw_error(frame, chunks[1], msg, palette),
    }

    if let Some(status) = &app.status {
        let line = Paragraph::new(format!(" ⚠ {status}"))
            .style(Style::default().fg(palette.error));
        frame.render_widget(line, chunks[2]);
    }

    match &app.overlay {
        Some(Overlay::Filter { field }) => {
            draw_filter_prompt(frame, area, *field, &app.filter_input, palette)
        }
        Some(overlay) => draw_overlay(frame, area, overlay, app.network(), palette),
        None => {}
    }
}

fn draw_header(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let network = app.network();
    let line = Line::from(vec![
        Span::styled(
            " TSCAN ",
            Style::default()
                .fg(palette.selected_fg)
                .bg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(network.label(), Style::default().fg(palette.text)),
        Span::styled(format!(" ({})", network.coin()), palette.muted()),
        Span::styled(" │ ", palette.muted()),
        Span::styled(app.theme().as_str(), Style::default().fg(palette.accent)),
    ]);
    frame.render_widget(Paragraph::new(line), area);

    let hints = Paragraph::new(HEADER_HINTS)
        .style(palette.muted())
        .alignment(Alignment::Right);
    frame.render_widget(hints, area);
}

fn draw_home(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    if app.needs_key_setup() {
        draw_key_setup(frame, app, area, palette);
    } else {
        draw_search_home(frame, app, area, palette);
    }
}

fn draw_title(frame: &mut Frame, title_area: Rect, subtitle_area: Rect, palette: &Palette) {
    let title = Paragraph::new(TITLE_ART)
        .style(Style::default().fg(palette.accent).bold())
        .alignment(Alignment::Center);
    frame.render_widget(title, title_area);

    let subtitle = Paragraph::new(SUBTITLE)
        .style(palette.muted())
        .alignment(Alignment::Center);
    frame.render_widget(subtitle, subtitle_area);
}

fn draw_key_setup(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let chunks = Layout::vertical([
        Constraint::Length(8), // Title
        Constraint::Length(1), // Subtitle
        Constraint::Length(2), // Spacing
        Constraint::Length(4), // Key input box
        Constraint::Length(1), // Spacing
        Constraint::Length(1), // Help
        Constraint::Min(0),    // Padding
    ])
    .split(area);

    draw_title(frame, chunks[0], chunks[1], palette);

    let key_area = centered_rect(70, chunks[3]);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.warning))
        .title(" ⚡ API Key Required ")
        .title_style(Style::default().fg(palette.warning));

    let inner_area = block.inner(key_area);
    frame.render_widget(block, key_area);

    let input_chunks = Layout::vertical([
        Constraint::Length(1), // Label
        Constraint::Length(1), // Input
    ])
    .split(inner_area);

    let label = Paragraph::new(format!(
        "Enter your {} explorer API key:",
        app.network().label()
    ))
    .style(Style::default().fg(palette.text));
    frame.render_widget(label, input_chunks[0]);

    let inner_width = input_chunks[1].width as usize;
    let scroll = app.key_input.visual_scroll(inner_width);

    let display_text = if app.key_input.value().is_empty() {
        Span::styled("YourApiKeyToken", palette.muted())
    } else {
        Span::styled(app.key_input.value(), Style::default().fg(palette.text))
    };

    let input = Paragraph::new(display_text).scroll((0, scroll as u16));
    frame.render_widget(input, input_chunks[1]);

    let cursor_x =
        input_chunks[1].x + (app.key_input.visual_cursor().saturating_sub(scroll)) as u16;
    if cursor_x < input_chunks[1].x + input_chunks[1].width {
        frame.set_cursor_position((cursor_x, input_chunks[1].y));
    }

    let help = Paragraph::new("Press Enter to save • ^n network • Esc to quit")
        .style(palette.muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[5]);
}

fn draw_search_home(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let recent_searches = app.get_recent_searches();
    let has_history = !recent_searches.is_empty();

    // Max 5 items + 2 for border
    let history_height = if has_history {
        (recent_searches.len().min(5) + 2) as u16
    } else {
        0
    };

    let chunks = Layout::vertical([
        Constraint::Length(8),              // Title
        Constraint::Length(1),              // Subtitle
        Constraint::Length(2),              // Spacing
        Constraint::Length(3),              // Search bar
        Constraint::Length(1),              // Spacing
        Constraint::Length(history_height), // History
        Constraint::Length(1),              // Spacing
        Constraint::Length(1),              // Endpoint
        Constraint::Length(1),              // Help
        Constraint::Min(0),                 // Padding
    ])
    .split(area);

    draw_title(frame, chunks[0], chunks[1], palette);

    let search_area = centered_rect(60, chunks[3]);
    let search_selected = app.selected_history_index.is_none();
    draw_search_bar(frame, app, search_area, search_selected, palette);

    if has_history {
        let history_area = centered_rect(60, chunks[5]);
        draw_history_list(frame, app, history_area, palette);
    }

    let endpoint = app
        .client
        .as_ref()
        .map(|c| c.base_url().to_string())
        .unwrap_or_else(|| "Not configured".to_string());
    let endpoint_line = Line::from(vec![
        Span::styled("API: ", palette.muted()),
        Span::styled(endpoint, Style::default().fg(palette.success)),
    ]);
    frame.render_widget(
        Paragraph::new(endpoint_line).alignment(Alignment::Center),
        chunks[7],
    );

    let help_text = if has_history {
        "Enter search • ↑↓ history • Del remove • Esc quit"
    } else {
        "Enter to search • Esc to quit"
    };
    let help = Paragraph::new(help_text)
        .style(palette.muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[8]);
}

fn draw_search_bar(frame: &mut Frame, app: &App, area: Rect, selected: bool, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(selected))
        .title(" 🔍 Search ")
        .title_style(palette.border(selected));

    let inner_width = area.width.saturating_sub(2) as usize;
    let scroll = app.search_input.visual_scroll(inner_width);

    let display_text = if app.search_input.value().is_empty() {
        Span::styled("Search by Address(es) / Txn Hash / Block", palette.muted())
    } else {
        Span::styled(app.search_input.value(), Style::default().fg(palette.text))
    };

    let input = Paragraph::new(display_text)
        .block(block)
        .scroll((0, scroll as u16));
    frame.render_widget(input, area);

    // Cursor only while the bar has focus
    if selected {
        let cursor_x =
            area.x + 1 + (app.search_input.visual_cursor().saturating_sub(scroll)) as u16;
        if cursor_x < (area.x + area.width).saturating_sub(1) {
            frame.set_cursor_position((cursor_x, area.y + 1));
        }
    }
}

fn draw_history_list(frame: &mut Frame, app: &App, area: Rect, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(false))
        .title(" Recent Searches ");

    let items: Vec<ListItem> = app
        .get_recent_searches()
        .iter()
        .enumerate()
        .take(5)
        .map(|(i, query)| {
            let style = if app.selected_history_index == Some(i) {
                palette.selected()
            } else {
                Style::default().fg(palette.text)
            };
            ListItem::new(format!(" {}", truncate_text(query, 60))).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn draw_section(frame: &mut Frame, area: Rect, section: &Section, palette: &Palette) {
    let padded = padded_rect(area, 1);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(true))
        .title(format!(" {} ", section.label));

    let lines = vec![
        format_kv("Status", section.status.label(), palette),
        format_kv("Route", &format!("/{}", section.route), palette),
        Line::from(""),
        Line::from(Span::styled(section.description, Style::default().fg(palette.text))),
        Line::from(""),
        Line::from(Span::styled(
            "This page is not available in the terminal yet.",
            palette.muted(),
        )),
        Line::from(""),
        Line::from(format!("{NAV_HELP_NO_LIST} • ^p pages")).style(palette.muted()),
    ];

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, padded);
}

fn draw_error(frame: &mut Frame, area: Rect, msg: &str, palette: &Palette) {
    let padded = padded_rect(area, 1);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.error))
        .title(" ❌ Error ");

    let mut lines: Vec<Line> = msg
        .lines()
        .map(|line| Line::from(line.to_string()).fg(palette.error))
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(NAV_HELP_NO_LIST).style(palette.muted()));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, padded);
}
