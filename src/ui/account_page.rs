use super::feed_page::{draw_feed_list, feed_help};
use super::helper::*;
use super::theme::Palette;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::AccountResult;
use crate::feeds::{Feed, FeedData, FeedKind};

fn balance_value(feed: &Feed, coin: &str) -> (String, Option<String>) {
    match (&feed.data, feed.loading) {
        (_, true) => (format!("{} loading", spinner_frame()), None),
        (Some(FeedData::Balance(wei)), false) | (Some(FeedData::HistoricalBalance(wei)), false) => {
            (format_native(wei, coin), None)
        }
        _ => ("—".to_string(), feed.last_error.clone()),
    }
}

pub fn draw_account_result(
    frame: &mut Frame,
    area: Rect,
    result: &AccountResult,
    coin: &str,
    palette: &Palette,
) {
    let chunks = Layout::vertical([
        Constraint::Length(5), // Address info
        Constraint::Length(1), // Tabs
        Constraint::Min(5),    // Active tab
        Constraint::Length(1), // Nav help
    ])
    .split(padded_rect(area, 1));

    // Address info
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(false))
        .title(" 👤 Address ");

    let (balance, balance_error) = balance_value(&result.balance, coin);
    let mut lines = vec![
        format_kv("Address", &result.address, palette),
        Line::from(vec![
            Span::styled("Balance: ", palette.muted()),
            Span::styled(
                balance,
                Style::default()
                    .fg(palette.value)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({})", result.balance.params.tag.as_str()),
                palette.muted(),
            ),
        ]),
    ];
    if let Some(err) = balance_error {
        lines.push(Line::from(Span::styled(err, Style::default().fg(palette.error))));
    }
    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    // Tabs
    let titles: Vec<Line> = result
        .tabs
        .iter()
        .map(|feed| Line::from(feed.kind.title()))
        .collect();
    let tabs = Tabs::new(titles)
        .select(result.active_tab)
        .style(palette.muted())
        .highlight_style(palette.selected())
        .divider("│");
    frame.render_widget(tabs, chunks[1]);

    // Active tab
    let active = result.active();
    if active.kind == FeedKind::BalanceHistory {
        draw_balance_history(frame, chunks[2], active, coin, palette);
    } else {
        draw_feed_list(
            frame,
            chunks[2],
            active,
            result.selected_index,
            coin,
            palette,
        );
    }

    let help = format!("Tab/⇧Tab switch • {}", feed_help(active));
    let help = Paragraph::new(help)
        .style(palette.muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[3]);
}

fn draw_balance_history(frame: &mut Frame, area: Rect, feed: &Feed, coin: &str, palette: &Palette) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(true))
        .title(format!(" {} ", feed.kind.title()));

    let (balance, error) = balance_value(feed, coin);
    let mut lines = vec![
        format_kv("Block", &feed.params.block_no.to_string(), palette),
        format_kv("Balance", &balance, palette),
    ];
    if let Some(err) = error {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(err, Style::default().fg(palette.error))));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
