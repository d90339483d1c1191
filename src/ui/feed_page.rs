use super::helper::*;
use super::rows::{header_item, row_item};
use super::theme::Palette;

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::app::{ListResult, Screen};
use crate::feeds::{
    Feed, FeedKind, FilterField, DEFAULT_END_BLOCK, DEFAULT_OFFSET, DEFAULT_START_BLOCK,
};

use super::NAV_HELP;

/// Help line for a feed, listing only the keys it honors
pub fn feed_help(feed: &Feed) -> String {
    let mut parts = vec![NAV_HELP.to_string()];
    if feed.kind.is_paged() {
        parts.push("n/p page".to_string());
    }
    if feed.kind.is_sorted() {
        parts.push("s sort".to_string());
    }
    if feed.kind == FeedKind::MinedBlocks {
        parts.push("u blocks/uncles".to_string());
    }
    if matches!(feed.kind, FeedKind::Balance | FeedKind::BalanceMulti) {
        parts.push("g tag".to_string());
    }
    for (field, hint) in [
        (FilterField::Contract, "c contract"),
        (FilterField::BlockRange, "f range"),
        (FilterField::PageSize, "o size"),
        (FilterField::HistoryBlock, "a at block"),
    ] {
        if field.applies_to(feed.kind) {
            parts.push(hint.to_string());
        }
    }
    parts.join(" • ")
}

/// Paging and filter summary shown in the list title
pub fn feed_state(feed: &Feed) -> String {
    let params = &feed.params;
    let mut parts = Vec::new();
    if feed.kind.is_paged() {
        parts.push(format!("page {}", params.page));
    }
    if feed.kind.is_sorted() {
        parts.push(params.sort.as_str().to_string());
    }
    if feed.kind == FeedKind::MinedBlocks {
        parts.push(params.block_type.as_str().to_string());
    }
    if feed.kind.is_paged() && params.offset != DEFAULT_OFFSET {
        parts.push(format!("{} per page", params.offset));
    }
    if feed.kind.has_block_range()
        && (params.start_block, params.end_block) != (DEFAULT_START_BLOCK, DEFAULT_END_BLOCK)
    {
        parts.push(format!("blocks {}-{}", params.start_block, params.end_block));
    }
    if let Some(contract) = params.contract_address.as_deref() {
        if feed.kind.has_contract_filter() {
            parts.push(format!("token {}", truncate_hash(contract)));
        }
    }
    parts.join(" • ")
}

/// Bordered listing for a feed: spinner while loading, the error when the
/// request failed with nothing to show, otherwise a table.
pub fn draw_feed_list(
    frame: &mut Frame,
    area: Rect,
    feed: &Feed,
    selected_index: usize,
    coin: &str,
    palette: &Palette,
) {
    let count = feed.data.as_ref().map_or(0, |d| d.len());
    let state = feed_state(feed);
    let title = if state.is_empty() {
        format!(" {} ({count}) ", feed.kind.title())
    } else {
        format!(" {} ({count}) [{state}] ", feed.kind.title())
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(true))
        .title(title);

    let message = match (&feed.data, feed.loading, &feed.last_error) {
        (_, true, _) => Some((format!("{} Loading...", spinner_frame()), palette.warning)),
        (None, false, Some(err)) => Some((err.clone(), palette.error)),
        (None, false, None) => Some(("Nothing loaded yet. Press r to fetch.".to_string(), palette.muted)),
        (Some(data), false, _) if data.is_empty() => {
            Some(("No records found".to_string(), palette.muted))
        }
        _ => None,
    };

    if let Some((text, color)) = message {
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(color))
            .wrap(ratatui::widgets::Wrap { trim: false });
        frame.render_widget(paragraph, area);
        return;
    }

    let Some(data) = &feed.data else {
        return;
    };

    // Account for header row and borders
    let visible_count = (area.height.saturating_sub(3)) as usize;
    let start = selected_index.saturating_sub(visible_count / 2);

    let mut items: Vec<ListItem> = header_item(data, palette).into_iter().collect();
    items.extend(
        (start..data.len())
            .take(visible_count)
            .filter_map(|i| row_item(data, i, coin, i == selected_index, palette)),
    );

    let list = List::new(items).block(block);
    frame.render_widget(list, area);
}

pub fn draw_list_result(frame: &mut Frame, area: Rect, screen: &Screen, coin: &str, palette: &Palette) {
    let (icon, title, result, lines): (&str, String, &ListResult, Vec<Line>) = match screen {
        Screen::MultiBalance(result) => (
            "👥",
            "Balances".to_string(),
            result,
            vec![
                format_kv(
                    "Addresses",
                    &result.feed.params.addresses.len().to_string(),
                    palette,
                ),
                format_kv("Tag", result.feed.params.tag.as_str(), palette),
            ],
        ),
        Screen::Transaction(result) => {
            let hash = result.feed.params.tx_hash.clone().unwrap_or_default();
            (
                "⇄",
                "Transaction".to_string(),
                result,
                vec![
                    format_kv("Hash", &hash, palette),
                    format_kv("Showing", "internal transactions", palette),
                ],
            )
        }
        Screen::Block(result) => (
            "📦",
            format!("Block #{}", result.feed.params.start_block),
            result,
            vec![
                format_kv("Block", &result.feed.params.start_block.to_string(), palette),
                format_kv("Showing", "internal transactions", palette),
            ],
        ),
        _ => return,
    };

    let chunks = Layout::vertical([
        Constraint::Length(4), // Info
        Constraint::Min(5),    // List
        Constraint::Length(1), // Nav help
    ])
    .split(padded_rect(area, 1));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(false))
        .title(format!(" {icon} {title} "));
    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    draw_feed_list(
        frame,
        chunks[1],
        &result.feed,
        result.selected_index,
        coin,
        palette,
    );

    let help = Paragraph::new(feed_help(&result.feed))
        .style(palette.muted())
        .alignment(Alignment::Center);
    frame.render_widget(help, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feeds::FeedParams;

    #[test]
    fn test_feed_help_lists_honored_keys() {
        let txs = Feed::new(FeedKind::Transactions, FeedParams::for_address("0x1"));
        let help = feed_help(&txs);
        assert!(help.contains("n/p page"));
        assert!(help.contains("s sort"));
        assert!(!help.contains("g tag"));

        let mined = Feed::new(FeedKind::MinedBlocks, FeedParams::for_address("0x1"));
        let help = feed_help(&mined);
        assert!(help.contains("u blocks/uncles"));
        assert!(!help.contains("s sort"));
    }

    #[test]
    fn test_feed_state() {
        let mut feed = Feed::new(FeedKind::MinedBlocks, FeedParams::for_address("0x1"));
        feed.next_page();
        assert_eq!(feed_state(&feed), "page 2 • blocks");

        let by_hash = Feed::new(FeedKind::InternalByHash, FeedParams::for_tx_hash("0x1"));
        assert_eq!(feed_state(&by_hash), "");
    }

    #[test]
    fn test_feed_state_shows_filters() {
        let mut params = FeedParams::for_address("0x1");
        params.start_block = 100;
        params.end_block = 200;
        params.offset = 50;
        params.contract_address =
            Some("0x9f8f72aa9304c8b593d555f12ef6589cc3a579a2".to_string());

        let tokens = Feed::new(FeedKind::Erc20Transfers, params.clone());
        assert_eq!(
            feed_state(&tokens),
            "page 1 • asc • 50 per page • blocks 100-200 • token 0x9f8f72aa...a579a2"
        );

        // Contract filter is not shown where it does not apply
        let txs = Feed::new(FeedKind::Transactions, params);
        assert!(!feed_state(&txs).contains("token"));
    }

    #[test]
    fn test_feed_help_lists_filter_keys() {
        let tokens = Feed::new(FeedKind::Erc721Transfers, FeedParams::for_address("0x1"));
        let help = feed_help(&tokens);
        assert!(help.contains("c contract"));
        assert!(help.contains("f range"));
        assert!(help.contains("o size"));

        let history = Feed::new(FeedKind::BalanceHistory, FeedParams::for_address("0x1"));
        let help = feed_help(&history);
        assert!(help.contains("a at block"));
        assert!(!help.contains("o size"));
    }
}
