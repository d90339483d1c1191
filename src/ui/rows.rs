//! Table rendering for feed listings. Every row variant shares one layout:
//! a right-aligned index followed by fixed-width cells.

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::ListItem,
};

use super::helper::*;
use super::theme::Palette;
use crate::api::{is_error_flag, parse_u256, InternalTx};
use crate::feeds::FeedData;

#[derive(Debug, Clone, Copy)]
struct Column {
    title: &'static str,
    width: usize,
    right: bool,
}

const fn col(title: &'static str, width: usize) -> Column {
    Column {
        title,
        width,
        right: false,
    }
}

const fn num(title: &'static str, width: usize) -> Column {
    Column {
        title,
        width,
        right: true,
    }
}

const ADDR_WIDTH: usize = 19;
const AGE_WIDTH: usize = 14;

const BALANCE_COLUMNS: &[Column] = &[col("Account", 42), num("Balance", 26)];
const TX_COLUMNS: &[Column] = &[
    col("", 1),
    col("Txn Hash", ADDR_WIDTH),
    col("Method", 10),
    col("Age", AGE_WIDTH),
    col("From", ADDR_WIDTH),
    col("To", ADDR_WIDTH),
    num("Value", 22),
];
const INTERNAL_COLUMNS: &[Column] = &[
    col("", 1),
    num("Block", 9),
    col("Age", AGE_WIDTH),
    col("From", ADDR_WIDTH),
    col("To", ADDR_WIDTH),
    col("Type", 8),
    num("Value", 22),
];
const ERC20_COLUMNS: &[Column] = &[
    col("Txn Hash", ADDR_WIDTH),
    col("Age", AGE_WIDTH),
    col("From", ADDR_WIDTH),
    col("To", ADDR_WIDTH),
    num("Value", 18),
    col("Token", 10),
];
const ERC721_COLUMNS: &[Column] = &[
    col("Txn Hash", ADDR_WIDTH),
    col("Age", AGE_WIDTH),
    col("From", ADDR_WIDTH),
    col("To", ADDR_WIDTH),
    num("Token ID", 12),
    col("Token", 10),
];
const ERC1155_COLUMNS: &[Column] = &[
    col("Txn Hash", ADDR_WIDTH),
    col("Age", AGE_WIDTH),
    col("From", ADDR_WIDTH),
    col("To", ADDR_WIDTH),
    num("Token ID", 12),
    num("Amount", 8),
    col("Token", 10),
];
const MINED_COLUMNS: &[Column] = &[
    num("Block", 10),
    col("Age", AGE_WIDTH),
    num("Reward", 22),
];
const WITHDRAWAL_COLUMNS: &[Column] = &[
    num("Index", 10),
    num("Validator", 10),
    num("Block", 10),
    col("Age", AGE_WIDTH),
    num("Amount", 22),
];

fn columns(data: &FeedData) -> &'static [Column] {
    match data {
        FeedData::Balance(_) | FeedData::HistoricalBalance(_) => &[],
        FeedData::Balances(_) => BALANCE_COLUMNS,
        FeedData::Transactions(_) => TX_COLUMNS,
        FeedData::Internal(_) => INTERNAL_COLUMNS,
        FeedData::Erc20(_) => ERC20_COLUMNS,
        FeedData::Erc721(_) => ERC721_COLUMNS,
        FeedData::Erc1155(_) => ERC1155_COLUMNS,
        FeedData::MinedBlocks(_) => MINED_COLUMNS,
        FeedData::Withdrawals(_) => WITHDRAWAL_COLUMNS,
    }
}

fn status_mark(is_error: &str) -> String {
    let mark = if is_error_flag(is_error) { "✗" } else { "✓" };
    mark.to_string()
}

fn internal_target(tx: &InternalTx) -> String {
    if tx.to.is_empty() && !tx.contract_address.is_empty() {
        truncate_hash(&tx.contract_address)
    } else {
        truncate_hash(&tx.to)
    }
}

fn token_decimals(decimals: &str) -> u8 {
    decimals.trim().parse().unwrap_or(0)
}

fn cells(data: &FeedData, index: usize, coin: &str) -> Option<Vec<String>> {
    let row = match data {
        FeedData::Balance(_) | FeedData::HistoricalBalance(_) => return None,
        FeedData::Balances(v) => {
            let b = v.get(index)?;
            vec![b.account.clone(), format_native(&b.balance, coin)]
        }
        FeedData::Transactions(v) => {
            let tx = v.get(index)?;
            let to = if tx.to.is_empty() {
                "[Contract Create]".to_string()
            } else {
                truncate_hash(&tx.to)
            };
            vec![
                status_mark(&tx.is_error),
                truncate_hash(&tx.hash),
                truncate_text(tx.method().unwrap_or("transfer"), 10),
                format_age(&tx.time_stamp),
                truncate_hash(&tx.from),
                to,
                format_native(&tx.value, coin),
            ]
        }
        FeedData::Internal(v) => {
            let tx = v.get(index)?;
            vec![
                status_mark(&tx.is_error),
                tx.block_number.clone(),
                format_age(&tx.time_stamp),
                truncate_hash(&tx.from),
                internal_target(tx),
                truncate_text(&tx.kind, 8),
                format_native(&tx.value, coin),
            ]
        }
        FeedData::Erc20(v) => {
            let t = v.get(index)?;
            vec![
                truncate_hash(&t.hash),
                format_age(&t.time_stamp),
                truncate_hash(&t.from),
                truncate_hash(&t.to),
                format_token_amount(parse_u256(&t.value), token_decimals(&t.token_decimal)),
                truncate_text(&t.token_symbol, 10),
            ]
        }
        FeedData::Erc721(v) => {
            let t = v.get(index)?;
            vec![
                truncate_hash(&t.hash),
                format_age(&t.time_stamp),
                truncate_hash(&t.from),
                truncate_hash(&t.to),
                truncate_text(&t.token_id, 12),
                truncate_text(&t.token_symbol, 10),
            ]
        }
        FeedData::Erc1155(v) => {
            let t = v.get(index)?;
            vec![
                truncate_hash(&t.hash),
                format_age(&t.time_stamp),
                truncate_hash(&t.from),
                truncate_hash(&t.to),
                truncate_text(&t.token_id, 12),
                t.token_value.clone(),
                truncate_text(&t.token_symbol, 10),
            ]
        }
        FeedData::MinedBlocks(v) => {
            let b = v.get(index)?;
            vec![
                b.block_number.clone(),
                format_age(&b.time_stamp),
                format_native(&b.block_reward, coin),
            ]
        }
        FeedData::Withdrawals(v) => {
            let w = v.get(index)?;
            vec![
                w.withdrawal_index.clone(),
                w.validator_index.clone(),
                w.block_number.clone(),
                format_age(&w.timestamp),
                format_gwei_native(&w.amount, coin),
            ]
        }
    };
    Some(row)
}

fn layout_cells<'a>(
    columns: &[Column],
    values: impl Iterator<Item = String>,
    style: impl Fn(usize) -> Style,
    palette: &Palette,
) -> Vec<Span<'a>> {
    let mut spans = Vec::new();
    for (i, (column, value)) in columns.iter().zip(values).enumerate() {
        if i > 0 {
            spans.push(Span::styled(" │ ", palette.muted()));
        }
        let width = column.width;
        let text = if column.right {
            format!("{value:>width$}")
        } else {
            format!("{value:<width$}")
        };
        spans.push(Span::styled(text, style(i)));
    }
    spans
}

pub fn header_item<'a>(data: &FeedData, palette: &Palette) -> Option<ListItem<'a>> {
    let columns = columns(data);
    if columns.is_empty() {
        return None;
    }

    let mut spans = vec![Span::raw("    ")];
    spans.extend(layout_cells(
        columns,
        columns.iter().map(|c| c.title.to_string()),
        |_| palette.muted(),
        palette,
    ));
    Some(ListItem::new(Line::from(spans)))
}

pub fn row_item<'a>(
    data: &FeedData,
    index: usize,
    coin: &str,
    selected: bool,
    palette: &Palette,
) -> Option<ListItem<'a>> {
    let columns = columns(data);
    let values = cells(data, index, coin)?;
    let failed = values.first().is_some_and(|v| v == "✗");

    let mut spans = vec![Span::styled(format!("{index:>3} "), palette.muted())];
    spans.extend(layout_cells(
        columns,
        values.into_iter(),
        |i| {
            let column = &columns[i];
            if column.title.is_empty() {
                Style::default().fg(if failed { palette.error } else { palette.success })
            } else if matches!(column.title, "Value" | "Balance" | "Reward" | "Amount") {
                Style::default().fg(palette.value)
            } else if matches!(column.title, "Txn Hash" | "Account" | "Block") {
                Style::default().fg(palette.link)
            } else {
                Style::default().fg(palette.text)
            }
        },
        palette,
    ));

    let style = if selected {
        palette.selected()
    } else {
        Style::default()
    };
    Some(ListItem::new(Line::from(spans)).style(style))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AccountBalance, NormalTx};
    use crate::ui::theme::DARK;

    fn text(item_cells: Option<Vec<String>>) -> String {
        item_cells.unwrap_or_default().join("|")
    }

    #[test]
    fn test_balance_cells() {
        let data = FeedData::Balances(vec![AccountBalance {
            account: "0xabc".to_string(),
            balance: "2000000000000000000".to_string(),
        }]);
        assert_eq!(text(cells(&data, 0, "BNB")), "0xabc|2.000000 BNB");
        assert!(cells(&data, 1, "BNB").is_none());
    }

    #[test]
    fn test_tx_cells_contract_creation_and_failure() {
        let data = FeedData::Transactions(vec![NormalTx {
            hash: "0x1".to_string(),
            is_error: "1".to_string(),
            function_name: "approve(address spender, uint256 value)".to_string(),
            ..NormalTx::default()
        }]);
        let row = cells(&data, 0, "ETH").unwrap();
        assert_eq!(row[0], "✗");
        assert_eq!(row[2], "approve");
        assert_eq!(row[5], "[Contract Create]");
    }

    #[test]
    fn test_internal_creation_shows_contract() {
        let data = FeedData::Internal(vec![InternalTx {
            contract_address: "0x2c1ba59d6f58433fb1eaee7d20b26ed83bda51a3".to_string(),
            kind: "create".to_string(),
            ..InternalTx::default()
        }]);
        let row = cells(&data, 0, "ETH").unwrap();
        assert!(row[4].starts_with("0x2c1ba59d"));
        assert_eq!(row[5], "create");
    }

    #[test]
    fn test_scalar_data_has_no_table() {
        let data = FeedData::Balance("1".to_string());
        assert!(header_item(&data, &DARK).is_none());
        assert!(row_item(&data, 0, "ETH", false, &DARK).is_none());
    }

    #[test]
    fn test_every_listing_has_matching_widths() {
        let listings = [
            FeedData::Balances(vec![AccountBalance::default()]),
            FeedData::Transactions(vec![NormalTx::default()]),
            FeedData::Internal(vec![InternalTx::default()]),
            FeedData::Erc20(vec![Default::default()]),
            FeedData::Erc721(vec![Default::default()]),
            FeedData::Erc1155(vec![Default::default()]),
            FeedData::MinedBlocks(vec![Default::default()]),
            FeedData::Withdrawals(vec![Default::default()]),
        ];
        for data in &listings {
            assert_eq!(cells(data, 0, "ETH").unwrap().len(), columns(data).len());
        }
    }
}
