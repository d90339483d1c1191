use alloy::primitives::U256;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
};

use super::theme::Palette;
use crate::api::{parse_u256, parse_u64};

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Digits shown after the decimal point for coin amounts
const AMOUNT_PRECISION: usize = 6;

// ============================================================================
// Helper Functions
// ============================================================================

pub fn truncate_hash(hash: &str) -> String {
    if hash.len() > 20 {
        format!("{}...{}", &hash[..10], &hash[hash.len() - 6..])
    } else {
        hash.to_string()
    }
}

/// Truncate free text to `max` chars with an ellipsis
pub fn truncate_text(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let kept: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{kept}…")
    } else {
        text.to_string()
    }
}

pub fn format_kv(key: &str, value: &str, palette: &Palette) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key}: "), palette.muted()),
        Span::styled(value.to_string(), Style::default().fg(palette.text)),
    ])
}

pub fn spinner_frame() -> &'static str {
    let millis = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0);
    SPINNER_FRAMES[(millis / 100) as usize % SPINNER_FRAMES.len()]
}

pub fn format_timestamp(ts: u64) -> String {
    use std::time::{Duration, UNIX_EPOCH};
    let Some(datetime) = UNIX_EPOCH.checked_add(Duration::from_secs(ts)) else {
        return "—".to_string();
    };
    let secs_ago = std::time::SystemTime::now()
        .duration_since(datetime)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    if secs_ago < 60 {
        format!("{secs_ago} secs ago")
    } else if secs_ago < 3600 {
        format!("{} mins ago", secs_ago / 60)
    } else if secs_ago < 86400 {
        format!("{} hours ago", secs_ago / 3600)
    } else {
        format!("{} days ago", secs_ago / 86400)
    }
}

/// Age of a decimal unix timestamp field
pub fn format_age(ts: &str) -> String {
    parse_u64(ts)
        .map(format_timestamp)
        .unwrap_or_else(|| "—".to_string())
}

/// Fixed-precision amount with a unit, e.g. `1.500000 ETH`
pub fn format_amount(amount: U256, decimals: usize, unit: &str) -> String {
    let digits = amount.to_string();
    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (whole, frac) = padded.split_at(padded.len() - decimals);
    let mut frac = frac.chars().take(AMOUNT_PRECISION).collect::<String>();
    while frac.len() < AMOUNT_PRECISION {
        frac.push('0');
    }
    format!("{whole}.{frac} {unit}")
}

/// Wei amount field rendered in the native coin
pub fn format_native(wei: &str, coin: &str) -> String {
    format_amount(parse_u256(wei), 18, coin)
}

/// Gwei amount field rendered in the native coin
pub fn format_gwei_native(gwei: &str, coin: &str) -> String {
    format_amount(parse_u256(gwei), 9, coin)
}

pub fn format_token_amount(amount: U256, decimals: u8) -> String {
    let amount_str = amount.to_string();
    let dec = decimals as usize;

    if dec == 0 {
        return amount_str;
    }

    let padded = format!("{:0>width$}", amount_str, width = dec + 1);
    let (whole, frac) = padded.split_at(padded.len() - dec);
    if frac.trim_end_matches('0').is_empty() {
        whole.to_string()
    } else {
        format!("{}.{}", whole, &frac[..4.min(frac.len())])
    }
}

pub fn centered_rect(percent_x: u16, area: Rect) -> Rect {
    let popup_layout = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(area);

    popup_layout[1]
}

/// Fixed-size rect centered both ways
pub fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .split(area);

    let horizontal = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .split(vertical[1]);

    horizontal[1]
}

pub fn padded_rect(area: Rect, padding: u16) -> Rect {
    Rect {
        x: area.x + padding,
        y: area.y + padding,
        width: area.width.saturating_sub(padding * 2),
        height: area.height.saturating_sub(padding * 2),
    }
}
