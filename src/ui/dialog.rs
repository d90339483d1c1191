use super::helper::*;
use super::theme::Palette;

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph},
    Frame,
};
use tui_input::Input;

use crate::app::Overlay;
use crate::feeds::FilterField;
use crate::menu::{SectionStatus, SECTIONS};
use crate::network::{Network, NETWORKS};

/// Draw a modal menu on top of the current screen
pub fn draw_overlay(
    frame: &mut Frame,
    area: Rect,
    overlay: &Overlay,
    current: Network,
    palette: &Palette,
) {
    let (title, items, width): (&str, Vec<ListItem>, u16) = match overlay {
        Overlay::NetworkMenu { selected } => (
            " Select Network ",
            NETWORKS
                .iter()
                .enumerate()
                .map(|(i, network)| {
                    let marker = if *network == current { "●" } else { " " };
                    let line = Line::from(vec![
                        Span::raw(format!(" {marker} ")),
                        Span::raw(network.label()),
                        Span::styled(format!(" ({})", network.coin()), palette.muted()),
                    ]);
                    menu_item(line, i == *selected, palette)
                })
                .collect(),
            40,
        ),
        Overlay::SectionMenu { selected } => (
            " Pages ",
            SECTIONS
                .iter()
                .enumerate()
                .map(|(i, section)| {
                    let status_color = match section.status {
                        SectionStatus::Available => palette.success,
                        SectionStatus::Unavailable => palette.error,
                        SectionStatus::Pending | SectionStatus::ComingSoon => palette.muted,
                    };
                    let line = Line::from(vec![
                        Span::raw(format!(" {:<14}", section.label)),
                        Span::styled(section.status.label(), Style::default().fg(status_color)),
                    ]);
                    menu_item(line, i == *selected, palette)
                })
                .collect(),
            36,
        ),
        Overlay::Filter { .. } => return,
    };

    let height = items.len() as u16 + 2;
    let popup = centered_rect_fixed(width, height, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(true))
        .style(palette.base())
        .title(title)
        .title_bottom(Line::from(" Enter select • Esc close ").centered());

    frame.render_widget(Clear, popup);
    frame.render_widget(List::new(items).block(block), popup);
}

fn menu_item<'a>(line: Line<'a>, selected: bool, palette: &Palette) -> ListItem<'a> {
    let style = if selected {
        palette.selected()
    } else {
        Style::default().fg(palette.text)
    };
    ListItem::new(line).style(style)
}

/// Single-line input for a feed filter
pub fn draw_filter_prompt(
    frame: &mut Frame,
    area: Rect,
    field: FilterField,
    input: &Input,
    palette: &Palette,
) {
    let popup = centered_rect_fixed(area.width.min(56), 3, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(true))
        .style(palette.base())
        .title(format!(" {} ", field.label()))
        .title_bottom(Line::from(" Enter apply • Esc cancel ").centered());

    let inner_width = popup.width.saturating_sub(2) as usize;
    let scroll = input.visual_scroll(inner_width);

    let text = if input.value().is_empty() {
        Span::styled(field.placeholder(), palette.muted())
    } else {
        Span::styled(input.value(), Style::default().fg(palette.text))
    };

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(text).block(block).scroll((0, scroll as u16)),
        popup,
    );

    let cursor_x = popup.x + 1 + input.visual_cursor().saturating_sub(scroll) as u16;
    if cursor_x < (popup.x + popup.width).saturating_sub(1) {
        frame.set_cursor_position((cursor_x, popup.y + 1));
    }
}
