//! Common UI tests - header, theme, overlays, error and section pages

use super::*;
use tscan::app::Screen;
use tscan::menu::SECTIONS;
use tscan::store::ThemeMode;
use tscan::ui::theme::Palette;

use ratatui::style::Color;

// ==================== Header Tests ====================

#[test]
fn test_header_shows_network_and_theme() {
    let app = create_test_app(true);
    let buffer = render_to_buffer(&app, 100, 30);
    let header = buffer_line(&buffer, 0);

    assert!(header.contains("TSCAN"));
    assert!(header.contains("Ethereum"));
    assert!(header.contains("(ETH)"));
    assert!(header.contains("LIGHT"));
    assert!(header.contains("^t theme"));
}

#[test]
fn test_theme_toggle_changes_palette() {
    let mut app = create_test_app(true);
    let light = render_to_buffer(&app, 80, 30);
    assert_eq!(light.cell((79, 29)).unwrap().bg, Color::White);

    app.toggle_theme();
    assert_eq!(app.theme(), ThemeMode::Dark);
    let dark = render_to_buffer(&app, 80, 30);
    assert!(buffer_line(&dark, 0).contains("DARK"));
    assert_eq!(
        dark.cell((79, 29)).unwrap().bg,
        Palette::for_mode(ThemeMode::Dark).bg
    );
}

// ==================== Error and Section Tests ====================

#[test]
fn test_error_screen_shows_message() {
    let mut app = create_test_app(true);
    app.screen = Screen::Error("Invalid hex characters in: 0xzz".to_string());
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Error"));
    assert!(buffer_contains(&buffer, "Invalid hex characters"));
    assert!(buffer_contains(&buffer, "b back"));
}

#[test]
fn test_section_stub_page() {
    let mut app = create_test_app(true);
    app.open_section(&SECTIONS[1]);
    let buffer = render_to_buffer(&app, 100, 30);

    assert!(buffer_contains(&buffer, "Portfolio"));
    assert!(buffer_contains(&buffer, "coming soon"));
    assert!(buffer_contains(&buffer, "/portfolio"));
}

// ==================== Overlay Tests ====================

#[test]
fn test_network_menu_overlay() {
    let mut app = create_test_app(true);
    app.open_network_menu();
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Select Network"));
    assert!(buffer_contains(&buffer, "Binance Smart Chain"));
    assert!(buffer_contains(&buffer, "(BNB)"));
}

#[test]
fn test_section_menu_overlay() {
    let mut app = create_test_app(true);
    app.open_section_menu();
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Pages"));
    assert!(buffer_contains(&buffer, "BlockScan"));
    assert!(buffer_contains(&buffer, "unavailable"));
}

// ==================== Layout Tests ====================

fn all_screens() -> Vec<App> {
    let mut apps = vec![create_test_app(true), create_test_app(false)];

    let mut app = create_test_app(true);
    let requests = app.open_account(ADDR);
    respond(
        &mut app,
        &requests,
        FeedKind::Transactions,
        FeedData::Transactions(mock_transactions()),
    );
    apps.push(app);

    let mut app = create_test_app(true);
    app.open_transaction(TX_HASH);
    apps.push(app);

    let mut app = create_test_app(true);
    app.open_block(1);
    app.open_network_menu();
    apps.push(app);

    let mut app = create_test_app(true);
    app.open_section(&SECTIONS[0]);
    apps.push(app);

    let mut app = create_test_app(true);
    app.screen = Screen::Error("Error".to_string());
    apps.push(app);

    apps
}

#[test]
fn test_small_terminal_renders_without_panic() {
    for app in all_screens() {
        let _ = render_to_buffer(&app, 40, 10);
    }
}

#[test]
fn test_large_terminal_renders_without_panic() {
    for app in all_screens() {
        let _ = render_to_buffer(&app, 200, 100);
    }
}
