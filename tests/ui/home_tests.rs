//! Home screen UI tests

use super::*;

#[test]
fn test_home_screen_shows_title() {
    let app = create_test_app(true);
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "████"));
    assert!(buffer_contains(&buffer, "Terminal Account Explorer"));
}

#[test]
fn test_home_screen_shows_search_bar() {
    let app = create_test_app(true);
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "Search"));
    assert!(buffer_contains(&buffer, "Txn Hash / Block"));
}

#[test]
fn test_home_screen_shows_endpoint() {
    let app = create_test_app(true);
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "https://api.etherscan.io/api"));
}

#[test]
fn test_home_screen_shows_recent_searches() {
    let app = create_test_app(true);
    let buffer = render_to_buffer(&app, 100, 30);

    assert!(buffer_contains(&buffer, "Recent Searches"));
    assert!(buffer_contains(&buffer, "12345678"));
}

#[test]
fn test_home_screen_highlights_history_selection() {
    let mut app = create_test_app(true);
    app.select_history_next();
    let buffer = render_to_buffer(&app, 100, 30);

    assert!(buffer_contains(&buffer, "Del remove"));
}

#[test]
fn test_home_screen_no_key_shows_setup() {
    let app = create_test_app(false);
    if !app.needs_key_setup() {
        // A key from the environment satisfies setup
        return;
    }
    let buffer = render_to_buffer(&app, 80, 30);

    assert!(buffer_contains(&buffer, "API Key Required"));
    assert!(buffer_contains(&buffer, "Ethereum explorer API key"));
}
