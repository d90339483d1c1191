//! Single-feed screens: address lists, transactions and blocks

use super::*;
use tscan::network::Network;
use tscan::store::StoreAction;

#[test]
fn test_multi_balance_screen() {
    let mut app = create_test_app(true);
    let requests = app.open_multi_balance(vec![ADDR.to_string(), ADDR_B.to_string()]);
    respond(
        &mut app,
        &requests,
        FeedKind::BalanceMulti,
        FeedData::Balances(mock_balances()),
    );
    let buffer = render_to_buffer(&app, 120, 30);

    assert!(buffer_contains(&buffer, "Addresses: 2"));
    assert!(buffer_contains(&buffer, "Tag: latest"));
    assert!(buffer_contains(&buffer, ADDR));
    assert!(buffer_contains(&buffer, "40891.626854 ETH"));
    assert!(buffer_contains(&buffer, "g tag"));
}

#[test]
fn test_transaction_screen_shows_internal_calls() {
    let mut app = create_test_app(true);
    let requests = app.open_transaction(TX_HASH);
    respond(
        &mut app,
        &requests,
        FeedKind::InternalByHash,
        FeedData::Internal(mock_internal()),
    );
    let buffer = render_to_buffer(&app, 160, 30);

    assert!(buffer_contains(&buffer, TX_HASH));
    assert!(buffer_contains(&buffer, "internal transactions"));
    assert!(buffer_contains(&buffer, "call"));
    assert!(buffer_contains(&buffer, "5.000000 ETH"));
    // Listings by hash are not paged
    assert!(!buffer_contains(&buffer, "n/p page"));
}

#[test]
fn test_block_screen_title() {
    let mut app = create_test_app(true);
    let requests = app.open_block(17_000_000);
    respond(
        &mut app,
        &requests,
        FeedKind::InternalByBlock,
        FeedData::Internal(vec![]),
    );
    let buffer = render_to_buffer(&app, 120, 30);

    assert!(buffer_contains(&buffer, "Block #17000000"));
    assert!(buffer_contains(&buffer, "No records found"));
    assert!(buffer_contains(&buffer, "n/p page"));
}

#[test]
fn test_amounts_follow_network_coin() {
    let mut app = create_test_app(true);
    app.dispatch(StoreAction::SetNetwork(Network::Bsc));
    let requests = app.open_multi_balance(vec![ADDR.to_string(), ADDR_B.to_string()]);
    respond(
        &mut app,
        &requests,
        FeedKind::BalanceMulti,
        FeedData::Balances(mock_balances()),
    );
    let buffer = render_to_buffer(&app, 120, 30);

    assert!(buffer_contains(&buffer, "40891.626854 BNB"));
    assert!(buffer_contains(&buffer, "Binance Smart Chain"));
}

#[test]
fn test_selected_row_is_highlighted() {
    let mut app = create_test_app(true);
    let requests = app.open_multi_balance(vec![ADDR.to_string(), ADDR_B.to_string()]);
    respond(
        &mut app,
        &requests,
        FeedKind::BalanceMulti,
        FeedData::Balances(mock_balances()),
    );
    app.select_next();
    let buffer = render_to_buffer(&app, 120, 30);

    let row = (0..buffer.area.height)
        .find(|y| buffer_line(&buffer, *y).contains(ADDR_B))
        .expect("second row rendered");
    let line = buffer_line(&buffer, row);
    let x = line.split("0x742d").next().unwrap().chars().count() as u16;
    let palette = tscan::ui::theme::Palette::for_mode(app.theme());
    assert_eq!(buffer.cell((x, row)).unwrap().bg, palette.selected_bg);
}
