//! Account screen UI tests

use super::*;
use tscan::api::Erc20Transfer;

fn open_account(app: &mut App) -> Vec<FeedRequest> {
    let requests = app.open_account(ADDR);
    respond(
        app,
        &requests,
        FeedKind::Balance,
        FeedData::Balance("40891626854930000000000".to_string()),
    );
    requests
}

#[test]
fn test_account_shows_address_and_balance() {
    let mut app = create_test_app(true);
    open_account(&mut app);
    let buffer = render_to_buffer(&app, 160, 40);

    assert!(buffer_contains(&buffer, ADDR));
    assert!(buffer_contains(&buffer, "40891.626854 ETH"));
    assert!(buffer_contains(&buffer, "(latest)"));
}

#[test]
fn test_account_shows_tabs() {
    let mut app = create_test_app(true);
    open_account(&mut app);
    let buffer = render_to_buffer(&app, 160, 40);

    for title in ["Transactions", "Internal", "ERC-20", "Mined Blocks", "Balance History"] {
        assert!(buffer_contains(&buffer, title), "missing tab {title}");
    }
}

#[test]
fn test_account_loading_transactions() {
    let mut app = create_test_app(true);
    open_account(&mut app);
    let buffer = render_to_buffer(&app, 160, 40);

    assert!(buffer_contains(&buffer, "Loading..."));
}

#[test]
fn test_account_transaction_rows() {
    let mut app = create_test_app(true);
    let requests = open_account(&mut app);
    respond(
        &mut app,
        &requests,
        FeedKind::Transactions,
        FeedData::Transactions(mock_transactions()),
    );
    let buffer = render_to_buffer(&app, 160, 40);

    assert!(buffer_contains(&buffer, "Txn Hash"));
    assert!(buffer_contains(&buffer, "0xc52783ad...882c60"));
    assert!(buffer_contains(&buffer, "transfer"));
    assert!(buffer_contains(&buffer, "1.500000 ETH"));
    assert!(buffer_contains(&buffer, "[Contract Create]"));
    assert!(buffer_contains(&buffer, "page 1 • asc"));
}

#[test]
fn test_account_empty_listing() {
    let mut app = create_test_app(true);
    let requests = open_account(&mut app);
    respond(
        &mut app,
        &requests,
        FeedKind::Transactions,
        FeedData::Transactions(vec![]),
    );
    let buffer = render_to_buffer(&app, 160, 40);

    assert!(buffer_contains(&buffer, "No records found"));
}

#[test]
fn test_account_feed_error_shows_status() {
    let mut app = create_test_app(true);
    let requests = app.open_account(ADDR);
    let tx_request = requests
        .iter()
        .find(|r| r.kind == FeedKind::Transactions)
        .unwrap();
    app.apply_feed_result(
        FeedKind::Transactions,
        tx_request.generation,
        Err("NOTOK: Invalid API Key".to_string()),
    );
    let buffer = render_to_buffer(&app, 160, 40);

    assert!(buffer_contains(&buffer, "Invalid API Key"));
}

#[test]
fn test_account_erc20_tab() {
    let mut app = create_test_app(true);
    open_account(&mut app);
    app.next_tab();
    let request = app.next_tab().unwrap();
    app.apply_feed_result(
        FeedKind::Erc20Transfers,
        request.generation,
        Ok(FeedData::Erc20(mock_erc20())),
    );
    let buffer = render_to_buffer(&app, 160, 40);

    assert!(buffer_contains(&buffer, "USDC"));
    assert!(buffer_contains(&buffer, "2.5"));
}

#[test]
fn test_account_erc20_token_without_decimals() {
    let mut app = create_test_app(true);
    open_account(&mut app);
    app.next_tab();
    let request = app.next_tab().unwrap();
    let transfer = Erc20Transfer {
        value: "42".to_string(),
        token_symbol: "RAW".to_string(),
        ..Erc20Transfer::default()
    };
    app.apply_feed_result(
        FeedKind::Erc20Transfers,
        request.generation,
        Ok(FeedData::Erc20(vec![transfer])),
    );
    let buffer = render_to_buffer(&app, 160, 40);

    assert!(buffer_contains(&buffer, "RAW"));
    assert!(buffer_contains(&buffer, "42"));
}

#[test]
fn test_account_mined_blocks_tab() {
    let mut app = create_test_app(true);
    open_account(&mut app);
    let mut request = None;
    for _ in 0..5 {
        request = app.next_tab();
    }
    let request = request.unwrap();
    assert_eq!(request.kind, FeedKind::MinedBlocks);
    app.apply_feed_result(
        FeedKind::MinedBlocks,
        request.generation,
        Ok(FeedData::MinedBlocks(mock_mined_blocks())),
    );
    let buffer = render_to_buffer(&app, 160, 40);

    assert!(buffer_contains(&buffer, "3462296"));
    assert!(buffer_contains(&buffer, "5.194770 ETH"));
    assert!(buffer_contains(&buffer, "page 1 • blocks"));
    assert!(buffer_contains(&buffer, "u blocks/uncles"));
}

#[test]
fn test_account_withdrawals_in_gwei() {
    let mut app = create_test_app(true);
    open_account(&mut app);
    let request = (0..6).filter_map(|_| app.next_tab()).last().unwrap();
    assert_eq!(request.kind, FeedKind::BeaconWithdrawals);
    app.apply_feed_result(
        FeedKind::BeaconWithdrawals,
        request.generation,
        Ok(FeedData::Withdrawals(mock_withdrawals())),
    );
    let buffer = render_to_buffer(&app, 160, 40);

    assert!(buffer_contains(&buffer, "117823"));
    assert!(buffer_contains(&buffer, "0.003402 ETH"));
}

#[test]
fn test_account_balance_history_tab() {
    let mut app = create_test_app(true);
    open_account(&mut app);
    let request = app.prev_tab().unwrap();
    assert_eq!(request.kind, FeedKind::BalanceHistory);
    app.apply_feed_result(
        FeedKind::BalanceHistory,
        request.generation,
        Ok(FeedData::HistoricalBalance("2000000000000000000".to_string())),
    );
    let buffer = render_to_buffer(&app, 160, 40);

    assert!(buffer_contains(&buffer, "Block: 99999999"));
    assert!(buffer_contains(&buffer, "2.000000 ETH"));
}

#[test]
fn test_filter_prompt_renders_over_account() {
    let mut app = create_test_app(true);
    open_account(&mut app);
    app.open_filter(FilterField::BlockRange);
    let buffer = render_to_buffer(&app, 160, 40);

    assert!(buffer_contains(&buffer, "Block Range"));
    assert!(buffer_contains(&buffer, "0-99999999"));
    assert!(buffer_contains(&buffer, "Enter apply"));
}

#[test]
fn test_balance_history_shows_chosen_block() {
    let mut app = create_test_app(true);
    open_account(&mut app);
    while app.active_feed().map(|f| f.kind) != Some(FeedKind::BalanceHistory) {
        app.next_tab();
    }
    app.open_filter(FilterField::HistoryBlock);
    app.filter_input = tui_input::Input::new("8000000".to_string());
    let request = app.submit_filter().unwrap();
    respond(
        &mut app,
        &[request],
        FeedKind::BalanceHistory,
        FeedData::HistoricalBalance("1500000000000000000".to_string()),
    );
    let buffer = render_to_buffer(&app, 160, 40);

    assert!(buffer_contains(&buffer, "Block: 8000000"));
    assert!(buffer_contains(&buffer, "1.500000 ETH"));
    assert!(buffer_contains(&buffer, "a at block"));
}
