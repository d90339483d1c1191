//! UI rendering tests for tscan
//!
//! These tests render screens into a `TestBackend` and search the buffer text.

pub mod account_tests;
pub mod common_tests;
pub mod feed_tests;
pub mod home_tests;

use tscan::api::{
    AccountBalance, BeaconWithdrawal, Erc20Transfer, InternalTx, MinedBlock, NormalTx,
};
use tscan::app::App;
use tscan::config::Config;
use tscan::feeds::{FeedData, FeedKind, FeedRequest, FilterField};
use tscan::ui::draw;

use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

pub const ADDR: &str = "0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae";
pub const ADDR_B: &str = "0x742d35cc6634c0532925a3b844bc9e7595f8fe31";
pub const TX_HASH: &str = "0x40eb908387324f2b575b4879cd9d7188f69c8fc9d87c901b9e2daaea4b442170";

// ==================== Test Data Builders ====================

pub fn mock_config() -> Config {
    Config {
        api_key: Some("TESTKEY".to_string()),
        network_name: Some("eth".to_string()),
        recent_searches: vec![
            ADDR.to_string(),
            TX_HASH.to_string(),
            "12345678".to_string(),
        ],
        ..Config::default()
    }
}

pub fn mock_config_no_key() -> Config {
    Config {
        api_key: None,
        network_name: Some("eth".to_string()),
        ..Config::default()
    }
}

pub fn mock_transactions() -> Vec<NormalTx> {
    vec![
        NormalTx {
            block_number: "14923678".to_string(),
            time_stamp: "1654646411".to_string(),
            hash: "0xc52783ad354aecc04c670047754f062e3d6d04e8f5b24774472651f9c3882c60".to_string(),
            from: ADDR.to_string(),
            to: ADDR_B.to_string(),
            value: "1500000000000000000".to_string(),
            is_error: "0".to_string(),
            function_name: "transfer(address _to, uint256 _value)".to_string(),
            method_id: "0xa9059cbb".to_string(),
            ..NormalTx::default()
        },
        NormalTx {
            block_number: "14923692".to_string(),
            time_stamp: "1654646600".to_string(),
            hash: "0xd1a8b3c2e4f5a6b7c8d9e0f1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b1".to_string(),
            from: ADDR_B.to_string(),
            to: String::new(),
            value: "0".to_string(),
            is_error: "1".to_string(),
            ..NormalTx::default()
        },
    ]
}

pub fn mock_internal() -> Vec<InternalTx> {
    vec![InternalTx {
        block_number: "50107".to_string(),
        time_stamp: "1438919988".to_string(),
        from: "0x2cac6e4b11d6b58f6d3c1c9d5fe8faa89f60e5a2".to_string(),
        to: ADDR_B.to_string(),
        value: "5000000000000000000".to_string(),
        kind: "call".to_string(),
        is_error: "0".to_string(),
        ..InternalTx::default()
    }]
}

pub fn mock_erc20() -> Vec<Erc20Transfer> {
    vec![Erc20Transfer {
        time_stamp: "1654646411".to_string(),
        hash: TX_HASH.to_string(),
        from: ADDR.to_string(),
        to: ADDR_B.to_string(),
        value: "2500000".to_string(),
        token_symbol: "USDC".to_string(),
        token_decimal: "6".to_string(),
        ..Erc20Transfer::default()
    }]
}

pub fn mock_mined_blocks() -> Vec<MinedBlock> {
    vec![MinedBlock {
        block_number: "3462296".to_string(),
        time_stamp: "1491118514".to_string(),
        block_reward: "5194770940000000000".to_string(),
    }]
}

pub fn mock_withdrawals() -> Vec<BeaconWithdrawal> {
    vec![BeaconWithdrawal {
        withdrawal_index: "13".to_string(),
        validator_index: "117823".to_string(),
        address: ADDR.to_string(),
        amount: "3402931".to_string(),
        block_number: "17034877".to_string(),
        timestamp: "1681338599".to_string(),
    }]
}

pub fn mock_balances() -> Vec<AccountBalance> {
    vec![
        AccountBalance {
            account: ADDR.to_string(),
            balance: "40891626854930000000000".to_string(),
        },
        AccountBalance {
            account: ADDR_B.to_string(),
            balance: "0".to_string(),
        },
    ]
}

pub fn create_test_app(with_key: bool) -> App {
    let config = if with_key {
        mock_config()
    } else {
        mock_config_no_key()
    };
    App::new(config)
}

/// Answer the request of the given kind as if the explorer had replied
pub fn respond(app: &mut App, requests: &[FeedRequest], kind: FeedKind, data: FeedData) {
    let request = requests
        .iter()
        .find(|r| r.kind == kind)
        .unwrap_or_else(|| panic!("no request for {kind:?}"));
    app.apply_feed_result(kind, request.generation, Ok(data));
}

// ==================== Helper Functions ====================

/// Render the app to a buffer and return it
pub fn render_to_buffer(app: &App, width: u16, height: u16) -> Buffer {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();

    terminal
        .draw(|frame| {
            draw(frame, app);
        })
        .unwrap();

    terminal.backend().buffer().clone()
}

/// Check if buffer contains a specific string anywhere
pub fn buffer_contains(buffer: &Buffer, needle: &str) -> bool {
    let content = buffer_to_string(buffer);
    content.contains(needle)
}

/// Convert buffer to a single string for searching
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let mut content = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            content.push(
                buffer
                    .cell((x, y))
                    .map(|c| c.symbol().chars().next().unwrap_or(' '))
                    .unwrap_or(' '),
            );
        }
        content.push('\n');
    }
    content
}

/// Get a specific line from the buffer
#[allow(dead_code)]
pub fn buffer_line(buffer: &Buffer, y: u16) -> String {
    let mut line = String::new();
    for x in 0..buffer.area.width {
        if let Some(cell) = buffer.cell((x, y)) {
            line.push_str(cell.symbol());
        }
    }
    line.trim_end().to_string()
}
