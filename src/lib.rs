//! tscan - Terminal Account Explorer
//!
//! A terminal client for Etherscan-compatible account APIs (Ethereum and
//! Binance Smart Chain).

pub mod api;
pub mod app;
pub mod config;
pub mod feeds;
pub mod logging;
pub mod menu;
pub mod network;
pub mod search;
pub mod store;
pub mod ui;

// Re-export commonly used types
pub use api::{ApiError, ExplorerClient};
pub use app::{AccountResult, App, ListResult, NavLink, Overlay, Screen};
pub use config::Config;
pub use feeds::{Feed, FeedData, FeedEdit, FeedKind, FeedParams, FeedRequest, FilterField};
pub use network::Network;
pub use store::{Store, StoreAction, ThemeMode};
