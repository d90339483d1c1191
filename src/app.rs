use crate::api::{parse_u64, ExplorerClient};
use crate::config::Config;
use crate::feeds::{
    Feed, FeedData, FeedKind, FeedParams, FeedRequest, FilterField, ACCOUNT_TABS,
};
use crate::menu::{Section, SECTIONS};
use crate::network::{Network, NETWORKS};
use crate::search::SearchQuery;
use crate::store::{Store, StoreAction, ThemeMode};
use tui_input::Input;

#[derive(Debug, Clone)]
pub enum Screen {
    Home,
    Account(AccountResult),
    MultiBalance(ListResult),
    /// Internal transactions of one transaction hash
    Transaction(ListResult),
    /// Internal transactions of one block
    Block(ListResult),
    Section(Section),
    Error(String),
}

#[derive(Debug, Clone)]
pub struct AccountResult {
    pub address: String,
    pub balance: Feed,
    pub tabs: Vec<Feed>,
    pub active_tab: usize,
    pub selected_index: usize,
}

impl AccountResult {
    pub fn active(&self) -> &Feed {
        &self.tabs[self.active_tab]
    }
}

/// Screen backed by a single feed
#[derive(Debug, Clone)]
pub struct ListResult {
    pub feed: Feed,
    pub selected_index: usize,
}

/// Navigable links from a screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavLink {
    Address(String),
    Block(u64),
    Transaction(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    NetworkMenu { selected: usize },
    SectionMenu { selected: usize },
    /// Text prompt editing a filter of the active feed
    Filter { field: FilterField },
}

pub struct App {
    pub config: Config,
    pub store: Store,
    pub screen: Screen,
    pub history: Vec<Screen>,
    pub search_input: Input,
    pub key_input: Input,
    pub filter_input: Input,
    pub selected_history_index: Option<usize>,
    pub overlay: Option<Overlay>,
    /// Last non-fatal error, shown below the current screen
    pub status: Option<String>,
    pub should_quit: bool,
    pub client: Option<ExplorerClient>,
}

impl App {
    pub fn new(config: Config) -> Self {
        let store = Store::from_config(&config);
        let client = build_client(&config, store.network);

        Self {
            config,
            store,
            screen: Screen::Home,
            history: Vec::new(),
            search_input: Input::default(),
            key_input: Input::default(),
            filter_input: Input::default(),
            selected_history_index: None,
            overlay: None,
            status: None,
            should_quit: false,
            client,
        }
    }

    pub fn network(&self) -> Network {
        self.store.network
    }

    pub fn theme(&self) -> ThemeMode {
        self.store.theme
    }

    pub fn submit_api_key(&mut self) -> Result<(), String> {
        let key = self.key_input.value().trim().to_string();
        if key.is_empty() {
            return Err("API key cannot be empty".to_string());
        }

        log_persist(self.config.set_api_key(key));
        self.client = build_client(&self.config, self.store.network);
        self.key_input.reset();

        if self.client.is_some() {
            Ok(())
        } else {
            Err(format!(
                "Invalid API URL: {}",
                self.config.api_url(self.store.network)
            ))
        }
    }

    pub fn needs_key_setup(&self) -> bool {
        self.client.as_ref().map_or(true, |c| !c.has_api_key())
    }

    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    // ==================== Store ====================

    /// Dispatch to the store and write the change through to the config.
    /// A network change re-requests the feeds on screen.
    pub fn dispatch(&mut self, action: StoreAction) -> Vec<FeedRequest> {
        if !self.store.dispatch(action) {
            return Vec::new();
        }

        match action {
            StoreAction::ToggleTheme | StoreAction::SetTheme(_) => {
                tracing::info!(theme = self.store.theme.as_str(), "theme changed");
                log_persist(self.config.set_theme(self.store.theme));
                Vec::new()
            }
            StoreAction::SetNetwork(network) => {
                tracing::info!(network = network.id(), "network changed");
                log_persist(self.config.set_network(network));
                self.client = build_client(&self.config, network);
                self.history.clear();
                self.status = None;
                self.refresh()
            }
        }
    }

    pub fn toggle_theme(&mut self) {
        self.dispatch(StoreAction::ToggleTheme);
    }

    // ==================== Search history ====================

    pub fn get_recent_searches(&self) -> &[String] {
        &self.config.recent_searches
    }

    pub fn select_history_prev(&mut self) {
        let len = self.config.recent_searches.len();
        if len == 0 {
            return;
        }

        self.selected_history_index = match self.selected_history_index {
            None => Some(0),
            Some(0) => None, // Wrap to search input
            Some(i) => Some(i - 1),
        };
    }

    pub fn select_history_next(&mut self) {
        let len = self.config.recent_searches.len();
        if len == 0 {
            return;
        }

        self.selected_history_index = match self.selected_history_index {
            None => Some(0),
            Some(i) if i >= len - 1 => None, // Wrap to search input
            Some(i) => Some(i + 1),
        };
    }

    pub fn get_selected_history_query(&self) -> Option<String> {
        self.selected_history_index
            .and_then(|i| self.config.recent_searches.get(i).cloned())
    }

    pub fn clear_history_selection(&mut self) {
        self.selected_history_index = None;
    }

    pub fn delete_selected_history(&mut self) {
        if let Some(idx) = self.selected_history_index {
            log_persist(self.config.remove_recent_search(idx));

            let len = self.config.recent_searches.len();
            if len == 0 {
                self.selected_history_index = None;
            } else if idx >= len {
                self.selected_history_index = Some(len - 1);
            }
        }
    }

    pub fn submit_search(&mut self) -> Option<String> {
        let value = self.search_input.value().trim();
        if value.is_empty() {
            return None;
        }

        let query = value.to_string();
        self.search_input.reset();
        log_persist(self.config.add_recent_search(query.clone()));
        Some(query)
    }

    /// Open the screen for a search and return the requests it needs
    pub fn execute_search(&mut self, query: &str) -> Vec<FeedRequest> {
        let parsed = SearchQuery::parse(query);
        tracing::debug!(query = %parsed.description(), "search");

        if let SearchQuery::Invalid(reason) = parsed {
            self.set_error(reason);
            return Vec::new();
        }

        if self.needs_key_setup() {
            self.set_error("No API key configured. Use 'tscan set-key <key>' first.".into());
            return Vec::new();
        }

        match parsed {
            SearchQuery::Address(addr) => self.open_account(&addr),
            SearchQuery::AddressList(list) => self.open_multi_balance(list),
            SearchQuery::TxHash(hash) => self.open_transaction(&hash),
            SearchQuery::BlockNumber(num) => self.open_block(num),
            SearchQuery::Invalid(_) => Vec::new(),
        }
    }

    // ==================== Navigation ====================

    pub fn navigate_to(&mut self, screen: Screen) {
        if !matches!(self.screen, Screen::Home | Screen::Error(_)) {
            let mut prev = std::mem::replace(&mut self.screen, Screen::Home);
            for feed in screen_feeds_mut(&mut prev) {
                feed.cancel();
            }
            self.history.push(prev);
        }
        self.status = None;
        self.screen = screen;
    }

    /// Returns requests for feeds the restored screen still lacks
    pub fn go_back(&mut self) -> Vec<FeedRequest> {
        self.status = None;
        if let Some(prev) = self.history.pop() {
            self.screen = prev;
            self.resume()
        } else {
            self.go_home();
            Vec::new()
        }
    }

    pub fn go_home(&mut self) {
        self.history.clear();
        self.status = None;
        self.screen = Screen::Home;
    }

    pub fn set_error(&mut self, msg: String) {
        tracing::warn!(error = %msg, "showing error screen");
        // Save current screen to history before showing error (if it's a navigable screen)
        if !matches!(self.screen, Screen::Home | Screen::Error(_)) {
            let mut prev = std::mem::replace(&mut self.screen, Screen::Home);
            for feed in screen_feeds_mut(&mut prev) {
                feed.cancel();
            }
            self.history.push(prev);
        }
        self.screen = Screen::Error(msg);
    }

    pub fn open_account(&mut self, address: &str) -> Vec<FeedRequest> {
        let params = FeedParams::for_address(address);
        let mut balance = Feed::new(FeedKind::Balance, params.clone());
        let mut tabs: Vec<Feed> = ACCOUNT_TABS
            .iter()
            .map(|kind| Feed::new(*kind, params.clone()))
            .collect();

        let requests = vec![balance.request(), tabs[0].request()];

        self.navigate_to(Screen::Account(AccountResult {
            address: address.to_string(),
            balance,
            tabs,
            active_tab: 0,
            selected_index: 0,
        }));
        requests
    }

    pub fn open_multi_balance(&mut self, addresses: Vec<String>) -> Vec<FeedRequest> {
        let mut feed = Feed::new(FeedKind::BalanceMulti, FeedParams::for_addresses(addresses));
        let request = feed.request();
        self.navigate_to(Screen::MultiBalance(ListResult {
            feed,
            selected_index: 0,
        }));
        vec![request]
    }

    pub fn open_transaction(&mut self, hash: &str) -> Vec<FeedRequest> {
        let mut feed = Feed::new(FeedKind::InternalByHash, FeedParams::for_tx_hash(hash));
        let request = feed.request();
        self.navigate_to(Screen::Transaction(ListResult {
            feed,
            selected_index: 0,
        }));
        vec![request]
    }

    pub fn open_block(&mut self, number: u64) -> Vec<FeedRequest> {
        let mut feed = Feed::new(FeedKind::InternalByBlock, FeedParams::for_block(number));
        let request = feed.request();
        self.navigate_to(Screen::Block(ListResult {
            feed,
            selected_index: 0,
        }));
        vec![request]
    }

    pub fn open_section(&mut self, section: &Section) {
        self.navigate_to(Screen::Section(*section));
    }

    pub fn navigate_to_link(&mut self, link: NavLink) -> Vec<FeedRequest> {
        match link {
            NavLink::Address(addr) => self.open_account(&addr),
            NavLink::Block(num) => self.open_block(num),
            NavLink::Transaction(hash) => self.open_transaction(&hash),
        }
    }

    pub fn is_on_home(&self) -> bool {
        matches!(self.screen, Screen::Home)
    }

    // ==================== Feeds ====================

    /// Route a response to the matching feed on the current screen.
    /// Responses for screens the user has left are dropped.
    pub fn apply_feed_result(
        &mut self,
        kind: FeedKind,
        generation: u64,
        result: Result<FeedData, String>,
    ) {
        let error = result.as_ref().err().cloned();
        let Some(feed) = self.feed_mut(kind) else {
            return;
        };

        if feed.apply(generation, result) {
            if let Some(e) = error {
                self.status = Some(format!("{}: {e}", kind.title()));
            }
        }
    }

    fn feed_mut(&mut self, kind: FeedKind) -> Option<&mut Feed> {
        match &mut self.screen {
            Screen::Account(result) => {
                if kind == FeedKind::Balance {
                    Some(&mut result.balance)
                } else {
                    result.tabs.iter_mut().find(|f| f.kind == kind)
                }
            }
            Screen::MultiBalance(result) | Screen::Transaction(result) | Screen::Block(result) => {
                (result.feed.kind == kind).then_some(&mut result.feed)
            }
            _ => None,
        }
    }

    /// The feed the list keys act on
    pub fn active_feed(&self) -> Option<&Feed> {
        match &self.screen {
            Screen::Account(result) => Some(result.active()),
            Screen::MultiBalance(result) | Screen::Transaction(result) | Screen::Block(result) => {
                Some(&result.feed)
            }
            _ => None,
        }
    }

    fn active_feed_mut(&mut self) -> Option<(&mut Feed, &mut usize)> {
        match &mut self.screen {
            Screen::Account(result) => Some((
                &mut result.tabs[result.active_tab],
                &mut result.selected_index,
            )),
            Screen::MultiBalance(result) | Screen::Transaction(result) | Screen::Block(result) => {
                Some((&mut result.feed, &mut result.selected_index))
            }
            _ => None,
        }
    }

    /// Apply a state change to the active feed; selection restarts at the top
    fn update_active_feed(
        &mut self,
        change: impl FnOnce(&mut Feed) -> Option<FeedRequest>,
    ) -> Option<FeedRequest> {
        let (feed, selected) = self.active_feed_mut()?;
        let request = change(feed)?;
        *selected = 0;
        Some(request)
    }

    pub fn next_page(&mut self) -> Option<FeedRequest> {
        self.update_active_feed(Feed::next_page)
    }

    pub fn prev_page(&mut self) -> Option<FeedRequest> {
        self.update_active_feed(Feed::prev_page)
    }

    pub fn toggle_sort(&mut self) -> Option<FeedRequest> {
        self.update_active_feed(Feed::toggle_sort)
    }

    pub fn toggle_block_type(&mut self) -> Option<FeedRequest> {
        self.update_active_feed(Feed::toggle_block_type)
    }

    /// Cycle the balance tag (latest, pending, earliest)
    pub fn cycle_tag(&mut self) -> Option<FeedRequest> {
        match &mut self.screen {
            Screen::Account(result) => result.balance.cycle_tag(),
            Screen::MultiBalance(result) => result.feed.cycle_tag(),
            _ => None,
        }
    }

    /// Open the filter prompt for the active feed, prefilled with the
    /// current value. Fields the feed does not take are ignored.
    pub fn open_filter(&mut self, field: FilterField) {
        let current = match self.active_feed() {
            Some(feed) if field.applies_to(feed.kind) => field.current(&feed.params),
            _ => return,
        };
        self.filter_input = Input::new(current);
        self.overlay = Some(Overlay::Filter { field });
    }

    /// Apply the prompt to the active feed. Invalid input keeps the prompt
    /// open and reports the problem in the status line.
    pub fn submit_filter(&mut self) -> Option<FeedRequest> {
        let Some(Overlay::Filter { field }) = self.overlay else {
            return None;
        };

        match field.parse(self.filter_input.value()) {
            Ok(edit) => {
                tracing::debug!(?edit, "filter changed");
                self.overlay = None;
                self.status = None;
                self.filter_input.reset();
                self.update_active_feed(|feed| feed.edit(edit))
            }
            Err(e) => {
                self.status = Some(e);
                None
            }
        }
    }

    /// Re-request everything visible; hidden tabs refetch when next shown
    pub fn refresh(&mut self) -> Vec<FeedRequest> {
        match &mut self.screen {
            Screen::Account(result) => {
                let active = result.active_tab;
                for (i, tab) in result.tabs.iter_mut().enumerate() {
                    if i != active {
                        tab.reset();
                    }
                }
                vec![result.balance.request(), result.tabs[active].request()]
            }
            Screen::MultiBalance(result) | Screen::Transaction(result) | Screen::Block(result) => {
                vec![result.feed.request()]
            }
            _ => Vec::new(),
        }
    }

    /// Request visible feeds that have nothing yet
    pub fn resume(&mut self) -> Vec<FeedRequest> {
        match &mut self.screen {
            Screen::Account(result) => {
                let active = result.active_tab;
                [
                    result.balance.request_if_idle(),
                    result.tabs[active].request_if_idle(),
                ]
                .into_iter()
                .flatten()
                .collect()
            }
            Screen::MultiBalance(result) | Screen::Transaction(result) | Screen::Block(result) => {
                result.feed.request_if_idle().into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    // ==================== Selection ====================

    /// Move selection up
    pub fn select_prev(&mut self) {
        if let Some((_, selected)) = self.active_feed_mut() {
            *selected = selected.saturating_sub(1);
        }
    }

    /// Move selection down
    pub fn select_next(&mut self) {
        if let Some((feed, selected)) = self.active_feed_mut() {
            let len = feed.data.as_ref().map_or(0, FeedData::len);
            if len > 0 && *selected < len - 1 {
                *selected += 1;
            }
        }
    }

    /// Switch account tab; fetches the tab on first visit
    pub fn next_tab(&mut self) -> Option<FeedRequest> {
        self.switch_tab(1)
    }

    pub fn prev_tab(&mut self) -> Option<FeedRequest> {
        self.switch_tab(ACCOUNT_TABS.len() - 1)
    }

    fn switch_tab(&mut self, step: usize) -> Option<FeedRequest> {
        let Screen::Account(result) = &mut self.screen else {
            return None;
        };
        result.active_tab = (result.active_tab + step) % result.tabs.len();
        result.selected_index = 0;
        result.tabs[result.active_tab].request_if_idle()
    }

    pub fn selected_index(&self) -> usize {
        match &self.screen {
            Screen::Account(result) => result.selected_index,
            Screen::MultiBalance(result) | Screen::Transaction(result) | Screen::Block(result) => {
                result.selected_index
            }
            _ => 0,
        }
    }

    /// Get the currently selected navigation link
    pub fn get_selected_link(&self) -> Option<NavLink> {
        let data = self.active_feed()?.data.as_ref()?;
        row_link(data, self.selected_index())
    }

    // ==================== Overlays ====================

    pub fn open_network_menu(&mut self) {
        self.overlay = Some(Overlay::NetworkMenu {
            selected: self.store.network.index(),
        });
    }

    pub fn open_section_menu(&mut self) {
        let selected = SECTIONS.iter().position(Section::is_explorer).unwrap_or(0);
        self.overlay = Some(Overlay::SectionMenu { selected });
    }

    pub fn close_overlay(&mut self) {
        self.overlay = None;
    }

    pub fn overlay_next(&mut self) {
        self.move_overlay(1);
    }

    pub fn overlay_prev(&mut self) {
        self.move_overlay(-1);
    }

    fn move_overlay(&mut self, delta: isize) {
        let (selected, len) = match &mut self.overlay {
            Some(Overlay::NetworkMenu { selected }) => (selected, NETWORKS.len()),
            Some(Overlay::SectionMenu { selected }) => (selected, SECTIONS.len()),
            Some(Overlay::Filter { .. }) | None => return,
        };
        *selected = (*selected as isize + delta).rem_euclid(len as isize) as usize;
    }

    /// Act on the highlighted overlay entry and close the overlay
    pub fn overlay_confirm(&mut self) -> Vec<FeedRequest> {
        if let Some(Overlay::Filter { .. }) = self.overlay {
            return self.submit_filter().into_iter().collect();
        }

        match self.overlay.take() {
            Some(Overlay::NetworkMenu { selected }) => {
                self.dispatch(StoreAction::SetNetwork(NETWORKS[selected]))
            }
            Some(Overlay::SectionMenu { selected }) => {
                let section = SECTIONS[selected];
                if section.is_explorer() {
                    self.go_home();
                } else {
                    self.open_section(&section);
                }
                Vec::new()
            }
            Some(Overlay::Filter { .. }) | None => Vec::new(),
        }
    }
}

fn build_client(config: &Config, network: Network) -> Option<ExplorerClient> {
    match ExplorerClient::new(&config.api_url(network), config.api_key()) {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::error!(error = %e, network = network.id(), "could not build explorer client");
            None
        }
    }
}

fn log_persist(result: anyhow::Result<()>) {
    if let Err(e) = result {
        tracing::warn!(error = %format!("{e:#}"), "failed to persist config");
    }
}

fn screen_feeds_mut(screen: &mut Screen) -> Vec<&mut Feed> {
    match screen {
        Screen::Account(result) => std::iter::once(&mut result.balance)
            .chain(result.tabs.iter_mut())
            .collect(),
        Screen::MultiBalance(result) | Screen::Transaction(result) | Screen::Block(result) => {
            vec![&mut result.feed]
        }
        _ => Vec::new(),
    }
}

/// Where a listing row leads
pub fn row_link(data: &FeedData, index: usize) -> Option<NavLink> {
    let tx_link = |hash: &str| {
        (!hash.is_empty()).then(|| NavLink::Transaction(hash.to_string()))
    };

    match data {
        FeedData::Balance(_) | FeedData::HistoricalBalance(_) => None,
        FeedData::Balances(v) => v.get(index).map(|b| NavLink::Address(b.account.clone())),
        FeedData::Transactions(v) => v.get(index).and_then(|tx| tx_link(&tx.hash)),
        FeedData::Internal(v) => v.get(index).and_then(|tx| {
            tx_link(&tx.hash).or_else(|| {
                let target = if tx.to.is_empty() {
                    &tx.contract_address
                } else {
                    &tx.to
                };
                (!target.is_empty()).then(|| NavLink::Address(target.clone()))
            })
        }),
        FeedData::Erc20(v) => v.get(index).and_then(|t| tx_link(&t.hash)),
        FeedData::Erc721(v) => v.get(index).and_then(|t| tx_link(&t.hash)),
        FeedData::Erc1155(v) => v.get(index).and_then(|t| tx_link(&t.hash)),
        FeedData::MinedBlocks(v) => v
            .get(index)
            .and_then(|b| parse_u64(&b.block_number))
            .map(NavLink::Block),
        FeedData::Withdrawals(v) => v
            .get(index)
            .and_then(|w| parse_u64(&w.block_number))
            .map(NavLink::Block),
    }
}
