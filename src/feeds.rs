//! Data feeds: one stateful fetcher per explorer listing.
//!
//! A feed owns the filter and pagination state for one kind of request,
//! builds the exact query for that state, and mirrors the `result` of the
//! latest successful response.

use std::sync::atomic::{AtomicU64, Ordering};

use crate::api::{
    AccountBalance, AccountQuery, Action, ApiError, BeaconWithdrawal, BlockType, Erc1155Transfer,
    Erc20Transfer, Erc721Transfer, ExplorerClient, InternalTx, MinedBlock, NormalTx, Sort, Tag,
};
use crate::search::SearchQuery;

pub const DEFAULT_START_BLOCK: u64 = 0;
pub const DEFAULT_END_BLOCK: u64 = 99_999_999;
pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_OFFSET: u32 = 10;
pub const DEFAULT_BLOCK_NO: u64 = 99_999_999;
/// Explorers cap a listing page at this many records
pub const MAX_OFFSET: u32 = 10_000;

/// Shared by every feed, so a response can only ever match the feed
/// instance and request that issued it.
static GENERATIONS: AtomicU64 = AtomicU64::new(1);

fn next_generation() -> u64 {
    GENERATIONS.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Balance,
    BalanceMulti,
    Transactions,
    InternalByAddress,
    InternalByHash,
    InternalByBlock,
    Erc20Transfers,
    Erc721Transfers,
    Erc1155Transfers,
    MinedBlocks,
    BeaconWithdrawals,
    BalanceHistory,
}

/// Tabs shown on the account screen, in order
pub const ACCOUNT_TABS: [FeedKind; 8] = [
    FeedKind::Transactions,
    FeedKind::InternalByAddress,
    FeedKind::Erc20Transfers,
    FeedKind::Erc721Transfers,
    FeedKind::Erc1155Transfers,
    FeedKind::MinedBlocks,
    FeedKind::BeaconWithdrawals,
    FeedKind::BalanceHistory,
];

impl FeedKind {
    pub fn action(&self) -> Action {
        match self {
            Self::Balance => Action::Balance,
            Self::BalanceMulti => Action::BalanceMulti,
            Self::Transactions => Action::TxList,
            Self::InternalByAddress | Self::InternalByHash | Self::InternalByBlock => {
                Action::TxListInternal
            }
            Self::Erc20Transfers => Action::TokenTx,
            Self::Erc721Transfers => Action::TokenNftTx,
            Self::Erc1155Transfers => Action::Token1155Tx,
            Self::MinedBlocks => Action::GetMinedBlocks,
            Self::BeaconWithdrawals => Action::TxsBeaconWithdrawal,
            Self::BalanceHistory => Action::BalanceHistory,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Balance => "Balance",
            Self::BalanceMulti => "Balances",
            Self::Transactions => "Transactions",
            Self::InternalByAddress | Self::InternalByHash | Self::InternalByBlock => "Internal",
            Self::Erc20Transfers => "ERC-20",
            Self::Erc721Transfers => "ERC-721",
            Self::Erc1155Transfers => "ERC-1155",
            Self::MinedBlocks => "Mined Blocks",
            Self::BeaconWithdrawals => "Withdrawals",
            Self::BalanceHistory => "Balance History",
        }
    }

    /// Whether the listing is paged
    pub fn is_paged(&self) -> bool {
        !matches!(
            self,
            Self::Balance | Self::BalanceMulti | Self::InternalByHash | Self::BalanceHistory
        )
    }

    /// Whether the listing accepts a sort order
    pub fn is_sorted(&self) -> bool {
        self.is_paged() && *self != Self::MinedBlocks
    }

    /// Whether the user may narrow the listing to a block range. The block
    /// screen is pinned to its own block.
    pub fn has_block_range(&self) -> bool {
        self.is_sorted() && *self != Self::InternalByBlock
    }

    pub fn has_contract_filter(&self) -> bool {
        matches!(
            self,
            Self::Erc20Transfers | Self::Erc721Transfers | Self::Erc1155Transfers
        )
    }
}

/// A filter the user can edit through the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Contract,
    BlockRange,
    PageSize,
    HistoryBlock,
}

/// A parsed filter change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEdit {
    /// `None` clears the contract filter
    Contract(Option<String>),
    BlockRange { start: u64, end: u64 },
    PageSize(u32),
    HistoryBlock(u64),
}

impl FeedEdit {
    pub fn field(&self) -> FilterField {
        match self {
            Self::Contract(_) => FilterField::Contract,
            Self::BlockRange { .. } => FilterField::BlockRange,
            Self::PageSize(_) => FilterField::PageSize,
            Self::HistoryBlock(_) => FilterField::HistoryBlock,
        }
    }
}

impl FilterField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Contract => "Token Contract",
            Self::BlockRange => "Block Range",
            Self::PageSize => "Page Size",
            Self::HistoryBlock => "Balance At Block",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            Self::Contract => "0x... (empty clears the filter)",
            Self::BlockRange => "start-end, or one block",
            Self::PageSize => "1-10000",
            Self::HistoryBlock => "block number",
        }
    }

    pub fn applies_to(&self, kind: FeedKind) -> bool {
        match self {
            Self::Contract => kind.has_contract_filter(),
            Self::BlockRange => kind.has_block_range(),
            Self::PageSize => kind.is_paged(),
            Self::HistoryBlock => kind == FeedKind::BalanceHistory,
        }
    }

    /// Prompt text for the current state
    pub fn current(&self, params: &FeedParams) -> String {
        match self {
            Self::Contract => params.contract_address.clone().unwrap_or_default(),
            Self::BlockRange => format!("{}-{}", params.start_block, params.end_block),
            Self::PageSize => params.offset.to_string(),
            Self::HistoryBlock => params.block_no.to_string(),
        }
    }

    pub fn parse(&self, input: &str) -> Result<FeedEdit, String> {
        let input = input.trim();
        match self {
            Self::Contract => {
                if input.is_empty() {
                    return Ok(FeedEdit::Contract(None));
                }
                match SearchQuery::parse(input) {
                    SearchQuery::Address(address) => Ok(FeedEdit::Contract(Some(address))),
                    _ => Err(format!("Not a contract address: {input}")),
                }
            }
            Self::BlockRange => {
                let bounds = input
                    .split(|c: char| c == '-' || c.is_whitespace())
                    .filter(|p| !p.is_empty())
                    .map(parse_block)
                    .collect::<Result<Vec<_>, _>>()?;
                match bounds[..] {
                    [block] => Ok(FeedEdit::BlockRange {
                        start: block,
                        end: block,
                    }),
                    [start, end] if start <= end => Ok(FeedEdit::BlockRange { start, end }),
                    [start, end] => Err(format!("Start block {start} is after end block {end}")),
                    _ => Err(format!("Expected start-end, got: {input}")),
                }
            }
            Self::PageSize => match input.parse::<u32>() {
                Ok(n) if (1..=MAX_OFFSET).contains(&n) => Ok(FeedEdit::PageSize(n)),
                _ => Err(format!("Page size must be 1-{MAX_OFFSET}, got: {input}")),
            },
            Self::HistoryBlock => parse_block(input).map(FeedEdit::HistoryBlock),
        }
    }
}

fn parse_block(text: &str) -> Result<u64, String> {
    text.parse::<u64>()
        .map_err(|_| format!("Not a block number: {text}"))
}

/// Filter and pagination state of one feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedParams {
    pub address: Option<String>,
    pub addresses: Vec<String>,
    pub tag: Tag,
    pub start_block: u64,
    pub end_block: u64,
    pub page: u32,
    pub offset: u32,
    pub sort: Sort,
    pub tx_hash: Option<String>,
    pub contract_address: Option<String>,
    pub block_type: BlockType,
    pub block_no: u64,
}

impl Default for FeedParams {
    fn default() -> Self {
        Self {
            address: None,
            addresses: Vec::new(),
            tag: Tag::default(),
            start_block: DEFAULT_START_BLOCK,
            end_block: DEFAULT_END_BLOCK,
            page: DEFAULT_PAGE,
            offset: DEFAULT_OFFSET,
            sort: Sort::default(),
            tx_hash: None,
            contract_address: None,
            block_type: BlockType::default(),
            block_no: DEFAULT_BLOCK_NO,
        }
    }
}

impl FeedParams {
    pub fn for_address(address: &str) -> Self {
        Self {
            address: Some(address.to_string()),
            ..Self::default()
        }
    }

    pub fn for_addresses(addresses: Vec<String>) -> Self {
        Self {
            addresses,
            ..Self::default()
        }
    }

    pub fn for_tx_hash(hash: &str) -> Self {
        Self {
            tx_hash: Some(hash.to_string()),
            ..Self::default()
        }
    }

    /// A single-block range
    pub fn for_block(number: u64) -> Self {
        Self {
            start_block: number,
            end_block: number,
            ..Self::default()
        }
    }

    /// Build the request this state describes for a given kind
    pub fn query(&self, kind: FeedKind) -> AccountQuery {
        let mut query = AccountQuery::new(kind.action());

        match kind {
            FeedKind::Balance => {
                query.address = self.address.clone();
                query.tag = Some(self.tag);
            }
            FeedKind::BalanceMulti => {
                query.address = Some(self.addresses.join(","));
                query.tag = Some(self.tag);
            }
            FeedKind::Transactions
            | FeedKind::InternalByAddress
            | FeedKind::BeaconWithdrawals => {
                query.address = self.address.clone();
                self.apply_range(&mut query);
            }
            FeedKind::InternalByHash => {
                query.txhash = self.tx_hash.clone();
            }
            FeedKind::InternalByBlock => {
                self.apply_range(&mut query);
            }
            FeedKind::Erc20Transfers | FeedKind::Erc721Transfers | FeedKind::Erc1155Transfers => {
                query.contractaddress = self.contract_address.clone();
                query.address = self.address.clone();
                self.apply_range(&mut query);
            }
            FeedKind::MinedBlocks => {
                query.address = self.address.clone();
                query.page = Some(self.page);
                query.offset = Some(self.offset);
                query.blocktype = Some(self.block_type);
            }
            FeedKind::BalanceHistory => {
                query.address = self.address.clone();
                query.blockno = Some(self.block_no);
            }
        }

        query
    }

    fn apply_range(&self, query: &mut AccountQuery) {
        query.startblock = Some(self.start_block);
        query.endblock = Some(self.end_block);
        query.page = Some(self.page);
        query.offset = Some(self.offset);
        query.sort = Some(self.sort);
    }
}

/// Decoded `result` of a feed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedData {
    /// Wei amount
    Balance(String),
    Balances(Vec<AccountBalance>),
    Transactions(Vec<NormalTx>),
    Internal(Vec<InternalTx>),
    Erc20(Vec<Erc20Transfer>),
    Erc721(Vec<Erc721Transfer>),
    Erc1155(Vec<Erc1155Transfer>),
    MinedBlocks(Vec<MinedBlock>),
    Withdrawals(Vec<BeaconWithdrawal>),
    /// Wei amount at a past block
    HistoricalBalance(String),
}

impl FeedData {
    /// Number of selectable rows
    pub fn len(&self) -> usize {
        match self {
            Self::Balance(_) | Self::HistoricalBalance(_) => 0,
            Self::Balances(v) => v.len(),
            Self::Transactions(v) => v.len(),
            Self::Internal(v) => v.len(),
            Self::Erc20(v) => v.len(),
            Self::Erc721(v) => v.len(),
            Self::Erc1155(v) => v.len(),
            Self::MinedBlocks(v) => v.len(),
            Self::Withdrawals(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A request issued by a feed, tagged with the feed's generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub kind: FeedKind,
    pub generation: u64,
    pub query: AccountQuery,
}

#[derive(Debug, Clone)]
pub struct Feed {
    pub kind: FeedKind,
    pub params: FeedParams,
    pub data: Option<FeedData>,
    pub loading: bool,
    pub last_error: Option<String>,
    generation: u64,
}

impl Feed {
    pub fn new(kind: FeedKind, params: FeedParams) -> Self {
        Self {
            kind,
            params,
            data: None,
            loading: false,
            last_error: None,
            generation: 0,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The query for the current state, without issuing it
    pub fn query(&self) -> AccountQuery {
        self.params.query(self.kind)
    }

    /// Issue a request for the current state. Earlier in-flight requests
    /// become stale.
    pub fn request(&mut self) -> FeedRequest {
        self.generation = next_generation();
        self.loading = true;
        FeedRequest {
            kind: self.kind,
            generation: self.generation,
            query: self.query(),
        }
    }

    /// Request only if nothing was fetched yet
    pub fn request_if_idle(&mut self) -> Option<FeedRequest> {
        if self.data.is_none() && !self.loading {
            Some(self.request())
        } else {
            None
        }
    }

    /// Drop the in-flight request, if any. Its response will be ignored.
    pub fn cancel(&mut self) {
        if self.loading {
            self.generation = next_generation();
            self.loading = false;
        }
    }

    /// Forget fetched data so the next visit requests it again
    pub fn reset(&mut self) {
        self.generation = next_generation();
        self.loading = false;
        self.data = None;
        self.last_error = None;
    }

    /// Apply a response. Returns false for stale generations.
    pub fn apply(&mut self, generation: u64, result: Result<FeedData, String>) -> bool {
        if generation != self.generation {
            return false;
        }
        self.loading = false;
        match result {
            Ok(data) => {
                self.data = Some(data);
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e),
        }
        true
    }

    pub fn next_page(&mut self) -> Option<FeedRequest> {
        if !self.kind.is_paged() {
            return None;
        }
        self.params.page = self.params.page.saturating_add(1);
        Some(self.request())
    }

    pub fn prev_page(&mut self) -> Option<FeedRequest> {
        if !self.kind.is_paged() || self.params.page <= 1 {
            return None;
        }
        self.params.page -= 1;
        Some(self.request())
    }

    pub fn toggle_sort(&mut self) -> Option<FeedRequest> {
        if !self.kind.is_sorted() {
            return None;
        }
        self.params.sort = self.params.sort.toggled();
        self.params.page = DEFAULT_PAGE;
        Some(self.request())
    }

    pub fn toggle_block_type(&mut self) -> Option<FeedRequest> {
        if self.kind != FeedKind::MinedBlocks {
            return None;
        }
        self.params.block_type = self.params.block_type.toggled();
        self.params.page = DEFAULT_PAGE;
        Some(self.request())
    }

    /// Apply a filter change and request the first page of the new listing
    pub fn edit(&mut self, edit: FeedEdit) -> Option<FeedRequest> {
        if !edit.field().applies_to(self.kind) {
            return None;
        }
        match edit {
            FeedEdit::Contract(contract) => self.params.contract_address = contract,
            FeedEdit::BlockRange { start, end } => {
                self.params.start_block = start;
                self.params.end_block = end;
            }
            FeedEdit::PageSize(offset) => self.params.offset = offset,
            FeedEdit::HistoryBlock(block) => self.params.block_no = block,
        }
        self.params.page = DEFAULT_PAGE;
        Some(self.request())
    }

    pub fn cycle_tag(&mut self) -> Option<FeedRequest> {
        if !matches!(self.kind, FeedKind::Balance | FeedKind::BalanceMulti) {
            return None;
        }
        self.params.tag = self.params.tag.next();
        Some(self.request())
    }
}

/// Execute a feed request and decode the result for its kind
pub async fn fetch(client: &ExplorerClient, request: &FeedRequest) -> Result<FeedData, ApiError> {
    let query = &request.query;
    let data = match request.kind {
        FeedKind::Balance => FeedData::Balance(client.get(query).await?),
        FeedKind::BalanceMulti => FeedData::Balances(client.get(query).await?),
        FeedKind::Transactions => FeedData::Transactions(client.get(query).await?),
        FeedKind::InternalByAddress | FeedKind::InternalByHash | FeedKind::InternalByBlock => {
            FeedData::Internal(client.get(query).await?)
        }
        FeedKind::Erc20Transfers => FeedData::Erc20(client.get(query).await?),
        FeedKind::Erc721Transfers => FeedData::Erc721(client.get(query).await?),
        FeedKind::Erc1155Transfers => FeedData::Erc1155(client.get(query).await?),
        FeedKind::MinedBlocks => FeedData::MinedBlocks(client.get(query).await?),
        FeedKind::BeaconWithdrawals => FeedData::Withdrawals(client.get(query).await?),
        FeedKind::BalanceHistory => FeedData::HistoricalBalance(client.get(query).await?),
    };
    Ok(data)
}
