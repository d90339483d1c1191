/// Every request targets the account module
pub const ACCOUNT_MODULE: &str = "account";

/// Explorer operations, sent as the `action` query param
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Balance,
    BalanceMulti,
    TxList,
    TxListInternal,
    TokenTx,
    TokenNftTx,
    Token1155Tx,
    GetMinedBlocks,
    TxsBeaconWithdrawal,
    BalanceHistory,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Balance => "balance",
            Self::BalanceMulti => "balancemulti",
            Self::TxList => "txlist",
            Self::TxListInternal => "txlistinternal",
            Self::TokenTx => "tokentx",
            Self::TokenNftTx => "tokennfttx",
            Self::Token1155Tx => "token1155tx",
            Self::GetMinedBlocks => "getminedblocks",
            Self::TxsBeaconWithdrawal => "txsBeaconWithdrawal",
            Self::BalanceHistory => "balancehistory",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tag {
    Earliest,
    Pending,
    #[default]
    Latest,
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Earliest => "earliest",
            Self::Pending => "pending",
            Self::Latest => "latest",
        }
    }

    pub fn next(self) -> Self {
        match self {
            Self::Latest => Self::Pending,
            Self::Pending => Self::Earliest,
            Self::Earliest => Self::Latest,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sort {
    #[default]
    Asc,
    Desc,
}

impl Sort {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BlockType {
    #[default]
    Blocks,
    Uncles,
}

impl BlockType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocks => "blocks",
            Self::Uncles => "uncles",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Blocks => Self::Uncles,
            Self::Uncles => Self::Blocks,
        }
    }
}

/// One GET request against the account module. Unset fields are not sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountQuery {
    pub action: Action,
    pub address: Option<String>,
    pub tag: Option<Tag>,
    pub txhash: Option<String>,
    pub contractaddress: Option<String>,
    pub startblock: Option<u64>,
    pub endblock: Option<u64>,
    pub page: Option<u32>,
    pub offset: Option<u32>,
    pub sort: Option<Sort>,
    pub blocktype: Option<BlockType>,
    pub blockno: Option<u64>,
}

impl AccountQuery {
    pub fn new(action: Action) -> Self {
        Self {
            action,
            address: None,
            tag: None,
            txhash: None,
            contractaddress: None,
            startblock: None,
            endblock: None,
            page: None,
            offset: None,
            sort: None,
            blocktype: None,
            blockno: None,
        }
    }

    /// Query params in wire order, `apikey` last
    pub fn params(&self, api_key: Option<&str>) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("module", ACCOUNT_MODULE.to_string()),
            ("action", self.action.as_str().to_string()),
        ];

        if let Some(address) = &self.address {
            params.push(("address", address.clone()));
        }
        if let Some(tag) = self.tag {
            params.push(("tag", tag.as_str().to_string()));
        }
        if let Some(hash) = &self.txhash {
            params.push(("txhash", hash.clone()));
        }
        if let Some(contract) = &self.contractaddress {
            params.push(("contractaddress", contract.clone()));
        }
        if let Some(start) = self.startblock {
            params.push(("startblock", start.to_string()));
        }
        if let Some(end) = self.endblock {
            params.push(("endblock", end.to_string()));
        }
        if let Some(page) = self.page {
            params.push(("page", page.to_string()));
        }
        if let Some(offset) = self.offset {
            params.push(("offset", offset.to_string()));
        }
        if let Some(sort) = self.sort {
            params.push(("sort", sort.as_str().to_string()));
        }
        if let Some(block_type) = self.blocktype {
            params.push(("blocktype", block_type.as_str().to_string()));
        }
        if let Some(block_no) = self.blockno {
            params.push(("blockno", block_no.to_string()));
        }
        if let Some(key) = api_key {
            params.push(("apikey", key.to_string()));
        }

        params
    }
}
