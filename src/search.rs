/// Most addresses a single `balancemulti` request accepts
pub const MAX_MULTI_ADDRESSES: usize = 20;

/// Represents the type of search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Account address (0x + 40 hex chars)
    Address(String),
    /// Comma-separated account addresses
    AddressList(Vec<String>),
    /// Transaction hash (0x + 64 hex chars)
    TxHash(String),
    /// Block number (decimal or hex with 0x prefix)
    BlockNumber(u64),
    /// Invalid or unrecognized query
    Invalid(String),
}

impl SearchQuery {
    /// Parse a search string into a typed query
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();

        if trimmed.contains(',') {
            return Self::parse_list(trimmed);
        }

        if let Some(hex_part) = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            if !hex_part.chars().all(|c| c.is_ascii_hexdigit()) {
                return Self::Invalid(format!("Invalid hex characters in: {trimmed}"));
            }

            match hex_part.len() {
                40 => Self::Address(trimmed.to_lowercase()),
                64 => Self::TxHash(trimmed.to_lowercase()),
                1..=16 => match u64::from_str_radix(hex_part, 16) {
                    Ok(num) => Self::BlockNumber(num),
                    Err(_) => Self::Invalid(format!("Invalid hex number: {trimmed}")),
                },
                _ => Self::Invalid(format!(
                    "Unrecognized format: {} ({} hex chars)",
                    trimmed,
                    hex_part.len()
                )),
            }
        } else if !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit()) {
            match trimmed.parse::<u64>() {
                Ok(num) => Self::BlockNumber(num),
                Err(_) => Self::Invalid(format!("Block number too large: {trimmed}")),
            }
        } else {
            Self::Invalid(format!("Unrecognized query format: {trimmed}"))
        }
    }

    fn parse_list(input: &str) -> Self {
        let mut addresses = Vec::new();

        for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            match Self::parse(part) {
                Self::Address(addr) => {
                    if !addresses.contains(&addr) {
                        addresses.push(addr);
                    }
                }
                _ => return Self::Invalid(format!("Not an address: {part}")),
            }
        }

        match addresses.len() {
            0 => Self::Invalid("Empty address list".to_string()),
            1 => Self::Address(addresses.remove(0)),
            n if n > MAX_MULTI_ADDRESSES => Self::Invalid(format!(
                "Too many addresses: {n} (max {MAX_MULTI_ADDRESSES})"
            )),
            _ => Self::AddressList(addresses),
        }
    }

    /// Returns a human-readable description of the query type
    pub fn description(&self) -> String {
        match self {
            Self::Address(addr) => format!("Address: {addr}"),
            Self::AddressList(list) => format!("Addresses: {}", list.len()),
            Self::TxHash(hash) => format!("Transaction: {hash}"),
            Self::BlockNumber(num) => format!("Block: {num}"),
            Self::Invalid(reason) => format!("Invalid: {reason}"),
        }
    }
}
