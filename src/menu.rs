//! Application sections reachable from the pages menu.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionStatus {
    Pending,
    ComingSoon,
    Unavailable,
    Available,
}

impl SectionStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::ComingSoon => "coming soon",
            Self::Unavailable => "unavailable",
            Self::Available => "available",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub label: &'static str,
    pub route: &'static str,
    pub status: SectionStatus,
    pub description: &'static str,
}

impl Section {
    /// The explorer itself
    pub fn is_explorer(&self) -> bool {
        self.route == BLOCKSCAN_ROUTE
    }

    pub fn from_route(route: &str) -> Option<&'static Section> {
        let route = route.trim().trim_matches('/');
        SECTIONS.iter().find(|s| s.route == route)
    }
}

pub const BLOCKSCAN_ROUTE: &str = "blockscan";

pub static SECTIONS: [Section; 8] = [
    Section {
        label: "Dashboard",
        route: "",
        status: SectionStatus::Pending,
        description: "Displays a summary of the portfolio and charts.",
    },
    Section {
        label: "Portfolio",
        route: "portfolio",
        status: SectionStatus::ComingSoon,
        description:
            "Details of owned crypto assets, recent transactions, and diversification analysis.",
    },
    Section {
        label: "Transactions",
        route: "transactions",
        status: SectionStatus::ComingSoon,
        description: "Page to record, edit, and view transactions.",
    },
    Section {
        label: "BlockScan",
        route: BLOCKSCAN_ROUTE,
        status: SectionStatus::Available,
        description: "EVM account explorer.",
    },
    Section {
        label: "Analysis",
        route: "analysis",
        status: SectionStatus::Unavailable,
        description:
            "Features to view price prediction charts, market sentiment, and portfolio statistics.",
    },
    Section {
        label: "Alerts",
        route: "alerts",
        status: SectionStatus::Unavailable,
        description: "Set notifications for price changes and ROI.",
    },
    Section {
        label: "NFT & DeFi",
        route: "nft-defi",
        status: SectionStatus::ComingSoon,
        description: "Track NFT portfolios and DeFi activities (staking, farming).",
    },
    Section {
        label: "Settings",
        route: "settings",
        status: SectionStatus::ComingSoon,
        description: "Customize app preferences and user account settings.",
    },
];
