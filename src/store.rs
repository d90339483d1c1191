//! Centralized UI preferences: theme mode and selected network.

use crate::config::Config;
use crate::network::Network;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    /// Persisted name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "LIGHT",
            Self::Dark => "DARK",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "LIGHT" => Some(Self::Light),
            "DARK" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreAction {
    ToggleTheme,
    SetTheme(ThemeMode),
    SetNetwork(Network),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Store {
    pub theme: ThemeMode,
    pub network: Network,
}

impl Store {
    pub fn from_config(config: &Config) -> Self {
        Self {
            theme: config.theme(),
            network: config.network(),
        }
    }

    /// Apply an action. Returns true if the state changed.
    pub fn dispatch(&mut self, action: StoreAction) -> bool {
        let before = *self;
        match action {
            StoreAction::ToggleTheme => self.theme = self.theme.toggled(),
            StoreAction::SetTheme(mode) => self.theme = mode,
            StoreAction::SetNetwork(network) => self.network = network,
        }
        *self != before
    }
}
