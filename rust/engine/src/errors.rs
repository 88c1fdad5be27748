use thiserror::Error;

/// Failures of the fallible, non-core operations: configuration, dealing
/// and mulligans.
///
/// Illegal betting actions are not errors; see [`crate::betting::ActionRejection`].
#[derive(Debug, Error)]
pub enum CombatError {
    #[error("Failed to read config file: {0}")]
    ConfigIo(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
    #[error("Failed to encode combat record: {0}")]
    Record(#[from] serde_json::Error),
    #[error("Deck exhausted: needed {needed} cards, {remaining} remaining")]
    DeckExhausted { needed: usize, remaining: usize },
    #[error("Mulligan rejected: {0}")]
    MulliganRejected(String),
}
