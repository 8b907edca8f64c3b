use std::path::Path;

use serde::Deserialize;

/// The text content of the reveal card. Fields omitted from a card file fall
/// back to the built-in card.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CardConfig {
    /// Symbol shown inside the card.
    pub symbol: String,
    /// Page heading.
    pub title: String,
    /// Short teaser shown while the card is locked.
    pub hint: String,
    /// The message revealed on click.
    pub content: String,
    /// Heading of the closing panel.
    pub final_title: String,
    /// Body of the closing panel.
    pub final_message: String,
    /// Footer line at the bottom of the page.
    pub footer: String,
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            symbol: "♥".to_string(),
            title: "For You".to_string(),
            hint: "A Special Message".to_string(),
            content: "Some words wait for the right moment. This one waited for you. \
                      Thank you for being here, today and every day."
                .to_string(),
            final_title: "With Love".to_string(),
            final_message: "Every moment shared is a gift worth keeping.".to_string(),
            footer: "MADE WITH LOVE".to_string(),
        }
    }
}

impl CardConfig {
    /// Load a card from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }
}

/// Errors that can occur when loading a card file
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read card file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("invalid card file: {0}")]
    InvalidFormat(#[from] serde_yaml::Error),
}
