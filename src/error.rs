#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("controller config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("no element matches {selector}")]
    MissingElement { selector: &'static str },
    #[error("no elements match {selector}")]
    MissingCollection { selector: &'static str },
}

impl BindingError {
    pub fn selector(&self) -> &'static str {
        match self {
            Self::MissingElement { selector } | Self::MissingCollection { selector } => selector,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("unknown portfolio category {0:?}")]
    UnknownCategory(String),
}
