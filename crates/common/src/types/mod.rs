use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: &'static str,
}

/// One-shot user-facing message carried across a redirect.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct FlashMessage {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FlashMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self { message: Some(text.into()) }
    }
}
