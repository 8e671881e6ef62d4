use serde::{Deserialize, Serialize};

/// Collection-wide status, not tracked per operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStatus {
    pub is_loading: bool,
    pub error: Option<String>,
}

impl StoreStatus {
    pub fn pending() -> Self {
        Self {
            is_loading: true,
            error: None,
        }
    }

    pub fn settled(error: Option<String>) -> Self {
        Self {
            is_loading: false,
            error,
        }
    }
}
