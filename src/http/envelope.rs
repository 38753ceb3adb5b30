//! Response envelope shared by the account API.

use serde::Deserialize;

/// `{"code": 0, "msg": "...", "data": {...}}`
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope<T> {
    pub code: i64,
    #[serde(default, alias = "message")]
    pub msg: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}
