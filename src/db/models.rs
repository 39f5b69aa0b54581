use serde::{Deserialize, Serialize};

use crate::google_oauth::credentials::TokenBundle;

/// One stored identity with its current token bundle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub email: String,
    pub bundle: TokenBundle,
}
