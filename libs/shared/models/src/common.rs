use serde::{Deserialize, Serialize};

/// Acknowledgement body returned by delete endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OkResponse {
    #[serde(default)]
    pub ok: bool,
}
