//! Result types returned to JavaScript

use crate::engine::Range;
use serde::{Deserialize, Serialize};

/// Result of a style command
#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CommandResult {
    /// Range covering the styled content, for the host to reselect
    pub range: Range,
    /// Document markup after the command
    pub markup: String,
}
