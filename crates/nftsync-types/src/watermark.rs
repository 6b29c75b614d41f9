use std::fmt;

use serde::{Deserialize, Serialize};

/// The two independent block streams the sync engine tracks a watermark
/// for. Each advances on its own driver's cadence and never regresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stream {
    Mint,
    Order
}

impl Stream {
    /// The `stream` column value persisted in the `watermark` table.
    pub fn as_str(self) -> &'static str {
        match self {
            Stream::Mint => "mint",
            Stream::Order => "order"
        }
    }
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
