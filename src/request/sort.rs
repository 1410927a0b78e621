use serde::Deserialize;

use crate::request::SortOrder;

/// Sort on a single column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TdsSort {
    pub column: String,
    pub order: SortOrder,
}

impl TdsSort {
    pub fn new(column: impl Into<String>, order: SortOrder) -> Self {
        TdsSort {
            column: column.into(),
            order,
        }
    }
}
