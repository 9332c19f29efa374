//! Course reference

use serde::{Deserialize, Serialize};

/// Course a meeting is attached to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Course {
    pub id: i64,
    pub full_name: String,
}
