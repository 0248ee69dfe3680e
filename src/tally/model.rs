use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Item names are keys, compared after lowercasing. Whitespace is kept as typed.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
}

/// Capitalizes the first character for display ("apple" -> "Apple").
pub fn display_name(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub quantity: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn new(name: impl Into<String>, quantity: u32) -> Self {
        let now = Utc::now();
        Self {
            name: name.into(),
            quantity,
            created_at: now,
            updated_at: now,
        }
    }
}
