use crate::config::TallyConfig;
use crate::model::Item;
use std::path::PathBuf;

pub mod config;
pub mod decrement;
pub mod increment;
pub mod init;
pub mod list;

#[derive(Debug, Clone)]
pub struct TallyPaths {
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What a quantity mutation did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Created,
    Incremented { quantity: u32 },
    Decremented { quantity: u32 },
    Removed,
    /// Decrement of a name with no record. Not an error.
    Missing,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub mutation: Option<Mutation>,
    pub listed_items: Vec<Item>,
    pub config: Option<TallyConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = Some(mutation);
        self
    }

    pub fn with_listed_items(mut self, items: Vec<Item>) -> Self {
        self.listed_items = items;
        self
    }

    pub fn with_config(mut self, config: TallyConfig) -> Self {
        self.config = Some(config);
        self
    }
}
