use crate::config::FolioConfig;

pub mod config;
pub mod index;
pub mod list;
pub mod view;

use index::IndexReport;
use list::{FilterButton, ListView};
use view::OpenPost;

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

/// Structured outcome of a command. Clients decide how to present it.
#[derive(Debug, Default)]
pub struct CmdResult {
    pub listing: Option<ListView>,
    pub filters: Vec<FilterButton>,
    pub opened: Option<OpenPost>,
    pub index_report: Option<IndexReport>,
    pub config: Option<FolioConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listing(mut self, listing: ListView, filters: Vec<FilterButton>) -> Self {
        self.listing = Some(listing);
        self.filters = filters;
        self
    }

    pub fn with_opened(mut self, post: OpenPost) -> Self {
        self.opened = Some(post);
        self
    }

    pub fn with_index_report(mut self, report: IndexReport) -> Self {
        self.index_report = Some(report);
        self
    }

    pub fn with_config(mut self, config: FolioConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
