//! # Folio Architecture
//!
//! Folio is the journal/notebook engine of a portfolio site. It is a library that
//! happens to ship a CLI: the same core drives the `folio` binary, a static page
//! build, or any other client that can feed it page events.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, prints results, sets up logging        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns page state: post snapshot, filter, viewer           │
//! │  - Dispatches page events to commands                       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - list: PostRenderer, the filtered and sorted view model   │
//! │  - view: PostViewer, the Closed/Open state machine          │
//! │  - index: manifest builder over the content tree            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - ContentSource trait: FileSource, MemorySource            │
//! │  - PostStore: manifest snapshot, never fails to load        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Painting is kept apart from computing: commands return view models
//! ([`commands::list::ListView`], [`commands::view::OpenPost`]) and
//! [`paint`] or the CLI turn them into HTML or terminal output.
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits.
//! Diagnostics go through `tracing`; reader-facing notices come back as
//! [`commands::CmdMessage`]s.
//!
//! ## Module Overview
//!
//! - [`api`]: facade and page events
//! - [`commands`]: list, view, index and config logic
//! - [`store`]: content sources and the post snapshot
//! - [`model`]: `PostSummary`, `Manifest`, `Category`, `Filter`
//! - [`markdown`]: markdown to HTML, heading lookup
//! - [`paint`]: HTML templates for list, filters and modal
//! - [`config`]: `folio.json` handling
//! - [`init`]: site root discovery and API construction
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod markdown;
pub mod model;
pub mod paint;
pub mod store;
