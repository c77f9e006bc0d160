//! # Pomo Core Library
//!
//! This library implements the interval engine behind the Pomo timer:
//! alternating timed work/break periods that are persisted, advanced in
//! real time, and safe to pause, resume, and cancel concurrently.
//!
//! ## Architecture
//!
//! - **Interval entity**: one timed period with a category, a lifecycle
//!   state, and planned/actual durations
//! - **Repository**: durable storage abstraction for interval records;
//!   in-memory and SQLite backends ship with the crate
//! - **Selector**: decides the category and duration of the next interval
//!   from stored history
//! - **Driver**: the asynchronous tick loop that advances one interval to
//!   completion, pause, or cancellation
//! - **Pause controller**: out-of-band transition of a running interval
//!   to paused, safe to invoke while the driver is ticking
//!
//! All actors communicate only through the repository; there is no shared
//! live interval object between the driver and an external pause.
//!
//! ## Key Components
//!
//! - [`Interval`], [`Category`], [`IntervalState`]: the data model
//! - [`Config`]: durations plus a repository handle
//! - [`next_interval`], [`driver::start`], [`pause`]: the three entry
//!   points invoked by the presentation layer

pub mod config;
pub mod driver;
pub mod error;
pub mod interval;
pub mod pause;
pub mod repository;
pub mod selector;

pub use config::Config;
pub use driver::CancelToken;
pub use error::{EngineError, RepositoryError};
pub use interval::{Category, Interval, IntervalState};
pub use pause::pause;
pub use repository::memory::InMemoryRepository;
pub use repository::sqlite::SqliteRepository;
pub use repository::{data_dir, IntervalRepository};
pub use selector::next_interval;
