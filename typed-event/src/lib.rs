//! Typed Event Library
//!
//! A minimal, strongly typed publish/subscribe primitive. An [`Event`] holds an
//! ordered list of callbacks that share one signature and calls all of them,
//! in subscription order, when dispatched.
//!
//! # Architecture
//!
//! This library is intentionally minimal:
//! - One event, one callback shape, checked at compile time
//! - Subscribe, unsubscribe (first occurrence), dispatch
//! - Dispatch is synchronous and fails fast on the first subscriber error
//!
//! The library does NOT:
//! - Route events by name or topic
//! - Deliver asynchronously or defer delivery
//! - Order subscribers by priority or filter them
//! - Isolate subscribers from each other's failures
//! - Synchronize access from multiple threads
//!
//! # Example Usage
//!
//! ```
//! use std::rc::Rc;
//! use typed_event::Event;
//!
//! #[derive(Debug)]
//! struct Rejected;
//!
//! let on_save: Event<dyn Fn(&str) -> Result<(), Rejected>> = Event::new();
//!
//! let guard = on_save.event_listener(Rc::new(|path: &str| {
//!     if path.ends_with(".tmp") {
//!         Err(Rejected)
//!     } else {
//!         Ok(())
//!     }
//! }));
//!
//! assert!(on_save.dispatch(("notes.txt",)).is_ok());
//! assert!(on_save.dispatch(("scratch.tmp",)).is_err());
//!
//! on_save.unsubscribe(&guard).unwrap();
//! ```

// Public modules
pub mod event;
pub mod handler;
pub mod types;

// Re-export main types for convenience
pub use event::Event;
pub use handler::{DispatchError, Handler, Outcome};
pub use types::{EventError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
