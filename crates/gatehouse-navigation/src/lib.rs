//! Gatehouse Navigation
//!
//! The session store only needs "go to path". This crate supplies:
//! - [`Route`]: a validated, absolute in-app path
//! - [`Navigator`]: the capability the store calls into
//! - [`HistoryNavigator`]: an in-memory router history

mod error;
mod history;
mod navigator;
mod route;

pub use error::NavigationError;
pub use history::HistoryNavigator;
pub use navigator::Navigator;
pub use route::Route;

pub type Result<T> = std::result::Result<T, NavigationError>;
