//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! - **[`app`]**: topic session, keyboard event loop, transport key mapping
//! - **[`panes`]**: stateless render functions for the code, scene,
//!   narration and status panes
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! Construct an [`App`] with a [`Catalog`] and call [`App::run`].
//!
//! [`Catalog`]: crate::topic::Catalog
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;

pub use app::App;
