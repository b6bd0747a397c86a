//! Terminal form for generating a list digest.
//!
//! The form collects a list id (or list URL) and a date range, hands them to
//! a [`roundup_core::DigestPipeline`] on a background task and renders the
//! outcome in a scrollable panel.
mod feeders;
mod form;
mod panel;
mod styles;
mod tui;
mod view;

pub use feeders::spawn_tui_feeders;
pub use form::{DigestForm, Field, FormError, FormInput, MISSING_INPUT, TextInput};
pub use panel::{NO_POSTS, PanelLine, ResultPanel};
pub use tui::{DigestDeps, TuiApp, TuiMsg, run_tui};
