//! Application module: the model shared by the runtime and the UI.
//!
//! `App` owns every piece of page state (loader, player, countdown,
//! prompt, grain, scroll position) and is only touched from the UI thread.

mod model;

pub use model::*;
