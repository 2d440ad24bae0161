//! Interactive bank-marketing dashboard.
//!
//! The data layer (`data`) loads the customer table, applies the age/job
//! filter and derives the chart inputs; `state` owns one session's refresh
//! cycle; `app` and `ui` draw it with egui.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod state;
pub mod ui;

pub use config::DashboardConfig;
pub use data::loader::{load, load_dataset, LoadError};
pub use state::AppState;
