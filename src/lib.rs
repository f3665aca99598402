//! Tarefex: a single-list to-do manager for the terminal, backed by SQLite.

pub mod cli;
pub mod error;
pub mod export;
pub mod logging;
pub mod store;
pub mod task;
pub mod todo_list;
pub mod ui;
