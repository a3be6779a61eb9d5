//! Main content views

pub mod list;
