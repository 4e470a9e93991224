//! Reusable widgets shared by the dashboard panels

pub mod components;
