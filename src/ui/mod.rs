//! Widget layer: controls and chart panels drawn from [`crate::state::AppState`].

pub mod panels;
pub mod plot;
