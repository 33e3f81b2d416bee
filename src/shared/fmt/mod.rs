//! Human-readable formatting for chart labels and tooltips.

pub mod num;
