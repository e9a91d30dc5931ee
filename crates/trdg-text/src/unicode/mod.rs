//! Unicode utilities for trdg-text.

pub mod marks;

pub use marks::is_zero_advance_mark;
