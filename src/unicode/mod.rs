//! Unicode utilities for chip label width.

mod width;

pub use width::{WidthMethod, display_width_with_method};
