//! Glyph compositing, the instance-mask code and frame placement.

pub mod color;
pub mod compositor;
pub mod frame;
pub mod mask;

pub use color::{ColorSpec, Palette};
pub use compositor::{Compositor, opaque_bounds};
pub use frame::{FrameOptions, Margins, place};
pub use mask::{BoundingBox, MAX_GLYPH_INDEX, char_bounding_boxes, decode_index, encode_index};
