//! Composition engine: document nodes → retained drawing tree.
//!
//! | Module | Role |
//! |--------|------|
//! | [`composer`] | per-node state machine, container pre-pass, id tagging |
//! | [`resolver`] | fill / stroke paint → brush / pen, paint servers |
//! | [`bounds`] | object-bounding-box transform synthesis |
//! | [`clip`], [`mask`] | `clip-path` / `mask` resolution and placement |
//! | [`alpha`] | transparent → opaque gray adjustment of mask content |
//! | [`session`] | options and the session id registry |

pub mod alpha;
pub mod bounds;
pub mod clip;
pub mod composer;
pub mod mask;
pub mod resolver;
pub mod session;

pub use alpha::{adjust_brush, adjust_color, adjust_drawing};
pub use bounds::object_bounding_box_transform;
pub use clip::{ClipRef, map_clip};
pub use composer::{Composer, ShapeOutcome, SkipReason};
pub use mask::{MaskRef, map_mask};
pub use resolver::PaintTarget;
pub use session::{ComposeOptions, Session};
