//! Retained drawing tree.
//!
//! Responsibilities:
//! - path geometry (`Geometry`) in local space with an optional transform
//! - leaf and group fragments forming the output tree
//! - paint-space mappings for bounding-box-relative masks
//! - the drawing stack that routes fragments to the open group

pub mod fragment;
pub mod geometry;
pub mod mapping;
pub mod stack;

pub use fragment::{DrawingFragment, DrawingGroup, FragmentMeta, GeometryDrawing};
pub use geometry::{FillRule, Geometry, PathSeg};
pub use mapping::{BoundsMapping, MaskBrush, PaintSpace, Stretch};
pub use stack::{DrawingStack, Finisher, GroupScope};
