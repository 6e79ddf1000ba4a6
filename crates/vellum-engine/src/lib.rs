//! Vellum engine crate.
//!
//! Turns a styled vector document into a retained drawing tree of
//! geometry + paint leaves and transform / clip / mask groups.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`coords`] | `Point`, `Rect`, `Transform` |
//! | [`paint`] | renderer-native colors, gradients, brushes, pens |
//! | [`scene`] | geometry, drawing fragments, paint spaces, the drawing stack |
//! | [`document`] | read-only document model traits |
//! | [`compose`] | the composition engine and session state |
//! | [`svg`] | `roxmltree`-backed document model |
//! | [`logging`] | `env_logger` initialization |
//!
//! # Quick start
//!
//! ```rust
//! use vellum_engine::compose::{ComposeOptions, Composer, Session};
//! use vellum_engine::svg::SvgDocument;
//!
//! let doc = SvgDocument::parse(r##"<svg xmlns="http://www.w3.org/2000/svg">
//!     <clipPath id="half" clipPathUnits="objectBoundingBox">
//!         <rect width="0.5" height="1"/>
//!     </clipPath>
//!     <circle cx="50" cy="50" r="40" fill="teal" clip-path="url(#half)"/>
//! </svg>"##).unwrap();
//!
//! let mut session = Session::new(ComposeOptions::default());
//! let root = Composer::new(&doc, &mut session).compose_document();
//! let group = root.children[0].as_group().unwrap();
//! assert!(group.clip.is_some());
//! ```

pub mod compose;
pub mod coords;
pub mod document;
pub mod error;
pub mod logging;
pub mod paint;
pub mod scene;
pub mod svg;

pub use error::ComposeError;
pub use vellum_paint;
