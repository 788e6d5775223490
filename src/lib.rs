//! Type-directed YAML marshaling.
//!
//! This facade re-exports the member crates of the workspace:
//!
//! - [`marshal`]: field descriptor cache, traversal engine and entry points.
//!
//! ```
//! use tyaml::marshal::{Marshal, marshal, unmarshal};
//!
//! #[derive(Marshal, Default, Debug, PartialEq)]
//! pub struct Point {
//!     #[marshal("x")]
//!     pub x: i64,
//!     #[marshal("y,c")]
//!     pub y: i64,
//! }
//!
//! let bytes = marshal(&Point::default()).unwrap();
//! assert_eq!(bytes, b"x: 0\n");
//!
//! let mut point = Point::default();
//! unmarshal(b"x: 5", &mut point).unwrap();
//! assert_eq!(point, Point { x: 5, y: 0 });
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use ty_marshal as marshal;
