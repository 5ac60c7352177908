//! # Spatial R-Tree
//!
//! An immutable, persistent R-tree over exact 2D geometries.
//!
//! ## Features
//!
//! - **Exact Predicates**: `intersects` and `distance` for every pair of
//!   points, line segments, rectangles and convex polygons
//! - **Persistent Tree**: Every insert and delete returns a new version that
//!   shares untouched subtrees with the old one
//! - **Split Strategies**: Quadratic, Linear and R*-style node splits
//! - **Lazy Queries**: Range search and incremental k-nearest search that
//!   stop as soon as the caller stops pulling
//! - **Thread Safe**: Tree versions are `Send + Sync`; [`SharedRTree`]
//!   publishes new versions to concurrent readers
//!
//! ## Quick Start
//!
//! ```rust
//! use spatial_rtree::{geometries, Context, Geometry, RTree, SplitStrategy};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let context = Context::builder()
//!     .max_children(8)
//!     .split_strategy(SplitStrategy::RStar)
//!     .build()?;
//!
//! let tree = RTree::create(context)
//!     .insert(geometries::point(1.0, 2.0)?, "fountain")
//!     .insert(geometries::line(0.0, 0.0, 10.0, 0.0)?, "road")
//!     .insert(geometries::polygon(&[2.0, 2.0, 2.0, 4.0, 4.0, 4.0, 4.0, 2.0])?, "park");
//!
//! let area: Geometry = geometries::rectangle(0.0, 0.0, 3.0, 3.0)?.into();
//! let mut found: Vec<_> = tree.search(&area).map(|e| *e.value()).collect();
//! found.sort();
//! assert_eq!(found, vec!["fountain", "park", "road"]);
//!
//! let here: Geometry = geometries::point(9.0, 1.0)?.into();
//! let (closest, distance) = tree.nearest(&here, 1).next().unwrap();
//! assert_eq!(*closest.value(), "road");
//! assert_eq!(distance, 1.0);
//!
//! let smaller = tree.delete(&geometries::point(1.0, 2.0)?.into(), &"fountain");
//! assert_eq!(smaller.size(), 2);
//! assert_eq!(tree.size(), 3);
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod entry;
pub mod errors;
pub mod geometry;
pub mod node;
pub mod rtree;
pub mod search;
pub mod shared;
pub mod split;
pub mod util;

pub use context::{Context, ContextBuilder};
pub use entry::Entry;
pub use errors::{SpatialError, SpatialResult};
pub use geometry::{geometries, Bounded, Geometry, Line, Point, Polygon, Rectangle};
pub use node::Node;
pub use rtree::{RTree, RTreeStats};
pub use search::{Nearest, Search};
pub use shared::SharedRTree;
pub use split::SplitStrategy;
