//! Geometry construction and predicate tests through the public API.

mod polygon_test;
mod predicate_test;
