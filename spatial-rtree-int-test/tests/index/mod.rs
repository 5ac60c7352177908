//! Index lifecycle and query tests across all split strategies.

mod lifecycle_test;
mod nearest_test;
mod search_test;
