//! Index-wide configuration.

use crate::errors::{SpatialError, SpatialResult};
use crate::split::SplitStrategy;

/// Default maximum number of children per node.
pub const DEFAULT_MAX_CHILDREN: usize = 4;

/// Fraction of `max_children` used as `min_children` when none is given.
pub const DEFAULT_FILL_FACTOR: f64 = 0.4;

/// Configuration shared by every version of a tree.
///
/// A `Context` can only be obtained through [`Context::builder`] or
/// [`Context::default`], so it always satisfies
/// `min_children >= 1` and `max_children >= 2 * min_children`.
///
/// # Examples
///
/// ```rust
/// use spatial_rtree::{Context, SplitStrategy};
///
/// let context = Context::builder()
///     .max_children(8)
///     .min_children(3)
///     .split_strategy(SplitStrategy::RStar)
///     .build()
///     .unwrap();
/// assert_eq!(context.max_children(), 8);
///
/// assert!(Context::builder().max_children(4).min_children(3).build().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Context {
    max_children: usize,
    min_children: usize,
    split_strategy: SplitStrategy,
}

impl Context {
    /// Starts building a context from the defaults.
    pub fn builder() -> ContextBuilder {
        ContextBuilder::default()
    }

    /// Maximum number of children (entries or nodes) per node.
    pub fn max_children(&self) -> usize {
        self.max_children
    }

    /// Minimum number of children of every non-root node.
    pub fn min_children(&self) -> usize {
        self.min_children
    }

    /// Strategy used when a node overflows.
    pub fn split_strategy(&self) -> SplitStrategy {
        self.split_strategy
    }
}

impl Default for Context {
    fn default() -> Self {
        Context {
            max_children: DEFAULT_MAX_CHILDREN,
            min_children: default_min_children(DEFAULT_MAX_CHILDREN),
            split_strategy: SplitStrategy::default(),
        }
    }
}

/// Fluent builder for [`Context`].
#[derive(Debug, Clone)]
pub struct ContextBuilder {
    max_children: usize,
    min_children: Option<usize>,
    split_strategy: SplitStrategy,
}

impl Default for ContextBuilder {
    fn default() -> Self {
        ContextBuilder {
            max_children: DEFAULT_MAX_CHILDREN,
            min_children: None,
            split_strategy: SplitStrategy::default(),
        }
    }
}

impl ContextBuilder {
    /// Sets the maximum number of children per node.
    pub fn max_children(mut self, max_children: usize) -> Self {
        self.max_children = max_children;
        self
    }

    /// Sets the minimum number of children per non-root node.
    ///
    /// When not set, it defaults to 40% of `max_children` (at least 1).
    pub fn min_children(mut self, min_children: usize) -> Self {
        self.min_children = Some(min_children);
        self
    }

    /// Sets the split strategy.
    pub fn split_strategy(mut self, split_strategy: SplitStrategy) -> Self {
        self.split_strategy = split_strategy;
        self
    }

    /// Shorthand for the R*-style split strategy.
    pub fn star(self) -> Self {
        self.split_strategy(SplitStrategy::RStar)
    }

    /// Validates the settings and creates the context.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if `min_children < 1` or
    /// `max_children < 2 * min_children`.
    pub fn build(self) -> SpatialResult<Context> {
        let min_children = self
            .min_children
            .unwrap_or_else(|| default_min_children(self.max_children));

        if min_children < 1 {
            log::error!("min_children must be at least 1");
            return Err(SpatialError::Configuration(
                "min_children must be at least 1".to_string(),
            ));
        }
        if min_children > self.max_children / 2 {
            log::error!(
                "max_children {} is less than twice min_children {}",
                self.max_children,
                min_children
            );
            return Err(SpatialError::Configuration(format!(
                "max_children ({}) must be at least twice min_children ({})",
                self.max_children, min_children
            )));
        }

        Ok(Context {
            max_children: self.max_children,
            min_children,
            split_strategy: self.split_strategy,
        })
    }
}

fn default_min_children(max_children: usize) -> usize {
    ((max_children as f64 * DEFAULT_FILL_FACTOR).round() as usize).max(1)
}
