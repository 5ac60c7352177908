//! Node split strategies.
//!
//! A split receives the `max_children + 1` children of an overflowing node
//! and partitions them into two groups of at least `min_children` each.
//! Splits work on anything [`Bounded`], so the same code splits leaf entries
//! and branch children.

use itertools::Itertools;

use crate::geometry::{Bounded, Rectangle};

/// Policy used to partition the children of an overflowing node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SplitStrategy {
    /// Guttman's quadratic split: seeds waste the most area together.
    #[default]
    Quadratic,
    /// Guttman's linear split: seeds are the most separated pair along
    /// either axis.
    Linear,
    /// R*-style split: sorted distributions along both axes, picking the
    /// one with the least overlap, then the least total area.
    RStar,
}

impl SplitStrategy {
    /// Partitions `items` into two groups.
    ///
    /// Both groups get at least `min_children` items provided
    /// `items.len() >= 2 * min_children`. Ties are broken by position, so
    /// the result only depends on the input order.
    pub fn split<I: Bounded>(&self, items: Vec<I>, min_children: usize) -> (Vec<I>, Vec<I>) {
        let mbrs: Vec<Rectangle> = items.iter().map(Bounded::mbr).collect();
        let min_children = min_children.clamp(1, (mbrs.len() / 2).max(1));

        let in_first = match self {
            SplitStrategy::Quadratic => {
                let seeds = quadratic_seeds(&mbrs);
                distribute(&mbrs, seeds, min_children, true)
            }
            SplitStrategy::Linear => {
                let seeds = linear_seeds(&mbrs);
                distribute(&mbrs, seeds, min_children, false)
            }
            SplitStrategy::RStar => rstar_distribution(&mbrs, min_children),
        };

        log::trace!(
            "{:?} split of {} children into {} and {}",
            self,
            mbrs.len(),
            in_first.iter().filter(|&&first| first).count(),
            in_first.iter().filter(|&&first| !first).count()
        );

        let (first, second): (Vec<_>, Vec<_>) = items
            .into_iter()
            .zip(in_first)
            .partition(|(_, first)| *first);
        (
            first.into_iter().map(|(item, _)| item).collect(),
            second.into_iter().map(|(item, _)| item).collect(),
        )
    }
}

/// The pair whose combined MBR has the most dead space.
fn quadratic_seeds(mbrs: &[Rectangle]) -> (usize, usize) {
    let mut seeds = (0, 1);
    let mut worst = f64::NEG_INFINITY;
    for (i, j) in (0..mbrs.len()).tuple_combinations() {
        let waste = mbrs[i].union(&mbrs[j]).area() - mbrs[i].area() - mbrs[j].area();
        if waste > worst {
            worst = waste;
            seeds = (i, j);
        }
    }
    seeds
}

/// The pair with the greatest normalized separation along either axis.
fn linear_seeds(mbrs: &[Rectangle]) -> (usize, usize) {
    let axes: [(fn(&Rectangle) -> f64, fn(&Rectangle) -> f64); 2] =
        [(Rectangle::x1, Rectangle::x2), (Rectangle::y1, Rectangle::y2)];

    let mut seeds = (0, 1);
    let mut best = f64::NEG_INFINITY;
    for (low, high) in axes {
        // entry with the highest low side and entry with the lowest high side
        let mut highest_low = 0;
        let mut lowest_high = 0;
        let mut min_low = f64::INFINITY;
        let mut max_high = f64::NEG_INFINITY;
        for (i, mbr) in mbrs.iter().enumerate() {
            if low(mbr) > low(&mbrs[highest_low]) {
                highest_low = i;
            }
            if high(mbr) < high(&mbrs[lowest_high]) {
                lowest_high = i;
            }
            min_low = min_low.min(low(mbr));
            max_high = max_high.max(high(mbr));
        }

        if highest_low == lowest_high {
            lowest_high = if highest_low == 0 { 1 } else { 0 };
        }

        let width = max_high - min_low;
        let separation = low(&mbrs[highest_low]) - high(&mbrs[lowest_high]);
        let normalized = if width > 0.0 { separation / width } else { separation };
        if normalized > best {
            best = normalized;
            seeds = (lowest_high.min(highest_low), lowest_high.max(highest_low));
        }
    }
    seeds
}

/// Grows two groups from `seeds`. With `pick_next`, the next child is the one
/// with the strongest preference for a group; otherwise children are taken
/// in input order.
fn distribute(
    mbrs: &[Rectangle],
    seeds: (usize, usize),
    min_children: usize,
    pick_next: bool,
) -> Vec<bool> {
    let mut in_first = vec![false; mbrs.len()];
    in_first[seeds.0] = true;

    let mut groups = [(mbrs[seeds.0], 1usize), (mbrs[seeds.1], 1usize)];
    let mut remaining: Vec<usize> = (0..mbrs.len())
        .filter(|&i| i != seeds.0 && i != seeds.1)
        .collect();

    while !remaining.is_empty() {
        // a group that needs every remaining child to reach the minimum takes them all
        if groups[0].1 + remaining.len() <= min_children {
            for &i in &remaining {
                in_first[i] = true;
            }
            break;
        }
        if groups[1].1 + remaining.len() <= min_children {
            break;
        }

        let position = if pick_next {
            let mut best = 0;
            let mut best_preference = f64::NEG_INFINITY;
            for (position, &i) in remaining.iter().enumerate() {
                let preference = (groups[0].0.enlargement(&mbrs[i])
                    - groups[1].0.enlargement(&mbrs[i]))
                .abs();
                if preference > best_preference {
                    best_preference = preference;
                    best = position;
                }
            }
            best
        } else {
            0
        };
        let i = remaining.remove(position);

        let target = choose_group(&groups, &mbrs[i]);
        groups[target].0 = groups[target].0.union(&mbrs[i]);
        groups[target].1 += 1;
        in_first[i] = target == 0;
    }
    in_first
}

/// Smaller enlargement, then smaller resulting area, then fewer members,
/// then the first group.
fn choose_group(groups: &[(Rectangle, usize); 2], mbr: &Rectangle) -> usize {
    let key = |(group, count): &(Rectangle, usize)| {
        (group.enlargement(mbr), group.union(mbr).area(), *count)
    };
    let (e0, a0, c0) = key(&groups[0]);
    let (e1, a1, c1) = key(&groups[1]);

    if e1 < e0 || (e1 == e0 && (a1 < a0 || (a1 == a0 && c1 < c0))) {
        1
    } else {
        0
    }
}

fn rstar_distribution(mbrs: &[Rectangle], min_children: usize) -> Vec<bool> {
    let sort_keys: [fn(&Rectangle) -> (f64, f64); 4] = [
        |r| (r.x1(), r.x2()),
        |r| (r.x2(), r.x1()),
        |r| (r.y1(), r.y2()),
        |r| (r.y2(), r.y1()),
    ];

    let n = mbrs.len();
    let mut best: Option<(f64, f64, Vec<usize>, usize)> = None;
    for key in sort_keys {
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            let (ka, kb) = (key(&mbrs[a]), key(&mbrs[b]));
            ka.0.total_cmp(&kb.0).then(ka.1.total_cmp(&kb.1))
        });

        for k in min_children..=(n - min_children) {
            let first = bound(mbrs, &order[..k]);
            let second = bound(mbrs, &order[k..]);
            let overlap = first.intersection_area(&second);
            let area = first.area() + second.area();

            let better = match &best {
                None => true,
                Some((best_overlap, best_area, _, _)) => {
                    overlap < *best_overlap || (overlap == *best_overlap && area < *best_area)
                }
            };
            if better {
                best = Some((overlap, area, order.clone(), k));
            }
        }
    }

    let mut in_first = vec![false; n];
    if let Some((_, _, order, k)) = best {
        for &i in &order[..k] {
            in_first[i] = true;
        }
    }
    in_first
}

fn bound(mbrs: &[Rectangle], indices: &[usize]) -> Rectangle {
    indices
        .iter()
        .map(|&i| mbrs[i])
        .reduce(|acc, r| acc.union(&r))
        .unwrap_or_else(|| Rectangle::from_bounds(0.0, 0.0, 0.0, 0.0))
}
