//! Closest boundary point queries

use crate::bsp::NodeId;
use crate::float_types::Real;
use crate::partition::{Hyperplane, HyperplaneSubset, Point};
use crate::region::RegionBspTree;
use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A node queued with a cost; the heap pops the highest cost first, so costs
/// are negated distance lower bounds.
#[derive(Copy, Clone)]
struct WeightedValue<T> {
    value: T,
    cost: Real,
}

impl<T> WeightedValue<T> {
    #[inline]
    const fn new(value: T, cost: Real) -> Self {
        Self { value, cost }
    }
}

impl<T> PartialEq for WeightedValue<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.cost.eq(&other.cost)
    }
}

impl<T> Eq for WeightedValue<T> {}

impl<T> PartialOrd for WeightedValue<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for WeightedValue<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        if self.cost < other.cost {
            Ordering::Less
        } else if self.cost > other.cost {
            Ordering::Greater
        } else {
            Ordering::Equal
        }
    }
}

impl<H: Hyperplane> RegionBspTree<H> {
    /// Point of the region boundary closest to `point`.
    ///
    /// Returns `None` for NaN points and for regions without boundary (full
    /// or empty). When several boundary points are at the same distance, the
    /// first one found wins; which one that is depends on the tree layout.
    pub fn project(&self, point: &H::Point) -> Option<H::Point> {
        self.project_with(point, |_, _, _| false)
    }

    /// Like [`Self::project`], calling `prefer(point, current, candidate)` to
    /// decide whether an equally distant `candidate` replaces `current`.
    pub fn project_with<F>(&self, point: &H::Point, mut prefer: F) -> Option<H::Point>
    where
        F: FnMut(&H::Point, &H::Point, &H::Point) -> bool,
    {
        if point.is_nan() {
            return None;
        }

        let mut best: Option<(Real, H::Point)> = None;
        let mut queue: BinaryHeap<WeightedValue<NodeId>> = BinaryHeap::new();
        queue.push(WeightedValue::new(self.tree.root(), -0.0));

        while let Some(WeightedValue { value: id, cost }) = queue.pop() {
            let bound = -cost;
            if best.as_ref().is_some_and(|(distance, _)| bound > *distance) {
                // every remaining subtree is farther than the best candidate
                break;
            }

            let node = &self.tree[id];
            let (Some(hyperplane), Some((minus, plus))) = (node.cut_hyperplane(), node.children())
            else {
                continue;
            };
            let separation = hyperplane.separation(point);
            let precision = hyperplane.precision();

            if best.as_ref().is_none_or(|(distance, _)| precision.lte(separation, *distance)) {
                if let Ok(Some(boundary)) = self.cut_boundary(id) {
                    for fragment in boundary.fragments() {
                        let candidate = fragment.closest(point);
                        let distance = candidate.distance(point);
                        best = match best.take() {
                            None => Some((distance, candidate)),
                            Some((best_distance, current)) => {
                                if precision.lt(distance, best_distance)
                                    || (precision.eq(distance, best_distance)
                                        && prefer(point, &current, &candidate))
                                {
                                    Some((distance, candidate))
                                } else {
                                    Some((best_distance, current))
                                }
                            },
                        };
                    }
                }
            }

            let (near, far) = if hyperplane.offset(point) > 0.0 {
                (plus, minus)
            } else {
                (minus, plus)
            };
            queue.push(WeightedValue::new(near, -bound));
            queue.push(WeightedValue::new(far, -bound.max(separation)));
        }

        best.map(|(_, closest)| closest)
    }
}
