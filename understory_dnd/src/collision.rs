// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolving which droppable a dragged layout is over.

use crate::geometry::Layout;

/// How the active droppable is chosen while dragging.
///
/// Candidates are visited in droppable registration order. On an exact tie the
/// currently active droppable is kept; otherwise the first candidate wins.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CollisionStrategy {
    /// The droppable whose center is nearest to the dragged layout's center.
    #[default]
    ClosestCenter,
    /// The droppable with the largest overlap area. No overlap means no droppable.
    MostIntersecting,
}

impl CollisionStrategy {
    /// Picks the droppable that `dragged` collides with.
    pub fn detect<'a, K, I>(
        self,
        dragged: Layout,
        candidates: I,
        current: Option<&K>,
    ) -> Option<&'a K>
    where
        K: PartialEq + 'a,
        I: IntoIterator<Item = (&'a K, Layout)>,
    {
        let center = dragged.center();
        let dragged_rect = dragged.to_rect();
        let mut best: Option<(&'a K, f64)> = None;

        for (id, layout) in candidates {
            // Higher score wins.
            let score = match self {
                Self::ClosestCenter => -center.distance_squared(layout.center()),
                Self::MostIntersecting => {
                    let area = dragged_rect.intersect(layout.to_rect()).area();
                    if area <= 0.0 {
                        continue;
                    }
                    area
                }
            };
            let better = match best {
                None => true,
                Some((_, best_score)) => {
                    score > best_score || (score == best_score && current == Some(id))
                }
            };
            if better {
                best = Some((id, score));
            }
        }

        best.map(|(id, _)| id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn row() -> alloc::vec::Vec<(u32, Layout)> {
        vec![
            (1, Layout::new(0.0, 0.0, 100.0, 50.0)),
            (2, Layout::new(100.0, 0.0, 100.0, 50.0)),
            (3, Layout::new(200.0, 0.0, 100.0, 50.0)),
        ]
    }

    #[test]
    fn closest_center_picks_nearest() {
        let row = row();
        let dragged = Layout::new(130.0, 0.0, 100.0, 50.0);
        let hit =
            CollisionStrategy::ClosestCenter.detect(dragged, row.iter().map(|(k, l)| (k, *l)), None);
        assert_eq!(hit, Some(&2));
    }

    #[test]
    fn ties_prefer_current_then_first() {
        let row = row();
        // Exactly between 1 and 2.
        let dragged = Layout::new(50.0, 0.0, 100.0, 50.0);
        let strategy = CollisionStrategy::ClosestCenter;

        let hit = strategy.detect(dragged, row.iter().map(|(k, l)| (k, *l)), None);
        assert_eq!(hit, Some(&1));

        let hit = strategy.detect(dragged, row.iter().map(|(k, l)| (k, *l)), Some(&2));
        assert_eq!(hit, Some(&2));
    }

    #[test]
    fn most_intersecting_requires_overlap() {
        let row = row();
        let strategy = CollisionStrategy::MostIntersecting;

        let dragged = Layout::new(180.0, 10.0, 100.0, 50.0);
        let hit = strategy.detect(dragged, row.iter().map(|(k, l)| (k, *l)), None);
        assert_eq!(hit, Some(&3));

        let far = Layout::new(1000.0, 1000.0, 10.0, 10.0);
        assert_eq!(strategy.detect(far, row.iter().map(|(k, l)| (k, *l)), None), None);
    }

    #[test]
    fn no_candidates_no_collision() {
        let none: [(&u32, Layout); 0] = [];
        let hit = CollisionStrategy::default().detect(Layout::default(), none, None);
        assert_eq!(hit, None);
    }
}
