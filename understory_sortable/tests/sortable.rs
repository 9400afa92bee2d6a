// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_sortable` crate.
//!
//! These drive a small list of sortables through a drag and check the
//! transforms each participant reports, with a focus on the order/offset
//! interaction and the attach/detach pairing.

use kurbo::Point;
use understory_dnd::{DragDropContext, Layout, TargetKind, Transform, Transformer};
use understory_sortable::{
    SORTABLE_OFFSET, Sortable, SortableContext, slot_delta, sort_delta,
};

type Item = Sortable<char, Option<Transform>>;

const A: Layout = Layout::new(0.0, 0.0, 100.0, 50.0);
const B: Layout = Layout::new(100.0, 0.0, 100.0, 50.0);
const C: Layout = Layout::new(200.0, 0.0, 100.0, 50.0);

/// Three attached sortables `a`, `b`, `c` laid out in a row.
fn row() -> (DragDropContext<char>, SortableContext<char>, Vec<Item>) {
    let mut dnd = DragDropContext::new();
    let list = SortableContext::new(['a', 'b', 'c']);
    let mut items = Vec::new();
    for (id, layout) in [('a', A), ('b', B), ('c', C)] {
        let mut item = Item::new(id, list.clone());
        item.attach(&mut dnd);
        dnd.set_layout(&id, layout);
        items.push(item);
    }
    (dnd, list, items)
}

#[test]
fn no_reorder_means_no_offsets() {
    let (mut dnd, list, items) = row();
    dnd.drag_start('b', Point::new(150.0, 25.0)).unwrap();

    assert_eq!(list.sorted_ids(), list.initial_ids());
    for item in &items {
        assert_eq!(sort_delta(item.id(), &list.order(), &dnd), Transform::ZERO);
        if !item.is_active_draggable(&dnd) {
            assert_eq!(item.transform(&dnd), Transform::ZERO);
        }
    }
}

#[test]
fn swapped_neighbour_shifts_by_dragged_width() {
    let (mut dnd, list, items) = row();
    dnd.drag_start('b', Point::new(150.0, 25.0)).unwrap();
    list.set_sorted_ids(['b', 'a', 'c']).unwrap();

    // `a` moved 0 -> 1 and sits left of `b`: shift right by `b`'s width.
    assert_eq!(sort_delta(&'a', &list.order(), &dnd), Transform::new(100.0, 0.0));
    assert_eq!(items[0].transform(&dnd), Transform::new(100.0, 0.0));
    // `c` did not move.
    assert_eq!(items[2].transform(&dnd), Transform::ZERO);
}

#[test]
fn active_draggable_without_overlay_follows_pointer() {
    let (mut dnd, list, items) = row();
    let b = &items[1];
    dnd.drag_start('b', Point::new(150.0, 25.0)).unwrap();
    dnd.drag_move(Point::new(60.0, 30.0));
    list.set_sorted_ids(['b', 'a', 'c']).unwrap();

    assert!(b.is_active_draggable(&dnd));
    assert_eq!(b.transform(&dnd), Transform::new(-90.0, 5.0));
    assert_eq!(b.transform(&dnd), dnd.draggable_transform(&'b').unwrap());

    // With an overlay, the original element keeps its droppable transform.
    dnd.set_overlay(true);
    assert_eq!(b.transform(&dnd), dnd.droppable_transform(&'b').unwrap());
    assert_eq!(b.transform(&dnd), Transform::ZERO);
}

#[test]
fn moving_back_and_forth_negates_the_offset() {
    let five = Layout::new(0.0, 0.0, 100.0, 50.0);
    let two = Layout::new(300.0, 60.0, 120.0, 40.0);
    let forward = slot_delta(Some(2), Some(5), Some(five), Some(two));
    let backward = slot_delta(Some(5), Some(2), Some(five), Some(two));

    assert_eq!(forward, Transform::new(120.0, 40.0));
    assert_eq!(backward, -forward);
}

#[test]
fn unmounted_participant_fails_soft() {
    let (mut dnd, list, mut items) = row();
    dnd.drag_start('a', Point::new(50.0, 25.0)).unwrap();
    list.set_sorted_ids(['a', 'c', 'b']).unwrap();

    // `c` unmounts mid-drag: its layout goes away, its slot does not.
    assert!(items[2].detach(&mut dnd));
    assert_eq!(dnd.droppable_layout(&'c'), None);
    assert_ne!(list.current_index(&'c'), list.initial_index(&'c'));
    assert_eq!(sort_delta(&'c', &list.order(), &dnd), Transform::ZERO);
    assert_eq!(items[2].transform(&dnd), Transform::ZERO);

    // Then the list forgets it as well.
    list.set_ids(['a', 'b']);
    assert_eq!(list.current_index(&'c'), None);
    assert_eq!(sort_delta(&'c', &list.order(), &dnd), Transform::ZERO);
}

#[test]
fn offset_composes_with_other_transformers() {
    let (mut dnd, list, items) = row();
    // Runs before the sortable offset.
    dnd.add_transformer(
        TargetKind::Droppables,
        'a',
        Transformer::new("early", 10, |t, _: &DragDropContext<char>| {
            t + Transform::new(0.0, 7.0)
        }),
    );
    // Runs after it: halves the accumulated offset.
    dnd.add_transformer(
        TargetKind::Droppables,
        'a',
        Transformer::new("late", 200, |t, _: &DragDropContext<char>| {
            Transform::new(t.x / 2.0, t.y / 2.0)
        }),
    );

    dnd.drag_start('b', Point::new(150.0, 25.0)).unwrap();
    list.set_sorted_ids(['b', 'a', 'c']).unwrap();

    let first = items[0].transform(&dnd);
    assert_eq!(first, Transform::new(50.0, 3.5));
    // Pure fold: asking again gives the same answer.
    assert_eq!(items[0].transform(&dnd), first);
}

#[test]
fn detach_removes_the_offset_immediately() {
    let (mut dnd, list, mut items) = row();
    dnd.drag_start('b', Point::new(150.0, 25.0)).unwrap();
    list.set_sorted_ids(['b', 'a', 'c']).unwrap();
    let before = dnd.transformers().len();

    let a = &mut items[0];
    assert!(a.detach(&mut dnd));
    assert_eq!(dnd.transformers().len(), before - 1);
    assert!(!dnd.transformers().contains(TargetKind::Droppables, &'a', SORTABLE_OFFSET));
    assert_eq!(a.transform(&dnd), Transform::ZERO);

    // Re-attaching registers exactly one transformer again.
    assert!(a.attach(&mut dnd));
    dnd.set_layout(&'a', A);
    assert_eq!(dnd.transformers().len(), before);
    assert_eq!(a.transform(&dnd), Transform::new(100.0, 0.0));
}

#[test]
fn full_drag_updates_elements_and_commits() {
    let (mut dnd, list, mut items) = row();
    for item in &mut items {
        item.bind(&mut dnd, None);
    }

    // Drag `a` over `c`.
    let activators = items[0].drag_activators();
    activators
        .dispatch(
            understory_dnd::ActivatorEvent::PointerDown,
            &mut dnd,
            Point::new(50.0, 25.0),
        )
        .unwrap();
    dnd.drag_move(Point::new(250.0, 25.0));
    assert!(items[2].is_active_droppable(&dnd));
    assert!(list.track(&dnd));
    assert_eq!(list.sorted_ids(), ['b', 'c', 'a']);

    let touched: Vec<bool> = items.iter_mut().map(|item| item.refresh(&dnd)).collect();
    assert_eq!(touched, [true, true, true]);
    assert_eq!(items[0].element(), Some(&Some(Transform::new(200.0, 0.0))));
    assert_eq!(items[1].element(), Some(&Some(Transform::new(-100.0, 0.0))));
    assert_eq!(items[2].element(), Some(&Some(Transform::new(-100.0, 0.0))));

    let end = dnd.drag_end().unwrap();
    assert_eq!(list.on_drag_end(&end), Some(vec!['b', 'c', 'a']));

    // After the commit every offset collapses back to the identity.
    for item in &mut items {
        item.refresh(&dnd);
        assert_eq!(item.element(), Some(&None));
    }
}

#[test]
fn set_ref_links_and_unlinks() {
    let (mut dnd, _list, mut items) = row();
    let b = &mut items[1];

    assert!(b.set_ref(&mut dnd, Some(Some(Transform::new(3.0, 3.0)))).is_none());
    assert_eq!(b.element(), Some(&None));
    assert!(dnd.node_options(TargetKind::Draggables, &'b').is_some());

    let previous = b.set_ref(&mut dnd, None);
    assert_eq!(previous, Some(None));
    assert!(b.element().is_none());
    assert!(dnd.node_options(TargetKind::Droppables, &'b').is_none());
    assert!(!b.refresh(&dnd));
}

#[test]
fn detaching_the_dragged_item_restores_the_order() {
    let (mut dnd, list, mut items) = row();
    dnd.drag_start('a', Point::new(50.0, 25.0)).unwrap();
    dnd.drag_move(Point::new(250.0, 25.0));
    assert!(list.track(&dnd));
    assert_eq!(list.sorted_ids(), ['b', 'c', 'a']);

    assert!(items[0].detach(&mut dnd));
    assert!(!dnd.is_dragging());
    assert_eq!(list.sorted_ids(), ['a', 'b', 'c']);

    // The next drag starts without leftover offsets.
    dnd.drag_start('b', Point::new(150.0, 25.0)).unwrap();
    assert_eq!(items[2].transform(&dnd), Transform::ZERO);
}

#[test]
fn replacing_a_drag_releases_its_preview() {
    let (mut dnd, list, items) = row();
    dnd.drag_start('a', Point::new(50.0, 25.0)).unwrap();
    dnd.drag_move(Point::new(250.0, 25.0));
    assert!(list.track(&dnd));
    assert_eq!(items[2].transform(&dnd), Transform::new(-100.0, 0.0));

    // A new drag replaces the old one without a drop.
    dnd.drag_start('b', Point::new(150.0, 25.0)).unwrap();
    assert!(list.track(&dnd));
    assert_eq!(list.sorted_ids(), ['a', 'b', 'c']);
    assert_eq!(list.order().previewed_by(), None);
    assert_eq!(items[2].transform(&dnd), Transform::ZERO);
}
