//! Ordered-board moves — position bookkeeping for drag-and-drop boards.
//!
//! Both the task kanban and the deal pipeline keep an explicit per-column
//! ordinal (`position`) rather than relying on insertion order. A move is
//! resolved here as a pure computation over the full board snapshot; the
//! caller persists the returned delta set.
//!
//! Invariant: within any bucket, positions are exactly `{0, 1, …, n-1}`
//! (no gaps, no duplicates) immediately after every move.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Types ───────────────────────────────────────────────────────────────────

/// A task or deal as the board sees it: identity, column, ordinal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardItem<B> {
  pub id:       Uuid,
  pub bucket:   B,
  pub position: u32,
}

/// One row of the write-set a move produces. The persistence layer applies
/// these verbatim; everything not listed is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionDelta<B> {
  pub id:       Uuid,
  pub bucket:   B,
  pub position: u32,
}

/// Result of [`apply_move`]: the full post-move snapshot plus the minimal
/// set of items whose `(bucket, position)` actually changed.
#[derive(Debug, Clone)]
pub struct MoveOutcome<B> {
  pub items:   Vec<BoardItem<B>>,
  pub changed: Vec<PositionDelta<B>>,
}

impl<B> MoveOutcome<B> {
  /// True when the move was a no-op (same slot, or an unknown item id).
  pub fn is_noop(&self) -> bool { self.changed.is_empty() }
}

// ─── Operations ──────────────────────────────────────────────────────────────

/// Position for an item newly created in `bucket`: the current bucket size.
pub fn insertion_position<B: Eq>(items: &[BoardItem<B>], bucket: &B) -> u32 {
  items.iter().filter(|i| i.bucket == *bucket).count() as u32
}

/// Move `item_id` to `dest_index` within `dest_bucket` and renumber every
/// touched bucket.
///
/// - An unknown `item_id` returns the snapshot unchanged with an empty
///   `changed` list. Callers treat that as the no-op signal, it is never
///   an error.
/// - `dest_index` is clamped to the destination bucket size (moved item
///   excluded), so "drop past the end" appends.
/// - Dropping an item back onto its own slot short-circuits with no writes.
pub fn apply_move<B: Copy + Eq>(
  items: &[BoardItem<B>],
  item_id: Uuid,
  dest_bucket: B,
  dest_index: usize,
) -> MoveOutcome<B> {
  let Some(moved) = items.iter().find(|i| i.id == item_id) else {
    return MoveOutcome { items: items.to_vec(), changed: Vec::new() };
  };
  let source_bucket = moved.bucket;
  let same_bucket   = source_bucket == dest_bucket;

  // Source-bucket ordering with the moved item taken out.
  let mut source: Vec<&BoardItem<B>> = items
    .iter()
    .filter(|i| i.bucket == source_bucket && i.id != item_id)
    .collect();
  source.sort_by_key(|i| i.position);

  // Index the moved item currently occupies within its own bucket.
  let source_index = source
    .iter()
    .filter(|i| i.position < moved.position)
    .count();

  let mut dest: Vec<&BoardItem<B>> = if same_bucket {
    source.clone()
  } else {
    let mut d: Vec<&BoardItem<B>> =
      items.iter().filter(|i| i.bucket == dest_bucket).collect();
    d.sort_by_key(|i| i.position);
    d
  };

  let index = dest_index.min(dest.len());

  if same_bucket && source_index == index {
    return MoveOutcome { items: items.to_vec(), changed: Vec::new() };
  }

  dest.insert(index, moved);

  // Renumber 0..n-1 in list order for every touched bucket.
  let mut assigned: HashMap<Uuid, (B, u32)> = HashMap::new();
  if !same_bucket {
    for (pos, item) in source.iter().enumerate() {
      assigned.insert(item.id, (source_bucket, pos as u32));
    }
  }
  for (pos, item) in dest.iter().enumerate() {
    assigned.insert(item.id, (dest_bucket, pos as u32));
  }

  let mut changed = Vec::new();
  let items = items
    .iter()
    .map(|item| match assigned.get(&item.id) {
      Some(&(bucket, position)) => {
        if bucket != item.bucket || position != item.position {
          changed.push(PositionDelta { id: item.id, bucket, position });
        }
        BoardItem { id: item.id, bucket, position }
      }
      None => item.clone(),
    })
    .collect();

  MoveOutcome { items, changed }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
  enum Col {
    Todo,
    Done,
  }

  fn item(id: Uuid, bucket: Col, position: u32) -> BoardItem<Col> {
    BoardItem { id, bucket, position }
  }

  fn board(slots: &[(Col, u32)]) -> (Vec<Uuid>, Vec<BoardItem<Col>>) {
    let ids: Vec<Uuid> = slots.iter().map(|_| Uuid::new_v4()).collect();
    let items = slots
      .iter()
      .zip(&ids)
      .map(|(&(bucket, position), &id)| item(id, bucket, position))
      .collect();
    (ids, items)
  }

  fn positions(items: &[BoardItem<Col>], bucket: Col) -> Vec<u32> {
    let mut ps: Vec<u32> = items
      .iter()
      .filter(|i| i.bucket == bucket)
      .map(|i| i.position)
      .collect();
    ps.sort_unstable();
    ps
  }

  fn assert_contiguous(items: &[BoardItem<Col>]) {
    for bucket in [Col::Todo, Col::Done] {
      let ps = positions(items, bucket);
      let expected: Vec<u32> = (0..ps.len() as u32).collect();
      assert_eq!(ps, expected, "bucket {bucket:?} positions not contiguous");
    }
  }

  #[test]
  fn unknown_id_is_noop() {
    let (_, items) = board(&[(Col::Todo, 0), (Col::Todo, 1)]);
    let out = apply_move(&items, Uuid::new_v4(), Col::Done, 0);
    assert!(out.is_noop());
    assert_eq!(out.items, items);
  }

  #[test]
  fn same_slot_drop_is_noop() {
    let (ids, items) = board(&[(Col::Todo, 0), (Col::Todo, 1), (Col::Todo, 2)]);
    let out = apply_move(&items, ids[1], Col::Todo, 1);
    assert!(out.is_noop());
    assert_eq!(out.items, items);
  }

  #[test]
  fn reorder_within_bucket() {
    let (ids, items) = board(&[(Col::Todo, 0), (Col::Todo, 1), (Col::Todo, 2)]);
    let out = apply_move(&items, ids[2], Col::Todo, 0);
    assert_contiguous(&out.items);

    let find = |id| out.items.iter().find(|i| i.id == id).unwrap();
    assert_eq!(find(ids[2]).position, 0);
    assert_eq!(find(ids[0]).position, 1);
    assert_eq!(find(ids[1]).position, 2);
    // All three slots shifted.
    assert_eq!(out.changed.len(), 3);
  }

  #[test]
  fn shifted_tail_only_in_changed_set() {
    let (ids, items) = board(&[
      (Col::Todo, 0),
      (Col::Todo, 1),
      (Col::Todo, 2),
      (Col::Todo, 3),
    ]);
    // Move the last item up one slot: items 0 and 1 keep their positions.
    let out = apply_move(&items, ids[3], Col::Todo, 2);
    let changed_ids: Vec<Uuid> = out.changed.iter().map(|d| d.id).collect();
    assert!(changed_ids.contains(&ids[2]));
    assert!(changed_ids.contains(&ids[3]));
    assert!(!changed_ids.contains(&ids[0]));
    assert!(!changed_ids.contains(&ids[1]));
  }

  #[test]
  fn cross_bucket_move_renumbers_both_sides() {
    // Bucket Todo of size 5, bucket Done of size 3; move Todo[2] to Done[0].
    let (ids, items) = board(&[
      (Col::Todo, 0),
      (Col::Todo, 1),
      (Col::Todo, 2),
      (Col::Todo, 3),
      (Col::Todo, 4),
      (Col::Done, 0),
      (Col::Done, 1),
      (Col::Done, 2),
    ]);
    let out = apply_move(&items, ids[2], Col::Done, 0);
    assert_contiguous(&out.items);

    let find = |id| out.items.iter().find(|i| i.id == id).unwrap();
    assert_eq!(find(ids[2]).bucket, Col::Done);
    assert_eq!(find(ids[2]).position, 0);

    // Source keeps relative order of the remaining four.
    let todo_order: Vec<Uuid> = {
      let mut t: Vec<&BoardItem<Col>> =
        out.items.iter().filter(|i| i.bucket == Col::Todo).collect();
      t.sort_by_key(|i| i.position);
      t.iter().map(|i| i.id).collect()
    };
    assert_eq!(todo_order, vec![ids[0], ids[1], ids[3], ids[4]]);

    // Previous occupants of Done shifted to 1..=3.
    assert_eq!(find(ids[5]).position, 1);
    assert_eq!(find(ids[6]).position, 2);
    assert_eq!(find(ids[7]).position, 3);
  }

  #[test]
  fn cross_bucket_changed_set_is_exact() {
    // [{a,todo,0},{b,todo,1},{c,done,0}]; move a to done index 0.
    let (ids, items) =
      board(&[(Col::Todo, 0), (Col::Todo, 1), (Col::Done, 0)]);
    let (a, b, c) = (ids[0], ids[1], ids[2]);

    let out = apply_move(&items, a, Col::Done, 0);
    let find = |id| out.items.iter().find(|i| i.id == id).unwrap();
    assert_eq!((find(a).bucket, find(a).position), (Col::Done, 0));
    assert_eq!((find(c).bucket, find(c).position), (Col::Done, 1));
    assert_eq!((find(b).bucket, find(b).position), (Col::Todo, 0));

    let mut changed_ids: Vec<Uuid> = out.changed.iter().map(|d| d.id).collect();
    changed_ids.sort();
    let mut expected = vec![a, b, c];
    expected.sort();
    assert_eq!(changed_ids, expected);
  }

  #[test]
  fn destination_index_is_clamped() {
    let (ids, items) = board(&[(Col::Todo, 0), (Col::Done, 0)]);
    let out = apply_move(&items, ids[0], Col::Done, 99);
    assert_contiguous(&out.items);
    let moved = out.items.iter().find(|i| i.id == ids[0]).unwrap();
    assert_eq!((moved.bucket, moved.position), (Col::Done, 1));
  }

  #[test]
  fn contiguity_holds_across_move_sequences() {
    let (ids, mut items) = board(&[
      (Col::Todo, 0),
      (Col::Todo, 1),
      (Col::Todo, 2),
      (Col::Done, 0),
      (Col::Done, 1),
    ]);
    let moves = [
      (ids[0], Col::Done, 0),
      (ids[4], Col::Todo, 1),
      (ids[2], Col::Done, 2),
      (ids[1], Col::Todo, 0),
      (ids[3], Col::Todo, 5),
    ];
    for (id, bucket, index) in moves {
      items = apply_move(&items, id, bucket, index).items;
      assert_contiguous(&items);
    }
  }

  #[test]
  fn insertion_position_is_bucket_size() {
    let (_, items) = board(&[(Col::Todo, 0), (Col::Todo, 1), (Col::Done, 0)]);
    assert_eq!(insertion_position(&items, &Col::Todo), 2);
    assert_eq!(insertion_position(&items, &Col::Done), 1);
  }
}
