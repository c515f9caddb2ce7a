//! Weekly planner notes — the interval model behind the planning grid.
//!
//! A note is anchored to a member and a granularity: a single hour, a
//! contiguous hour range within one day, a whole day, or a whole week. The
//! grid key `(member, granularity, target_date, start_hour)` admits at most
//! one note; writing to an occupied key replaces content and range rather
//! than erroring (upsert semantics).
//!
//! Everything here is pure computation over an in-memory snapshot; the
//! persistence layer applies the results.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

/// Hour rows shown by the weekly grid, inclusive.
pub const GRID_HOURS: std::ops::RangeInclusive<u8> = 7..=20;

// ─── Note types ──────────────────────────────────────────────────────────────

/// How much of the grid a note is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
  Hour,
  Day,
  Week,
}

/// A single annotation on the weekly grid.
///
/// `start_hour` is present iff `granularity` is [`Granularity::Hour`].
/// `end_hour`, when present, makes the note span `start_hour..=end_hour`;
/// a degenerate range (`end == start`) is normalised to `None` on write.
/// For `Week`, `target_date` identifies the week's reference day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannerNote {
  pub note_id:     Uuid,
  pub member:      String,
  pub granularity: Granularity,
  pub target_date: NaiveDate,
  pub start_hour:  Option<u8>,
  pub end_hour:    Option<u8>,
  pub content:     String,
  pub created_by:  Uuid,
  pub created_at:  DateTime<Utc>,
  pub updated_at:  DateTime<Utc>,
}

impl PlannerNote {
  /// The upsert key: `(member, granularity, target_date, start_hour)`.
  pub fn key(&self) -> (&str, Granularity, NaiveDate, Option<u8>) {
    (&self.member, self.granularity, self.target_date, self.start_hour)
  }

  /// Number of hour rows the note occupies (1 for a single-hour note).
  pub fn span_hours(&self) -> u8 {
    match (self.start_hour, self.end_hour) {
      (Some(start), Some(end)) => end - start + 1,
      _ => 1,
    }
  }
}

/// Input to [`crate::store::DashboardStore::upsert_note`].
/// `note_id` and timestamps are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlannerNote {
  pub member:      String,
  pub granularity: Granularity,
  pub target_date: NaiveDate,
  pub start_hour:  Option<u8>,
  pub end_hour:    Option<u8>,
  pub content:     String,
}

impl NewPlannerNote {
  /// Validate and normalise the input before it reaches storage.
  ///
  /// - `Hour` notes require a `start_hour`; all hours must lie in 0..=23.
  /// - `Day`/`Week` notes have their hours cleared.
  /// - An inverted range is swapped rather than rejected; a degenerate
  ///   range collapses to `None`.
  pub fn normalized(mut self) -> Result<Self> {
    if self.content.trim().is_empty() {
      return Err(Error::EmptyContent);
    }
    match self.granularity {
      Granularity::Hour => {
        let start = self.start_hour.ok_or(Error::MissingStartHour)?;
        for hour in [Some(start), self.end_hour].into_iter().flatten() {
          if hour > 23 {
            return Err(Error::HourOutOfRange(hour));
          }
        }
        let (start, end) = match self.end_hour {
          Some(end) if end < start => (end, Some(start)),
          other => (start, other),
        };
        self.start_hour = Some(start);
        self.end_hour = end.filter(|&e| e != start);
      }
      Granularity::Day | Granularity::Week => {
        self.start_hour = None;
        self.end_hour = None;
      }
    }
    Ok(self)
  }
}

// ─── Lookups ─────────────────────────────────────────────────────────────────

/// Exact-key lookup. For `Hour` granularity this matches only the note that
/// *starts* at `hour` — hours inside a span are found by
/// [`find_covering_note`].
pub fn find_note<'a>(
  notes: &'a [PlannerNote],
  member: &str,
  granularity: Granularity,
  date: NaiveDate,
  hour: Option<u8>,
) -> Option<&'a PlannerNote> {
  notes.iter().find(|n| {
    n.member == member
      && n.granularity == granularity
      && n.target_date == date
      && (granularity != Granularity::Hour || n.start_hour == hour)
  })
}

/// The multi-hour note whose span contains `hour`, excluding the start hour
/// itself: `start_hour < hour <= end_hour`. Used to suppress the empty cell
/// for hours consumed by a span.
pub fn find_covering_note<'a>(
  notes: &'a [PlannerNote],
  member: &str,
  date: NaiveDate,
  hour: u8,
) -> Option<&'a PlannerNote> {
  notes.iter().find(|n| {
    n.member == member
      && n.granularity == Granularity::Hour
      && n.target_date == date
      && matches!(
        (n.start_hour, n.end_hour),
        (Some(start), Some(end)) if start < hour && hour <= end
      )
  })
}

// ─── Drag selection ──────────────────────────────────────────────────────────

/// In-flight click-and-drag selection over one day column. Owned by a single
/// UI session and discarded unconditionally on release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragState {
  pub date:         NaiveDate,
  pub start_hour:   u8,
  pub current_hour: u8,
}

/// Start a drag at the pressed cell.
pub fn begin_range_selection(date: NaiveDate, hour: u8) -> DragState {
  DragState { date, start_hour: hour, current_hour: hour }
}

/// Extend or contract the selection to the hovered cell. Drags are confined
/// to their origin day column: hovering another date leaves the state
/// unchanged.
pub fn update_range_selection(
  state: DragState,
  date: NaiveDate,
  hour: u8,
) -> DragState {
  if date != state.date {
    return state;
  }
  DragState { current_hour: hour, ..state }
}

/// Whether `(date, hour)` falls inside the live selection, inclusive on both
/// ends. Used for highlighting while the drag is in flight.
pub fn is_in_range(state: &DragState, date: NaiveDate, hour: u8) -> bool {
  if date != state.date {
    return false;
  }
  let min = state.start_hour.min(state.current_hour);
  let max = state.start_hour.max(state.current_hour);
  (min..=max).contains(&hour)
}

/// Resolve the released drag into an hour range. A degenerate selection
/// (press and release on the same cell) yields `end = None` — a single-hour
/// note.
pub fn resolve_range_selection(state: &DragState) -> (u8, Option<u8>) {
  let min = state.start_hour.min(state.current_hour);
  let max = state.start_hour.max(state.current_hour);
  (min, if min == max { None } else { Some(max) })
}

// ─── Mutations ───────────────────────────────────────────────────────────────

/// Insert `candidate`, or, if a note already occupies its upsert key,
/// replace that note's `content` and `end_hour` in place, keeping its
/// identity. The only entry point for creation and range/content edits.
pub fn upsert_note(
  mut notes: Vec<PlannerNote>,
  candidate: PlannerNote,
) -> Vec<PlannerNote> {
  match notes.iter_mut().find(|n| n.key() == candidate.key()) {
    Some(existing) => {
      existing.content = candidate.content;
      existing.end_hour = candidate.end_hour;
      existing.updated_at = candidate.updated_at;
    }
    None => notes.push(candidate),
  }
  notes
}

/// Remove the note with `id`. A missing id is not an error.
pub fn delete_note(mut notes: Vec<PlannerNote>, id: Uuid) -> Vec<PlannerNote> {
  notes.retain(|n| n.note_id != id);
  notes
}

// ─── Week view ───────────────────────────────────────────────────────────────

/// One hour cell of the materialised grid.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HourCell {
  /// A note starts here; `span` is the number of rows it occupies.
  Note { note: PlannerNote, span: u8 },
  /// Consumed by a multi-hour note starting earlier the same day.
  Covered { note_id: Uuid },
  Empty,
}

/// One day column: the day-note row plus one cell per [`GRID_HOURS`] row.
#[derive(Debug, Clone, Serialize)]
pub struct DayColumn {
  pub date:     NaiveDate,
  pub day_note: Option<PlannerNote>,
  pub hours:    Vec<HourCell>,
}

/// The computed weekly grid for one member — never stored, always derived.
#[derive(Debug, Clone, Serialize)]
pub struct WeekView {
  pub member:     String,
  pub week_start: NaiveDate,
  pub week_note:  Option<PlannerNote>,
  pub days:       Vec<DayColumn>,
}

/// Materialise the weekly grid for `member` over the seven days starting at
/// `week_start`. Pure; the caller renders it.
pub fn week_view(
  notes: &[PlannerNote],
  member: &str,
  week_start: NaiveDate,
) -> WeekView {
  let week_note = notes
    .iter()
    .find(|n| n.member == member && n.granularity == Granularity::Week)
    .cloned();

  let days = (0..7u64)
    .map(|offset| {
      let date = week_start + Days::new(offset);
      let day_note =
        find_note(notes, member, Granularity::Day, date, None).cloned();
      let hours = GRID_HOURS
        .map(|hour| {
          if let Some(note) =
            find_note(notes, member, Granularity::Hour, date, Some(hour))
          {
            HourCell::Note { note: note.clone(), span: note.span_hours() }
          } else if let Some(covering) =
            find_covering_note(notes, member, date, hour)
          {
            HourCell::Covered { note_id: covering.note_id }
          } else {
            HourCell::Empty
          }
        })
        .collect();
      DayColumn { date, day_note, hours }
    })
    .collect();

  WeekView {
    member: member.to_owned(),
    week_start,
    week_note,
    days,
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;

  fn date(s: &str) -> NaiveDate { s.parse().unwrap() }

  fn note(
    member: &str,
    granularity: Granularity,
    target_date: &str,
    start_hour: Option<u8>,
    end_hour: Option<u8>,
  ) -> PlannerNote {
    PlannerNote {
      note_id: Uuid::new_v4(),
      member: member.to_owned(),
      granularity,
      target_date: date(target_date),
      start_hour,
      end_hour,
      content: "planning".to_owned(),
      created_by: Uuid::new_v4(),
      created_at: Utc::now(),
      updated_at: Utc::now(),
    }
  }

  // ── Lookups ───────────────────────────────────────────────────────────

  #[test]
  fn find_note_matches_start_hour_only() {
    let notes =
      vec![note("Pedro", Granularity::Hour, "2024-01-01", Some(9), Some(11))];

    assert!(
      find_note(&notes, "Pedro", Granularity::Hour, date("2024-01-01"), Some(9))
        .is_some()
    );
    // Hours inside the span are not the note's key.
    assert!(
      find_note(&notes, "Pedro", Granularity::Hour, date("2024-01-01"), Some(10))
        .is_none()
    );
    assert!(
      find_note(&notes, "Luiz", Granularity::Hour, date("2024-01-01"), Some(9))
        .is_none()
    );
  }

  #[test]
  fn covering_note_excludes_its_start_hour() {
    let notes =
      vec![note("Pedro", Granularity::Hour, "2024-01-01", Some(9), Some(11))];
    let day = date("2024-01-01");

    assert!(find_covering_note(&notes, "Pedro", day, 9).is_none());
    assert!(find_covering_note(&notes, "Pedro", day, 10).is_some());
    assert!(find_covering_note(&notes, "Pedro", day, 11).is_some());
    assert!(find_covering_note(&notes, "Pedro", day, 12).is_none());
  }

  #[test]
  fn single_hour_note_covers_nothing() {
    let notes =
      vec![note("Pedro", Granularity::Hour, "2024-01-01", Some(9), None)];
    for hour in 7..=20 {
      assert!(
        find_covering_note(&notes, "Pedro", date("2024-01-01"), hour).is_none()
      );
    }
  }

  // ── Drag selection ────────────────────────────────────────────────────

  #[test]
  fn click_without_drag_resolves_to_single_hour() {
    let state = begin_range_selection(date("2024-01-01"), 9);
    assert_eq!(resolve_range_selection(&state), (9, None));
  }

  #[test]
  fn downward_drag_resolves_min_max() {
    let day = date("2024-01-01");
    let mut state = begin_range_selection(day, 9);
    state = update_range_selection(state, day, 12);
    assert_eq!(resolve_range_selection(&state), (9, Some(12)));
  }

  #[test]
  fn upward_drag_swaps_to_normalise() {
    let day = date("2024-01-01");
    let mut state = begin_range_selection(day, 14);
    state = update_range_selection(state, day, 10);
    assert_eq!(resolve_range_selection(&state), (10, Some(14)));
  }

  #[test]
  fn drag_is_confined_to_origin_day() {
    let day = date("2024-01-01");
    let mut state = begin_range_selection(day, 9);
    state = update_range_selection(state, date("2024-01-02"), 15);
    assert_eq!(state.current_hour, 9);
    assert_eq!(resolve_range_selection(&state), (9, None));
  }

  #[test]
  fn in_range_is_inclusive_and_day_scoped() {
    let day = date("2024-01-01");
    let mut state = begin_range_selection(day, 9);
    state = update_range_selection(state, day, 11);

    assert!(is_in_range(&state, day, 9));
    assert!(is_in_range(&state, day, 10));
    assert!(is_in_range(&state, day, 11));
    assert!(!is_in_range(&state, day, 12));
    assert!(!is_in_range(&state, date("2024-01-02"), 10));
  }

  // ── Normalisation ─────────────────────────────────────────────────────

  fn input(
    granularity: Granularity,
    start_hour: Option<u8>,
    end_hour: Option<u8>,
  ) -> NewPlannerNote {
    NewPlannerNote {
      member: "Pedro".to_owned(),
      granularity,
      target_date: date("2024-01-01"),
      start_hour,
      end_hour,
      content: "planning".to_owned(),
    }
  }

  #[test]
  fn degenerate_range_collapses_to_none() {
    let n = input(Granularity::Hour, Some(9), Some(9)).normalized().unwrap();
    assert_eq!(n.start_hour, Some(9));
    assert_eq!(n.end_hour, None);
  }

  #[test]
  fn inverted_range_is_swapped_not_rejected() {
    let n = input(Granularity::Hour, Some(15), Some(9)).normalized().unwrap();
    assert_eq!(n.start_hour, Some(9));
    assert_eq!(n.end_hour, Some(15));
  }

  #[test]
  fn day_and_week_notes_drop_hours() {
    let n = input(Granularity::Day, Some(9), Some(12)).normalized().unwrap();
    assert_eq!(n.start_hour, None);
    assert_eq!(n.end_hour, None);
  }

  #[test]
  fn hour_note_without_start_hour_is_rejected() {
    let err = input(Granularity::Hour, None, None).normalized().unwrap_err();
    assert!(matches!(err, Error::MissingStartHour));
  }

  #[test]
  fn out_of_range_hour_is_rejected() {
    let err =
      input(Granularity::Hour, Some(24), None).normalized().unwrap_err();
    assert!(matches!(err, Error::HourOutOfRange(24)));
  }

  // ── Upsert / delete ───────────────────────────────────────────────────

  #[test]
  fn upsert_replaces_content_and_range_at_occupied_key() {
    let first = note("Pedro", Granularity::Hour, "2024-01-01", Some(9), Some(11));
    let first_id = first.note_id;

    let mut second =
      note("Pedro", Granularity::Hour, "2024-01-01", Some(9), None);
    second.content = "revised".to_owned();

    let notes = upsert_note(vec![first], second);
    assert_eq!(notes.len(), 1);
    // Identity survives; content and range are the second write's.
    assert_eq!(notes[0].note_id, first_id);
    assert_eq!(notes[0].content, "revised");
    assert_eq!(notes[0].end_hour, None);
  }

  #[test]
  fn upsert_at_free_key_appends() {
    let a = note("Pedro", Granularity::Hour, "2024-01-01", Some(9), None);
    let b = note("Pedro", Granularity::Hour, "2024-01-01", Some(10), None);
    let notes = upsert_note(vec![a], b);
    assert_eq!(notes.len(), 2);
  }

  #[test]
  fn delete_is_idempotent() {
    let a = note("Pedro", Granularity::Day, "2024-01-01", None, None);
    let id = a.note_id;
    let notes = delete_note(vec![a], id);
    assert!(notes.is_empty());
    let notes = delete_note(notes, id);
    assert!(notes.is_empty());
  }

  // ── Week view ─────────────────────────────────────────────────────────

  #[test]
  fn week_view_marks_span_cells_covered() {
    let notes = vec![
      note("Pedro", Granularity::Hour, "2024-01-01", Some(9), Some(11)),
      note("Pedro", Granularity::Day, "2024-01-02", None, None),
      note("Pedro", Granularity::Week, "2024-01-01", None, None),
      // Another member's notes never leak into the view.
      note("Luiz", Granularity::Day, "2024-01-01", None, None),
    ];
    let view = week_view(&notes, "Pedro", date("2024-01-01"));

    assert!(view.week_note.is_some());
    assert_eq!(view.days.len(), 7);
    assert!(view.days[0].day_note.is_none());
    assert!(view.days[1].day_note.is_some());

    let hour_cell = |day: usize, hour: u8| {
      &view.days[day].hours[(hour - *GRID_HOURS.start()) as usize]
    };
    assert!(matches!(hour_cell(0, 9), HourCell::Note { span: 3, .. }));
    assert!(matches!(hour_cell(0, 10), HourCell::Covered { .. }));
    assert!(matches!(hour_cell(0, 11), HourCell::Covered { .. }));
    assert!(matches!(hour_cell(0, 12), HourCell::Empty));
  }
}
