//! Score access seam and an in-memory score
//!
//! File parsing lives outside this crate; whatever parses the score
//! hands over measures, beats and note events through [`ScoreSource`].

use super::events::{NoteEvent, NoteLike};
use super::grid::BeatGrid;
use super::meter::{layout_measures, Measure, TimeSignature};
use crate::error::{AnalysisError, Result};

/// Read-only view of a parsed score
pub trait ScoreSource {
    /// Event type returned by range queries
    type Event: NoteLike;

    /// Beat boundaries across the whole score
    fn beat_grid(&self) -> BeatGrid;

    /// Number of the measure containing `offset`
    fn measure_number(&self, offset: f64) -> i64;

    /// Events whose offset lies in `[start, end)`
    fn notes_in_range(&self, start: f64, end: f64) -> Vec<&Self::Event>;
}

/// Score held entirely in memory
///
/// Events are kept sorted by offset so range queries are two binary
/// searches.
#[derive(Debug, Clone)]
pub struct InMemoryScore {
    measures: Vec<Measure>,
    grid: BeatGrid,
    events: Vec<NoteEvent>,
}

impl InMemoryScore {
    /// Build from per-measure time signatures
    ///
    /// # Arguments
    /// * `signatures` - (measure number, time signature) in score order;
    ///   `None` inherits the previous signature
    pub fn from_time_signatures(signatures: &[(i64, Option<TimeSignature>)]) -> Result<Self> {
        if signatures.is_empty() {
            return Err(AnalysisError::InvalidBeatGrid("score has no measures".into()));
        }
        let (measures, grid) = layout_measures(signatures)?;
        Ok(Self {
            measures,
            grid,
            events: Vec::new(),
        })
    }

    /// Build from an explicit beat grid and measure layout
    pub fn with_grid(grid: BeatGrid, mut measures: Vec<Measure>) -> Result<Self> {
        if measures.is_empty() {
            return Err(AnalysisError::InvalidBeatGrid("score has no measures".into()));
        }
        measures.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        Ok(Self {
            measures,
            grid,
            events: Vec::new(),
        })
    }

    /// Insert an event, keeping offset order (stable for equal offsets)
    ///
    /// Fails with `InvalidEvent` for a non-finite or negative offset or
    /// duration.
    pub fn add_event(&mut self, event: NoteEvent) -> Result<()> {
        event.validate()?;
        let idx = self.events.partition_point(|e| e.offset <= event.offset);
        self.events.insert(idx, event);
        Ok(())
    }

    pub fn with_events<I: IntoIterator<Item = NoteEvent>>(mut self, events: I) -> Result<Self> {
        for event in events {
            self.add_event(event)?;
        }
        Ok(self)
    }

    /// Split every event at the beat boundaries it sounds across
    ///
    /// Each piece starts at its own beat and carries only the time it
    /// sounds before the next boundary, so Duration counting credits a
    /// held note to every window it sounds in. Pieces carry no ties.
    pub fn slice_by_beat(&self) -> Self {
        let offsets = self.grid.offsets();
        let mut events = Vec::with_capacity(self.events.len());

        for event in &self.events {
            let end = event.end();
            let lo = offsets.partition_point(|&o| o <= event.offset);
            let hi = offsets.partition_point(|&o| o < end).max(lo);
            if lo == hi {
                events.push(event.clone());
                continue;
            }

            let mut cuts = Vec::with_capacity(hi - lo + 2);
            cuts.push(event.offset);
            cuts.extend_from_slice(&offsets[lo..hi]);
            cuts.push(end);
            events.extend(cuts.windows(2).filter_map(|span| event.piece(span[0], span[1])));
        }

        events.sort_by(|a, b| a.offset.total_cmp(&b.offset));
        log::debug!(
            "Sliced {} events into {} beat pieces",
            self.events.len(),
            events.len()
        );

        Self {
            measures: self.measures.clone(),
            grid: self.grid.clone(),
            events,
        }
    }

    /// Merge tie continuations into the event they continue
    ///
    /// A continuation joins the latest earlier event with the same pitch
    /// classes that ends where it starts. One with nothing to join keeps
    /// its own onset.
    pub fn strip_ties(&self) -> Self {
        let mut events: Vec<NoteEvent> = Vec::with_capacity(self.events.len());

        for event in &self.events {
            if event.tied {
                if let Some(held) = events.iter_mut().rev().find(|held| held.continued_by(event)) {
                    held.absorb(event);
                    continue;
                }
                log::debug!("Tie at offset {} has no start, kept as an onset", event.offset);
            }
            events.push(NoteEvent {
                tied: false,
                ..event.clone()
            });
        }

        Self {
            measures: self.measures.clone(),
            grid: self.grid.clone(),
            events,
        }
    }

    pub fn measures(&self) -> &[Measure] {
        &self.measures
    }

    pub fn events(&self) -> &[NoteEvent] {
        &self.events
    }

    /// Cut out measures `start..=end` (by measure number), re-based to offset 0
    pub fn excerpt(&self, start: i64, end: i64) -> Result<Self> {
        let invalid = || AnalysisError::InvalidExcerpt { start, end };
        if start > end || start < 0 {
            return Err(invalid());
        }

        let measures: Vec<Measure> = self
            .measures
            .iter()
            .filter(|m| (start..=end).contains(&m.number))
            .copied()
            .collect();

        let (first, last) = match (measures.first(), measures.last()) {
            (Some(first), Some(last)) => (first.offset, last.end()),
            _ => return Err(invalid()),
        };

        let rebased: Vec<Measure> = measures
            .into_iter()
            .map(|m| Measure {
                offset: m.offset - first,
                ..m
            })
            .collect();

        let offsets: Vec<f64> = self
            .grid
            .offsets()
            .iter()
            .filter(|&&o| o >= first && o <= last)
            .map(|&o| o - first)
            .collect();

        let events = self
            .events
            .iter()
            .filter(|e| e.offset >= first && e.offset < last)
            .map(|e| NoteEvent {
                offset: e.offset - first,
                ..e.clone()
            })
            .collect();

        Ok(Self {
            measures: rebased,
            grid: BeatGrid::new(offsets)?,
            events,
        })
    }
}

impl ScoreSource for InMemoryScore {
    type Event = NoteEvent;

    fn beat_grid(&self) -> BeatGrid {
        self.grid.clone()
    }

    fn measure_number(&self, offset: f64) -> i64 {
        let idx = self.measures.partition_point(|m| m.offset <= offset);
        self.measures[idx.saturating_sub(1)].number
    }

    fn notes_in_range(&self, start: f64, end: f64) -> Vec<&NoteEvent> {
        let lo = self.events.partition_point(|e| e.offset < start);
        let hi = self.events.partition_point(|e| e.offset < end);
        if lo >= hi {
            return Vec::new();
        }
        self.events[lo..hi].iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::events::PitchClass;

    fn pc(value: i64) -> PitchClass {
        PitchClass::new(value).unwrap()
    }

    fn four_bars_of_three() -> InMemoryScore {
        let ts = TimeSignature::new(3, 4).unwrap();
        InMemoryScore::from_time_signatures(&[(1, Some(ts)), (2, None), (3, None), (4, None)])
            .unwrap()
    }

    #[test]
    fn test_range_query_is_half_open() {
        let score = four_bars_of_three()
            .with_events(vec![
                NoteEvent::note(0.0, pc(0), 1.0),
                NoteEvent::note(1.0, pc(2), 1.0),
                NoteEvent::note(2.0, pc(4), 1.0),
            ])
            .unwrap();

        let hits = score.notes_in_range(0.0, 2.0);
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].offset, 0.0);
        assert_eq!(hits[1].offset, 1.0);

        assert_eq!(score.notes_in_range(2.0, 3.0).len(), 1);
        assert!(score.notes_in_range(5.0, 4.0).is_empty());
    }

    #[test]
    fn test_events_stay_sorted() {
        let mut score = four_bars_of_three();
        score.add_event(NoteEvent::note(2.0, pc(4), 1.0)).unwrap();
        score.add_event(NoteEvent::note(0.5, pc(1), 0.5)).unwrap();
        score.add_event(NoteEvent::note(1.0, pc(2), 1.0)).unwrap();

        let offsets: Vec<f64> = score.events().iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0.5, 1.0, 2.0]);
    }

    #[test]
    fn test_measure_number_lookup() {
        let score = four_bars_of_three();
        assert_eq!(score.measure_number(0.0), 1);
        assert_eq!(score.measure_number(2.9), 1);
        assert_eq!(score.measure_number(3.0), 2);
        assert_eq!(score.measure_number(11.0), 4);
        // Final boundary still reports the last real measure
        assert_eq!(score.measure_number(12.0), 4);
    }

    #[test]
    fn test_excerpt_rebases_to_zero() {
        let score = four_bars_of_three()
            .with_events(vec![
                NoteEvent::note(0.0, pc(0), 1.0),
                NoteEvent::note(3.5, pc(7), 0.5),
                NoteEvent::note(6.0, pc(9), 1.0),
                NoteEvent::note(9.0, pc(11), 1.0),
            ])
            .unwrap();

        let excerpt = score.excerpt(2, 3).unwrap();
        assert_eq!(excerpt.measures().len(), 2);
        assert_eq!(excerpt.measure_number(0.0), 2);
        assert_eq!(excerpt.beat_grid().offsets(), &[0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let offsets: Vec<f64> = excerpt.events().iter().map(|e| e.offset).collect();
        assert_eq!(offsets, vec![0.5, 3.0]);
    }

    #[test]
    fn test_invalid_events_are_refused() {
        let mut score = four_bars_of_three();
        assert!(matches!(
            score.add_event(NoteEvent::note(0.0, pc(0), -2.0)),
            Err(AnalysisError::InvalidEvent(_))
        ));
        assert!(score.add_event(NoteEvent::note(f64::NAN, pc(0), 1.0)).is_err());
        assert!(score.events().is_empty());
    }

    #[test]
    fn test_slice_by_beat_splits_held_notes() {
        let score = four_bars_of_three()
            .with_events(vec![
                NoteEvent::note(0.5, pc(0), 2.0),
                NoteEvent::note(1.0, pc(4), 0.5),
                NoteEvent::chord(3.0, vec![(pc(7), 1.0), (pc(11), 2.5)]),
            ])
            .unwrap();

        let sliced = score.slice_by_beat();
        let pieces: Vec<(f64, Vec<(PitchClass, f64)>)> = sliced
            .events()
            .iter()
            .map(|e| (e.offset, e.constituents()))
            .collect();

        assert_eq!(
            pieces,
            vec![
                (0.5, vec![(pc(0), 0.5)]),
                (1.0, vec![(pc(0), 1.0)]),
                (1.0, vec![(pc(4), 0.5)]),
                (2.0, vec![(pc(0), 0.5)]),
                (3.0, vec![(pc(7), 1.0), (pc(11), 1.0)]),
                (4.0, vec![(pc(11), 1.0)]),
                (5.0, vec![(pc(11), 0.5)]),
            ]
        );

        // Total sounding time is unchanged
        let total = |s: &InMemoryScore| -> f64 {
            s.events()
                .iter()
                .flat_map(|e| e.constituents())
                .map(|(_, ql)| ql)
                .sum()
        };
        assert!((total(&score) - total(&sliced)).abs() < 1e-9);
    }

    #[test]
    fn test_strip_ties_merges_continuations() {
        let score = four_bars_of_three()
            .with_events(vec![
                NoteEvent::note(0.0, pc(0), 2.0),
                NoteEvent::note(1.0, pc(4), 1.0),
                NoteEvent::note(2.0, pc(0), 1.0).with_tie(),
                NoteEvent::note(3.0, pc(0), 1.0).with_tie(),
                NoteEvent::note(5.0, pc(9), 1.0).with_tie(),
            ])
            .unwrap();

        let stripped = score.strip_ties();
        let events: Vec<(f64, Vec<(PitchClass, f64)>)> = stripped
            .events()
            .iter()
            .map(|e| (e.offset, e.constituents()))
            .collect();

        assert_eq!(
            events,
            vec![
                (0.0, vec![(pc(0), 4.0)]),
                (1.0, vec![(pc(4), 1.0)]),
                (5.0, vec![(pc(9), 1.0)]),
            ]
        );
        assert!(stripped.events().iter().all(|e| !e.tied));
    }

    #[test]
    fn test_excerpt_rejects_bad_ranges() {
        let score = four_bars_of_three();
        assert_eq!(
            score.excerpt(3, 2).unwrap_err(),
            AnalysisError::InvalidExcerpt { start: 3, end: 2 }
        );
        assert!(score.excerpt(10, 12).is_err());
    }
}
