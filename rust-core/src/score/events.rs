//! Note events delivered by the score collaborator
//!
//! Notes and chords are both "note-like": each yields a list of
//! (pitch class, quarter length) pairs, so the vectorizer never branches
//! on event type.

use crate::error::{AnalysisError, Result};
use serde::{Deserialize, Serialize};

/// Number of chromatic pitch classes per octave
pub const PITCH_CLASSES: usize = 12;

/// Octave-invariant chromatic pitch class (0 = C, 11 = B)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PitchClass(u8);

impl PitchClass {
    /// Create pitch class from an integer in 0..=11
    pub fn new(value: i64) -> Result<Self> {
        if (0..PITCH_CLASSES as i64).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(AnalysisError::InvalidPitchClass(value))
        }
    }

    /// Pitch class of a MIDI note number (any octave)
    pub fn from_midi(midi: u8) -> Self {
        Self(midi % PITCH_CLASSES as u8)
    }

    /// Bin index in a 12-bin vector
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Anything that contributes pitch classes to a window
pub trait NoteLike {
    /// (pitch class, quarter length) for every sounding constituent
    fn constituents(&self) -> Vec<(PitchClass, f64)>;
}

/// What sounds at an event offset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EventKind {
    Note {
        pitch_class: PitchClass,
        quarter_length: f64,
    },
    Chord {
        notes: Vec<(PitchClass, f64)>,
    },
}

/// Offsets closer than this count as the same point when joining ties
const TIE_TOLERANCE: f64 = 1e-9;

/// A note or chord anchored at an offset in quarter lengths
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteEvent {
    pub offset: f64,
    pub kind: EventKind,

    /// Continues a tie from an earlier event with the same pitch classes
    #[serde(default)]
    pub tied: bool,
}

impl NoteEvent {
    pub fn note(offset: f64, pitch_class: PitchClass, quarter_length: f64) -> Self {
        Self {
            offset,
            kind: EventKind::Note {
                pitch_class,
                quarter_length,
            },
            tied: false,
        }
    }

    pub fn chord(offset: f64, notes: Vec<(PitchClass, f64)>) -> Self {
        Self {
            offset,
            kind: EventKind::Chord { notes },
            tied: false,
        }
    }

    /// Mark this event as the continuation of a tie
    pub fn with_tie(mut self) -> Self {
        self.tied = true;
        self
    }

    /// Reject events that cannot sit on a beat grid
    ///
    /// Offsets must be finite and non-negative; every duration must be
    /// finite and non-negative.
    pub fn validate(&self) -> Result<()> {
        if !self.offset.is_finite() || self.offset < 0.0 {
            return Err(AnalysisError::InvalidEvent(format!(
                "offset {} is not a non-negative quarter length",
                self.offset
            )));
        }
        if let Some((pc, ql)) = self
            .constituents()
            .into_iter()
            .find(|(_, ql)| !ql.is_finite() || *ql < 0.0)
        {
            return Err(AnalysisError::InvalidEvent(format!(
                "pitch class {} at offset {} has duration {}",
                pc.index(),
                self.offset,
                ql
            )));
        }
        Ok(())
    }

    /// Offset where the longest constituent stops sounding
    pub fn end(&self) -> f64 {
        let longest = self
            .constituents()
            .iter()
            .map(|&(_, ql)| ql)
            .fold(0.0, f64::max);
        self.offset + longest
    }

    /// Sorted, deduplicated pitch classes of the event
    pub fn pitch_classes(&self) -> Vec<PitchClass> {
        let mut classes: Vec<PitchClass> = self.constituents().into_iter().map(|(pc, _)| pc).collect();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    /// Whether `next` is a tied continuation of this event
    pub fn continued_by(&self, next: &NoteEvent) -> bool {
        next.tied
            && (self.end() - next.offset).abs() < TIE_TOLERANCE
            && self.pitch_classes() == next.pitch_classes()
    }

    /// Add the durations of a tied continuation onto this event
    pub(crate) fn absorb(&mut self, next: &NoteEvent) {
        let extra = next.constituents();
        let extend = |pc: PitchClass, ql: &mut f64| {
            if let Some((_, more)) = extra.iter().find(|(p, _)| *p == pc) {
                *ql += more;
            }
        };
        match &mut self.kind {
            EventKind::Note {
                pitch_class,
                quarter_length,
            } => extend(*pitch_class, quarter_length),
            EventKind::Chord { notes } => {
                for (pc, ql) in notes.iter_mut() {
                    extend(*pc, ql);
                }
            }
        }
    }

    /// Same kind of event restricted to `[start, stop)`
    ///
    /// Constituents that have stopped sounding by `start` are left out;
    /// `None` when nothing sounds in the span.
    pub(crate) fn piece(&self, start: f64, stop: f64) -> Option<NoteEvent> {
        let sounding = |ql: f64| {
            let end = self.offset + ql;
            (end > start).then(|| end.min(stop) - start)
        };
        match &self.kind {
            EventKind::Note {
                pitch_class,
                quarter_length,
            } => sounding(*quarter_length).map(|ql| NoteEvent::note(start, *pitch_class, ql)),
            EventKind::Chord { notes } => {
                let notes: Vec<(PitchClass, f64)> = notes
                    .iter()
                    .filter_map(|&(pc, ql)| sounding(ql).map(|ql| (pc, ql)))
                    .collect();
                (!notes.is_empty()).then(|| NoteEvent::chord(start, notes))
            }
        }
    }
}

impl NoteLike for NoteEvent {
    fn constituents(&self) -> Vec<(PitchClass, f64)> {
        match &self.kind {
            EventKind::Note {
                pitch_class,
                quarter_length,
            } => vec![(*pitch_class, *quarter_length)],
            EventKind::Chord { notes } => notes.clone(),
        }
    }
}
