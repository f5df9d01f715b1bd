//! Integration tests for windowing and spectral analysis

use pitch_spectrum::score::Measure;
use pitch_spectrum::spectrum::{AnalyzerConfig, PhaseQuantizer, HARMONICS};
use pitch_spectrum::table::assemble;
use pitch_spectrum::{
    analyze_score, run, slide_window, BeatGrid, CountingStrategy, InMemoryScore, NoteEvent,
    NoteLike, PitchClass, PitchClassVector, RunConfig, ScoreSource, SpectrumAnalyzer, TimeSignature,
    WindowSpec,
};

fn pc(value: i64) -> PitchClass {
    PitchClass::new(value).unwrap()
}

/// Beat offsets [0, 1, ..., 8] in two 4/4 bars
fn eight_beat_score(events: Vec<NoteEvent>) -> InMemoryScore {
    let measures = vec![
        Measure { number: 1, offset: 0.0, length: 4.0 },
        Measure { number: 2, offset: 4.0, length: 4.0 },
    ];
    InMemoryScore::with_grid(BeatGrid::uniform(8), measures)
        .unwrap()
        .with_events(events)
        .unwrap()
}

/// C major scale in eighths with a closing triad, over four bars of 3/4
fn scale_score() -> InMemoryScore {
    let ts = TimeSignature::new(3, 4).unwrap();
    let scale = [0, 2, 4, 5, 7, 9, 11, 0, 2, 4, 5, 7, 9, 11, 0, 2, 4, 5, 7, 9];
    let mut events: Vec<NoteEvent> = scale
        .iter()
        .enumerate()
        .map(|(i, &p)| NoteEvent::note(i as f64 * 0.5, pc(p), 0.5))
        .collect();
    events.push(NoteEvent::chord(10.0, vec![(pc(0), 2.0), (pc(4), 2.0), (pc(7), 2.0)]));

    InMemoryScore::from_time_signatures(&[(1, Some(ts)), (2, None), (3, None), (4, None)])
        .unwrap()
        .with_events(events)
        .unwrap()
}

#[test]
fn test_single_note_flat_scenario() {
    let score = eight_beat_score(vec![NoteEvent::note(0.0, pc(0), 1.0)]);
    let grid = score.beat_grid();
    let spec = WindowSpec::new(4, CountingStrategy::Flat, false).unwrap();

    let windows = slide_window(&score, &grid, &spec);
    assert_eq!(windows.len(), 5);

    let mut first = [0.0; 12];
    first[0] = 1.0;
    assert_eq!(windows[0].vector().bins(), &first);
    assert_eq!(windows[1].vector().bins(), &[0.0; 12]);
}

#[test]
fn test_window_count_for_every_size() {
    let score = scale_score();
    let grid = score.beat_grid();
    assert_eq!(grid.len(), 13);

    for w in 1..grid.len() {
        let spec = WindowSpec::new(w, CountingStrategy::Onset, true).unwrap();
        assert_eq!(slide_window(&score, &grid, &spec).len(), grid.len() - w);
    }
    let spec = WindowSpec::new(grid.len(), CountingStrategy::Onset, true).unwrap();
    assert!(slide_window(&score, &grid, &spec).is_empty());
}

#[test]
fn test_boundary_note_counted_once() {
    // Note exactly on the end of window 1 ([0, 2))
    let score = eight_beat_score(vec![NoteEvent::note(2.0, pc(9), 1.0)]);
    let grid = score.beat_grid();
    let spec = WindowSpec::new(2, CountingStrategy::Onset, false).unwrap();
    let windows = slide_window(&score, &grid, &spec);

    assert_eq!(windows[0].vector().bins()[9], 0.0);
    assert_eq!(windows[1].vector().bins()[9], 1.0);
    assert_eq!(windows[2].vector().bins()[9], 1.0);
    assert_eq!(windows[3].vector().bins()[9], 0.0);
}

#[test]
fn test_strategy_totals_per_window() {
    let score = scale_score();
    let grid = score.beat_grid();
    let offsets = grid.offsets();

    for strategy in CountingStrategy::ALL {
        let spec = WindowSpec::new(3, strategy, false).unwrap();
        for (i, window) in slide_window(&score, &grid, &spec).iter().enumerate() {
            let events = score.notes_in_range(offsets[i], offsets[i + 3]);
            let onsets: usize = events.iter().map(|e| e.constituents().len()).sum();
            let duration: f64 = events
                .iter()
                .flat_map(|e| e.constituents())
                .map(|(_, ql)| ql)
                .sum();

            match strategy {
                CountingStrategy::Onset => assert_eq!(window.vector().sum(), onsets as f64),
                CountingStrategy::Duration => {
                    assert!((window.vector().sum() - duration).abs() < 1e-9)
                }
                CountingStrategy::Flat => assert!(window
                    .vector()
                    .bins()
                    .iter()
                    .all(|&b| b == 0.0 || b == 1.0)),
            }
        }
    }
}

#[test]
fn test_last_window_reports_last_real_measure() {
    let score = scale_score();
    let config = RunConfig {
        window_size: 3,
        strategy: CountingStrategy::Onset,
        ..RunConfig::default()
    };
    let table = analyze_score(&score, &config).unwrap();

    let last = table.row(table.len()).unwrap();
    assert_eq!(last.measure_range.start, 4);
    assert_eq!(last.measure_range.end, 4);
    assert_eq!(last.measure_range_label(), "Measures 4–4");
}

#[test]
fn test_uniform_vector_has_flat_spectrum() {
    let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
    let result = analyzer
        .analyze_vector(&PitchClassVector::from_bins([1.0; 12]), false)
        .unwrap();

    for k in 1..=HARMONICS {
        assert!(result.magnitude(k).unwrap() < 1e-9);
        assert_eq!(result.phase(k).unwrap(), 0.0);
    }
}

#[test]
fn test_diatonic_collection_peaks_at_fifth_harmonic() {
    // The diatonic set is maximally even: f5 dominates
    let mut bins = [0.0; 12];
    for p in [0, 2, 4, 5, 7, 9, 11] {
        bins[p] = 1.0;
    }
    let mut analyzer = SpectrumAnalyzer::new(AnalyzerConfig::default()).unwrap();
    let result = analyzer
        .analyze_vector(&PitchClassVector::from_bins(bins), false)
        .unwrap();

    let f5 = result.magnitude(5).unwrap();
    for k in [1, 2, 3, 4, 6] {
        assert!(result.magnitude(k).unwrap() < f5);
    }
}

#[test]
fn test_every_phase_in_range() {
    let score = scale_score();
    for log_weight in [false, true] {
        let config = RunConfig {
            window_size: 2,
            log_weight,
            ..RunConfig::default()
        };
        let table = analyze_score(&score, &config).unwrap();
        for row in table.rows() {
            for k in 0..HARMONICS {
                assert!(row.phases[k] > -180.0 && row.phases[k] <= 180.0);
                assert!(row.quantized_phases[k] > -180.0 && row.quantized_phases[k] <= 180.0);
            }
        }
    }
}

#[test]
fn test_quantized_phases_are_idempotent() {
    let config = RunConfig {
        window_size: 4,
        ..RunConfig::default()
    };
    let table = analyze_score(&scale_score(), &config).unwrap();
    let quantizer = PhaseQuantizer::default();

    for row in table.rows() {
        for &q in &row.quantized_phases {
            assert!((quantizer.quantize(q) - q).abs() < 1e-9);
        }
    }
}

#[test]
fn test_table_rebuild_is_identical() {
    let score = scale_score();
    let grid = score.beat_grid();
    let spec = WindowSpec::new(4, CountingStrategy::Duration, true).unwrap();
    let windows = slide_window(&score, &grid, &spec);

    let a = assemble(&windows, &AnalyzerConfig::default()).unwrap();
    let b = assemble(&windows, &AnalyzerConfig::default()).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.len(), windows.len());
}

#[test]
fn test_run_with_excerpt_and_toml_config() {
    let config = RunConfig::from_toml_str(
        r#"
        repertoire = "sample_corpus/MozartK157_expo.xml"
        excerpt = [2, 3]
        window_size = 2
        strategy = "Onset"
        "#,
    )
    .unwrap();

    let table = run(&scale_score(), &config).unwrap();
    // Two 3/4 bars: 7 offsets, 5 windows
    assert_eq!(table.len(), 5);
    assert_eq!(table.row(1).unwrap().measure_range.start, 2);
    assert_eq!(table.row(5).unwrap().measure_range.end, 3);
}

#[test]
fn test_held_note_counts_in_every_window_it_sounds_in() {
    // Whole note on a one-beat grid, 4-beat Duration windows
    let score = eight_beat_score(vec![NoteEvent::note(0.0, pc(0), 4.0)]);
    let config = RunConfig {
        window_size: 4,
        strategy: CountingStrategy::Duration,
        log_weight: false,
        ..RunConfig::default()
    };

    let table = run(&score, &config).unwrap();
    assert_eq!(table.row(1).unwrap().original[0], 4.0);
    assert_eq!(table.row(2).unwrap().original[0], 3.0);
    assert_eq!(table.row(4).unwrap().original[0], 1.0);
}

#[test]
fn test_negative_duration_is_refused() {
    let measures = vec![Measure { number: 1, offset: 0.0, length: 4.0 }];
    let result = InMemoryScore::with_grid(BeatGrid::uniform(4), measures)
        .unwrap()
        .with_events(vec![NoteEvent::note(0.0, pc(0), -2.0)]);

    assert!(matches!(result, Err(pitch_spectrum::AnalysisError::InvalidEvent(_))));
}
