use super::*;
use crate::series::Transient;

/// Flat zero baseline up to sample 12, a step to 100 from sample 13 on
fn step_series(len: usize) -> Vec<f64> {
    (0..len).map(|i| if i < 13 { 0.0 } else { 100.0 }).collect()
}

fn step_transient(len: usize) -> Transient {
    let time = (0..len).map(|i| i as f64 * 0.5 + 1.0).collect();
    Transient::new(time, step_series(len)).unwrap()
}

#[test]
fn test_step_onset_accounts_for_lookahead() {
    let detector = OffsetDetector::default();
    let index = detector.find_offset_index(&step_series(30)).unwrap();
    // First flagged sample is 13; the three-sample lookahead moves it to 10
    assert_eq!(index, 10);
}

#[test]
fn test_flags_before_full_window_are_never_set() {
    let mut intensity = vec![100.0; 5];
    intensity.extend(vec![0.0; 10]);
    let flags = OffsetDetector::default().flags(&intensity).unwrap();
    assert!(flags[..9].iter().all(|&flag| !flag));
}

#[test]
fn test_lookahead_zero_returns_first_flag() {
    let detector = OffsetDetector::default().with_lookahead(0);
    assert_eq!(detector.find_offset_index(&step_series(30)).unwrap(), 13);
}

#[test]
fn test_flag_in_lookahead_tail_is_found() {
    // The only flagged sample is the last one; shifting keeps it reachable
    let mut intensity = vec![1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0];
    intensity.push(50.0);
    let index = OffsetDetector::default().find_offset_index(&intensity).unwrap();
    assert_eq!(index, intensity.len() - 1 - DEFAULT_LOOKAHEAD);
}

#[test]
fn test_constant_series_has_no_onset() {
    let result = OffsetDetector::default().find_offset_index(&[5.0; 40]);
    assert!(matches!(result, Err(OffsetError::NotFound { .. })));
}

#[test]
fn test_short_series_has_no_onset() {
    let result = OffsetDetector::default().find_offset_index(&[0.0, 100.0, 0.0]);
    assert!(matches!(result, Err(OffsetError::NotFound { .. })));
}

#[test]
fn test_window_too_small() {
    let result = OffsetDetector::new(1, 2.0).find_offset_index(&step_series(30));
    assert!(matches!(result, Err(OffsetError::InvalidWindow(1))));
}

#[test]
fn test_larger_threshold_delays_detection() {
    // A slow ramp: a loose threshold fires on the ramp, a strict one only on the jump
    let mut intensity: Vec<f64> = (0..20).map(|i| (i % 2) as f64).collect();
    intensity.extend([3.0, 4.0, 100.0, 100.0, 100.0]);
    let loose = OffsetDetector::new(10, 1.0).find_offset_index(&intensity).unwrap();
    let strict = OffsetDetector::new(10, 2.5).find_offset_index(&intensity).unwrap();
    assert_eq!(loose, 20 - DEFAULT_LOOKAHEAD);
    assert_eq!(strict, 22 - DEFAULT_LOOKAHEAD);
}

#[test]
fn test_correction_applies_both_offsets() {
    let mut transient = step_transient(30);
    let applied = OffsetCorrection::default()
        .apply(&mut transient)
        .unwrap()
        .unwrap();

    assert_eq!(applied.index, 10);
    assert_eq!(applied.time_offset, Some(6.0));
    assert_eq!(applied.intensity_offset, Some(0.0));
    assert_eq!(transient.time()[10], 0.0);
    assert_eq!(transient.intensity()[29], 100.0);
}

#[test]
fn test_correction_with_nonzero_baseline() {
    let step = step_transient(30);
    let raised = step.intensity().iter().map(|v| v + 7.0).collect();
    let mut transient = Transient::new(step.time().to_vec(), raised).unwrap();
    let applied = OffsetCorrection::default()
        .with_time_offset(false)
        .apply(&mut transient)
        .unwrap()
        .unwrap();

    assert_eq!(applied.time_offset, None);
    assert_eq!(applied.intensity_offset, Some(7.0));
    // Time axis untouched
    assert_eq!(transient.time()[0], 1.0);
    let pre_onset: f64 = transient.intensity()[..applied.index].iter().sum();
    assert_eq!(pre_onset, 0.0);
}

#[test]
fn test_disabled_correction_skips_detection() {
    // A constant series would fail detection; disabled correction never runs it
    let mut transient = Transient::new(vec![0.0; 20], vec![1.0; 20]).unwrap();
    let applied = OffsetCorrection::disabled().apply(&mut transient).unwrap();
    assert!(applied.is_none());
    assert_eq!(transient.intensity(), vec![1.0; 20]);
}

#[test]
fn test_empty_transient_is_left_alone() {
    let mut transient = Transient::default();
    let applied = OffsetCorrection::default().apply(&mut transient).unwrap();
    assert!(applied.is_none());
}

#[test]
fn test_apply_at_known_index() {
    let mut transient = step_transient(30);
    let applied = OffsetCorrection::default()
        .apply_at(&mut transient, 13)
        .unwrap();
    assert_eq!(applied.index, 13);
    assert_eq!(transient.time()[13], 0.0);
}
