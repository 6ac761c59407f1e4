use super::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

#[test]
fn scale_follows_linear_formula_and_caps_at_five() {
    let tuning = PresentationTuning::default();
    for n in 0..40u64 {
        let expected = (1.0 + n as f32 * 0.25).min(5.0);
        assert!(close(tuning.scale(n), expected), "scale({n})");
    }
    for n in 16..64u64 {
        assert_eq!(tuning.scale(n), 5.0, "scale({n}) should be capped");
    }
    assert!(tuning.scale(15) < 5.0);
}

#[test]
fn emphasis_follows_linear_formula_and_caps() {
    let tuning = PresentationTuning::default();
    for n in 0..40u64 {
        let expected = (1.25 + n as f32 * 0.18).min(3.5);
        assert!(close(tuning.emphasis(n), expected), "emphasis({n})");
    }
    assert!(tuning.emphasis(12) < 3.5);
    for n in 13..64u64 {
        assert_eq!(tuning.emphasis(n), 3.5, "emphasis({n}) should be capped");
    }
}

#[test]
fn derived_values_are_non_decreasing() {
    let tuning = PresentationTuning::default();
    let mut previous = derive_presentation(&tuning, 0);
    for n in 1..100u64 {
        let current = derive_presentation(&tuning, n);
        assert!(current.scale >= previous.scale);
        assert!(current.emphasis >= previous.emphasis);
        previous = current;
    }
}

#[test]
fn decline_phrase_clamps_at_last_entry() {
    let tuning = PresentationTuning::default();
    let last = tuning.decline_phrases.last().cloned().expect("phrases");
    assert_eq!(last, "Plsss?");
    for n in [17u64, 18, 100, 10_000, u64::MAX] {
        assert_eq!(tuning.decline_phrase(n), last, "phrase({n})");
    }
    assert_eq!(tuning.decline_phrase(0), "Nie");
    assert_eq!(tuning.decline_phrase(16), "Plsss?");
    assert_eq!(tuning.decline_phrase(15), "You're breaking my heart ;(");
}

#[test]
fn huge_counts_stay_capped() {
    let tuning = PresentationTuning::default();
    let presentation = derive_presentation(&tuning, u64::MAX);
    assert_eq!(presentation.scale, 5.0);
    assert_eq!(presentation.emphasis, 3.5);
    assert_eq!(presentation.decline_phrase, "Plsss?");
}

#[test]
fn three_declines_match_expected_values() {
    let tuning = PresentationTuning::default();
    let presentation = derive_presentation(&tuning, 3);
    assert!(close(presentation.scale, 1.75));
    assert!(close(presentation.emphasis, 1.79));
    assert_eq!(presentation.decline_phrase, tuning.decline_phrases[3]);
    assert_eq!(presentation.decline_phrase, "Think again!");
    assert!(presentation.show_hint);
}

#[test]
fn hint_is_hidden_before_first_decline() {
    let tuning = PresentationTuning::default();
    let presentation = derive_presentation(&tuning, 0);
    assert!(!presentation.show_hint);
    assert_eq!(presentation.scale, 1.0);
    assert!(close(presentation.emphasis, 1.25));
}

#[test]
fn derivation_is_repeatable() {
    let tuning = PresentationTuning::default();
    assert_eq!(derive_presentation(&tuning, 7), derive_presentation(&tuning, 7));
}

#[test]
fn custom_tuning_drives_derivation() {
    let tuning = PresentationTuning {
        scale_base: 2.0,
        scale_step: 1.0,
        scale_cap: 3.0,
        decline_phrases: vec!["no".into(), "still no".into()],
        ..PresentationTuning::default()
    };
    assert_eq!(tuning.scale(0), 2.0);
    assert_eq!(tuning.scale(1), 3.0);
    assert_eq!(tuning.scale(9), 3.0);
    assert_eq!(tuning.decline_phrase(1), "still no");
    assert_eq!(tuning.decline_phrase(5), "still no");
}

#[test]
fn default_tuning_is_valid() {
    PresentationTuning::default().validate().expect("defaults validate");
}

#[test]
fn empty_phrase_table_is_rejected() {
    let tuning = PresentationTuning {
        decline_phrases: Vec::new(),
        ..PresentationTuning::default()
    };
    let err = tuning.validate().expect_err("empty table");
    assert!(err.to_string().contains("decline_phrases"));
}

#[test]
fn cap_below_base_is_rejected() {
    let tuning = PresentationTuning {
        emphasis_cap: 1.0,
        ..PresentationTuning::default()
    };
    let err = tuning.validate().expect_err("cap below base");
    assert!(err.to_string().contains("emphasis_cap"));
}

#[test]
fn non_finite_coefficients_are_rejected() {
    let tuning = PresentationTuning {
        scale_step: f32::NAN,
        ..PresentationTuning::default()
    };
    assert!(tuning.validate().is_err());
}
