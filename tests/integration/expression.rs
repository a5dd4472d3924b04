//! Expression tests through the full engine

use crate::helpers::tolerances::*;
use crate::helpers::*;
use arco::prelude::*;
use arco::synth::expression::TrillNote;

const VIBRATO_RATE: f32 = 5.5;

/// Pitch and amplitude multipliers the vibrato contributed on the last sample.
fn vibrato_multipliers(engine: &ArcoEngine) -> (f32, f32) {
    let expression = engine.voice().expression();
    let out = expression
        .vibrato()
        .output()
        .scaled(expression.modulation_scale());
    (out.pitch, out.amplitude)
}

fn phase_advance(before: f32, after: f32) -> f32 {
    (after - before).rem_euclid(1.0)
}

#[test]
fn test_vibrato_envelope_rises_smoothly() {
    let (mut engine, mut handle) = test_engine();
    handle
        .set_parameter(ParamId::VibratoRate, VIBRATO_RATE)
        .unwrap();
    handle.set_expression(ExpressionKind::Vibrato).unwrap();
    handle.start_sounding().unwrap();

    let mut scales = Vec::new();
    let mut pitch = Vec::new();
    let mut amplitude = Vec::new();
    render_each(&mut engine, samples(0.6), |engine, _| {
        scales.push(engine.voice().expression().modulation_scale());
        let (p, a) = vibrato_multipliers(engine);
        pitch.push(p);
        amplitude.push(a);
    });

    // Monotonic over the start time.
    for (i, w) in scales[..samples(0.5)].windows(2).enumerate() {
        assert!(w[1] >= w[0] - 1e-7, "envelope fell at {}: {:?}", i, w);
    }
    assert!(scales[samples(0.5)] > 0.45, "envelope {}", scales[samples(0.5)]);

    assert!(max_step(&pitch) < PERCEPTUAL_EPSILON);
    assert!(max_step(&amplitude) < PERCEPTUAL_EPSILON);
    assert_eq!(engine.expression_state().current, ExpressionKind::Vibrato);
}

#[test]
fn test_vibrato_phase_never_resets() {
    let (mut engine, mut handle) = test_engine();
    handle
        .set_parameter(ParamId::VibratoRate, VIBRATO_RATE)
        .unwrap();
    handle.set_expression(ExpressionKind::Vibrato).unwrap();
    handle.start_sounding().unwrap();

    let mut pitch = Vec::new();
    let mut record = |engine: &ArcoEngine, _: f32| pitch.push(vibrato_multipliers(engine).0);

    render_each(&mut engine, samples(1.0), &mut record);

    // Disable and let the stop finish.
    handle.set_expression(ExpressionKind::None).unwrap();
    render_each(&mut engine, samples(0.5), &mut record);
    let state = engine.expression_state();
    assert_eq!(state.current, ExpressionKind::None);

    // While nothing is heard the vibrato keeps advancing at its own rate.
    let step = VIBRATO_RATE / TEST_SAMPLE_RATE as f32;
    for _ in 0..samples(0.1) {
        let before = engine.voice().expression().vibrato().phase();
        render_each(&mut engine, 1, &mut record);
        let after = engine.voice().expression().vibrato().phase();
        assert!((phase_advance(before, after) - step).abs() < 1e-6);
    }

    // Re-enable: the phase picks up where it was.
    let before = engine.voice().expression().vibrato().phase();
    handle.set_expression(ExpressionKind::Vibrato).unwrap();
    render_each(&mut engine, 1, &mut record);
    let after = engine.voice().expression().vibrato().phase();
    assert!(phase_advance(before, after) <= step + 1e-6);

    render_each(&mut engine, samples(1.0), &mut record);
    assert!(
        max_step(&pitch) < PERCEPTUAL_EPSILON,
        "pitch multiplier jumped by {}",
        max_step(&pitch)
    );
}

#[test]
fn test_trill_pitch_held_in_gaps() {
    let (mut engine, mut handle) = test_engine();
    handle
        .set_parameter(ParamId::TrillArticulation, 0.5)
        .unwrap();
    handle.set_parameter(ParamId::TrillInterval, 2.0).unwrap();
    handle.set_expression(ExpressionKind::Trill).unwrap();
    handle.start_sounding().unwrap();

    let upper = 2.0f32.powf(2.0 / 12.0);
    let mut last_active: Option<f32> = None;
    let mut gap_samples = 0;
    let mut saw_upper = false;

    render_each(&mut engine, samples(1.5), |engine, sample| {
        assert!(sample.is_finite());
        let trill = engine.voice().expression().trill();
        let pitch = trill.output().pitch;
        if trill.is_active() {
            last_active = Some(pitch);
            saw_upper |= (pitch - upper).abs() < DSP_EPSILON;
        } else if let Some(held) = last_active {
            gap_samples += 1;
            assert_eq!(pitch, held, "gap pitch differs from last active note");
        }
    });

    assert!(gap_samples > samples(0.1), "only {} gap samples", gap_samples);
    assert!(saw_upper);
}

/// The upper note is played louder than the lower one, so once the string
/// follows the fingered note its active windows carry more energy.
#[test]
fn test_trill_upper_note_louder() {
    let (mut engine, mut handle) = test_engine();
    handle
        .set_parameter(ParamId::FundamentalFrequency, 220.0)
        .unwrap();
    handle.set_parameter(ParamId::TrillInterval, 2.0).unwrap();
    handle.set_parameter(ParamId::TrillSpeed, 2.0).unwrap();
    handle
        .set_parameter(ParamId::BodyType, BodyPreset::None as usize as f32)
        .unwrap();
    handle.set_expression(ExpressionKind::Trill).unwrap();
    handle.start_sounding().unwrap();
    render(&mut engine, samples(1.0));

    let mut energy = [0.0f64; 2];
    let mut count = [0usize; 2];
    render_each(&mut engine, samples(2.0), |engine, sample| {
        assert!(sample.is_finite());
        let trill = engine.voice().expression().trill();
        if !trill.is_active() {
            return;
        }
        let slot = match trill.note() {
            TrillNote::Lower => 0,
            TrillNote::Upper => 1,
        };
        energy[slot] += (sample as f64).powi(2);
        count[slot] += 1;
    });

    assert!(count[0] > 0 && count[1] > 0, "counts {:?}", count);
    let lower = (energy[0] / count[0] as f64).sqrt();
    let upper = (energy[1] / count[1] as f64).sqrt();
    assert!(
        upper > lower,
        "upper RMS {} not above lower RMS {}",
        upper,
        lower
    );
}

#[test]
fn test_tremolo_strokes_alternate() {
    let (mut engine, mut handle) = test_engine();
    handle.set_parameter(ParamId::TremoloSpeed, 8.0).unwrap();
    handle.set_expression(ExpressionKind::Tremolo).unwrap();
    handle.start_sounding().unwrap();

    let mut changes = 0;
    let mut direction = None;
    let mut out = Vec::new();
    render_each(&mut engine, samples(1.0), |engine, sample| {
        out.push(sample);
        let d = engine.voice().expression().tremolo().direction();
        if direction.is_some_and(|previous| previous != d) {
            changes += 1;
        }
        direction = Some(d);
    });

    assert_all_finite(&out, "tremolo");
    // ~8 strokes per second with +-15% jitter.
    assert!((5..=11).contains(&changes), "{} stroke changes", changes);
}

#[test]
fn test_switch_passes_through_none() {
    let (mut engine, mut handle) = test_engine();
    handle.start_sounding().unwrap();

    let requests = [
        (ExpressionKind::Vibrato, 0.2),
        (ExpressionKind::Tremolo, 0.05),
        (ExpressionKind::Trill, 0.4),
        (ExpressionKind::Vibrato, 0.01),
        (ExpressionKind::Trill, 1.5),
    ];

    let mut previous = ExpressionKind::None;
    for (kind, seconds) in requests {
        handle.set_expression(kind).unwrap();
        render_each(&mut engine, samples(seconds), |engine, sample| {
            assert!(sample.is_finite());
            let current = engine.expression_state().current;
            if current != previous {
                assert!(
                    previous.is_none() || current.is_none(),
                    "jumped {:?} -> {:?}",
                    previous,
                    current
                );
                previous = current;
            }
        });
    }

    let state = engine.expression_state();
    assert_eq!(state.current, ExpressionKind::Trill);
    assert_eq!(state.phase, TransitionPhase::Idle);
}

#[test]
fn test_custom_transition_times() {
    let (mut engine, mut handle) = test_engine();
    handle
        .configure_transition(TransitionConfig::new(Some(0.05), Some(0.05)))
        .unwrap();
    handle.set_expression(ExpressionKind::Vibrato).unwrap();
    handle.start_sounding().unwrap();

    render(&mut engine, samples(0.06));
    assert_eq!(engine.expression_state().phase, TransitionPhase::Idle);
    assert_eq!(engine.expression_state().current, ExpressionKind::Vibrato);

    handle.set_expression(ExpressionKind::None).unwrap();
    render(&mut engine, samples(0.06));
    assert_eq!(engine.expression_state().current, ExpressionKind::None);
}
