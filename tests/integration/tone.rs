//! Sustained tone and release tests

use crate::helpers::tolerances::*;
use crate::helpers::*;
use approx::assert_relative_eq;
use arco::prelude::*;

/// Default 220 Hz steel note, no expression.
fn sustained_engine() -> (ArcoEngine, ArcoHandle) {
    let (engine, mut handle) = test_engine();
    handle
        .set_parameter(ParamId::FundamentalFrequency, 220.0)
        .unwrap();
    handle
        .set_parameter(ParamId::StringMaterial, StringMaterial::Steel as usize as f32)
        .unwrap();
    handle.set_parameter(ParamId::StringDamping, 0.5).unwrap();
    handle.set_parameter(ParamId::BowForce, 0.5).unwrap();
    handle.set_parameter(ParamId::BowSpeed, 0.5).unwrap();
    handle.start_sounding().unwrap();
    (engine, handle)
}

#[test]
fn test_sustained_tone_level() {
    let (mut engine, _handle) = sustained_engine();
    render(&mut engine, samples(0.5));

    let sustain = render(&mut engine, samples(0.25));
    assert_all_finite(&sustain, "sustain");
    let level = rms(&sustain);
    assert!(
        (SUSTAIN_RMS_MIN..=SUSTAIN_RMS_MAX).contains(&level),
        "sustained RMS {} outside [{}, {}]",
        level,
        SUSTAIN_RMS_MIN,
        SUSTAIN_RMS_MAX
    );
}

/// Block-to-block level stays steady once the note has settled.
#[test]
fn test_sustained_tone_is_steady() {
    let (mut engine, _handle) = sustained_engine();
    render(&mut engine, samples(0.5));

    let window = samples(0.05);
    let levels: Vec<f32> = (0..8).map(|_| rms(&render(&mut engine, window))).collect();
    let lo = levels.iter().cloned().fold(f32::MAX, f32::min);
    let hi = levels.iter().cloned().fold(0.0, f32::max);
    assert!(hi / lo < 1.5, "levels wander: {:?}", levels);
}

#[test]
fn test_release_decays_to_silence() {
    let (mut engine, mut handle) = sustained_engine();
    render(&mut engine, samples(0.5));
    let level = rms(&render(&mut engine, samples(0.1)));

    handle.stop_sounding().unwrap();
    let release = render(&mut engine, samples(0.3));
    assert_all_finite(&release, "release");

    let tail = &release[release.len() - samples(0.01)..];
    assert!(
        rms(tail) < level * RELEASE_RATIO,
        "tail RMS {} vs sustained {}",
        rms(tail),
        level
    );

    // Keeps falling: nothing left a little later.
    let later = render(&mut engine, samples(0.5));
    assert_is_silent(&later[later.len() - 256..], 1e-3, "long after release");
}

/// The release envelope never jumps: no sample-to-sample step larger than
/// the steps seen while sustaining.
#[test]
fn test_release_has_no_click() {
    let (mut engine, mut handle) = sustained_engine();
    render(&mut engine, samples(0.5));
    let sustain = render(&mut engine, samples(0.1));
    let sustain_step = max_step(&sustain);

    handle.stop_sounding().unwrap();
    let release = render(&mut engine, samples(0.05));
    assert!(
        max_step(&release) <= sustain_step * 1.5,
        "release step {} vs sustain step {}",
        max_step(&release),
        sustain_step
    );
}

#[test]
fn test_restart_after_release() {
    let (mut engine, mut handle) = sustained_engine();
    render(&mut engine, samples(0.3));
    handle.stop_sounding().unwrap();
    render(&mut engine, samples(0.5));

    handle.start_sounding().unwrap();
    render(&mut engine, samples(0.3));
    assert_not_silent(&render(&mut engine, samples(0.1)), SUSTAIN_RMS_MIN, "restart");
}

#[test]
fn test_fundamental_change_retunes_string() {
    let (mut engine, mut handle) = sustained_engine();
    render(&mut engine, samples(0.2));

    handle
        .set_parameter(ParamId::FundamentalFrequency, 440.0)
        .unwrap();
    let out = render(&mut engine, samples(0.1));
    assert_all_finite(&out, "retune");

    let first = engine.voice().strings().modes()[0].frequency;
    assert_relative_eq!(first, 440.0, max_relative = 0.01);
}

#[test]
fn test_master_gain_zero_is_silent() {
    let (mut engine, mut handle) = sustained_engine();
    handle.set_parameter(ParamId::MasterGain, 0.0).unwrap();
    let out = render(&mut engine, samples(0.3));
    assert_is_silent(&out, FLOAT_EPSILON, "zero gain");
}
