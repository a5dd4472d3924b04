//! Control surface tests: handle, queue, clamping and programs

use crate::helpers::*;
use approx::assert_relative_eq;
use arco::prelude::*;
use arco::TransitionPhase;

#[test]
fn test_full_queue_is_non_blocking() {
    let (mut engine, mut handle) = ArcoEngine::builder()
        .control_capacity(4)
        .build()
        .unwrap();

    for i in 0..4 {
        handle
            .set_parameter(ParamId::BowForce, i as f32 * 0.1)
            .unwrap();
    }
    let err = handle.start_sounding().unwrap_err();
    assert!(err.is_queue_full());
    assert!(matches!(err, Error::Core(arco::core::Error::QueueFull)));

    // Accepted messages are applied in order; the rejected one is not.
    render(&mut engine, 64);
    assert_relative_eq!(
        engine.voice().parameters().get(ParamId::BowForce),
        0.3,
        epsilon = 1e-6
    );
    assert!(!engine.bow_state().is_bowing);
}

#[test]
fn test_program_rejected_whole_when_queue_short() {
    let (mut engine, mut handle) = ArcoEngine::builder()
        .control_capacity(3)
        .build()
        .unwrap();

    let program = Program::new("too big")
        .with_parameter(ParamId::BowForce, 0.9)
        .with_parameter(ParamId::Brightness, 0.2)
        .with_expression(ExpressionKind::Vibrato);
    assert!(handle.load_program(&program).unwrap_err().is_queue_full());

    render(&mut engine, 64);
    assert_eq!(engine.voice().parameters().get(ParamId::BowForce), 0.5);
    assert_eq!(engine.expression_state().destination(), ExpressionKind::None);
}

#[test]
fn test_values_clamped_on_apply() {
    let (mut engine, mut handle) = test_engine();

    handle
        .set_parameter(ParamId::FundamentalFrequency, 10_000.0)
        .unwrap();
    handle.set_parameter(ParamId::BowForce, -3.0).unwrap();
    handle.set_parameter(ParamId::Brightness, f32::NAN).unwrap();
    handle
        .set_parameter(ParamId::MasterGain, f32::INFINITY)
        .unwrap();
    handle
        .set_parameter(ParamId::TremoloSpeed, f32::NEG_INFINITY)
        .unwrap();
    handle.set_parameter(ParamId::TrillInterval, 4.6).unwrap();
    handle.set_parameter(ParamId::StringMaterial, 9.0).unwrap();
    render(&mut engine, 16);

    let params = engine.voice().parameters();
    assert_eq!(params.get(ParamId::FundamentalFrequency), 4000.0);
    assert_eq!(params.get(ParamId::BowForce), 0.0);
    assert_eq!(params.get(ParamId::Brightness), 0.5);
    assert_eq!(params.get(ParamId::MasterGain), 1.0);
    assert_eq!(params.get(ParamId::TremoloSpeed), 2.0);
    assert_eq!(params.get(ParamId::TrillInterval), 5.0);
    assert_eq!(params.get_index(ParamId::StringMaterial), 4);
}

#[test]
fn test_toggle_parameters_request_expressions() {
    let (mut engine, mut handle) = test_engine();

    handle.set_parameter(ParamId::TrillEnabled, 1.0).unwrap();
    render(&mut engine, samples(0.3));
    assert_eq!(engine.expression_state().current, ExpressionKind::Trill);

    handle.set_parameter(ParamId::TrillEnabled, 0.0).unwrap();
    render(&mut engine, samples(0.5));
    let state = engine.expression_state();
    assert_eq!(state.current, ExpressionKind::None);
    assert_eq!(state.phase, TransitionPhase::Idle);
}

#[test]
fn test_program_from_json() {
    let json = r#"{
        "name": "sul tasto",
        "parameters": {
            "fundamentalFrequency": 146.83,
            "bowPosition": 0.8,
            "brightness": 0.25,
            "bodyType": 1,
            "vibratoRate": 6.0
        },
        "expression": "vibrato",
        "transition": { "startSecs": 0.2 }
    }"#;
    let program: Program = serde_json::from_str(json).unwrap();

    let (mut engine, mut handle) = test_engine();
    handle.load_program(&program).unwrap();
    handle.start_sounding().unwrap();
    let out = render(&mut engine, samples(0.4));

    let params = engine.voice().parameters();
    assert_relative_eq!(params.get(ParamId::FundamentalFrequency), 146.83);
    assert_eq!(params.get(ParamId::BowPosition), 0.8);
    assert_eq!(params.get_index(ParamId::BodyType), 1);
    assert!(params.get_flag(ParamId::VibratoEnabled));

    // 0.2 s start time: fully engaged well before 0.4 s.
    let state = engine.expression_state();
    assert_eq!(state.current, ExpressionKind::Vibrato);
    assert_eq!(state.phase, TransitionPhase::Idle);
    assert_all_finite(&out, "program");
}

#[test]
fn test_program_on_builder_matches_program_via_handle() {
    let program = Program::new("ponticello")
        .with_parameter(ParamId::BowPosition, 0.05)
        .with_parameter(ParamId::BowForce, 0.8)
        .with_parameter(ParamId::StringMaterial, 3.0);

    let (mut direct, mut direct_handle) = ArcoEngine::builder()
        .program(program.clone())
        .build()
        .unwrap();
    let (mut queued, mut queued_handle) = test_engine();
    queued_handle.load_program(&program).unwrap();

    direct_handle.start_sounding().unwrap();
    queued_handle.start_sounding().unwrap();

    let a = render(&mut direct, 2048);
    let b = render(&mut queued, 2048);
    assert_eq!(a, b);
}

#[test]
fn test_stop_is_gradual() {
    let (mut engine, mut handle) = test_engine();
    handle.start_sounding().unwrap();
    render(&mut engine, samples(0.3));

    handle.stop_sounding().unwrap();
    let mut released = [0.0f32; 64];
    engine.process(&mut released);
    assert!(!engine.bow_state().is_bowing);
    assert!(engine.bow_state().envelope > 0.0);
    assert_not_silent(&released, 1e-4, "right after stop");
}
