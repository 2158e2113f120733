//! Session lifecycle integration tests.
//!
//! Attaches a card through `machine::probe`, then drives the three session
//! hooks the way the streaming engine does: open, parameter negotiation
//! (possibly repeated), close. Checks master clock gating and the sysclk
//! programmed into the controller DAI.
//!
//! Run with: cargo test -p machine --test session_lifecycle
// Integration test file: unwrap is an intentional test mechanism.
#![allow(clippy::unwrap_used)]

use machine::{probe, Card, Error, SessionState};
use platform::mocks::{
    MockClock, MockClockProvider, MockDeviceTree, MockRegistry, MockRuntime, SysclkCall,
};
use platform::{ClockDirection, ClockError, DaiError, HwParams, StreamOps};

fn attach(rate: Option<u32>, mclk: Option<&MockClock>) -> Card<MockClock> {
    let mut dt = MockDeviceTree::new()
        .with_compatible("nulbbb,audio")
        .with_references("nulbbb,mcasp-controller", &[1])
        .with_references("nulbbb,audio-codec", &[2, 3])
        .with_strings("nulbbb,codec-name", &["tlv320aic3x-hifi", "pcm5102a-hifi"]);
    if let Some(hz) = rate {
        dt = dt.with_u32("nulbbb,codec-clock-rate", hz);
    }
    let mut clocks = MockClockProvider::new();
    if let Some(clock) = mclk {
        clocks = clocks.with_clock("mclk", clock.clone());
    }
    probe(&dt, &mut clocks, &mut MockRegistry::new()).unwrap()
}

#[test]
fn start_configure_stop() {
    let mclk = MockClock::new();
    let mut card = attach(Some(24_576_000), Some(&mclk));
    let mut rt = MockRuntime::new(1);

    card.on_session_open(&mut rt).unwrap();
    assert!(mclk.is_enabled());
    assert!(card.mclk_enabled());

    let params = HwParams {
        rate_hz: 48_000,
        channels: 2,
        sample_bits: 24,
    };
    card.on_parameters_negotiated(&mut rt, &params).unwrap();
    assert_eq!(card.session_state(), SessionState::Streaming);
    assert_eq!(
        rt.dai.sysclk_calls,
        [SysclkCall {
            clk_id: 0,
            freq_hz: 24_576_000,
            dir: ClockDirection::In,
        }]
    );

    card.on_session_close(&mut rt);
    assert!(!mclk.is_enabled());
    assert_eq!(mclk.enable_count(), 1);
    assert_eq!(mclk.disable_count(), 1);
    assert_eq!(card.session_state(), SessionState::Idle);
}

#[test]
fn zero_rate_skips_sysclk() {
    let mut card = attach(Some(0), None);
    let mut rt = MockRuntime::new(1);
    card.on_session_open(&mut rt).unwrap();
    card.on_parameters_negotiated(&mut rt, &HwParams::default()).unwrap();
    assert!(rt.dai.sysclk_calls.is_empty());
    card.on_session_close(&mut rt);
}

#[test]
fn absent_rate_skips_sysclk() {
    let mut card = attach(None, None);
    let mut rt = MockRuntime::new(1);
    card.on_session_open(&mut rt).unwrap();
    card.on_parameters_negotiated(&mut rt, &HwParams::default()).unwrap();
    assert!(rt.dai.sysclk_calls.is_empty());
}

#[test]
fn board_without_mclk_streams() {
    let mut card = attach(Some(24_576_000), None);
    let mut rt = MockRuntime::new(1);
    card.on_session_open(&mut rt).unwrap();
    assert!(!card.mclk_enabled());
    card.on_parameters_negotiated(&mut rt, &HwParams::default()).unwrap();
    assert_eq!(rt.dai.sysclk_calls.len(), 1);
    card.on_session_close(&mut rt);
    assert_eq!(card.session_state(), SessionState::Idle);
}

#[test]
fn clock_enable_failure_fails_only_that_session() {
    let mclk = MockClock::new();
    let mut card = attach(Some(24_576_000), Some(&mclk));

    mclk.set_fail_enable(true);
    let mut first = MockRuntime::new(1);
    assert_eq!(
        card.on_session_open(&mut first),
        Err(Error::ClockEnableFailed(ClockError::Failed))
    );
    assert_eq!(card.session_state(), SessionState::Idle);
    // The engine still closes the failed session.
    card.on_session_close(&mut first);
    assert_eq!(mclk.unbalanced_disables(), 0);

    mclk.set_fail_enable(false);
    let mut second = MockRuntime::new(2);
    card.on_session_open(&mut second).unwrap();
    card.on_parameters_negotiated(&mut second, &HwParams::default()).unwrap();
    card.on_session_close(&mut second);
    assert_eq!(mclk.enable_count(), 1);
    assert_eq!(mclk.disable_count(), 1);
}

#[test]
fn sysclk_rejection_is_reported_and_clock_released_at_close() {
    let mclk = MockClock::new();
    let mut card = attach(Some(24_576_000), Some(&mclk));
    let mut rt = MockRuntime::new(1);
    rt.dai.fail_with = Some(DaiError::Hardware);

    card.on_session_open(&mut rt).unwrap();
    assert_eq!(
        card.on_parameters_negotiated(&mut rt, &HwParams::default()),
        Err(Error::SysclkConfigFailed(DaiError::Hardware))
    );
    assert_eq!(card.session_state(), SessionState::Starting);

    card.on_session_close(&mut rt);
    assert!(!mclk.is_enabled());
    assert_eq!(mclk.enable_count(), mclk.disable_count());
}

#[test]
fn concurrent_open_is_rejected_without_touching_clock() {
    let mclk = MockClock::new();
    let mut card = attach(Some(24_576_000), Some(&mclk));
    let mut owner = MockRuntime::new(1);
    let mut other = MockRuntime::new(2);

    card.on_session_open(&mut owner).unwrap();
    assert_eq!(card.on_session_open(&mut other), Err(Error::SessionBusy));
    assert_eq!(
        card.on_parameters_negotiated(&mut other, &HwParams::default()),
        Err(Error::NoActiveSession)
    );
    assert!(other.dai.sysclk_calls.is_empty());

    card.on_session_close(&mut other);
    assert!(mclk.is_enabled());
    card.on_session_close(&mut owner);
    assert!(!mclk.is_enabled());
    assert_eq!(mclk.enable_count(), 1);
}

#[test]
fn repeated_sessions_stay_balanced() {
    let mclk = MockClock::new();
    let mut card = attach(Some(24_576_000), Some(&mclk));
    for id in 0..5 {
        let mut rt = MockRuntime::new(id);
        card.on_session_open(&mut rt).unwrap();
        card.on_parameters_negotiated(&mut rt, &HwParams::default()).unwrap();
        card.on_session_close(&mut rt);
    }
    assert_eq!(mclk.enable_count(), 5);
    assert_eq!(mclk.disable_count(), 5);
    assert!(!mclk.is_enabled());
}
