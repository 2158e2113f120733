//! Mock implementations for testing
//!
//! This module provides mock implementations of all platform traits
//! for use in unit and integration tests. Mocks that are moved into the
//! code under test (`MockClock`) share their state through an `Rc`, so a
//! test can keep a clone and observe calls afterwards.

#![cfg(any(test, feature = "std"))]
// Mock counters; overflow not a concern in tests
#![allow(clippy::arithmetic_side_effects)]

use std::cell::Cell;
use std::collections::HashMap;
use std::rc::Rc;
use std::string::{String, ToString};
use std::vec::Vec;

use crate::*;

// ── Hardware description ─────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Property {
    References(Vec<Option<NodeRef>>),
    Strings(Vec<String>),
    U32(u32),
    Malformed,
}

/// Synthetic device-tree node built property by property.
#[derive(Debug, Clone, Default)]
pub struct MockDeviceTree {
    compatible: Option<String>,
    props: HashMap<String, Property>,
}

impl MockDeviceTree {
    /// Create an empty node with no `compatible` tag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the node's `compatible` tag.
    #[must_use]
    pub fn with_compatible(mut self, tag: &str) -> Self {
        self.compatible = Some(tag.to_string());
        self
    }

    /// Add a reference-list property. A phandle of `0` is kept as an entry
    /// that does not resolve.
    #[must_use]
    pub fn with_references(mut self, key: &str, phandles: &[u32]) -> Self {
        let refs = phandles.iter().map(|&p| NodeRef::new(p)).collect();
        self.props.insert(key.to_string(), Property::References(refs));
        self
    }

    /// Add a string-list property.
    #[must_use]
    pub fn with_strings(mut self, key: &str, values: &[&str]) -> Self {
        let values = values.iter().map(|s| (*s).to_string()).collect();
        self.props.insert(key.to_string(), Property::Strings(values));
        self
    }

    /// Add a single-string property.
    #[must_use]
    pub fn with_string(self, key: &str, value: &str) -> Self {
        self.with_strings(key, &[value])
    }

    /// Add a `u32` property.
    #[must_use]
    pub fn with_u32(mut self, key: &str, value: u32) -> Self {
        self.props.insert(key.to_string(), Property::U32(value));
        self
    }

    /// Add a property whose value cannot be decoded as any type.
    #[must_use]
    pub fn with_malformed(mut self, key: &str) -> Self {
        self.props.insert(key.to_string(), Property::Malformed);
        self
    }

    /// Remove a property.
    #[must_use]
    pub fn without(mut self, key: &str) -> Self {
        self.props.remove(key);
        self
    }

    fn prop(&self, key: &str) -> Result<&Property, PropertyError> {
        self.props.get(key).ok_or(PropertyError::NotFound)
    }
}

impl HardwareDescription for MockDeviceTree {
    fn compatible(&self) -> Option<&str> {
        self.compatible.as_deref()
    }

    fn get_reference(&self, key: &str, index: usize) -> Option<NodeRef> {
        match self.props.get(key)? {
            Property::References(refs) => refs.get(index).copied().flatten(),
            _ => None,
        }
    }

    fn count_references(&self, key: &str) -> Result<usize, PropertyError> {
        match self.prop(key)? {
            Property::References(refs) => Ok(refs.len()),
            _ => Err(PropertyError::Malformed),
        }
    }

    fn get_string(&self, key: &str) -> Result<&str, PropertyError> {
        match self.prop(key)? {
            Property::Strings(values) => values
                .first()
                .map(String::as_str)
                .ok_or(PropertyError::Malformed),
            _ => Err(PropertyError::Malformed),
        }
    }

    fn get_u32(&self, key: &str) -> Result<u32, PropertyError> {
        match self.prop(key)? {
            Property::U32(v) => Ok(*v),
            _ => Err(PropertyError::Malformed),
        }
    }

    fn get_string_array(
        &self,
        key: &str,
    ) -> Result<impl Iterator<Item = &str> + '_, PropertyError> {
        match self.prop(key)? {
            Property::Strings(values) => Ok(values.iter().map(String::as_str)),
            _ => Err(PropertyError::Malformed),
        }
    }
}

// ── Clocks ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct ClockState {
    enabled: Cell<bool>,
    enable_calls: Cell<usize>,
    disable_calls: Cell<usize>,
    unbalanced_disables: Cell<usize>,
    fail_enable: Cell<bool>,
}

/// Mock gateable clock. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MockClock {
    state: Rc<ClockState>,
}

impl MockClock {
    /// Create a clock in the disabled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent `prepare_enable` calls fail (or succeed again).
    pub fn set_fail_enable(&self, fail: bool) {
        self.state.fail_enable.set(fail);
    }

    /// Whether the clock is currently running.
    pub fn is_enabled(&self) -> bool {
        self.state.enabled.get()
    }

    /// Successful `prepare_enable` calls.
    pub fn enable_count(&self) -> usize {
        self.state.enable_calls.get()
    }

    /// `disable_unprepare` calls on a running clock.
    pub fn disable_count(&self) -> usize {
        self.state.disable_calls.get()
    }

    /// `disable_unprepare` calls on a clock that was not running.
    pub fn unbalanced_disables(&self) -> usize {
        self.state.unbalanced_disables.get()
    }
}

impl Clock for MockClock {
    fn prepare_enable(&mut self) -> Result<(), ClockError> {
        if self.state.fail_enable.get() {
            return Err(ClockError::Failed);
        }
        self.state.enabled.set(true);
        self.state.enable_calls.set(self.state.enable_calls.get() + 1);
        Ok(())
    }

    fn disable_unprepare(&mut self) {
        if self.state.enabled.replace(false) {
            self.state.disable_calls.set(self.state.disable_calls.get() + 1);
        } else {
            self.state
                .unbalanced_disables
                .set(self.state.unbalanced_disables.get() + 1);
        }
    }
}

/// Mock clock lookup.
#[derive(Debug, Default)]
pub struct MockClockProvider {
    clocks: Vec<(String, MockClock)>,
    defer: bool,
    lookups: Vec<String>,
}

impl MockClockProvider {
    /// Provider with no clocks; every lookup is `NotFound`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Provider whose every lookup is `DeferProbe`.
    pub fn deferring() -> Self {
        Self {
            defer: true,
            ..Self::default()
        }
    }

    /// Register `clock` under connection name `name`.
    #[must_use]
    pub fn with_clock(mut self, name: &str, clock: MockClock) -> Self {
        self.clocks.push((name.to_string(), clock));
        self
    }

    /// Names requested so far, in order.
    pub fn lookups(&self) -> &[String] {
        &self.lookups
    }
}

impl ClockProvider for MockClockProvider {
    type Clock = MockClock;

    fn get(&mut self, name: &str) -> Result<MockClock, ClockError> {
        self.lookups.push(name.to_string());
        if self.defer {
            return Err(ClockError::DeferProbe);
        }
        self.clocks
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c.clone())
            .ok_or(ClockError::NotFound)
    }
}

// ── DAI and sessions ─────────────────────────────────────────────────────────

/// One recorded `set_sysclk` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SysclkCall {
    /// Clock input id
    pub clk_id: u32,
    /// Frequency in Hz
    pub freq_hz: u32,
    /// Clock direction
    pub dir: ClockDirection,
}

/// Mock controller DAI that records sysclk configuration.
#[derive(Debug, Default)]
pub struct MockCpuDai {
    /// Every `set_sysclk` call, in order.
    pub sysclk_calls: Vec<SysclkCall>,
    /// When set, `set_sysclk` fails with this error.
    pub fail_with: Option<DaiError>,
}

impl CpuDai for MockCpuDai {
    fn set_sysclk(
        &mut self,
        clk_id: u32,
        freq_hz: u32,
        dir: ClockDirection,
    ) -> Result<(), DaiError> {
        if let Some(err) = self.fail_with {
            return Err(err);
        }
        self.sysclk_calls.push(SysclkCall {
            clk_id,
            freq_hz,
            dir,
        });
        Ok(())
    }
}

/// Mock engine-side session state.
#[derive(Debug)]
pub struct MockRuntime {
    id: SessionId,
    /// Controller DAI of this session
    pub dai: MockCpuDai,
}

impl MockRuntime {
    /// Session `id` with a fresh DAI.
    pub fn new(id: u32) -> Self {
        Self {
            id: SessionId(id),
            dai: MockCpuDai::default(),
        }
    }
}

impl PcmRuntime for MockRuntime {
    type CpuDai = MockCpuDai;

    fn session(&self) -> SessionId {
        self.id
    }

    fn cpu_dai(&mut self) -> &mut MockCpuDai {
        &mut self.dai
    }
}

// ── Registry ─────────────────────────────────────────────────────────────────

/// Mock streaming engine card registry.
#[derive(Debug, Default)]
pub struct MockRegistry {
    cards: Vec<String>,
    reject_with: Option<String>,
}

impl MockRegistry {
    /// Registry that accepts every card.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that rejects every card with `cause`.
    pub fn rejecting(cause: &str) -> Self {
        Self {
            cards: Vec::new(),
            reject_with: Some(cause.to_string()),
        }
    }

    /// Names of currently registered cards.
    pub fn cards(&self) -> &[String] {
        &self.cards
    }
}

impl CardRegistry for MockRegistry {
    fn register_card<C: SoundCard>(&mut self, card: &C) -> Result<(), RegistrationError> {
        if let Some(cause) = &self.reject_with {
            return Err(RegistrationError::new(cause));
        }
        self.cards.push(card.name().to_string());
        Ok(())
    }

    fn unregister_card(&mut self, name: &str) {
        self.cards.retain(|n| n != name);
    }
}
