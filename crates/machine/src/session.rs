//! Playback session hooks
//!
//! The streaming engine calls three hooks around every playback stream.
//! They drive the card's master clock and controller sysclk:
//!
//! ```text
//!            open (acquire mclk)         params (set sysclk)
//! [Idle] ───────────────────► [Starting] ──────────────────► [Streaming]
//!   ▲  ◄── acquire failed ──────┘  │                              │
//!   │                              │ close                        │ close
//!   │                              ▼                              ▼
//!   └──────────────────────── [Stopping] (release mclk) ◄─────────┘
//! ```
//!
//! Every successful acquire is matched by exactly one release: `close`
//! releases unconditionally, whether the session streamed, failed parameter
//! negotiation, or was cancelled before streaming. A card serves one session
//! at a time; only the session that opened the card may drive or close it.

use platform::{Clock, CpuDai, HwParams, PcmRuntime, SessionId, StreamOps};

use crate::card::Card;
use crate::config::{SYSCLK_DIRECTION, SYSCLK_ID};
use crate::Error;

/// Playback session state of one card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SessionState {
    /// No session; master clock released.
    Idle,
    /// Opened, master clock held, parameters not yet applied.
    Starting,
    /// Parameters applied, data may flow.
    Streaming,
    /// Closing; master clock being released.
    Stopping,
}

/// Current state plus the session that owns the card.
#[derive(Debug)]
pub(crate) struct SessionTracker {
    state: SessionState,
    owner: Option<SessionId>,
}

impl SessionTracker {
    pub(crate) fn new() -> Self {
        Self {
            state: SessionState::Idle,
            owner: None,
        }
    }

    pub(crate) fn state(&self) -> SessionState {
        self.state
    }

    fn owned_by(&self, id: SessionId) -> bool {
        self.owner == Some(id)
    }

    fn begin(&mut self, id: SessionId) {
        self.state = SessionState::Starting;
        self.owner = Some(id);
    }

    fn stream(&mut self) {
        self.state = SessionState::Streaming;
    }

    fn stop(&mut self) {
        self.state = SessionState::Stopping;
    }

    fn finish(&mut self) {
        self.state = SessionState::Idle;
        self.owner = None;
    }
}

impl<C: Clock> StreamOps for Card<C> {
    type Error = Error;

    fn on_session_open<R: PcmRuntime>(&mut self, runtime: &mut R) -> Result<(), Error> {
        let id = runtime.session();
        if self.session.state() != SessionState::Idle {
            tracing::warn!("session {} rejected, card busy", id.0);
            return Err(Error::SessionBusy);
        }

        self.session.begin(id);
        if let Err(e) = self.clock.acquire() {
            tracing::error!("session {}: {}", id.0, e);
            self.session.finish();
            return Err(e);
        }
        Ok(())
    }

    fn on_parameters_negotiated<R: PcmRuntime>(
        &mut self,
        runtime: &mut R,
        params: &HwParams,
    ) -> Result<(), Error> {
        let id = runtime.session();
        let active = matches!(
            self.session.state(),
            SessionState::Starting | SessionState::Streaming
        );
        if !active || !self.session.owned_by(id) {
            return Err(Error::NoActiveSession);
        }

        tracing::debug!(
            "session {}: {} Hz, {} ch, {} bit",
            id.0,
            params.rate_hz,
            params.channels,
            params.sample_bits
        );

        match self.sysclk().get() {
            Some(hz) => runtime
                .cpu_dai()
                .set_sysclk(SYSCLK_ID, hz.get(), SYSCLK_DIRECTION)
                .map_err(|e| {
                    tracing::error!("session {}: set_sysclk({}) failed: {}", id.0, hz, e);
                    Error::SysclkConfigFailed(e)
                })?,
            None => tracing::debug!("sysclk unset, controller clock left as is"),
        }

        self.session.stream();
        Ok(())
    }

    fn on_session_close<R: PcmRuntime>(&mut self, runtime: &mut R) {
        let id = runtime.session();
        if self.session.state() == SessionState::Idle {
            tracing::debug!("session {} closed with no open session", id.0);
            return;
        }
        if !self.session.owned_by(id) {
            tracing::warn!("session {} does not own the card, close ignored", id.0);
            return;
        }

        self.session.stop();
        self.clock.release();
        self.session.finish();
    }
}
