// gsmsim-rs/gsmsim/src/card/session.rs

use std::marker::PhantomData;
use std::thread;

use log::{debug, warn};

use crate::card::config::SessionConfig;
use crate::card::state::SessionState;
use crate::protocol::{self, ApduCommand, ApduResponse, CardProfile};
use crate::transport::Transport;
use crate::utils::{bytes_to_hex, ms};
use crate::Result;

/// Type-state markers
pub struct Closed;
pub struct Open;

/// Session with one SIM over one serial line.
///
/// Exchanges are strictly sequential; the session is not meant to be shared
/// between threads.
pub struct CardSession<State = Closed> {
    pub(crate) transport: Box<dyn Transport>,
    pub(crate) config: SessionConfig,
    pub(crate) state: SessionState,
    profile: CardProfile,
    _state: PhantomData<State>,
}

impl<S> CardSession<S> {
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }
}

impl CardSession<Closed> {
    pub fn new_with_transport(transport: Box<dyn Transport>) -> Self {
        Self::with_config(transport, SessionConfig::default())
    }

    pub fn with_config(transport: Box<dyn Transport>, config: SessionConfig) -> Self {
        Self {
            transport,
            config,
            state: SessionState::default(),
            profile: CardProfile::default(),
            _state: PhantomData,
        }
    }

    /// Reset the card, read its ATR and (if configured) refresh the CHV
    /// counters. The session is open once the ATR parsed; a failed refresh
    /// is logged and leaves the CHV state at its defaults.
    pub fn open(self) -> Result<CardSession<Open>> {
        let mut this = self;
        let t = &mut *this.transport;

        t.assert_reset()?;
        if this.config.reset_pulse_ms > 0 {
            thread::sleep(ms(this.config.reset_pulse_ms));
        }
        t.flush_input()?;
        t.release_reset()?;

        let profile = protocol::read_atr(t, this.config.read_timeout_ms, this.config.max_atr_len)?;
        debug!("ATR: {}", bytes_to_hex(&profile.raw()));
        if !profile.offers_t0() {
            warn!("card does not announce T=0 (protocols {:?})", profile.protocols());
        }

        let mut session = CardSession {
            transport: this.transport,
            config: this.config,
            state: SessionState {
                is_open: true,
                ..SessionState::default()
            },
            profile,
            _state: PhantomData,
        };

        if session.config.refresh_chv_on_open {
            if let Err(e) = session.refresh_chv_status() {
                warn!("CHV refresh on open failed: {}", e);
            }
        }
        Ok(session)
    }

    /// Give the transport back, e.g. to reopen it elsewhere.
    pub fn into_transport(self) -> Box<dyn Transport> {
        self.transport
    }
}

impl CardSession<Open> {
    /// Decoded answer-to-reset of the card.
    pub fn profile(&self) -> &CardProfile {
        &self.profile
    }

    /// Run one APDU and return data and status word as received.
    pub fn exchange(&mut self, cmd: &ApduCommand) -> Result<ApduResponse> {
        protocol::exchange(&mut *self.transport, cmd, self.config.read_timeout_ms)
    }

    /// Like [`exchange`](Self::exchange) for a command given as hex text,
    /// e.g. `"A0F200000D"`.
    pub fn exchange_hex(&mut self, cmd: &str) -> Result<ApduResponse> {
        let cmd = ApduCommand::from_hex(cmd)?;
        self.exchange(&cmd)
    }

    /// End the session. Session state is discarded.
    pub fn close(self) -> CardSession<Closed> {
        debug!("closing session");
        CardSession {
            transport: self.transport,
            config: self.config,
            state: SessionState::default(),
            profile: CardProfile::default(),
            _state: PhantomData,
        }
    }

    /// Close and open again on the same transport.
    pub fn reopen(self) -> Result<CardSession<Open>> {
        self.close().open()
    }
}
