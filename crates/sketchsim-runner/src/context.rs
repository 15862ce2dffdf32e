//! Process-wide simulation context.
//!
//! Everything a sketch can touch lives here and is handed to it explicitly:
//! the clock, the one radio session, HTTP defaults and the display.

use std::sync::Arc;

use sketchsim_common::{Clock, SystemClock};
use sketchsim_http::{HttpClient, HttpConfig};
use sketchsim_wifi::RadioSession;

use crate::config::{ConfigError, SimConfig};
use crate::graphics::{Graphics, RecordingGraphics};

/// State shared by the runner and the sketch for the life of the process.
pub struct SimContext {
    clock: Arc<dyn Clock>,
    radio: RadioSession,
    http: HttpConfig,
    graphics: Box<dyn Graphics>,
}

impl SimContext {
    /// Build a context from configuration with an explicit clock and display.
    pub fn new(config: &SimConfig, clock: Arc<dyn Clock>, graphics: Box<dyn Graphics>) -> Result<Self, ConfigError> {
        let directory = Arc::new(config.directory()?);
        let radio = RadioSession::new(directory, Arc::clone(&clock), config.radio.clone());
        Ok(SimContext {
            clock,
            radio,
            http: config.http.clone(),
            graphics,
        })
    }

    /// Build a context on the wall clock with a recording display.
    pub fn from_config(config: &SimConfig) -> Result<Self, ConfigError> {
        Self::new(config, Arc::new(SystemClock::new()), Box::new(RecordingGraphics::new()))
    }

    /// Milliseconds since start.
    pub fn millis(&self) -> u64 {
        self.clock.millis()
    }

    /// Microseconds since start.
    pub fn micros(&self) -> u64 {
        self.clock.micros()
    }

    /// Block for `ms` milliseconds.
    pub fn delay(&self, ms: u64) {
        self.clock.delay(ms);
    }

    /// The clock.
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// The radio.
    pub fn radio(&self) -> &RadioSession {
        &self.radio
    }

    /// The radio, mutably.
    pub fn radio_mut(&mut self) -> &mut RadioSession {
        &mut self.radio
    }

    /// Defaults for new HTTP clients.
    pub fn http_config(&self) -> &HttpConfig {
        &self.http
    }

    /// A fresh HTTP client carrying the configured defaults.
    pub fn http_client(&self) -> HttpClient {
        HttpClient::with_config(self.http.clone())
    }

    /// The display.
    pub fn graphics(&mut self) -> &mut dyn Graphics {
        self.graphics.as_mut()
    }
}
