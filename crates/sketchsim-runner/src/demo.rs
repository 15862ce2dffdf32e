//! Bundled demo sketch: join a network, poll a URL, show the result.

use sketchsim_common::{Base, Text};
use sketchsim_http::HttpError;
use sketchsim_wifi::{RadioMode, RadioStatus};
use tracing::{info, warn};

use crate::config::SketchConfig;
use crate::context::SimContext;
use crate::graphics::{AnimatedProperty, Animation, Property, ShapeId, ShapeKind};
use crate::sketch::{LoopControl, Sketch};

/// Lines of each response body echoed to the log.
const PREVIEW_LINES: usize = 3;

const COLOR_OK: u32 = 0x00c853;
const COLOR_ERROR: u32 = 0xd50000;

/// Connects with the configured credentials and fetches the configured URL
/// once per loop, logging the status, size and first lines of the body.
pub struct FetchSketch {
    config: SketchConfig,
    status_dot: Option<ShapeId>,
    status_label: Option<ShapeId>,
    last_code: Option<i32>,
    preview: Vec<Text>,
    fetches: u64,
}

impl FetchSketch {
    /// Create the sketch.
    pub fn new(config: SketchConfig) -> Self {
        FetchSketch {
            config,
            status_dot: None,
            status_label: None,
            last_code: None,
            preview: Vec::new(),
            fetches: 0,
        }
    }

    /// Return value of the most recent request.
    pub fn last_code(&self) -> Option<i32> {
        self.last_code
    }

    /// Leading lines of the most recent successful response.
    pub fn preview(&self) -> &[Text] {
        &self.preview
    }

    /// Requests issued so far.
    pub fn fetches(&self) -> u64 {
        self.fetches
    }

    fn show_status(&self, ctx: &mut SimContext, ok: bool, text: Text) {
        let gfx = ctx.graphics();
        if let Some(dot) = self.status_dot {
            gfx.set_property(dot, Property::Color(if ok { COLOR_OK } else { COLOR_ERROR }));
        }
        if let Some(label) = self.status_label {
            gfx.set_property(label, Property::Text(text.to_string()));
        }
    }

    fn fetch(&mut self, ctx: &mut SimContext) {
        let mut http = ctx.http_client();
        if !http.begin(&self.config.url) {
            warn!("[Sketch] No URL configured");
        }

        let code = http.get();
        self.last_code = Some(code);
        self.fetches += 1;

        if code > 0 {
            info!("[Sketch] HTTP {} ({} bytes)", code, http.response_size());
            self.preview.clear();
            let stream = http.stream_mut();
            while self.preview.len() < PREVIEW_LINES && stream.available() > 0 {
                let mut line = stream.read_string_until(b'\n');
                line.trim();
                info!("[Sketch]   {}", line);
                self.preview.push(line);
            }
            let mut label = Text::from("HTTP ");
            label += &Text::from_int(code, Base::Dec);
            self.show_status(ctx, (200..300).contains(&code), label);
        } else {
            warn!("[Sketch] Request failed: {}", HttpError::describe_code(code));
            self.show_status(ctx, false, Text::from(HttpError::describe_code(code)));
        }
        http.end();
    }
}

impl Sketch for FetchSketch {
    fn setup(&mut self, ctx: &mut SimContext) {
        let gfx = ctx.graphics();
        let screen = gfx.create_shape(None, ShapeKind::Rect);
        gfx.set_property(screen, Property::Width(240));
        gfx.set_property(screen, Property::Height(536));
        let dot = gfx.create_shape(Some(screen), ShapeKind::Arc);
        gfx.set_property(dot, Property::Radius(8));
        gfx.animate(
            dot,
            Animation::new(AnimatedProperty::Opacity, 80, 255, 900)
                .forever()
                .with_playback()
                .with_repeat_delay(300),
        );
        let label = gfx.create_shape(Some(screen), ShapeKind::Label);
        self.status_dot = Some(dot);
        self.status_label = Some(label);

        let radio = ctx.radio_mut();
        radio.set_mode(RadioMode::Station);
        let found = radio.scan_networks();
        info!("[Sketch] {} networks in range", found);

        let status = radio.connect(&self.config.ssid, Some(&self.config.password));
        if status == RadioStatus::Connected {
            info!(
                "[Sketch] Joined '{}' as {} (MAC {})",
                self.config.ssid,
                radio.local_address(),
                radio.mac_address()
            );
            self.show_status(ctx, true, Text::from("WiFi OK"));
        } else {
            warn!("[Sketch] Could not join '{}': {}", self.config.ssid, status);
            self.show_status(ctx, false, Text::from("WiFi error"));
        }
    }

    fn run_loop(&mut self, ctx: &mut SimContext) -> LoopControl {
        if !ctx.radio().is_connected() {
            let status = ctx.radio_mut().reconnect();
            if status != RadioStatus::Connected {
                warn!("[Sketch] Still offline ({}), retrying", status);
                ctx.delay(self.config.interval_ms);
                return LoopControl::Continue;
            }
        }

        let rssi = ctx.radio_mut().rssi();
        info!("[Sketch] RSSI {} dBm", rssi);
        self.fetch(ctx);
        ctx.delay(self.config.interval_ms);
        LoopControl::Continue
    }
}
