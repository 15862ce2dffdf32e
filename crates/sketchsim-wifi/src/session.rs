//! Radio state machine.
//!
//! A [`RadioSession`] reproduces the observable contract of a station-mode
//! wireless radio against a fixed [`NetworkDirectory`]: connect attempts are
//! validated by name then secret, a successful association takes the
//! configured connect delay and leases an address from a small pool, and
//! signal strength jitters by up to 2 dBm on every query.
//!
//! Failures are never errors. They surface as [`RadioStatus`] values that
//! firmware branches on, and "not found" stays distinguishable from a rejected
//! secret.

use std::fmt;
use std::net::Ipv4Addr;
use std::sync::Arc;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use sketchsim_common::Clock;
use sketchsim_metrics::{metric_defs, metrics, MetricLabels};
use tracing::{debug, info, warn};

use crate::directory::{NetworkDirectory, NetworkRecord};
use crate::EncryptionType;

// ============================================================================
// Configuration Types
// ============================================================================

/// Timing, addressing and identity settings for a radio session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioConfig {
    /// Simulated association time in milliseconds.
    pub connect_delay_ms: u64,
    /// Simulated scan time in milliseconds.
    pub scan_delay_ms: u64,
    /// Seed for jitter, pooled addresses and the MAC. Entropy when unset.
    pub rng_seed: Option<u64>,
    /// Initial hostname.
    pub hostname: String,
    /// Gateway reported after association.
    pub gateway: Ipv4Addr,
    /// Subnet mask reported after association.
    pub subnet_mask: Ipv4Addr,
    /// DNS server reported after association.
    pub dns: Ipv4Addr,
    /// First address of the lease pool.
    pub address_base: Ipv4Addr,
    /// Number of addresses in the lease pool.
    pub address_span: u8,
}

impl Default for RadioConfig {
    fn default() -> Self {
        RadioConfig {
            connect_delay_ms: 500,
            scan_delay_ms: 100,
            rng_seed: None,
            hostname: "esp32-sim".to_string(),
            gateway: Ipv4Addr::new(192, 168, 1, 1),
            subnet_mask: Ipv4Addr::new(255, 255, 255, 0),
            dns: Ipv4Addr::new(8, 8, 8, 8),
            address_base: Ipv4Addr::new(192, 168, 1, 100),
            address_span: 50,
        }
    }
}

// ============================================================================
// Radio State
// ============================================================================

/// Operating mode of the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadioMode {
    /// Radio powered down.
    Off,
    /// Client of an access point.
    Station,
    /// Soft access point.
    AccessPoint,
    /// Station and access point at once.
    ApStation,
}

impl RadioMode {
    /// Numeric mode as reported to firmware.
    pub const fn code(&self) -> u8 {
        match self {
            RadioMode::Off => 0,
            RadioMode::Station => 1,
            RadioMode::AccessPoint => 2,
            RadioMode::ApStation => 3,
        }
    }
}

/// Connection status of the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RadioStatus {
    /// Radio powered down.
    Off,
    /// Powered, not associated, nothing attempted.
    Idle,
    /// Scan in progress. Scans complete synchronously, so this is transient.
    Scanning,
    /// Associated with an address.
    Connected,
    /// The requested network is not in the directory.
    NoNetworkAvailable,
    /// The network rejected the presented secret.
    ConnectFailed,
    /// The association dropped without a disconnect request.
    ConnectionLost,
    /// Disconnected on request.
    Disconnected,
}

impl RadioStatus {
    /// Numeric status as reported to firmware.
    pub const fn code(&self) -> u8 {
        match self {
            RadioStatus::Idle => 0,
            RadioStatus::NoNetworkAvailable => 1,
            RadioStatus::Scanning => 2,
            RadioStatus::Connected => 3,
            RadioStatus::ConnectFailed => 4,
            RadioStatus::ConnectionLost => 5,
            RadioStatus::Disconnected => 6,
            RadioStatus::Off => 255,
        }
    }
}

impl fmt::Display for RadioStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RadioStatus::Off => "off",
            RadioStatus::Idle => "idle",
            RadioStatus::Scanning => "scanning",
            RadioStatus::Connected => "connected",
            RadioStatus::NoNetworkAvailable => "no network available",
            RadioStatus::ConnectFailed => "connect failed",
            RadioStatus::ConnectionLost => "connection lost",
            RadioStatus::Disconnected => "disconnected",
        };
        f.write_str(name)
    }
}

/// A 48-bit hardware address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MacAddress(pub [u8; 6]);

impl MacAddress {
    /// The raw octets.
    pub fn octets(&self) -> [u8; 6] {
        self.0
    }
}

impl fmt::Display for MacAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d, e, g] = self.0;
        write!(f, "{a:02X}:{b:02X}:{c:02X}:{d:02X}:{e:02X}:{g:02X}")
    }
}

// ============================================================================
// Radio Session
// ============================================================================

/// Remembered credentials for `reconnect`.
#[derive(Debug, Clone)]
struct Credentials {
    ssid: String,
    secret: String,
}

/// The simulated radio. One per process, owned by the simulation context.
pub struct RadioSession {
    directory: Arc<NetworkDirectory>,
    clock: Arc<dyn Clock>,
    config: RadioConfig,
    rng: ChaCha8Rng,

    mode: RadioMode,
    status: RadioStatus,
    /// Index of the associated network. Set only while `Connected`.
    current: Option<usize>,
    credentials: Option<Credentials>,

    local: Ipv4Addr,
    static_local: Option<Ipv4Addr>,
    gateway: Ipv4Addr,
    subnet: Ipv4Addr,
    dns: Ipv4Addr,
    hostname: String,
    mac: MacAddress,
}

impl RadioSession {
    /// Create a powered-down, disconnected radio with a fresh hardware address.
    pub fn new(directory: Arc<NetworkDirectory>, clock: Arc<dyn Clock>, config: RadioConfig) -> Self {
        let mut rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let mac = MacAddress([0x02, 0x00, 0x00, rng.gen(), rng.gen(), rng.gen()]);
        debug!("[WiFi] Radio created with MAC {}", mac);

        RadioSession {
            directory,
            clock,
            rng,
            mode: RadioMode::Off,
            status: RadioStatus::Disconnected,
            current: None,
            credentials: None,
            local: Ipv4Addr::UNSPECIFIED,
            static_local: None,
            gateway: config.gateway,
            subnet: config.subnet_mask,
            dns: config.dns,
            hostname: config.hostname.clone(),
            mac,
            config,
        }
    }

    /// The directory this radio associates against.
    pub fn directory(&self) -> &NetworkDirectory {
        &self.directory
    }

    /// The session configuration.
    pub fn config(&self) -> &RadioConfig {
        &self.config
    }

    // ------------------------------------------------------------------------
    // Mode and connection lifecycle
    // ------------------------------------------------------------------------

    /// Current operating mode.
    pub fn mode(&self) -> RadioMode {
        self.mode
    }

    /// Change operating mode. Switching off drops any association.
    pub fn set_mode(&mut self, mode: RadioMode) -> bool {
        self.mode = mode;
        if mode == RadioMode::Off {
            self.drop_association();
            self.local = Ipv4Addr::UNSPECIFIED;
            self.status = RadioStatus::Off;
        } else if self.status == RadioStatus::Off {
            self.status = RadioStatus::Idle;
        }
        debug!("[WiFi] Mode set to {:?}", mode);
        true
    }

    /// Attempt to associate with `ssid`.
    ///
    /// The pair is remembered for [`reconnect`](Self::reconnect) whatever the
    /// outcome. A failed attempt leaves the local address untouched.
    pub fn connect(&mut self, ssid: &str, secret: Option<&str>) -> RadioStatus {
        let secret = secret.unwrap_or_default();
        self.credentials = Some(Credentials {
            ssid: ssid.to_string(),
            secret: secret.to_string(),
        });
        self.mode = match self.mode {
            RadioMode::Off | RadioMode::Station => RadioMode::Station,
            RadioMode::AccessPoint | RadioMode::ApStation => RadioMode::ApStation,
        };
        self.drop_association();
        self.status = RadioStatus::Idle;

        info!("[WiFi] Attempting to connect to '{}'", ssid);
        metrics::counter!(metric_defs::WIFI_CONNECT_ATTEMPTS.name, &self.labels().to_labels()).increment(1);

        let directory = Arc::clone(&self.directory);
        let Some(index) = directory.position(ssid) else {
            warn!(
                "[WiFi] Network '{}' not found (available: {})",
                ssid,
                directory.list().iter().map(|r| r.name.as_str()).collect::<Vec<_>>().join(", ")
            );
            return self.fail(RadioStatus::NoNetworkAvailable, "not_found");
        };

        let network = &directory.list()[index];
        if network.encryption.requires_secret() {
            if secret.is_empty() {
                warn!("[WiFi] Network '{}' requires a secret", ssid);
                return self.fail(RadioStatus::ConnectFailed, "missing_secret");
            }
            if network.secret != secret {
                warn!("[WiFi] Incorrect secret for '{}'", ssid);
                return self.fail(RadioStatus::ConnectFailed, "wrong_secret");
            }
        }

        self.clock.delay(self.config.connect_delay_ms);

        let base_rssi = network.rssi;
        let channel = network.channel;
        self.local = match self.static_local {
            Some(addr) => addr,
            None => self.lease_address(),
        };
        self.current = Some(index);
        self.status = RadioStatus::Connected;

        let rssi = self.jitter(base_rssi);
        info!(
            "[WiFi] Connected to '{}' ip={} rssi={} dBm channel={}",
            ssid, self.local, rssi, channel
        );
        metrics::histogram!(metric_defs::WIFI_RSSI.name, &self.labels().to_labels()).record(rssi as f64);
        self.status
    }

    /// Drop the association. With `wifi_off` the radio also powers down;
    /// with `erase_credentials` the remembered pair is forgotten.
    pub fn disconnect(&mut self, wifi_off: bool, erase_credentials: bool) -> bool {
        self.drop_association();
        self.local = Ipv4Addr::UNSPECIFIED;
        self.status = RadioStatus::Disconnected;
        if wifi_off {
            self.mode = RadioMode::Off;
        }
        if erase_credentials {
            self.credentials = None;
        }
        info!("[WiFi] Disconnected");
        true
    }

    /// Repeat the last connect attempt. Without remembered credentials this
    /// does nothing and returns the current status.
    pub fn reconnect(&mut self) -> RadioStatus {
        match self.credentials.clone() {
            Some(creds) => self.connect(&creds.ssid, Some(&creds.secret)),
            None => {
                debug!("[WiFi] Reconnect requested with no remembered network");
                self.status
            }
        }
    }

    /// Drop a live association as if the access point vanished.
    ///
    /// Returns false when not connected.
    pub fn simulate_link_loss(&mut self) -> bool {
        if self.status != RadioStatus::Connected {
            return false;
        }
        self.drop_association();
        self.local = Ipv4Addr::UNSPECIFIED;
        self.status = RadioStatus::ConnectionLost;
        warn!("[WiFi] Connection lost");
        true
    }

    /// Current connection status.
    pub fn status(&self) -> RadioStatus {
        self.status
    }

    /// Whether the radio holds an association.
    pub fn is_connected(&self) -> bool {
        self.status == RadioStatus::Connected && self.current.is_some()
    }

    // ------------------------------------------------------------------------
    // Scanning
    // ------------------------------------------------------------------------

    /// Scan for networks. Returns the number found; status is unchanged.
    pub fn scan_networks(&mut self) -> usize {
        info!("[WiFi] Scanning for networks...");
        self.clock.delay(self.config.scan_delay_ms);
        metrics::counter!(metric_defs::WIFI_SCANS.name, &self.labels().to_labels()).increment(1);

        for (i, r) in self.directory.list().iter().enumerate() {
            debug!(
                "[WiFi]   {}: {} (RSSI: {}, Ch: {}, {})",
                i, r.name, r.rssi, r.channel, r.encryption
            );
        }
        self.directory.len()
    }

    /// Name of the network at a scan index.
    pub fn ssid_at(&self, index: usize) -> Option<&str> {
        self.directory.get(index).map(|r| r.name.as_str())
    }

    /// Base signal strength of the network at a scan index.
    pub fn rssi_at(&self, index: usize) -> Option<i32> {
        self.directory.get(index).map(|r| r.rssi)
    }

    /// Authentication mode of the network at a scan index.
    pub fn encryption_type(&self, index: usize) -> Option<EncryptionType> {
        self.directory.get(index).map(|r| r.encryption)
    }

    /// Channel of the network at a scan index.
    pub fn channel_at(&self, index: usize) -> Option<u8> {
        self.directory.get(index).map(|r| r.channel)
    }

    /// Access point address of the network at a scan index.
    pub fn bssid(&mut self, index: usize) -> Option<MacAddress> {
        let index = u8::try_from(index).ok().filter(|i| usize::from(*i) < self.directory.len())?;
        Some(MacAddress([0x02, 0x00, 0x00, index, self.rng.gen(), self.rng.gen()]))
    }

    // ------------------------------------------------------------------------
    // Association details
    // ------------------------------------------------------------------------

    /// Name from the last connect attempt.
    pub fn ssid(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.ssid.as_str())
    }

    /// Signal strength of the association, freshly jittered. 0 when not connected.
    pub fn rssi(&mut self) -> i32 {
        let base = match self.current_network() {
            Some(network) if self.status == RadioStatus::Connected => network.rssi,
            _ => return 0,
        };
        self.jitter(base)
    }

    /// Channel of the association. 0 when not connected.
    pub fn channel(&self) -> u8 {
        self.current_network().map_or(0, |r| r.channel)
    }

    /// Assigned address. 0.0.0.0 when never connected or after disconnect.
    pub fn local_address(&self) -> Ipv4Addr {
        self.local
    }

    /// Gateway address.
    pub fn gateway_address(&self) -> Ipv4Addr {
        self.gateway
    }

    /// Subnet mask.
    pub fn subnet_mask(&self) -> Ipv4Addr {
        self.subnet
    }

    /// DNS server address.
    pub fn dns_address(&self) -> Ipv4Addr {
        self.dns
    }

    /// Hardware address. Fixed for the life of the session.
    pub fn mac_address(&self) -> MacAddress {
        self.mac
    }

    /// Use static addressing. An unspecified `local` returns to pooled
    /// addresses; a DNS with a zero first octet keeps the current DNS.
    pub fn configure(&mut self, local: Ipv4Addr, gateway: Ipv4Addr, subnet: Ipv4Addr, dns: Ipv4Addr) -> bool {
        self.static_local = (!local.is_unspecified()).then_some(local);
        if self.is_connected() {
            if let Some(addr) = self.static_local {
                self.local = addr;
            }
        }
        self.gateway = gateway;
        self.subnet = subnet;
        if dns.octets()[0] != 0 {
            self.dns = dns;
        }
        debug!("[WiFi] Static config local={} gateway={} subnet={} dns={}", local, gateway, subnet, self.dns);
        true
    }

    /// Change the hostname.
    pub fn set_hostname(&mut self, hostname: &str) -> bool {
        self.hostname = hostname.to_string();
        true
    }

    /// Current hostname.
    pub fn hostname(&self) -> &str {
        &self.hostname
    }

    // ------------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------------

    fn current_network(&self) -> Option<&NetworkRecord> {
        self.current.and_then(|i| self.directory.get(i))
    }

    fn drop_association(&mut self) {
        self.current = None;
    }

    fn fail(&mut self, status: RadioStatus, reason: &'static str) -> RadioStatus {
        self.drop_association();
        self.status = status;
        metrics::counter!(
            metric_defs::WIFI_CONNECT_FAILURES.name,
            &self.labels().with("reason", reason)
        )
        .increment(1);
        status
    }

    fn jitter(&mut self, base: i32) -> i32 {
        base + self.rng.gen_range(-2..=2)
    }

    fn lease_address(&mut self) -> Ipv4Addr {
        let offset = if self.config.address_span == 0 {
            0
        } else {
            self.rng.gen_range(0..u32::from(self.config.address_span))
        };
        Ipv4Addr::from(u32::from(self.config.address_base).wrapping_add(offset))
    }

    fn labels(&self) -> MetricLabels {
        MetricLabels::new(self.hostname.clone())
    }
}

impl fmt::Debug for RadioSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RadioSession")
            .field("mode", &self.mode)
            .field("status", &self.status)
            .field("ssid", &self.ssid())
            .field("local", &self.local)
            .field("mac", &self.mac.to_string())
            .finish()
    }
}
