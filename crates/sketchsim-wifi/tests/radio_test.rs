//! Connection lifecycle tests for the simulated radio.
//!
//! These exercise the observable contract firmware relies on: distinguishable
//! failure reasons, address retention on failure, and disconnect semantics.

use std::net::Ipv4Addr;
use std::sync::Arc;

use sketchsim_common::{Clock, ManualClock};
use sketchsim_wifi::{
    EncryptionType, NetworkDirectory, NetworkRecord, RadioConfig, RadioSession, RadioStatus,
};

// ============================================================================
// Test Helper Functions
// ============================================================================

fn directory() -> NetworkDirectory {
    NetworkDirectory::new(vec![
        NetworkRecord::secured("Net1", "pw123", -40, 6),
        NetworkRecord::secured("Lab", "s3cret", -65, 1).with_encryption(EncryptionType::Wpa3Psk),
        NetworkRecord::open("Guest", -70, 11),
    ])
    .unwrap()
}

fn radio(seed: u64) -> (RadioSession, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new());
    let config = RadioConfig {
        rng_seed: Some(seed),
        ..RadioConfig::default()
    };
    (RadioSession::new(Arc::new(directory()), clock.clone(), config), clock)
}

// ============================================================================
// Tests
// ============================================================================

#[test]
fn test_unknown_network_keeps_previous_address() {
    for seed in 0..20 {
        let (mut radio, _) = radio(seed);
        assert_eq!(radio.connect("Net1", Some("pw123")), RadioStatus::Connected);
        let held = radio.local_address();

        for name in ["", "net1", "Net1 ", "Nope", "Guest2"] {
            assert_eq!(radio.connect(name, Some("pw123")), RadioStatus::NoNetworkAvailable);
            assert_eq!(radio.local_address(), held);
            assert!(!radio.is_connected());
        }
    }
}

#[test]
fn test_secured_networks_check_secret() {
    let (mut radio, _) = radio(3);
    for record in directory().list().iter().filter(|r| r.encryption.requires_secret()) {
        let wrong = format!("{}x", record.secret);
        assert_eq!(radio.connect(&record.name, Some(&wrong)), RadioStatus::ConnectFailed);
        assert_eq!(radio.connect(&record.name, None), RadioStatus::ConnectFailed);

        assert_eq!(radio.connect(&record.name, Some(&record.secret)), RadioStatus::Connected);
        assert_ne!(radio.local_address(), Ipv4Addr::UNSPECIFIED);
    }
}

#[test]
fn test_open_network_accepts_any_secret() {
    let (mut radio, _) = radio(4);
    for secret in [None, Some(""), Some("anything"), Some("pw123")] {
        assert_eq!(radio.connect("Guest", secret), RadioStatus::Connected);
    }
}

#[test]
fn test_disconnect_reports_disconnected() {
    let (mut radio, _) = radio(5);
    radio.connect("Net1", Some("pw123"));
    radio.disconnect(false, false);
    assert_eq!(radio.status(), RadioStatus::Disconnected);
    assert_eq!(radio.local_address(), Ipv4Addr::UNSPECIFIED);

    // A failed attempt afterwards must not resurrect the old address.
    radio.connect("Net1", Some("pw123"));
    let held = radio.local_address();
    radio.connect("Lab", Some("wrong"));
    radio.disconnect(false, false);
    assert_eq!(radio.status(), RadioStatus::Disconnected);
    assert_ne!(radio.local_address(), held);
}

#[test]
fn test_reconnect_uses_remembered_pair() {
    let (mut radio, clock) = radio(6);
    assert_eq!(radio.reconnect(), RadioStatus::Disconnected);

    radio.connect("Lab", Some("wrong"));
    assert_eq!(radio.reconnect(), RadioStatus::ConnectFailed);

    radio.connect("Lab", Some("s3cret"));
    radio.disconnect(false, false);
    assert_eq!(radio.reconnect(), RadioStatus::Connected);
    assert_eq!(radio.ssid(), Some("Lab"));
    assert_eq!(clock.millis(), 1000);
}

#[test]
fn test_scan_is_synchronous_and_keeps_status() {
    let (mut radio, clock) = radio(7);
    radio.connect("Guest", None);
    let before = radio.status();

    assert_eq!(radio.scan_networks(), 3);
    assert_eq!(radio.status(), before);
    assert_eq!(clock.millis(), 600);

    assert_eq!(radio.ssid_at(0), Some("Net1"));
    assert_eq!(radio.rssi_at(1), Some(-65));
    assert_eq!(radio.encryption_type(1), Some(EncryptionType::Wpa3Psk));
    assert_eq!(radio.channel_at(2), Some(11));
    assert_eq!(radio.ssid_at(3), None);
}

#[test]
fn test_mac_is_fixed_across_reconnects() {
    let (mut radio, _) = radio(8);
    let mac = radio.mac_address();
    radio.connect("Net1", Some("pw123"));
    radio.disconnect(true, false);
    radio.reconnect();
    radio.simulate_link_loss();
    radio.reconnect();
    assert_eq!(radio.mac_address(), mac);
}

#[test]
fn test_rssi_stays_near_base() {
    let (mut radio, _) = radio(9);
    assert_eq!(radio.connect("Net1", Some("pw123")), RadioStatus::Connected);
    let samples: Vec<i32> = (0..100).map(|_| radio.rssi()).collect();
    assert!(samples.iter().all(|r| (-42..=-38).contains(r)));
    // Not cached: polling shows some noise.
    assert!(samples.iter().any(|r| *r != samples[0]));
}
