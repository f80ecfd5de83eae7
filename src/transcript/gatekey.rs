//! The built-in `gatekey` walkthrough: log in, list gateways, join the mesh
//! hub, check status.

use super::{Transcript, TranscriptLine as L};

/// Offset of the final line, in milliseconds.
pub(super) const LAST_OFFSET_MILLIS: u64 = 12_400;

pub(super) fn lines() -> Vec<L> {
    vec![
        L::prompt("gatekey login", 0),
        L::output("Authenticating with GateKey server...", 800),
        L::output("Opening browser for authentication...", 1400),
        L::output("Waiting for authentication...", 2000),
        L::output("", 3500),
        L::output("\x1b[32mAuthentication successful!\x1b[0m", 3600).success(),
        L::output("Logged in as: jesse@example.com", 3800),
        L::prompt("gatekey list", 5000),
        L::output("Available Gateways:", 5400),
        L::output("-------------------", 5500),
        L::output("✓ gateway [openvpn]", 5600).success(),
        L::output("  Public IP:   203.0.113.45", 5700),
        L::output("  Status:      online", 5800).success(),
        L::output("", 5900),
        L::output("✓ hub [wireguard-mesh]", 6000).success(),
        L::output("  Public IP:   198.51.100.22", 6100),
        L::output("  Status:      online", 6200).success(),
        L::prompt("gatekey connect hub", 7500),
        L::output("Found mesh hub 'hub', connecting...", 7900),
        L::output("Connecting to WireGuard mesh hub hub...", 8200),
        L::output("[#] ip link add dev wg0 type wireguard", 8600).dim(),
        L::output("[#] wg setconf wg0 /dev/fd/63", 8800).dim(),
        L::output("[#] ip -4 address add 172.30.0.4/32 dev wg0", 9000).dim(),
        L::output("[#] ip link set mtu 1420 up dev wg0", 9200).dim(),
        L::output("[#] ip -4 route add 192.168.50.0/23 dev wg0", 9400).dim(),
        L::output("Connected to mesh hub hub (Interface: wg0)", 9800).success(),
        L::output("WireGuard mesh VPN connection established.", 10000),
        L::prompt("gatekey status", 11500),
        L::output("Status: Connected", 11900).success(),
        L::output("Gateway:      mesh:hub", 12000),
        L::output("Type:         wireguard", 12100),
        L::output("Interface:    wg0", 12200),
        L::output("Local IP:     172.30.0.4", 12300),
        L::output("Transfer:     ↓ 12.9 KB  ↑ 12.1 KB", LAST_OFFSET_MILLIS),
    ]
}

impl Transcript {
    /// The `gatekey` CLI walkthrough shown on the landing page.
    pub fn gatekey() -> Self {
        Self::new(lines())
    }
}
