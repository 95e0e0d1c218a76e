//! Machine fingerprinting for activation binding.
//!
//! The fingerprint is the MD5 hex digest of the hardware address of the
//! machine's first physical network interface (see [`first_hardware_mac`]).
//! Machines without such an interface share the [`FALLBACK_MACHINE_ID`]
//! sentinel.

use serde::{Deserialize, Serialize};
use std::fmt;
use sysinfo::Networks;

/// Fingerprint used when no hardware address is available.
pub const FALLBACK_MACHINE_ID: &str = "default-machine-id";

/// Hardware address reported by virtual interfaces with no real MAC.
const NULL_MAC: &str = "00:00:00:00:00:00";

/// A stable identifier for this machine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceFingerprint {
    id: String,
}

impl DeviceFingerprint {
    /// Computes the fingerprint of the current machine.
    #[must_use]
    pub fn generate() -> Self {
        match first_hardware_mac(network_interfaces()) {
            Some(mac) => Self::from_mac(&mac),
            None => Self::fallback(),
        }
    }

    /// Fingerprint for a given hardware address.
    #[must_use]
    pub fn from_mac(mac: &str) -> Self {
        Self {
            id: format!("{:x}", md5::compute(mac.as_bytes())),
        }
    }

    /// The shared fallback fingerprint.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            id: FALLBACK_MACHINE_ID.to_string(),
        }
    }

    /// Wraps an already computed fingerprint id.
    #[must_use]
    pub fn from_id(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    /// Returns the fingerprint ID.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns true if this fingerprint matches the current machine.
    #[must_use]
    pub fn matches_current(&self) -> bool {
        *self == Self::generate()
    }
}

impl fmt::Display for DeviceFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// Interface name prefixes of bridges, tunnels and container or VM links.
/// Their addresses are generated at runtime and come and go with the
/// software that owns them.
const VIRTUAL_PREFIXES: &[&str] = &[
    "lo", "loopback", "docker", "br-", "veth", "virbr", "vmnet", "vboxnet", "vethernet", "tun",
    "tap", "utun", "bridge", "awdl", "llw", "wg", "zt", "tailscale",
];

/// Picks the hardware address that identifies this machine from
/// `(interface, mac)` pairs.
///
/// Loopback and virtual interfaces, empty addresses and the all-zero address
/// are skipped. A globally unique address wins over a locally administered
/// one; within each group the lowest interface name wins, so the result does
/// not depend on enumeration order.
pub fn first_hardware_mac<I>(interfaces: I) -> Option<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut candidates: Vec<(String, String)> = interfaces
        .into_iter()
        .filter(|(name, _)| !is_virtual(name))
        .map(|(name, mac)| (name, mac.trim().to_ascii_lowercase()))
        .filter(|(_, mac)| !mac.is_empty() && mac != NULL_MAC)
        .collect();
    candidates.sort();

    let universal = candidates
        .iter()
        .find(|(_, mac)| !is_locally_administered(mac));
    universal
        .or_else(|| candidates.first())
        .map(|(_, mac)| mac.clone())
}

fn is_virtual(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    VIRTUAL_PREFIXES
        .iter()
        .any(|prefix| name.starts_with(prefix))
}

/// True when the U/L bit of the first octet is set (`x2`, `x6`, `xA`, `xE`),
/// which is how software-assigned addresses are marked.
fn is_locally_administered(mac: &str) -> bool {
    mac.get(..2)
        .and_then(|octet| u8::from_str_radix(octet, 16).ok())
        .is_some_and(|octet| octet & 0x02 != 0)
}

/// Lists `(interface, mac)` pairs reported by the operating system.
#[must_use]
pub fn network_interfaces() -> Vec<(String, String)> {
    let networks = Networks::new_with_refreshed_list();
    (&networks)
        .into_iter()
        .map(|(name, data)| (name.clone(), data.mac_address().to_string()))
        .collect()
}
