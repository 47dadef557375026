//! Host reachability.
//!
//! Probing works on an already resolved [`ConnectionSpec`]; only the stub
//! prober exists today.

use crate::spec::ConnectionSpec;
use serde::Serialize;

/// Checks whether a host accepts connections on a port.
pub trait HostProber {
    fn probe(&self, host: &str, port: u16) -> bool;
}

/// Reports every host as reachable.
#[derive(Debug, Default, Copy, Clone)]
pub struct AlwaysReachable;

impl HostProber for AlwaysReachable {
    fn probe(&self, _host: &str, _port: u16) -> bool {
        true
    }
}

/// Probe result for one host of a spec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostStatus {
    pub host: String,
    pub port: u16,
    pub reachable: bool,
}

impl ConnectionSpec {
    /// Probes every host on the resolved port, in host order.
    pub fn probe(&self, prober: &dyn HostProber) -> Vec<HostStatus> {
        self.hosts()
            .iter()
            .map(|host| HostStatus {
                host: host.clone(),
                port: self.port(),
                reachable: prober.probe(host, self.port()),
            })
            .collect()
    }
}
