use std::net::{Ipv6Addr, SocketAddrV6, UdpSocket};

/// Answers whether the local host can reach IPv6 resolvers.
///
/// Queried on every DoH request, so implementations should be cheap and
/// must not cache across network changes unless they know better.
pub trait Ipv6Capability: Send + Sync {
    fn has_ipv6(&self) -> bool;
}

/// Asks the operating system for a routable IPv6 configuration.
///
/// Connecting a UDP socket sends nothing; it only asks the kernel for a
/// route, which fails when no interface carries a usable IPv6 address.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIpv6;

// Cloudflare's public resolver, only used for the route query
const ROUTE_TARGET: SocketAddrV6 =
    SocketAddrV6::new(Ipv6Addr::new(0x2606, 0x4700, 0x4700, 0, 0, 0, 0, 0x1111), 443, 0, 0);

impl Ipv6Capability for SystemIpv6 {
    fn has_ipv6(&self) -> bool {
        UdpSocket::bind((Ipv6Addr::UNSPECIFIED, 0))
            .and_then(|socket| socket.connect(ROUTE_TARGET))
            .is_ok()
    }
}

/// A fixed answer, for tests and hosts that know their network.
#[derive(Debug, Clone, Copy)]
pub struct FixedIpv6(pub bool);

impl Ipv6Capability for FixedIpv6 {
    fn has_ipv6(&self) -> bool {
        self.0
    }
}
