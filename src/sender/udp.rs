use super::{Transport, TransportError, TransportFactory};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, UdpSocket};
use tracing::debug;

/// Parses an IPv4 or IPv6 literal into the server socket address.
///
/// No name resolution is attempted.
pub fn resolve_server(address: &str, port: u16) -> Result<SocketAddr, TransportError> {
    let ip: IpAddr = address
        .trim()
        .parse()
        .map_err(|_| TransportError::AddressParse {
            address: address.to_string(),
        })?;
    Ok(SocketAddr::new(ip, port))
}

#[derive(Debug)]
pub struct UdpTransport {
    socket: UdpSocket,
    server: SocketAddr,
}

impl UdpTransport {
    pub fn connect(address: &str, port: u16) -> Result<Self, TransportError> {
        let server = resolve_server(address, port)?;
        let local: SocketAddr = match server {
            SocketAddr::V4(_) => (Ipv4Addr::UNSPECIFIED, 0).into(),
            SocketAddr::V6(_) => (Ipv6Addr::UNSPECIFIED, 0).into(),
        };

        let socket = UdpSocket::bind(local).map_err(TransportError::Create)?;
        if server.is_ipv4() {
            // The default server is the limited broadcast address.
            socket.set_broadcast(true).map_err(TransportError::Create)?;
        }
        socket.set_nonblocking(true).map_err(TransportError::Create)?;

        debug!(%server, "UDP transport ready");
        Ok(Self { socket, server })
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, record: &[u8]) -> Result<(), TransportError> {
        self.socket
            .send_to(record, self.server)
            .map(|_| ())
            .map_err(|source| TransportError::Send {
                bytes: record.len(),
                source,
            })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UdpTransportFactory;

impl TransportFactory for UdpTransportFactory {
    fn connect(&self, address: &str, port: u16) -> Result<Box<dyn Transport>, TransportError> {
        Ok(Box::new(UdpTransport::connect(address, port)?))
    }
}
