// Listener module
// Binds the serving socket, retrying once on the next port when the
// configured one is occupied.

use crate::logger;
use socket2::{Domain, Protocol, Socket, Type};
use std::io::ErrorKind;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Bind `addr`, falling back to port+1 exactly once on `AddrInUse`.
///
/// Returns the bound listener together with the port actually in use so
/// the banner and browser URL always reflect reality. Any other bind
/// error, and a failed retry, propagate to the caller; there is no second
/// retry.
pub fn bind_with_fallback(addr: SocketAddr) -> std::io::Result<(TcpListener, u16)> {
    match create_listener(addr) {
        Ok(listener) => Ok((listener, addr.port())),
        Err(e) if e.kind() == ErrorKind::AddrInUse && addr.port() < u16::MAX => {
            let mut next = addr;
            next.set_port(addr.port() + 1);
            logger::log_port_in_use(addr.port(), next.port());
            let listener = create_listener(next)?;
            Ok((listener, next.port()))
        }
        Err(e) => Err(e),
    }
}

/// Create a non-blocking `TcpListener` bound to `addr`.
///
/// `SO_REUSEADDR` is set so restarts are not blocked by sockets in
/// TIME_WAIT. `SO_REUSEPORT` stays off: a second instance on the same
/// port must surface as `AddrInUse` for the fallback to trigger.
pub fn create_listener(addr: SocketAddr) -> std::io::Result<TcpListener> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(128)?;

    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
