//! sd_notify socket adapter
//!
//! Implements the [`Notifier`] port over the supervisor's notification
//! socket: every state is one unix datagram, no reply is expected. The
//! socket address comes from `NOTIFY_SOCKET`; a leading `@` marks an
//! abstract-namespace address.

use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::net::UnixDatagram;
use std::path::Path;

use tracing::trace;
use vigil_core::domain::NotifyState;
use vigil_core::port::{Notifier, NotifyError};

/// Environment variable carrying the supervisor's notification socket address.
pub const NOTIFY_SOCKET_ENV: &str = "NOTIFY_SOCKET";

/// Notification channel over the supervisor's notify socket.
pub struct NotifySocket {
    address: OsString,
}

impl NotifySocket {
    /// Build from `NOTIFY_SOCKET`, `None` when the process is not running
    /// under a supervisor that accepts notifications.
    pub fn from_env() -> Option<Self> {
        let address = std::env::var_os(NOTIFY_SOCKET_ENV)?;
        if address.is_empty() {
            return None;
        }
        Some(Self::new(address))
    }

    pub fn new(address: impl Into<OsString>) -> Self {
        Self {
            address: address.into(),
        }
    }

    pub fn address(&self) -> &OsStr {
        &self.address
    }
}

impl Notifier for NotifySocket {
    fn notify(&self, state: &NotifyState) -> Result<(), NotifyError> {
        // One unbound datagram socket per send, sd_notify style. Sends
        // are rare (one per tick) so the setup cost is irrelevant.
        let socket = UnixDatagram::unbound()?;
        let payload = state.as_str().as_bytes();

        let sent = match abstract_name(&self.address) {
            Some(name) => send_abstract(&socket, name, payload)?,
            None => socket.send_to(payload, Path::new(&self.address))?,
        };

        if sent != payload.len() {
            return Err(NotifyError::Unavailable(format!(
                "short datagram write: {} of {} bytes",
                sent,
                payload.len()
            )));
        }

        trace!(%state, "state sent to supervisor");
        Ok(())
    }
}

/// Abstract-namespace name for a `@`-prefixed address.
fn abstract_name(address: &OsStr) -> Option<&[u8]> {
    address.as_bytes().strip_prefix(b"@")
}

#[cfg(target_os = "linux")]
fn send_abstract(socket: &UnixDatagram, name: &[u8], payload: &[u8]) -> Result<usize, NotifyError> {
    use std::os::linux::net::SocketAddrExt;
    let addr = std::os::unix::net::SocketAddr::from_abstract_name(name)?;
    Ok(socket.send_to_addr(payload, &addr)?)
}

#[cfg(not(target_os = "linux"))]
fn send_abstract(
    _socket: &UnixDatagram,
    _name: &[u8],
    _payload: &[u8],
) -> Result<usize, NotifyError> {
    Err(NotifyError::Unavailable(
        "abstract socket addresses require linux".to_string(),
    ))
}
