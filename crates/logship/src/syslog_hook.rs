// Copyright 2025-Present the logship authors
// SPDX-License-Identifier: Apache-2.0

use std::io::Write;
use std::net::{TcpStream, UdpSocket};
#[cfg(unix)]
use std::os::unix::net::UnixDatagram;
use std::str::FromStr;
use std::sync::Mutex;

use crate::entry::Entry;
use crate::hook::{Hook, HookError};
use crate::level::Level;

// RFC 3164 facility `user`.
const FACILITY_USER: u8 = 1;

/// How to reach the syslog daemon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyslogTransport {
    /// The local `/dev/log` datagram socket.
    Unix,
    Udp { server: String },
    Tcp { server: String },
}

#[derive(Debug, thiserror::Error)]
#[error("invalid syslog transport: {0}")]
pub struct ParseTransportError(String);

impl FromStr for SyslogTransport {
    type Err = ParseTransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "unix" {
            Ok(SyslogTransport::Unix)
        } else if let Some(server) = s.strip_prefix("udp://") {
            Ok(SyslogTransport::Udp {
                server: server.to_string(),
            })
        } else if let Some(server) = s.strip_prefix("tcp://") {
            Ok(SyslogTransport::Tcp {
                server: server.to_string(),
            })
        } else {
            Err(ParseTransportError(s.to_string()))
        }
    }
}

enum Connection {
    Udp(UdpSocket),
    Tcp(TcpStream),
    #[cfg(unix)]
    Unix(UnixDatagram),
}

/// Forwards entries to a syslog daemon as RFC 3164 lines, mapping facade
/// levels onto syslog severities (Panic/Fatal -> crit, Error -> err,
/// Warn -> warning, Info -> info, Debug -> debug).
pub struct SyslogHook {
    conn: Mutex<Connection>,
    tag: String,
    pid: u32,
}

impl SyslogHook {
    pub fn connect(transport: &SyslogTransport, tag: impl Into<String>) -> Result<Self, HookError> {
        let conn = match transport {
            SyslogTransport::Udp { server } => {
                let socket = UdpSocket::bind("0.0.0.0:0")?;
                socket.connect(server.as_str())?;
                Connection::Udp(socket)
            }
            SyslogTransport::Tcp { server } => Connection::Tcp(TcpStream::connect(server.as_str())?),
            #[cfg(unix)]
            SyslogTransport::Unix => {
                let socket = UnixDatagram::unbound()?;
                socket.connect("/dev/log")?;
                Connection::Unix(socket)
            }
            #[cfg(not(unix))]
            SyslogTransport::Unix => {
                return Err(HookError::Syslog(
                    "unix transport is not available on this platform".to_string(),
                ));
            }
        };
        Ok(SyslogHook {
            conn: Mutex::new(conn),
            tag: tag.into(),
            pid: std::process::id(),
        })
    }

    fn format_line(&self, entry: &Entry) -> String {
        let priority = FACILITY_USER * 8 + severity(entry.level);
        format!(
            "<{priority}>{} {}[{}]: [{}] {}",
            entry.timestamp.format("%b %e %H:%M:%S"),
            self.tag,
            self.pid,
            entry.level.as_str().to_uppercase(),
            entry.format_message()
        )
    }
}

fn severity(level: Level) -> u8 {
    match level {
        Level::Panic | Level::Fatal => 2, // crit
        Level::Error => 3,
        Level::Warn => 4,
        Level::Info => 6,
        Level::Debug => 7,
    }
}

impl Hook for SyslogHook {
    fn fire(&self, entry: &Entry) -> Result<(), HookError> {
        let line = self.format_line(entry);
        #[allow(clippy::expect_used)]
        let mut conn = self.conn.lock().expect("lock poisoned");
        match &mut *conn {
            Connection::Udp(socket) => {
                socket.send(line.as_bytes())?;
            }
            // Octet-less framing: one line per message.
            Connection::Tcp(stream) => {
                stream.write_all(line.as_bytes())?;
                stream.write_all(b"\n")?;
            }
            #[cfg(unix)]
            Connection::Unix(socket) => {
                socket.send(line.as_bytes())?;
            }
        }
        Ok(())
    }
}
