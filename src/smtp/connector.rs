use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream, ToSocketAddrs};
use std::time::Duration;

/// Opens the byte stream an SMTP session runs over.
pub trait Connector {
    type Stream: Read + Write;

    /// Connect to `host:port` within `connect_timeout`; every later read and
    /// write on the stream is bounded by `command_timeout`. [`SmtpProbe`]
    /// always passes an IP address as `host`.
    ///
    /// [`SmtpProbe`]: super::SmtpProbe
    fn connect(
        &self,
        host: &str,
        port: u16,
        connect_timeout: Duration,
        command_timeout: Duration,
    ) -> io::Result<Self::Stream>;
}

impl<T: Connector + ?Sized> Connector for &T {
    type Stream = T::Stream;

    fn connect(
        &self,
        host: &str,
        port: u16,
        connect_timeout: Duration,
        command_timeout: Duration,
    ) -> io::Result<Self::Stream> {
        (**self).connect(host, port, connect_timeout, command_timeout)
    }
}

/// Plain TCP transport.
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

impl Connector for TcpConnector {
    type Stream = TcpStream;

    fn connect(
        &self,
        host: &str,
        port: u16,
        connect_timeout: Duration,
        command_timeout: Duration,
    ) -> io::Result<TcpStream> {
        let addrs: Vec<SocketAddr> = (host, port).to_socket_addrs()?.collect();
        let deadline = Some(command_timeout).filter(|timeout| !timeout.is_zero());
        let mut last_err = None;
        for addr in &addrs {
            match TcpStream::connect_timeout(addr, connect_timeout) {
                Ok(stream) => {
                    stream.set_read_timeout(deadline)?;
                    stream.set_write_timeout(deadline)?;
                    return Ok(stream);
                }
                Err(err) => last_err = Some(err),
            }
        }
        Err(last_err.unwrap_or_else(|| {
            io::Error::new(
                io::ErrorKind::AddrNotAvailable,
                "no socket address available",
            )
        }))
    }
}
