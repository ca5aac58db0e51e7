use std::io::{self, BufRead, BufReader, Read, Write};

/// Line-oriented SMTP conversation over an owned stream.
///
/// Replies are read one line at a time; multi-line replies are not
/// aggregated. Dropping the session closes the stream.
pub struct SmtpSession<S: Read + Write> {
    reader: BufReader<S>,
}

impl<S: Read + Write> SmtpSession<S> {
    pub fn new(stream: S) -> Self {
        Self {
            reader: BufReader::new(stream),
        }
    }

    pub fn read_line(&mut self) -> io::Result<String> {
        let mut raw = Vec::new();
        let bytes = self.reader.read_until(b'\n', &mut raw)?;
        if bytes == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "connection closed while reading reply",
            ));
        }
        if raw.ends_with(b"\n") {
            raw.pop();
            if raw.ends_with(b"\r") {
                raw.pop();
            }
        }
        Ok(String::from_utf8_lossy(&raw).into_owned())
    }

    pub fn send_command(&mut self, command: &str) -> io::Result<()> {
        let stream = self.reader.get_mut();
        let mut line = command.as_bytes().to_vec();
        line.extend_from_slice(b"\r\n");
        stream.write_all(&line)?;
        stream.flush()
    }

    /// Send `command` and read exactly one reply line.
    pub fn command(&mut self, command: &str) -> io::Result<String> {
        self.send_command(command)?;
        self.read_line()
    }

    /// Send `QUIT` without waiting for the reply.
    pub fn quit(&mut self) -> io::Result<()> {
        self.send_command("QUIT")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    struct Duplex {
        input: Cursor<Vec<u8>>,
        output: Vec<u8>,
    }

    impl Read for Duplex {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.input.read(buf)
        }
    }

    impl Write for Duplex {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.output.write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn session(input: &[u8]) -> SmtpSession<Duplex> {
        SmtpSession::new(Duplex {
            input: Cursor::new(input.to_vec()),
            output: Vec::new(),
        })
    }

    #[test]
    fn reads_one_line_per_call() {
        let mut s = session(b"250-first\r\n250 second\r\n");
        assert_eq!(s.read_line().expect("line"), "250-first");
        assert_eq!(s.read_line().expect("line"), "250 second");
    }

    #[test]
    fn eof_is_an_error() {
        let mut s = session(b"");
        let err = s.read_line().expect_err("eof");
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn commands_are_crlf_terminated() {
        let mut s = session(b"250 ok\r\n");
        let reply = s.command("HELO example.org").expect("reply");
        s.quit().expect("quit");
        assert_eq!(reply, "250 ok");
        assert_eq!(s.reader.get_ref().output, b"HELO example.org\r\nQUIT\r\n");
    }

    #[test]
    fn bare_lf_and_invalid_utf8_tolerated() {
        let mut s = session(b"220 h\xc3llo\n");
        let line = s.read_line().expect("line");
        assert!(line.starts_with("220 h"));
    }
}
