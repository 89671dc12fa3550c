use std::io::{self, BufRead, Read, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Maximum allowed line length in bytes, excluding the `\n` or `\r\n`
/// terminator, to prevent unbounded allocation by a client that never
/// sends one.
pub const MAX_LINE_LENGTH: usize = 4096;

/// Room for the longest line plus a `\r\n` terminator.
const READ_LIMIT: u64 = MAX_LINE_LENGTH as u64 + 2;

fn too_long() -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("line exceeds maximum length of {MAX_LINE_LENGTH} bytes"),
    )
}

/// Turn the raw bytes of one read into a line. `None` means the peer
/// closed the connection. Invalid UTF-8 is replaced rather than rejected
/// so it surfaces as an unknown command.
fn finish_line(buf: &[u8]) -> io::Result<Option<String>> {
    if buf.is_empty() {
        return Ok(None);
    }
    let line = buf.strip_suffix(b"\n").unwrap_or(buf);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    if line.len() > MAX_LINE_LENGTH {
        return Err(too_long());
    }
    Ok(Some(String::from_utf8_lossy(line).into_owned()))
}

/// Read one newline-terminated line, without its terminator.
///
/// A final line missing its newline is still returned.
///
/// # Errors
///
/// Returns [`io::ErrorKind::InvalidData`] if the line is longer than
/// [`MAX_LINE_LENGTH`], or any error from the underlying reader.
pub fn read_line<R: BufRead>(reader: &mut R) -> io::Result<Option<String>> {
    let mut buf = Vec::new();
    (&mut *reader).take(READ_LIMIT).read_until(b'\n', &mut buf)?;
    finish_line(&buf)
}

pub fn write_line<W: Write>(writer: &mut W, line: &str) -> io::Result<()> {
    // One chunk so the reader never sees a line without its newline.
    writer.write_all(format!("{line}\n").as_bytes())?;
    writer.flush()
}

/// Async counterpart of [`read_line`].
pub async fn read_line_async<R>(reader: &mut R) -> io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    (&mut *reader)
        .take(READ_LIMIT)
        .read_until(b'\n', &mut buf)
        .await?;
    finish_line(&buf)
}

/// Async counterpart of [`write_line`].
pub async fn write_line_async<W>(writer: &mut W, line: &str) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(format!("{line}\n").as_bytes()).await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use std::io::{self, Cursor};

    use super::{MAX_LINE_LENGTH, read_line, read_line_async, write_line, write_line_async};

    #[test]
    fn write_and_read() {
        let mut buf = Vec::new();
        assert!(write_line(&mut buf, "login|alice|100").is_ok());
        assert!(write_line(&mut buf, "exit").is_ok());
        assert_eq!(buf, b"login|alice|100\nexit\n");

        let mut reader = Cursor::new(buf);
        assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some("login|alice|100"));
        assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some("exit"));
        assert_eq!(read_line(&mut reader).unwrap(), None);
    }

    #[test]
    fn read_strips_carriage_return() {
        let mut reader = Cursor::new(b"bet|5|bob\r\n".to_vec());
        assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some("bet|5|bob"));
    }

    #[test]
    fn read_unterminated_last_line() {
        let mut reader = Cursor::new(b"exit".to_vec());
        assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some("exit"));
        assert_eq!(read_line(&mut reader).unwrap(), None);
    }

    #[test]
    fn read_empty_line() {
        let mut reader = Cursor::new(b"\n".to_vec());
        assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some(""));
    }

    #[test]
    fn read_line_at_limit() {
        let mut data = vec![b'a'; MAX_LINE_LENGTH];
        data.push(b'\n');
        let mut reader = Cursor::new(data);
        assert_eq!(read_line(&mut reader).unwrap().map(|l| l.len()), Some(MAX_LINE_LENGTH));
    }

    #[test]
    fn read_crlf_line_at_limit() {
        let mut data = vec![b'a'; MAX_LINE_LENGTH];
        data.extend_from_slice(b"\r\n");
        data.extend_from_slice(b"exit\r\n");
        let mut reader = Cursor::new(data);
        assert_eq!(read_line(&mut reader).unwrap().map(|l| l.len()), Some(MAX_LINE_LENGTH));
        assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some("exit"));
    }

    #[test]
    fn read_line_one_over_limit() {
        let mut data = vec![b'a'; MAX_LINE_LENGTH + 1];
        data.push(b'\n');
        let mut reader = Cursor::new(data);
        assert_eq!(
            read_line(&mut reader).map_err(|e| e.kind()),
            Err(io::ErrorKind::InvalidData)
        );
    }

    #[test]
    fn read_line_too_long() {
        let mut data = vec![b'a'; MAX_LINE_LENGTH + 10];
        data.push(b'\n');
        let mut reader = Cursor::new(data);
        assert_eq!(
            read_line(&mut reader).map_err(|e| e.kind()),
            Err(io::ErrorKind::InvalidData)
        );
    }

    #[test]
    fn read_invalid_utf8_is_lossy() {
        let mut reader = Cursor::new(vec![0xff, b'x', b'\n']);
        assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some("\u{fffd}x"));
    }

    #[tokio::test]
    async fn async_write_and_read() {
        let (mut client, server) = tokio::io::duplex(64);
        write_line_async(&mut client, "deal|P|alice").await.unwrap();
        drop(client);

        let mut reader = tokio::io::BufReader::new(server);
        assert_eq!(
            read_line_async(&mut reader).await.unwrap().as_deref(),
            Some("deal|P|alice")
        );
        assert_eq!(read_line_async(&mut reader).await.unwrap(), None);
    }

    #[tokio::test]
    async fn async_read_line_too_long() {
        let data = vec![b'a'; MAX_LINE_LENGTH + 1];
        let mut reader = tokio::io::BufReader::new(Cursor::new(data));
        assert_eq!(
            read_line_async(&mut reader).await.map_err(|e| e.kind()),
            Err(io::ErrorKind::InvalidData)
        );
    }
}
