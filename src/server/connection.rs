//! Connection Handler
//!
//! Reads newline-terminated requests and writes one response line per request.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, info, warn};

use crate::processor::{Processed, RequestProcessor, MAX_KEY_LENGTH};

/// Input line (case-insensitive) after which the server closes the connection.
pub const EXIT_COMMAND: &str = "exit";

/// Prefix marking a response served from the cache.
const CACHED_PREFIX: &str = "Cached: ";

/// Serves one client until it sends [`EXIT_COMMAND`] or closes its side.
///
/// Each line is answered with the processed value, prefixed with
/// `"Cached: "` on a cache hit. A failed request is answered with
/// `"ERROR: <message>"` and the connection stays open. The exit line itself
/// is processed and answered before the connection closes.
///
/// Lines are keys as raw bytes; invalid UTF-8 is replaced with U+FFFD. A
/// line longer than [`MAX_KEY_LENGTH`] bytes is answered with an error and
/// the connection is closed, since the rest of that line cannot be skipped
/// without reading it.
pub async fn handle_connection<S>(
    stream: S,
    peer: &str,
    processor: RequestProcessor,
) -> std::io::Result<()>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let (reader, mut writer) = tokio::io::split(stream);
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        // One byte past the cap tells an over-long line from a full-length one
        let read = (&mut reader)
            .take(MAX_KEY_LENGTH as u64 + 1)
            .read_until(b'\n', &mut buf)
            .await?;
        if read == 0 {
            break;
        }

        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        } else if buf.len() > MAX_KEY_LENGTH {
            warn!(peer, "Line exceeds {} bytes, closing connection", MAX_KEY_LENGTH);
            let response = format!(
                "ERROR: line exceeds maximum length of {} bytes",
                MAX_KEY_LENGTH
            );
            write_line(&mut writer, &response).await?;
            break;
        }

        let request = String::from_utf8_lossy(&buf);
        info!(peer, "Received from client: {}", request);

        let response = match processor.process(&request).await {
            Ok(processed) => render(processed),
            Err(e) => {
                warn!(peer, "Request failed: {}", e);
                format!("ERROR: {}", e)
            }
        };
        write_line(&mut writer, &response).await?;

        if request.eq_ignore_ascii_case(EXIT_COMMAND) {
            debug!(peer, "Exit requested");
            break;
        }
    }

    writer.shutdown().await
}

async fn write_line<W>(writer: &mut W, line: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(line.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

fn render(processed: Processed) -> String {
    if processed.cached {
        format!("{}{}", CACHED_PREFIX, processed.value)
    } else {
        processed.into_value()
    }
}
