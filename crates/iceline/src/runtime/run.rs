//! Run — the input read loop and event output.
//!
//! Reads the configured file (or stdin) in fixed-size chunks, drives the
//! pipeline through `event_stream`, and writes one JSON object per entry
//! to stdout. Failures and raw lines go to the log, not stdout.

use std::io::Write;

use bytes::{Bytes, BytesMut};
use futures_util::{Stream, StreamExt};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, error, info, warn};

use crate::conf::ParserConfig;
use crate::parser::model::ParseEvent;
use crate::stream::{event_stream, LogPipeline};

pub async fn run(config: ParserConfig, pipeline: LogPipeline) -> Result<(), Box<dyn std::error::Error>> {
    let metrics = pipeline.metrics();

    match &config.input {
        Some(path) => {
            info!(path = %path.display(), "reading log file");
            let file = tokio::fs::File::open(path).await?;
            pump(file, config.chunk_bytes, pipeline).await?;
        }
        None => {
            info!("reading from stdin");
            pump(tokio::io::stdin(), config.chunk_bytes, pipeline).await?;
        }
    }

    let snapshot = metrics.snapshot();
    info!(
        lines = snapshot.lines,
        entries = snapshot.access_entries + snapshot.playlist_entries,
        failures = snapshot.failures,
        "input exhausted"
    );
    Ok(())
}

async fn pump<R>(reader: R, chunk_bytes: usize, pipeline: LogPipeline) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
{
    let events = event_stream(chunk_source(reader, chunk_bytes), pipeline);
    futures_util::pin_mut!(events);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    while let Some(event) = events.next().await {
        match event {
            ParseEvent::Entry(entry) => {
                // Entry serialization cannot fail: no maps, no non-string keys
                let json = serde_json::to_string(&entry).map_err(std::io::Error::other)?;
                writeln!(out, "{}", json)?;
            }
            ParseEvent::Failure(failure) => {
                warn!(index = failure.index, line = %failure.line, "unparseable line");
            }
            ParseEvent::RawLine(line) => {
                debug!(%line, "raw line");
            }
        }
    }
    Ok(())
}

/// Turn an async reader into a stream of byte chunks.
/// A read error ends the stream; the pipeline still flushes what it has.
fn chunk_source<R>(mut reader: R, chunk_bytes: usize) -> impl Stream<Item = Bytes>
where
    R: AsyncRead + Unpin,
{
    async_stream::stream! {
        let mut buf = BytesMut::with_capacity(chunk_bytes);
        loop {
            match reader.read_buf(&mut buf).await {
                Ok(0) => break,
                Ok(_) => yield buf.split().freeze(),
                Err(err) => {
                    error!(%err, "read failed, closing input");
                    break;
                }
            }
        }
    }
}
