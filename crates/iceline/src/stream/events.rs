use bytes::Bytes;
use futures_util::{Stream, StreamExt};

use crate::parser::model::ParseEvent;
use super::pipeline::LogPipeline;

/// Adapt a byte-chunk source into a stream of parse events.
///
/// Chunks are decoded lossily as UTF-8 before feeding; a multi-byte
/// character split across a chunk boundary is replaced, not reassembled.
/// The stream pulls one chunk at a time, so pausing consumption pauses
/// the source — backpressure stays with the surrounding plumbing.
pub fn event_stream<S>(source: S, mut pipeline: LogPipeline) -> impl Stream<Item = ParseEvent>
where
    S: Stream<Item = Bytes>,
{
    async_stream::stream! {
        futures_util::pin_mut!(source);
        while let Some(chunk) = source.next().await {
            let text = String::from_utf8_lossy(&chunk);
            for event in pipeline.feed(&text) {
                yield event;
            }
        }
        for event in pipeline.finish() {
            yield event;
        }
    }
}
