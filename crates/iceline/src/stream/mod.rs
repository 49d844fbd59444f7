/// Streaming layer: chunk buffering and event emission
///
/// - `assembler.rs`: line framing with partial-line carry-over
/// - `pipeline.rs`: assembler + grammar parser composition
/// - `events.rs`: async adapter over a byte-chunk source

pub mod assembler;
pub mod events;
pub mod pipeline;

pub use assembler::LineAssembler;
pub use events::event_stream;
pub use pipeline::LogPipeline;
