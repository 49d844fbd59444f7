use std::sync::Arc;

use crate::conf::ParserConfig;
use crate::parser::formats::parser_for;
use crate::parser::metrics::ParserMetrics;
use crate::parser::model::{ConfigError, LogFormat, ParseEvent, ParseFailure};
use crate::parser::traits::LineParser;

use super::assembler::LineAssembler;

/// The streaming transformer: raw text chunks in, parse events out.
///
/// Composes a [`LineAssembler`] with the grammar parser selected at
/// construction. State is the line buffer and a running line index;
/// a pipeline instance is single-consumer and must not be fed
/// concurrently.
///
/// A parse failure is an event, not a stop condition: every complete
/// line in a chunk is evaluated independently, and whether to keep
/// feeding after a failure is the caller's decision.
pub struct LogPipeline {
    assembler: LineAssembler,
    parser: &'static dyn LineParser,
    metrics: Arc<ParserMetrics>,
    /// 1-based index of the last non-blank line handed to the parser
    line_index: u64,
    emit_raw_lines: bool,
    flush_trailing: bool,
}

impl LogPipeline {
    pub fn new(format: LogFormat) -> Self {
        Self {
            assembler: LineAssembler::new(),
            parser: parser_for(format),
            metrics: Arc::new(ParserMetrics::new()),
            line_index: 0,
            emit_raw_lines: false,
            flush_trailing: false,
        }
    }

    /// Build a pipeline from loaded configuration.
    /// An unrecognized format tag fails here, before any data flows.
    pub fn from_config(config: &ParserConfig) -> Result<Self, ConfigError> {
        let mut pipeline = Self::new(config.format()?);
        pipeline.emit_raw_lines = config.emit_raw_lines;
        pipeline.flush_trailing = config.flush_trailing;
        Ok(pipeline)
    }

    /// Emit every non-blank line as a `RawLine` event before parsing it.
    pub fn set_emit_raw_lines(&mut self, emit: bool) {
        self.emit_raw_lines = emit;
    }

    /// Parse the trailing unterminated line on `finish` instead of
    /// dropping it.
    pub fn set_flush_trailing(&mut self, flush: bool) {
        self.flush_trailing = flush;
    }

    pub fn format(&self) -> LogFormat {
        self.parser.format()
    }

    /// Shared handle to the pipeline counters.
    pub fn metrics(&self) -> Arc<ParserMetrics> {
        Arc::clone(&self.metrics)
    }

    /// Feed one chunk. Returns the events for every line the chunk
    /// completed, in line order, exactly once each.
    pub fn feed(&mut self, chunk: &str) -> Vec<ParseEvent> {
        let mut events = Vec::new();
        for line in self.assembler.feed(chunk) {
            self.handle_line(line, &mut events);
        }
        events
    }

    /// Signal end of input. The trailing partial line is dropped unless
    /// `flush_trailing` is set, in which case it is parsed as a final
    /// complete line.
    pub fn finish(&mut self) -> Vec<ParseEvent> {
        let mut events = Vec::new();
        match self.assembler.take_partial() {
            Some(partial) if self.flush_trailing => {
                self.handle_line(partial, &mut events);
            }
            Some(partial) => {
                tracing::debug!(
                    bytes = partial.len(),
                    "dropping unterminated trailing line at end of input"
                );
            }
            None => {}
        }
        events
    }

    fn handle_line(&mut self, line: String, events: &mut Vec<ParseEvent>) {
        if line.trim().is_empty() {
            self.metrics.record_blank();
            return;
        }

        self.line_index += 1;
        self.metrics.record_line();

        if self.emit_raw_lines {
            events.push(ParseEvent::RawLine(line.clone()));
        }

        match self.parser.parse(&line) {
            Ok(entry) => {
                self.metrics.record_entry(entry.format());
                events.push(ParseEvent::Entry(entry));
            }
            Err(error) => {
                tracing::debug!(index = self.line_index, %error, "line failed grammar");
                self.metrics.record_failure();
                events.push(ParseEvent::Failure(ParseFailure {
                    line,
                    index: self.line_index,
                }));
            }
        }
    }
}
