// Domain-driven module structure for the iceline parser.

// Core parsing
pub mod parser;
pub mod stream;

// Wiring
pub mod conf;
pub mod runtime;
