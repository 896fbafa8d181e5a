//! AI Module
//!
//! AI-assisted note operations. Local analysis (scan aggregates,
//! suggestions, old-note detection) lives in [`agent`]; generative
//! responses are delegated to the external Gemini API through
//! [`gemini`].
//!
//! # Module Structure
//!
//! ```text
//! ai/
//! ├── mod.rs      - Module exports
//! ├── agent.rs    - Local analysis over fetched notes
//! ├── gemini.rs   - Gemini HTTP client
//! └── handlers.rs - HTTP endpoint handlers
//! ```

/// Local analysis over fetched notes
pub mod agent;

/// Gemini HTTP client
pub mod gemini;

/// HTTP endpoint handlers
pub mod handlers;
