//! Sigil - command grammar, dispatcher and entity selectors
//!
//! This crate re-exports every layer of Sigil for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: sigil_runtime    - REPL, diagnostics, demo world and commands
//! Layer 2: sigil_arguments  - Coordinates, resource ids, entity selectors
//! Layer 1: sigil_dispatch  - Command tree, parsing, execution, completion
//! Layer 0: sigil_foundation - StringReader, errors, string ranges
//! ```

pub use sigil_arguments as arguments;
pub use sigil_dispatch as dispatch;
pub use sigil_foundation as foundation;
pub use sigil_runtime as runtime;
