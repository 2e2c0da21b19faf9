//! Board module tests.
//!
//! Tests are organized into separate files by category:
//! - `perft.rs` - Node-count validation of move generation
//! - `draw.rs` - Draw detection (50-move, repetition, insufficient material)
//! - `make_unmake.rs` - Make/undo correctness over longer sequences
//! - `edge_cases.rs` - Special positions and moves
//! - `proptest.rs` - Property-based tests

mod perft;
