//! # Verity-Ledger Test Suite
//!
//! Unified test crate for flows that cross component boundaries.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── write_flows.rs    # request → validate → authorize → apply
//!     └── revert_flows.rs   # optimistic apply vs. finality / rejection
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p vl-tests
//! cargo test -p vl-tests integration::
//! ```

#![allow(dead_code)]
