//! # vl-state-engine
//!
//! Versioned, content-addressed state engine for the Verity ledger.
//!
//! ## Role in System
//!
//! - **Single Source of Truth**: authoritative record state for one ledger
//! - **Optimistic Apply**: writes are staged ahead of consensus finality
//! - **Clean Revert**: any uncommitted suffix can be unwound to an exact
//!   prior state root without residue
//!
//! ## Write Flow
//!
//! ```text
//! [Inbound Request]
//!        │
//!        ▼
//! [PayloadValidator] ──reject──→ PayloadValidation / TypeMismatch
//!        │
//!        ▼
//! [AuthorizationResolver] ──reads──→ [StateStore (working view)]
//!        │                                   ▲
//!        ▼                                   │ write
//! [PolicyEngine port] ──reject──→ Unauthorized
//!        │
//!        ▼
//! [TransactionApplier] ──append──→ [Ledger Tail]
//!        │
//!        ▼
//! [consensus finality] ──commit──→ tail becomes committed
//!                      ──reject──→ [RevertCoordinator] unwinds
//! ```
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | Key derivation is injective over (author, name, version, kind) | `domain/path.rs` - separator rejection |
//! | Validation never touches state | `domain/validation.rs` - no store parameter |
//! | Policy evaluation precedes every mutation | `service.rs` - `apply()` ordering |
//! | Tail is consumed strictly LIFO on revert | `domain/ledger.rs` - `truncate_last()` |
//! | Revert restores edits, not just deletes keys | `service.rs` - rebuild from committed view |
//! | Committed transactions are irreversible here | `service.rs` - revert bounds check |
//!
//! ## Concurrency
//!
//! Single writer per engine instance: `apply`, `commit` and `revert` take
//! `&mut self`, so interleaved writers cannot corrupt the tail's snapshot
//! chain. Committed reads go through `&self`.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use domain::*;
pub use ports::*;
pub use service::*;
