//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! The decision loop talks to the outside world through two outbound ports:
//!
//! ```text
//!                 ┌──────────────────────┐
//!                 │  application::sniper │
//!                 └──────────┬───────────┘
//!               ┌────────────┴────────────┐
//!               ▼                         ▼
//!        ┌─────────────┐          ┌──────────────────┐
//!        │ Marketplace │          │ PurchaseSubmitter│
//!        └─────────────┘          └──────────────────┘
//!         opensea adapter          ethereum adapter
//! ```
//!
//! Both ports report failures as named outcome variants instead of errors,
//! so the loop can keep running and tests can script the failure path.

pub mod outbound;

pub use outbound::marketplace::{EventKind, FetchOutcome, Marketplace};
pub use outbound::submitter::{PurchaseSubmitter, SubmitOutcome};
