//! Campaign subsystem.
//!
//! # Data Flow
//! ```text
//! bindings.rs (typed contract surface)
//!     → scanner.rs (bounded prefix probe over campaign ids)
//!     → view.rs (projections: campaign list, balances)
//!     → service.rs (user actions: create, contribute, finalize)
//! ```
//!
//! Projections are disposable copies of remote state used only for
//! display. After every confirmed mutation the affected projection is
//! rebuilt from the ledger and replaced wholesale.

pub mod bindings;
pub mod scanner;
pub mod service;
pub mod types;
pub mod view;

pub use scanner::CampaignScanner;
pub use service::CampaignService;
pub use types::{BalanceView, Campaign, TokenBalance};
pub use view::ViewSync;
