//! Telegram adapter (teloxide).
//!
//! Routes `/start`, `/get` and inline queries into the `trs-core` fetch
//! loop and sent-history ledger, and reports handler failures to a fixed
//! operator chat.

pub mod handlers;
pub mod router;
pub mod stickers;
