//! WhatsApp Web gateway library.
//!
//! Tracks the QR pairing lifecycle of an external WhatsApp Web client and
//! exposes its status, chats and unread messages over a small HTTP API.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
