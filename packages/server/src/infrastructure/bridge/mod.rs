//! WhatsApp Web bridge client.
//!
//! The bridge is a separate process driving WhatsApp Web. It exposes the
//! session over a small JSON API and pushes lifecycle events over a WebSocket:
//!
//! - `POST /initialize`
//! - `GET /chats`
//! - `GET /chats/{chat_id}/messages?limit=N`
//! - `GET /events` (WebSocket)

mod client;
pub mod dto;
mod events;

pub use client::BridgeClient;
