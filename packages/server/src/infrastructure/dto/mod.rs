//! Data Transfer Objects (DTOs) for the gateway.
//!
//! - `http`: HTTP API response DTOs
//!
//! Bridge wire DTOs live next to the bridge client in `infrastructure::bridge::dto`.

pub mod http;
