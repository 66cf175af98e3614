//! Deskwatch: help-desk notification client.
//!
//! The ticket backend emits free-text notifications with optional
//! `[KEY:value]` tags and no typed payload. This crate classifies them,
//! extracts ticket id, title, technician, status and priority, and keeps a
//! local read-state view over the remote API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod inbox;
pub mod logging;
pub mod notifications;
