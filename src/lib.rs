//! Chat History Proxy Library
//!
//! This library provides the core components for the chat history proxy server:
//! the persisted conversation log, the Gemini completion client, and the HTTP API.

pub mod api;
pub mod chat;
pub mod db;
pub mod gemini;
