//! Collaborative study room server library.
//!
//! Rooms share a focus/break countdown timer, chat, presence (media flags) and
//! relay WebRTC negotiation messages between participants over WebSocket.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
