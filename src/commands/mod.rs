// src/commands/mod.rs
// Command modules exposed to the event handler.

pub mod setlb;
