#![allow(dead_code)]

pub mod harness;
pub mod recording_clipboard;
pub mod rope_buffer;
