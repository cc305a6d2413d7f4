//! Pacer: a terminal RSVP speed reader.
//!
//! `reading` holds the pure playback model, `engine` drives it in real time,
//! `app` and `ui` form the terminal front end, `input` and `storage` load
//! texts and remember preferences.

pub mod app;
pub mod engine;
pub mod input;
pub mod observability;
pub mod reading;
pub mod storage;
pub mod ui;
