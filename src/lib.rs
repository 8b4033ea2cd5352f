//! Canvas interaction and layout engine for flashcard authoring.
//!
//! This crate is compiled to WebAssembly and runs in the browser alongside the
//! card editor. It owns the interactive part of editing one card face:
//! translating pointer input into drag and resize gestures, keeping elements
//! inside the canvas and above their minimum size, snapping to the grid, and
//! running the one-shot auto-arrangement heuristics. The host UI owns the
//! element lists and their persistence; it receives every change as an
//! [`engine::Action`] or through the [`engine::EngineHost`] callbacks.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`element`] | Card elements, typed payloads, and the ordered element list |
//! | [`geometry`] | Points, rectangles, snapping and clamping helpers |
//! | [`config`] | Canvas size and grid configuration |
//! | [`input`] | Buttons and the gesture state machine |
//! | [`hit`] | Resize-handle geometry and hit-testing |
//! | [`transform`] | Pointer delta to drag/resize geometry |
//! | [`layout`] | Auto-arrangement heuristics |
//! | [`capture`] | Document-level pointer capture scoped to a gesture |
//! | [`render`] | Grid and selection overlay rendering |
//! | [`consts`] | Shared numeric constants (minimum sizes, layout pitches, etc.) |

pub mod capture;
pub mod config;
pub mod consts;
pub mod element;
pub mod engine;
pub mod geometry;
pub mod hit;
pub mod input;
pub mod layout;
pub mod render;
pub mod transform;
