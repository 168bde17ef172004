//! Data models for the editing session and the generation API.

mod document;

pub use document::{GenerateRequest, GenerateResponse, Selection, Snapshot};
