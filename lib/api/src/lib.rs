//! # curata API
//!
//! Engine orchestration and the REST layer for the curata taste engine.
//! [`TasteEngine`] implements the three engine operations (start, next,
//! finish) over a session store, a candidate source, and a profile store;
//! [`RestApi`] exposes them over HTTP.

pub mod engine;
pub mod rest;
pub mod types;

pub use engine::{EngineConfig, TasteEngine};
pub use rest::RestApi;
pub use types::{
    BlendWeights, FinishRequest, FinishResponse, NextRequest, NextResponse, PairArtwork,
    PartialPreferenceVectors, PresentedPair, StartRequest, StartResponse,
};
