use async_trait::async_trait;

use curata_core::{ArtworkCandidate, Result, Style};

use crate::CandidateSource;

/// Deterministic offline source.
///
/// Produces the same index-cycled pool every call, which is what makes it
/// usable both as the `--offline` wiring and as the substitute pool when a
/// real catalog is unreachable. The style filter is ignored; the pool cycles
/// through the whole taxonomy regardless.
#[derive(Debug, Clone, Copy, Default)]
pub struct SyntheticSource;

impl SyntheticSource {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CandidateSource for SyntheticSource {
    async fn fetch(&self, _styles: &[Style], desired: usize) -> Result<Vec<ArtworkCandidate>> {
        let ids: Vec<String> = (0..desired).map(|i| format!("synthetic_{i:03}")).collect();
        Ok(ArtworkCandidate::synthetic_pool(&ids))
    }
}
