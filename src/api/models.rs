use serde::Deserialize;

/// Body for all POST /scan/* routes. `target` is optional at the parsing
/// layer so a missing field maps to the validation error, not a 422.
#[derive(Debug, Deserialize)]
pub struct ScanRequest {
    pub target: Option<String>,
}
