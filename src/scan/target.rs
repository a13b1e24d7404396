use crate::errors::ScandeckError;

/// Closed set of hosts scans may be pointed at. Anything outside this list is
/// rejected regardless of other checks.
pub const ALLOWED_TARGETS: &[&str] = &[
    "localhost",
    "127.0.0.1",
    "example.com",
    "test.com",
    "example.org",
    "scanme.nmap.org",
];

/// Shell metacharacters rejected before the allow-list check. The allow-list
/// already excludes these, but the character filter stays as defense in depth.
const BLOCKED_CHARS: &[char] = &[';', '&', '|', '<', '>', '$', '`'];

pub fn validate(target: &str) -> bool {
    if target.is_empty() {
        return false;
    }
    if target.chars().any(|c| BLOCKED_CHARS.contains(&c)) {
        return false;
    }
    ALLOWED_TARGETS.contains(&target)
}

/// A target string that has passed validation. Construction is the only way
/// to obtain one, so everything downstream can trust the contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTarget(String);

impl ScanTarget {
    pub fn parse(raw: &str) -> Result<Self, ScandeckError> {
        if validate(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(ScandeckError::InvalidTarget(
                "Target not in the allowed list".to_string(),
            ))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ScanTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
