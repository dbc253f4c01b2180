//! Saved amplitude pairs.

use serde::{Deserialize, Serialize};

/// One point in the edit history: the raw alpha and beta texts.
///
/// Immutable once created; history navigation hands out shared references.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Snapshot {
    alpha: String,
    beta: String,
}

impl Snapshot {
    #[must_use]
    pub fn new(alpha: impl Into<String>, beta: impl Into<String>) -> Self {
        Self {
            alpha: alpha.into(),
            beta: beta.into(),
        }
    }

    #[must_use]
    pub fn alpha(&self) -> &str {
        &self.alpha
    }

    #[must_use]
    pub fn beta(&self) -> &str {
        &self.beta
    }

    #[must_use]
    pub fn into_parts(self) -> (String, String) {
        (self.alpha, self.beta)
    }
}

impl<A: Into<String>, B: Into<String>> From<(A, B)> for Snapshot {
    fn from((alpha, beta): (A, B)) -> Self {
        Self::new(alpha, beta)
    }
}
