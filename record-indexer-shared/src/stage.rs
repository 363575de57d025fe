//! Record stages.
//!
//! A record with versioning capability exists independently in the Draft
//! (editable) and Live (published) stages. Stage-agnostic records are
//! indexed once and tagged with both stages.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The stage of a record's representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// The editable, working representation.
    Draft,
    /// The published, publicly visible representation.
    Live,
}

impl Stage {
    /// Both stages, used as the stage tag for records without staging
    /// capability.
    pub const BOTH: [Stage; 2] = [Stage::Draft, Stage::Live];

    /// The stage token used in document ids and stage tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Draft => "Draft",
            Stage::Live => "Live",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
