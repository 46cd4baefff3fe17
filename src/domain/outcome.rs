//! Outcome label attached to every encounter
//!
//! The label is the training target for ED revisit prediction. Exactly one
//! label is assigned per encounter by the outcome classifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of one ED stay with respect to the follow-up window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeLabel {
    /// The patient had a later encounter whose admit time fell within the
    /// follow-up window measured from this encounter's discharge time
    RevisitedWithinWindow,

    /// Neither a revisit nor a death within the follow-up window
    NotRevisited,

    /// The patient had no later encounter and died within the follow-up
    /// window measured from this encounter's discharge time
    DiedWithinWindow,
}

impl OutcomeLabel {
    /// Stable wire form used in the exported table
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RevisitedWithinWindow => "revisited_within_window",
            Self::NotRevisited => "not_revisited",
            Self::DiedWithinWindow => "died_within_window",
        }
    }
}

impl fmt::Display for OutcomeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutcomeLabel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "revisited_within_window" => Ok(Self::RevisitedWithinWindow),
            "not_revisited" => Ok(Self::NotRevisited),
            "died_within_window" => Ok(Self::DiedWithinWindow),
            other => Err(format!("Unknown outcome label: {other}")),
        }
    }
}
