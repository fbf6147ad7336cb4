use crate::dose::DoseEvent;
use serde::{Deserialize, Serialize};

pub const DAY_NAME_PREFIX: &str = "Day";

/// A named collection of doses representing one tracking session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Day {
    pub name: String,
    pub doses: Vec<DoseEvent>,
}

impl Day {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doses: Vec::new(),
        }
    }

    /// An empty day labelled `Day {index}`.
    pub fn numbered(index: u32) -> Self {
        Self::new(day_name(index))
    }

    /// The `N` of a `Day N` label, if the name follows that pattern.
    pub fn index(&self) -> Option<u32> {
        parse_day_index(&self.name)
    }

    pub fn is_empty(&self) -> bool {
        self.doses.is_empty()
    }
}

pub fn day_name(index: u32) -> String {
    format!("{} {}", DAY_NAME_PREFIX, index)
}

pub fn parse_day_index(name: &str) -> Option<u32> {
    name.strip_prefix(DAY_NAME_PREFIX)?
        .strip_prefix(' ')?
        .parse()
        .ok()
}
