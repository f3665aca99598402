use serde::Serialize;
use std::{fmt, str::FromStr};

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub status: TaskStatus,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Incomplete,
    Complete,
}

impl TaskStatus {
    /// Status implied by a checkbox value.
    pub fn from_checked(checked: bool) -> Self {
        if checked {
            TaskStatus::Complete
        } else {
            TaskStatus::Incomplete
        }
    }

    pub fn is_complete(self) -> bool {
        self == TaskStatus::Complete
    }

    /// The string stored in the `status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Incomplete => "incomplete",
            TaskStatus::Complete => "complete",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseStatusError(pub String);

impl fmt::Display for ParseStatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown task status: {}", self.0)
    }
}

impl std::error::Error for ParseStatusError {}

impl FromStr for TaskStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "incomplete" => Ok(TaskStatus::Incomplete),
            "complete" => Ok(TaskStatus::Complete),
            other => Err(ParseStatusError(other.to_string())),
        }
    }
}

/// Which subset of tasks the list shows.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Incomplete,
    Complete,
}

impl Filter {
    /// Tab order, left to right.
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Incomplete, Filter::Complete];

    pub fn status(self) -> Option<TaskStatus> {
        match self {
            Filter::All => None,
            Filter::Incomplete => Some(TaskStatus::Incomplete),
            Filter::Complete => Some(TaskStatus::Complete),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Filter::All => "All",
            Filter::Incomplete => "In progress",
            Filter::Complete => "Done",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Filter::All => 0,
            Filter::Incomplete => 1,
            Filter::Complete => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}
