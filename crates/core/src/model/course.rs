use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::model::ids::CourseId;

//
// ─── CATEGORY ──────────────────────────────────────────────────────────────────
//

/// Subject area a course is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Programming,
    Design,
    Business,
    Science,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Programming,
        Category::Design,
        Category::Business,
        Category::Science,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Programming => "programming",
            Category::Design => "design",
            Category::Business => "business",
            Category::Science => "science",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown course category: {0}")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseCategoryError(wanted.to_string()))
    }
}

//
// ─── LEVEL ─────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
        };
        f.write_str(label)
    }
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// A catalog entry. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    category: Category,
    level: Level,
    duration: String,
    icon: String,
}

impl Course {
    #[must_use]
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        level: Level,
        duration: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            category,
            level,
            duration: duration.into(),
            icon: icon.into(),
        }
    }

    #[must_use]
    pub fn id(&self) -> CourseId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Free-form length label such as "6 weeks".
    #[must_use]
    pub fn duration(&self) -> &str {
        &self.duration
    }

    /// Icon reference handed to the presentation layer.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }
}
