use serde::{Deserialize, Serialize};

/// A user-authored unit of homework.
///
/// Recurring assignments occur once on every day of the planning range and
/// ignore `total_units`. Split assignments spread `total_units` whole units
/// across the range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,
    pub name: String,
    #[serde(alias = "subject")]
    pub category: String,
    #[serde(alias = "count", default)]
    pub total_units: u32,
    #[serde(alias = "isDaily", default)]
    pub recurring: bool,
    #[serde(alias = "isHard", default)]
    pub high_effort: bool,
}

impl Assignment {
    /// A split assignment with `total_units` units to distribute.
    pub fn split(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        total_units: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            total_units,
            recurring: false,
            high_effort: false,
        }
    }

    /// A recurring assignment scheduled on every day of the range.
    pub fn recurring(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            total_units: 0,
            recurring: true,
            high_effort: false,
        }
    }

    pub fn with_high_effort(mut self, high_effort: bool) -> Self {
        self.high_effort = high_effort;
        self
    }

    /// Short label such as `数1 • 30ページ` or `国語 • daily`.
    pub fn describe(&self) -> String {
        if self.recurring {
            format!("{} • daily", self.category)
        } else {
            format!("{} • {}ページ", self.category, self.total_units)
        }
    }
}
