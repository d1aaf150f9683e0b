//! Domain types representing spending categories.

use serde::{Deserialize, Serialize};

use crate::common::*;

/// Reference data partitioned by mode. Created with the seed only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
    #[serde(rename = "type")]
    pub mode: Mode,
    pub color: String,
}

impl Category {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        icon: impl Into<String>,
        mode: Mode,
        color: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            icon: icon.into(),
            mode,
            color: color.into(),
        }
    }
}

impl Identifiable for Category {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Partitioned for Category {
    fn mode(&self) -> Mode {
        self.mode
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        format!("{} {}", self.icon, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_mode_is_persisted_as_type() {
        let category = Category::new("p1", "Groceries", "🛒", Mode::Personal, "#10b981");
        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value["type"], "PERSONAL");
        assert!(value.get("mode").is_none());
    }
}
