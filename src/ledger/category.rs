use std::fmt;

use serde::{Deserialize, Serialize};

/// Classifies an expense for aggregation and display.
///
/// The six named variants form the public enumeration. Any other label is kept verbatim in
/// [`Category::Custom`] and presented with the [`Category::Other`] color and icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Food,
    Entertainment,
    Travel,
    Utilities,
    Shopping,
    Other,
    Custom(String),
}

impl Category {
    /// The fixed enumeration, in the order the picker lists it.
    pub const ALL: [Category; 6] = [
        Category::Food,
        Category::Entertainment,
        Category::Travel,
        Category::Utilities,
        Category::Shopping,
        Category::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Food => "Food",
            Category::Entertainment => "Entertainment",
            Category::Travel => "Travel",
            Category::Utilities => "Utilities",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
            Category::Custom(label) => label,
        }
    }

    /// Resolves a user-typed label, ignoring case for the named variants.
    pub fn lookup(label: &str) -> Self {
        let trimmed = label.trim();
        Self::ALL
            .iter()
            .find(|known| known.as_str().eq_ignore_ascii_case(trimmed))
            .cloned()
            .unwrap_or_else(|| Category::Custom(trimmed.to_string()))
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Category::Custom(_))
    }

    /// Chart color for the category.
    pub fn color_token(&self) -> &'static str {
        match self {
            Category::Food => "hsl(285, 63%, 42%)",
            Category::Entertainment => "hsl(36, 100%, 50%)",
            Category::Travel => "hsl(45, 100%, 52%)",
            Category::Utilities => "hsl(195, 100%, 50%)",
            Category::Shopping => "hsl(340, 82%, 52%)",
            Category::Other | Category::Custom(_) => "hsl(160, 64%, 52%)",
        }
    }

    /// Icon name used by list renderers.
    pub fn icon(&self) -> &'static str {
        match self {
            Category::Food => "utensils",
            Category::Entertainment => "film",
            Category::Travel => "car",
            Category::Utilities => "home",
            Category::Shopping => "shopping-bag",
            Category::Other | Category::Custom(_) => "package",
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Food" => Category::Food,
            "Entertainment" => Category::Entertainment,
            "Travel" => Category::Travel,
            "Utilities" => Category::Utilities,
            "Shopping" => Category::Shopping,
            "Other" => Category::Other,
            _ => Category::Custom(value),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Category::from(value.to_string())
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Custom(label) => label,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
