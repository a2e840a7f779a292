use std::fmt;

use crate::utils::constants::{ALL_CATEGORIES, CATEGORY_VALUE_PREFIX};

/// Filtro del selector de categorías
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(String),
}

impl CategoryFilter {
    /// Inverso de `value()`. "all" (o vacío) → All; "category:<x>" → x.
    /// Un valor sin prefijo se acepta como nombre de categoría.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value == ALL_CATEGORIES {
            return CategoryFilter::All;
        }
        match value.strip_prefix(CATEGORY_VALUE_PREFIX) {
            Some(name) => CategoryFilter::Category(name.to_string()),
            None => CategoryFilter::Category(value.to_string()),
        }
    }

    /// Valor del <option> y de la preferencia persistida.
    /// Una categoría llamada "all" no colisiona con el filtro sintético.
    pub fn value(&self) -> String {
        match self {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Category(name) => format!("{}{}", CATEGORY_VALUE_PREFIX, name),
        }
    }

    /// Texto de la opción en el <select>
    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "All Categories",
            CategoryFilter::Category(name) => name,
        }
    }

    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Category(name) => name == category,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str(ALL_CATEGORIES),
            CategoryFilter::Category(name) => f.write_str(name),
        }
    }
}
