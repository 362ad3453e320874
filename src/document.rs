use serde::{Deserialize, Serialize};

/// Product represents a single catalog item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub rating: f64,
    #[serde(default)]
    pub description: String,
}

impl Product {
    pub fn new(id: String, name: String, price: f64, category: String, rating: f64) -> Self {
        Self {
            id,
            name,
            price,
            category,
            rating,
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    /// Build the indexable document for this product (name + description + category)
    pub fn document(&self) -> Document {
        Document {
            id: self.id.clone(),
            text: format!("{} {} {}", self.name, self.description, self.category),
        }
    }
}

/// A catalog item's indexable text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub text: String,
}

/// A catalog item paired with its relevance score for one search
#[derive(Debug, Clone, Serialize)]
pub struct ScoredItem {
    pub item: Product,
    pub score: f64,
}

impl ScoredItem {
    pub fn new(item: Product, score: f64) -> Self {
        Self { item, score }
    }
}
