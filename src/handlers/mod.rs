pub mod food_analyzer;

pub use food_analyzer::FoodAnalyzer;
