pub mod inference; // Model-inference client trait
pub mod nutrition_parser;
pub mod ollama; // Ollama HTTP client
pub mod prompts;

pub use inference::InferenceClient;
pub use ollama::OllamaClient;
