pub mod element_model;
pub mod suggest;

pub use element_model::{Confidence, ElementSnapshot, SelectorSuggestion, SuggestionMethod};
pub use suggest::suggest_selector;
