pub mod class_rules;
pub mod id_rules;
pub mod pattern_model;
pub mod signatures;

pub use class_rules::classify_class;
pub use id_rules::classify_id;
