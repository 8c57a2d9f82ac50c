mod classifier;
pub use classifier::Classifier;
pub use classifier::ClassifierConfig;

mod rules;
pub use rules::{BoundRules, Grouping, NoBoundRules, Rule, RuleContext};

mod template;
pub use template::interpolate;

mod errors;
pub use errors::ClassifyError;
