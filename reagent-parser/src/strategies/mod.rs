//! The cascade members, in the fixed order [`crate::parse`] tries them.

pub mod fallback;
pub mod final_answer;
pub mod function_call;
pub mod intent_heuristics;
pub mod model_specific;
pub mod regex_variants;
pub mod structured_react;

pub use fallback::Fallback;
pub use final_answer::FinalAnswerExtraction;
pub use function_call::FunctionCall;
pub use intent_heuristics::IntentHeuristics;
pub use model_specific::ModelSpecific;
pub use regex_variants::RegexVariants;
pub use structured_react::StructuredReAct;
