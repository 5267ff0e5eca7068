mod prompt;

pub use prompt::{GeneratedResponses, NewPrompt, Prompt};
