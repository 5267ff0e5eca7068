pub mod prompt_handler;

pub use prompt_handler::{create_prompt, list_prompts};
