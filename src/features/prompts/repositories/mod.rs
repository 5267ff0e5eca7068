mod prompt_repository;

pub use prompt_repository::{PgPromptStore, PromptStore};
