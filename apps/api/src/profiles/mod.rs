// Profile rows: storage, listing and the LLM-written assessment stored with each row.

pub mod assessment;
pub mod handlers;
pub mod prompts;
pub mod store;
