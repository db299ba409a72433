//! Conversational questions asked by the hosted chat model after the form.

pub mod conversation;
pub mod prompts;
pub mod transcript;
