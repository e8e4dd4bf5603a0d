// Prompt Composer
// Catalog lookup, tone, prompt templating, the selection reducer and the
// generation lifecycle. Everything here except `handlers` is free of I/O.

pub mod catalog;
pub mod conversation;
pub mod handlers;
pub mod prompt;
pub mod prompts;
pub mod session;
pub mod task;
pub mod tone;
