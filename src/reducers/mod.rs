//! Domain reducers.  Each returns `true` when it consumed the message.

pub mod chat;
pub mod projects;
pub mod runs;
pub mod workflow;
pub mod workspace;
