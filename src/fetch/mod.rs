// src/fetch/mod.rs
//! Network collaborators: login and section download.

pub mod auth;
pub mod section;

pub use auth::{authenticate, Credentials, CredentialPrompt, NoPrompt, StdinPrompt};
pub use section::{get_section, RetryPolicy, Section};
