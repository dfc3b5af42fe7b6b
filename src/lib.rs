//! # Accounts
//!
//! A small user-account service: `POST /register` stores an email/password
//! pair and `POST /login` checks a pair against the stored rows.
//!
//! Passwords are stored and compared exactly as submitted. Login answers
//! unknown emails and wrong passwords with the same `401` response, because
//! both fields are matched in a single lookup.

pub mod api;
pub mod cli;
pub mod store;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
