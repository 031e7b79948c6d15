pub(crate) mod access;
pub(crate) mod blog;
pub(crate) mod error;
pub(crate) mod stats;
pub(crate) mod user;
