pub(crate) mod blog_repository;
pub(crate) mod repositories;
pub(crate) mod user_repository;
