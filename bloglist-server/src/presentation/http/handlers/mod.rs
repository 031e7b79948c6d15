pub(crate) mod blogs;
pub(crate) mod health;
pub(crate) mod login;
pub(crate) mod testing;
pub(crate) mod users;
