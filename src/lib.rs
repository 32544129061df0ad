pub mod database;
pub mod models;
pub mod providers;
pub mod services;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;
