pub mod errors;
pub mod db;
pub mod validate;
pub mod user;
pub mod business;
pub mod product;

#[cfg(test)]
mod tests;
