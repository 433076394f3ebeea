pub mod errors;
pub mod db;
pub mod joke;
pub mod user_account;

#[cfg(test)]
mod tests;
