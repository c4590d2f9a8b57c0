pub mod errors;
pub mod db;
pub mod company;
pub mod stock_market;

#[cfg(test)]
mod tests;
