//! Company and stock market services over the `models` entities.
//! Each service talks to a repository trait; the SeaORM implementations live
//! in [`db`], in-memory ones under each `repository::mock`.

pub mod errors;
pub mod company;
pub mod stock_market;
pub mod db;
#[cfg(test)]
pub mod test_support;
