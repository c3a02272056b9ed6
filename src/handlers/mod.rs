pub mod health;
pub mod review;
