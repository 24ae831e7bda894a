pub mod games;
pub mod health;
