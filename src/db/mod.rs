pub mod cases;
pub mod connection;
pub mod roster;
