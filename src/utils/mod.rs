pub mod filter;
pub mod salary;
