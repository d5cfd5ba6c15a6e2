pub mod dates;
pub mod expenses;
