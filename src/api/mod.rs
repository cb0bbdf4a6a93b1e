pub mod console;
pub mod driver;
