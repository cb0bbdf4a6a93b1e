pub mod aggregate;
pub mod derive;
pub mod filter;
pub mod lookup;

#[cfg(test)]
pub mod test_support;
