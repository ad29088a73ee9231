pub mod digits;
pub mod discussion;

#[cfg(test)]
mod tests;
