pub mod cmd;
pub mod codec;
pub mod error;
pub mod path;
pub mod scenario;
pub mod sim;

#[cfg(test)]
mod test;
