pub mod dictionary;
pub mod difference;
