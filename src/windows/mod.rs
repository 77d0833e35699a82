pub mod lsa;
pub mod token;
