pub mod email;
pub mod row;
