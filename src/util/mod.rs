#[macro_use]
mod macros;

pub mod float_ext;
pub mod sorted_vec;
