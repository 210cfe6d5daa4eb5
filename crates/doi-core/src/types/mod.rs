pub mod date;
pub mod ni;

pub use date::parse_iso_date;
pub use ni::{Cnpj, Cpf, Ni};
