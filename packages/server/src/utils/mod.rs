pub mod hash;
pub mod jwt;
pub mod language;
pub mod lookup;
