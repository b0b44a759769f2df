//! In-memory repositories backing the mock upstream

pub mod alert;
pub mod product;

pub use alert::AlertRepository;
pub use product::ProductRepository;
