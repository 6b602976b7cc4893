//! SQLite-backed persistence

pub mod repository;

pub use repository::FileRepository;
