//! File-backed storage adapters.

mod json_file_repository;

pub use json_file_repository::JsonFileSnapshotRepository;
