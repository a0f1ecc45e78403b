pub mod job;

pub use job::JobSource;
