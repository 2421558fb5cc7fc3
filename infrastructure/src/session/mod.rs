//! Session persistence and credential acquisition

mod env_login;
mod fs_repository;

pub use env_login::EnvLoginFlow;
pub use fs_repository::FsSessionRepository;
