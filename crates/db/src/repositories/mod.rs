//! Repository layer: one struct of associated functions per table group.

pub mod edge_repo;
pub mod registration_repo;
pub mod suspension_repo;

pub use edge_repo::EdgeRepo;
pub use registration_repo::RegistrationRepo;
pub use suspension_repo::SuspensionRepo;
