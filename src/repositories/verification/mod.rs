pub mod verification_repo;
