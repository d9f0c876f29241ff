//! Record store implementations.
//!
//! - [`PgLinkRepository`] - PostgreSQL link storage
//! - [`PgStatsRepository`] - PostgreSQL monthly aggregation queries
//! - [`MemoryLinkRepository`] - In-process store implementing both traits

pub mod memory_repository;
pub mod pg_link_repository;
pub mod pg_stats_repository;

pub use memory_repository::MemoryLinkRepository;
pub use pg_link_repository::PgLinkRepository;
pub use pg_stats_repository::PgStatsRepository;
