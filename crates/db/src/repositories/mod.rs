//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Operations that must share
//! a transaction with other work take `&mut PgConnection` or a
//! `Transaction` instead.

pub mod application_repo;
pub mod build_repo;
pub mod build_request_repo;
pub mod builder_profile_repo;
pub mod category_repo;
pub mod comment_repo;
pub mod compatibility_rule_repo;
pub mod like_repo;
pub mod offer_repo;
pub mod part_repo;
pub mod rating_repo;
pub mod stats_repo;
pub mod user_repo;

pub use application_repo::ApplicationRepo;
pub use build_repo::BuildRepo;
pub use build_request_repo::BuildRequestRepo;
pub use builder_profile_repo::BuilderProfileRepo;
pub use category_repo::CategoryRepo;
pub use comment_repo::CommentRepo;
pub use compatibility_rule_repo::CompatibilityRuleRepo;
pub use like_repo::LikeRepo;
pub use offer_repo::OfferRepo;
pub use part_repo::PartRepo;
pub use rating_repo::RatingRepo;
pub use stats_repo::StatsRepo;
pub use user_repo::UserRepo;
