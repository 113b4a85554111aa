pub mod event_repo;
pub mod notification_repo;
pub mod pledge_repo;
pub mod project_repo;
pub mod reward_repo;
pub mod user_repo;

pub use event_repo::EventRepo;
pub use notification_repo::NotificationRepo;
pub use pledge_repo::PledgeRepo;
pub use project_repo::ProjectRepo;
pub use reward_repo::RewardRepo;
pub use user_repo::UserRepo;
