pub mod maintenance;
pub mod pledges;
pub mod projects;
pub mod rewards;
pub mod users;
