pub mod event;
pub mod notification;
pub mod pledge;
pub mod project;
pub mod reward;
pub mod user;
