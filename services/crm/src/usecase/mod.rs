pub mod access_request;
pub mod branding;
pub mod company;
pub mod contact;
pub mod deal;
pub mod exchange_rate;
pub mod stage;
pub mod team;
pub mod user;
pub mod visibility;
