pub mod analytics_admin;
pub mod client;
pub mod models;
pub mod tagmanager;
