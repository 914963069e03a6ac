pub mod controller;
pub mod fetcher;
pub mod presenter;
pub mod state;
