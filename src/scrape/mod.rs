pub mod cards;
pub mod client;
pub mod images;
pub mod pager;
