pub mod cards;
pub mod data;
pub mod review;
pub mod status;
