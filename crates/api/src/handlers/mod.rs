pub mod artwork;
pub mod catalog;
pub mod generation;
pub mod group;
pub mod pages;
