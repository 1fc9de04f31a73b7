pub mod page;
pub mod product;
