pub mod catalog_port;
pub mod recommendation_port;
pub mod similarity_port;
