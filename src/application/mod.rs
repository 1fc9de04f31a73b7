pub mod catalog_query;
pub mod flavor_editor;
pub mod product_detail;
pub mod recommendation_lookup;
pub mod request_sequence;
pub mod similarity_search;
