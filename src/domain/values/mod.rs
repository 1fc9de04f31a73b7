pub mod deviation;
pub mod flavor_preset;
pub mod flavor_vector;
pub mod query_parameters;
