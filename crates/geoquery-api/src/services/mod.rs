mod query;

pub use query::QueryService;
