pub mod analyze;
pub mod coverage;
pub mod demo;
pub mod dispatch;
pub mod expect;
pub mod kb;
pub mod schema;
pub mod validate;
