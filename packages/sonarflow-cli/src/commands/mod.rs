pub mod pipelines;
pub mod query;
pub mod run;
pub mod trace;
pub mod validate;
