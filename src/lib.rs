pub mod diag;
pub mod extract;
pub mod normalize;
pub mod report;
pub mod scan;
