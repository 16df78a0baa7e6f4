// Domain layer - Pure models, interpolation and reporting
pub mod dashboard;
pub mod dataset;
pub mod error;
pub mod interpolation;
pub mod observation;
pub mod record;
pub mod report;
pub mod widgets;
