// Loess: exploratory cluster analysis for award-abstract corpora.
//
// This is the library root. Each module corresponds to a major subsystem:
// corpus import and cleaning, cluster exploration, and presentation.

pub mod config;
pub mod corpus;
pub mod error;
pub mod explore;
pub mod output;
pub mod pipeline;
