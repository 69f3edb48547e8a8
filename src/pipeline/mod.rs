// Pipelines: end-to-end wiring of the corpus importer and the cluster
// explorer. main.rs stays thin; the batch policies live here.

pub mod explore;
pub mod import;
