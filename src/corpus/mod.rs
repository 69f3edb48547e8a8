// Corpus import — directory listing, sampling, XML field extraction,
// and text normalization.

pub mod clean;
pub mod importer;
pub mod record;
pub mod vectorize;
