pub mod excerpt;
pub mod links;
pub mod url_normalizer;
