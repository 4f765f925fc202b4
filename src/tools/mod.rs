// Text and value helpers
pub mod clean;
pub mod normalize;
pub mod parse;

// Network
pub mod fetch;

// Tiers, in priority order
pub mod sites;
pub mod jsonld;
pub mod microdata;
pub mod heuristics;

// Pipeline
pub mod scrape;
