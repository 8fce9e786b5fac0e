//! Scraper for Purdue's course catalog.
//!
//! Fetches every subject from the Purdue.io OData API, then pulls each
//! subject's courses for a given term with the full class/section/meeting
//! expansion, and writes the aggregate to a single JSON file.

pub mod catalog;
pub mod scrape;
