//! Lead-capture intake and SEO metadata backing the RingVisit marketing site.

pub mod config;
pub mod error;
pub mod forms;
pub mod seo;
pub mod telemetry;
