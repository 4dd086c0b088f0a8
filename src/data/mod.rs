//! Data layer: measurement database types and loading.
//!
//! ```text
//!  sotc.json
//!      │
//!      ▼
//!  ┌────────┐
//!  │ loader │  read + typed parse → FlashlightDb
//!  └────────┘
//!      │
//!      ▼
//!  ┌──────────────┐
//!  │ FlashlightDb │  Vec<Flashlight>, each with ordered measures
//!  └──────────────┘
//! ```

pub mod loader;
pub mod model;
