//! Colony pigmentation analysis
//!
//! Batch driver around [`colony_kit`]: loads colony photographs, runs the
//! segmentation and quantification stages on each of them concurrently,
//! writes the intermediate images and profiles, and averages the profiles
//! of all colonies. This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod services;
