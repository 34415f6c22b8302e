//! The visual variants, expressed as configuration builders over the one
//! shared engine.

mod constellation;
mod skills;

pub use constellation::constellation_config;
pub use skills::{SKILL_CATEGORY_COUNT, skills_config};
