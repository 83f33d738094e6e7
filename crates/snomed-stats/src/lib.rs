//! Aggregate statistics over a [`snomed_model::WorkingSet`].

pub mod frequency;
pub mod gender;

pub use frequency::{FrequencyRow, frequency_table};
pub use gender::{
    FEMALE_CODES, GenderCodes, GenderStats, MALE_CODES, PERSON_CATEGORY, gender_stats,
    gender_stats_with,
};
