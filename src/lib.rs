//! # Panel Quotation Measures
//!
//! Extracts panel-cutting measures from dictated or captioned Spanish text and
//! keeps the ordered, numbered measure list of a quotation.

pub mod edge_synonyms;
pub mod extraction_config;
pub mod measure_extractor;
pub mod measure_list;
pub mod measure_model;
pub mod measure_patterns;
pub mod quotation;
pub mod quote_errors;
pub mod quote_session;
pub mod transcript;
