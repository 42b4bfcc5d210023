//! Advert-form validation.
//!
//! [`builder`] translates a resolved attribute set into per-field rules;
//! [`evaluator`] checks a submitted payload against those rules. Both are
//! pure: the same resolution always yields the same rules, and the same
//! (rules, payload) pair always yields the same result.

pub mod builder;
pub mod evaluator;
pub mod rules;
