// src/disclosure/age.rs
//! Age claim evaluation.
//!
//! Computes the calendar age from a date of birth and compares it against
//! a threshold, producing the claim that is attached to a disclosure. The
//! birth date itself is never embedded in the credential; only the
//! pass/fail assertion travels.
//!
//! Note: despite the "zero-knowledge" branding of the original product,
//! this is a plaintext comparison on the holder's device, not a
//! cryptographic range proof.

use crate::error::{IdentityError, IdentityResult};
use crate::models::payload::AgeClaim;
use chrono::{Datelike, NaiveDate};

/// Evaluates an age claim as of the given date.
///
/// The age is the number of completed calendar years: the year difference,
/// minus one if the `(month, day)` pair of `as_of` is strictly less than
/// that of `dob`. The birthday itself therefore counts as already
/// occurred: a person turns 18 on their 18th birthday, not the day after.
///
/// # Arguments
/// * `dob` - Date of birth from the identity record
/// * `threshold` - Minimum age in years, must be positive
/// * `as_of` - Evaluation date, injected by the caller (tests never use the
///   wall clock)
///
/// # Errors
/// - `InvalidDateOfBirth` if `dob` is after `as_of`
/// - `InvalidThreshold` if `threshold` is zero
pub fn evaluate_age(dob: NaiveDate, threshold: u32, as_of: NaiveDate) -> IdentityResult<AgeClaim> {
    if threshold == 0 {
        return Err(IdentityError::InvalidThreshold(threshold));
    }
    if dob > as_of {
        return Err(IdentityError::InvalidDateOfBirth { dob, as_of });
    }

    let mut age = as_of.year() - dob.year();
    if (as_of.month(), as_of.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }

    // dob <= as_of guarantees the subtraction lands at zero or above
    let computed_age = age as u32;

    Ok(AgeClaim {
        computed_age,
        threshold,
        satisfied: computed_age >= threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_age_day_before_birthday() {
        let claim = evaluate_age(date(1990, 6, 15), 18, date(2024, 6, 14)).unwrap();
        assert_eq!(claim.computed_age, 33);
    }

    #[test]
    fn test_age_increments_on_the_birthday_itself() {
        let claim = evaluate_age(date(1990, 6, 15), 18, date(2024, 6, 15)).unwrap();
        assert_eq!(claim.computed_age, 34);
    }

    #[test]
    fn test_exact_threshold_birthday_satisfies() {
        // 18th birthday to the day
        let claim = evaluate_age(date(2006, 6, 15), 18, date(2024, 6, 15)).unwrap();
        assert_eq!(claim.computed_age, 18);
        assert!(claim.satisfied);
    }

    #[test]
    fn test_one_day_short_of_threshold_fails() {
        let claim = evaluate_age(date(2006, 6, 15), 18, date(2024, 6, 14)).unwrap();
        assert_eq!(claim.computed_age, 17);
        assert!(!claim.satisfied);
    }

    #[test]
    fn test_leap_day_birth_before_february_end() {
        // Born Feb 29; on Feb 28 of a common year the birthday has not occurred
        let claim = evaluate_age(date(2004, 2, 29), 18, date(2022, 2, 28)).unwrap();
        assert_eq!(claim.computed_age, 17);
    }

    #[test]
    fn test_birth_today_is_age_zero() {
        let claim = evaluate_age(date(2024, 6, 15), 1, date(2024, 6, 15)).unwrap();
        assert_eq!(claim.computed_age, 0);
        assert!(!claim.satisfied);
    }

    #[test]
    fn test_future_dob_is_rejected() {
        let result = evaluate_age(date(2025, 1, 1), 18, date(2024, 6, 15));
        assert!(matches!(
            result,
            Err(IdentityError::InvalidDateOfBirth { .. })
        ));
    }

    #[test]
    fn test_zero_threshold_is_rejected() {
        let result = evaluate_age(date(1990, 6, 15), 0, date(2024, 6, 15));
        assert!(matches!(result, Err(IdentityError::InvalidThreshold(0))));
    }

    #[test]
    fn test_deterministic_for_a_fixed_as_of() {
        let a = evaluate_age(date(1990, 6, 15), 21, date(2024, 6, 15)).unwrap();
        let b = evaluate_age(date(1990, 6, 15), 21, date(2024, 6, 15)).unwrap();
        assert_eq!(a, b);
    }
}
