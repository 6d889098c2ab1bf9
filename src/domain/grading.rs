//! Grading engine. Grade scale -> letter grade -> grade points -> GPA.
//!
//! Pure functions over plain numbers; no store access.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sentinel grade scale meaning "not graded yet".
pub const UNGRADED: f64 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LetterGrade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "C+")]
    CPlus,
    C,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "D+")]
    DPlus,
    D,
    #[serde(rename = "D-")]
    DMinus,
    F,
}

/// Inclusive lower boundaries, highest first. Anything below the last one is F.
const BOUNDARIES: &[(f64, LetterGrade)] = &[
    (98.0, LetterGrade::APlus),
    (93.0, LetterGrade::A),
    (90.0, LetterGrade::AMinus),
    (88.0, LetterGrade::BPlus),
    (83.0, LetterGrade::B),
    (80.0, LetterGrade::BMinus),
    (78.0, LetterGrade::CPlus),
    (73.0, LetterGrade::C),
    (70.0, LetterGrade::CMinus),
    (68.0, LetterGrade::DPlus),
    (63.0, LetterGrade::D),
    (60.0, LetterGrade::DMinus),
];

impl LetterGrade {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::APlus => "A+",
            Self::A => "A",
            Self::AMinus => "A-",
            Self::BPlus => "B+",
            Self::B => "B",
            Self::BMinus => "B-",
            Self::CPlus => "C+",
            Self::C => "C",
            Self::CMinus => "C-",
            Self::DPlus => "D+",
            Self::D => "D",
            Self::DMinus => "D-",
            Self::F => "F",
        }
    }

    pub fn grade_points(self) -> f64 {
        match self {
            Self::APlus | Self::A => 4.00,
            Self::AMinus => 3.67,
            Self::BPlus => 3.33,
            Self::B => 3.00,
            Self::BMinus => 2.67,
            Self::CPlus => 2.33,
            Self::C => 2.00,
            Self::CMinus => 1.67,
            Self::DPlus => 1.33,
            Self::D => 1.00,
            Self::DMinus => 0.67,
            Self::F => 0.00,
        }
    }
}

impl fmt::Display for LetterGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Letter grade for a raw scale. The `UNGRADED` sentinel has no letter.
pub fn letter_grade(scale: f64) -> Option<LetterGrade> {
    if scale == UNGRADED {
        return None;
    }
    let letter = BOUNDARIES
        .iter()
        .find(|(lower, _)| scale >= *lower)
        .map(|(_, letter)| *letter)
        .unwrap_or(LetterGrade::F);
    Some(letter)
}

/// Letter label for display; empty for the sentinel.
pub fn letter_label(scale: f64) -> &'static str {
    letter_grade(scale).map(LetterGrade::as_str).unwrap_or("")
}

/// Grade points for a raw scale; `None` for ungraded.
pub fn grade_points(scale: f64) -> Option<f64> {
    letter_grade(scale).map(LetterGrade::grade_points)
}

/// Mean grade points over graded scales. Ungraded entries count toward neither
/// numerator nor denominator; 0.0 when nothing is graded.
pub fn gpa<I>(scales: I) -> f64
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (total, graded) = scales
        .into_iter()
        .filter_map(|scale| scale.and_then(grade_points))
        .fold((0.0, 0usize), |(total, n), points| (total + points, n + 1));
    if graded == 0 {
        0.0
    } else {
        total / graded as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_has_no_letter() {
        assert_eq!(letter_grade(UNGRADED), None);
        assert_eq!(letter_label(UNGRADED), "");
        assert_eq!(grade_points(UNGRADED), None);
    }

    #[test]
    fn test_boundaries_are_inclusive_lower() {
        assert_eq!(letter_grade(90.0), Some(LetterGrade::AMinus));
        assert_eq!(letter_grade(89.99), Some(LetterGrade::BPlus));
        assert_eq!(letter_grade(98.0), Some(LetterGrade::APlus));
        assert_eq!(letter_grade(150.0), Some(LetterGrade::APlus));
        assert_eq!(letter_grade(60.0), Some(LetterGrade::DMinus));
        assert_eq!(letter_grade(62.9), Some(LetterGrade::DMinus));
        assert_eq!(letter_grade(63.0), Some(LetterGrade::D));
        assert_eq!(letter_grade(59.99), Some(LetterGrade::F));
        assert_eq!(letter_grade(0.0), Some(LetterGrade::F));
        assert_eq!(letter_grade(-5.0), Some(LetterGrade::F));
    }

    #[test]
    fn test_nan_is_f_not_ungraded() {
        assert_eq!(letter_grade(f64::NAN), Some(LetterGrade::F));
        assert_eq!(letter_label(f64::NAN), "F");
    }

    #[test]
    fn test_labels() {
        assert_eq!(letter_label(95.7), "A");
        assert_eq!(letter_label(61.0), "D-");
        assert_eq!(LetterGrade::CPlus.to_string(), "C+");
    }

    #[test]
    fn test_grade_points_table() {
        assert_eq!(grade_points(99.0), Some(4.00));
        assert_eq!(grade_points(95.0), Some(4.00));
        assert_eq!(grade_points(91.0), Some(3.67));
        assert_eq!(grade_points(85.0), Some(3.00));
        assert_eq!(grade_points(61.0), Some(0.67));
        assert_eq!(grade_points(12.0), Some(0.00));
    }

    #[test]
    fn test_gpa_mean_of_graded() {
        assert_eq!(gpa([Some(95.7), Some(85.0)]), 3.50);
        assert_eq!(gpa([Some(95.7), None, Some(85.0)]), 3.50);
        assert_eq!(gpa([Some(UNGRADED), Some(85.0)]), 3.00);
    }

    #[test]
    fn test_gpa_without_grades_is_zero() {
        assert_eq!(gpa(std::iter::empty()), 0.0);
        assert_eq!(gpa([None, None]), 0.0);
    }
}
