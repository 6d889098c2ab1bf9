//! Domain entities. Plain records for the academic model.
//!
//! Relations are held by key, never by reference: the Record Store owns every
//! entity and is the only place that links a child to its parent.

use super::errors::RecordsError;
use super::grading::{self, LetterGrade};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Department,
    Course,
    Professor,
    Student,
    Enrollment,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Department => "Department",
            Self::Course => "Course",
            Self::Professor => "Professor",
            Self::Student => "Student",
            Self::Enrollment => "Enrollment",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = RecordsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "department" => Ok(Self::Department),
            "course" => Ok(Self::Course),
            "professor" => Ok(Self::Professor),
            "student" => Ok(Self::Student),
            "enrollment" => Ok(Self::Enrollment),
            other => Err(RecordsError::InvalidArgument(format!(
                "unknown entity kind '{}'",
                other
            ))),
        }
    }
}

/// Identity shared by every stored entity.
pub trait Identified {
    const KIND: EntityKind;

    /// Stable identifier, formatted as the caller sees it.
    fn id(&self) -> String;

    fn name(&self) -> &str;
}

/// Whole years between `birth_date` and `today`; 0 for dates in the future.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> u32 {
    if today < birth_date {
        return 0;
    }
    let mut years = today.year() - birth_date.year();
    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        years -= 1;
    }
    years.max(0) as u32
}

#[derive(Debug, Clone, PartialEq)]
pub struct Department {
    id: String,
    name: String,
    description: String,
    course_ids: Vec<String>,
    professor_ids: Vec<u32>,
}

impl Department {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            course_ids: Vec::new(),
            professor_ids: Vec::new(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Course ids in the order they were attached.
    pub fn course_ids(&self) -> &[String] {
        &self.course_ids
    }

    /// Professor ids in the order they were attached.
    pub fn professor_ids(&self) -> &[u32] {
        &self.professor_ids
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub(crate) fn attach_course(&mut self, course_id: &str) {
        self.course_ids.push(course_id.to_string());
    }

    pub(crate) fn attach_professor(&mut self, professor_id: u32) {
        self.professor_ids.push(professor_id);
    }
}

impl Identified for Department {
    const KIND: EntityKind = EntityKind::Department;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    id: String,
    name: String,
    description: String,
    department_id: String,
}

impl Course {
    /// The owning department is fixed here and never changes.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        department: &Department,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            department_id: department.id.clone(),
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn department_id(&self) -> &str {
        &self.department_id
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }
}

impl Identified for Course {
    const KIND: EntityKind = EntityKind::Course;

    fn id(&self) -> String {
        self.id.clone()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Professor {
    id: u32,
    name: String,
    birth_date: NaiveDate,
    department_id: String,
}

impl Professor {
    pub fn new(
        id: u32,
        name: impl Into<String>,
        birth_date: NaiveDate,
        department: &Department,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            birth_date,
            department_id: department.id.clone(),
        }
    }

    pub fn number(&self) -> u32 {
        self.id
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn age_on(&self, today: NaiveDate) -> u32 {
        age_on(self.birth_date, today)
    }

    pub fn department_id(&self) -> &str {
        &self.department_id
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_birth_date(&mut self, birth_date: NaiveDate) {
        self.birth_date = birth_date;
    }
}

impl Identified for Professor {
    const KIND: EntityKind = EntityKind::Professor;

    fn id(&self) -> String {
        self.id.to_string()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A student taking a course under a professor from a given date.
#[derive(Debug, Clone, PartialEq)]
pub struct Enrollment {
    student_id: u32,
    course_id: String,
    professor_id: u32,
    enrolled_on: NaiveDate,
    grade_scale: Option<f64>,
}

impl Enrollment {
    fn new(
        student: &Student,
        course: &Course,
        professor: &Professor,
        enrolled_on: NaiveDate,
    ) -> Self {
        Self {
            student_id: student.id,
            course_id: course.id.clone(),
            professor_id: professor.id,
            enrolled_on,
            grade_scale: None,
        }
    }

    /// Composite id: `<student id>_<course id>`.
    pub fn id(&self) -> String {
        format!("{}_{}", self.student_id, self.course_id)
    }

    pub fn student_id(&self) -> u32 {
        self.student_id
    }

    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    pub fn professor_id(&self) -> u32 {
        self.professor_id
    }

    pub fn enrolled_on(&self) -> NaiveDate {
        self.enrolled_on
    }

    /// `None` until a grade has been assigned.
    pub fn grade_scale(&self) -> Option<f64> {
        self.grade_scale
    }

    pub fn is_graded(&self) -> bool {
        self.grade_scale.is_some()
    }

    pub fn letter_grade(&self) -> Option<LetterGrade> {
        self.grade_scale.and_then(grading::letter_grade)
    }

    pub fn grade_points(&self) -> Option<f64> {
        self.letter_grade().map(LetterGrade::grade_points)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Student {
    id: u32,
    name: String,
    birth_date: NaiveDate,
    enrollments: Vec<Enrollment>,
}

impl Student {
    pub fn new(id: u32, name: impl Into<String>, birth_date: NaiveDate) -> Self {
        Self {
            id,
            name: name.into(),
            birth_date,
            enrollments: Vec::new(),
        }
    }

    pub fn number(&self) -> u32 {
        self.id
    }

    pub fn birth_date(&self) -> NaiveDate {
        self.birth_date
    }

    pub fn age_on(&self, today: NaiveDate) -> u32 {
        age_on(self.birth_date, today)
    }

    pub fn enrollments(&self) -> &[Enrollment] {
        &self.enrollments
    }

    pub fn enrollment(&self, course_id: &str) -> Option<&Enrollment> {
        self.enrollments.iter().find(|e| e.course_id == course_id)
    }

    pub fn is_enrolled(&self, course_id: &str) -> bool {
        self.enrollment(course_id).is_some()
    }

    /// Enroll in `course` under `professor`. A course can be taken at most once.
    pub fn enroll(
        &mut self,
        course: &Course,
        professor: &Professor,
        enrolled_on: NaiveDate,
    ) -> Result<&Enrollment, RecordsError> {
        if self.is_enrolled(&course.id) {
            return Err(RecordsError::IllegalState(format!(
                "Student {} is already enrolled in the course {}",
                self.name, course.name
            )));
        }
        let enrollment = Enrollment::new(self, course, professor, enrolled_on);
        self.enrollments.push(enrollment);
        let idx = self.enrollments.len() - 1;
        Ok(&self.enrollments[idx])
    }

    /// Assign (or overwrite) the grade scale of the enrollment in `course_id`.
    pub fn set_grade_scale(
        &mut self,
        course_id: &str,
        scale: f64,
    ) -> Result<&Enrollment, RecordsError> {
        if !scale.is_finite() || !(0.0..=100.0).contains(&scale) {
            return Err(RecordsError::InvalidArgument(format!(
                "grade scale must be between 0 and 100, got {}",
                scale
            )));
        }
        let name = self.name.clone();
        let enrollment = self
            .enrollments
            .iter_mut()
            .find(|e| e.course_id == course_id)
            .ok_or_else(|| {
                RecordsError::IllegalState(format!(
                    "Student {} is not enrolled in the course {}",
                    name, course_id
                ))
            })?;
        enrollment.grade_scale = Some(scale);
        Ok(&*enrollment)
    }

    pub fn gpa(&self) -> f64 {
        grading::gpa(self.enrollments.iter().map(Enrollment::grade_scale))
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_birth_date(&mut self, birth_date: NaiveDate) {
        self.birth_date = birth_date;
    }
}

impl Identified for Student {
    const KIND: EntityKind = EntityKind::Student;

    fn id(&self) -> String {
        self.id.to_string()
    }

    fn name(&self) -> &str {
        &self.name
    }
}
