//! Record Store. Sole source of truth from id to entity, per entity kind.
//!
//! - `add` never overwrites: a taken key is `DuplicateKey` and the store is unchanged
//! - Parent lists (department courses/professors) are appended in the same call that inserts the child
//! - Enrollments live inside their Student; removing the Student removes them with it

mod sequence;
mod table;

pub use sequence::IdSequence;
pub use table::{Stored, Table};

use crate::domain::{
    Course, Department, Enrollment, EntityKind, Identified, Professor, RecordsError, Student,
};
use chrono::NaiveDate;

#[derive(Debug, Default)]
pub struct RecordStore {
    departments: Table<Department>,
    courses: Table<Course>,
    professors: Table<Professor>,
    students: Table<Student>,
    professor_ids: IdSequence,
    student_ids: IdSequence,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_all<T: Stored>(&self) -> Vec<&T> {
        T::table(self).iter().collect()
    }

    /// Absence is a normal outcome, not an error.
    pub fn get_by_id<T: Stored>(&self, id: &str) -> Option<&T> {
        T::table(self).get(id)
    }

    pub fn get_by_id_mut<T: Stored>(&mut self, id: &str) -> Option<&mut T> {
        T::table_mut(self).get_mut(id)
    }

    pub fn count<T: Stored>(&self) -> usize {
        T::table(self).len()
    }

    /// Insert `entity` and link it to its parents in one step.
    pub fn add<T: Stored>(&mut self, entity: T) -> Result<&T, RecordsError> {
        let key = entity.key();
        if T::table(self).contains_key(&key) {
            return Err(RecordsError::duplicate(T::KIND, key.to_string()));
        }
        entity.check_links(self)?;
        entity.link(self);
        Ok(T::table_mut(self).insert(key, entity))
    }

    /// Remove a student and every enrollment it owns. `false` if there was none.
    pub fn remove_student(&mut self, id: &str) -> bool {
        self.students.remove(id).is_some()
    }

    pub fn next_professor_id(&mut self) -> Result<u32, RecordsError> {
        self.professor_ids
            .next_id()
            .ok_or_else(|| exhausted(EntityKind::Professor))
    }

    pub fn next_student_id(&mut self) -> Result<u32, RecordsError> {
        self.student_ids
            .next_id()
            .ok_or_else(|| exhausted(EntityKind::Student))
    }

    /// Enroll a student; returns the composite enrollment id.
    pub fn enroll(
        &mut self,
        student_id: &str,
        course_id: &str,
        professor_id: &str,
        enrolled_on: NaiveDate,
    ) -> Result<String, RecordsError> {
        for (kind, id) in [
            (EntityKind::Student, student_id),
            (EntityKind::Course, course_id),
            (EntityKind::Professor, professor_id),
        ] {
            if id.trim().is_empty() {
                return Err(RecordsError::InvalidArgument(format!(
                    "{} must be provided for an enrollment",
                    kind
                )));
            }
        }
        if !self.students.contains_id(student_id) {
            return Err(RecordsError::not_found(EntityKind::Student, student_id));
        }
        let course = self
            .courses
            .get(course_id)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Course, course_id))?;
        let professor = self
            .professors
            .get(professor_id)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Professor, professor_id))?;
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Student, student_id))?;
        student
            .enroll(course, professor, enrolled_on)
            .map(Enrollment::id)
    }

    /// Returns the composite id of the graded enrollment.
    pub fn set_grade_scale(
        &mut self,
        student_id: &str,
        course_id: &str,
        scale: f64,
    ) -> Result<String, RecordsError> {
        let course_id = course_id.trim();
        if !self.courses.contains_id(course_id) {
            return Err(RecordsError::not_found(EntityKind::Course, course_id));
        }
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| RecordsError::not_found(EntityKind::Student, student_id))?;
        student
            .set_grade_scale(course_id, scale)
            .map(Enrollment::id)
    }

    /// Every live enrollment, grouped by student in key order.
    pub fn enrollments(&self) -> impl Iterator<Item = &Enrollment> {
        self.students.iter().flat_map(|s| s.enrollments().iter())
    }

    /// Lookup by composite id `<student id>_<course id>`.
    pub fn enrollment(&self, id: &str) -> Option<&Enrollment> {
        let (student_id, course_id) = id.split_once('_')?;
        self.students.get(student_id)?.enrollment(course_id.trim())
    }

    pub fn course_enrollments<'a>(
        &'a self,
        course_id: &'a str,
    ) -> impl Iterator<Item = &'a Enrollment> + 'a {
        self.enrollments().filter(move |e| e.course_id() == course_id)
    }

    /// "<student> enroll <course>", falling back to ids for missing names.
    pub fn enrollment_name(&self, enrollment: &Enrollment) -> String {
        let student = self
            .students
            .get(&enrollment.student_id().to_string())
            .map(|s| s.name().to_string())
            .unwrap_or_else(|| enrollment.student_id().to_string());
        let course = self
            .courses
            .get(enrollment.course_id())
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| enrollment.course_id().to_string());
        format!("{} enroll {}", student, course)
    }
}

fn exhausted(kind: EntityKind) -> RecordsError {
    RecordsError::IllegalState(format!("{} ids are exhausted", kind))
}

impl Stored for Department {
    type Key = String;

    fn key(&self) -> String {
        self.id()
    }

    fn parse_key(id: &str) -> Option<String> {
        table::parse_text_key(id)
    }

    fn table(store: &RecordStore) -> &Table<Self> {
        &store.departments
    }

    fn table_mut(store: &mut RecordStore) -> &mut Table<Self> {
        &mut store.departments
    }
}

impl Stored for Course {
    type Key = String;

    fn key(&self) -> String {
        self.id()
    }

    fn parse_key(id: &str) -> Option<String> {
        table::parse_text_key(id)
    }

    fn table(store: &RecordStore) -> &Table<Self> {
        &store.courses
    }

    fn table_mut(store: &mut RecordStore) -> &mut Table<Self> {
        &mut store.courses
    }

    fn check_links(&self, store: &RecordStore) -> Result<(), RecordsError> {
        if store.departments.contains_id(self.department_id()) {
            Ok(())
        } else {
            Err(RecordsError::not_found(
                EntityKind::Department,
                self.department_id(),
            ))
        }
    }

    fn link(&self, store: &mut RecordStore) {
        if let Some(department) = store.departments.get_mut(self.department_id()) {
            department.attach_course(&self.id());
        }
    }
}

impl Stored for Professor {
    type Key = u32;

    fn key(&self) -> u32 {
        self.number()
    }

    fn parse_key(id: &str) -> Option<u32> {
        table::parse_number_key(id)
    }

    fn table(store: &RecordStore) -> &Table<Self> {
        &store.professors
    }

    fn table_mut(store: &mut RecordStore) -> &mut Table<Self> {
        &mut store.professors
    }

    fn check_links(&self, store: &RecordStore) -> Result<(), RecordsError> {
        if store.departments.contains_id(self.department_id()) {
            Ok(())
        } else {
            Err(RecordsError::not_found(
                EntityKind::Department,
                self.department_id(),
            ))
        }
    }

    fn link(&self, store: &mut RecordStore) {
        store.professor_ids.observe(self.number());
        if let Some(department) = store.departments.get_mut(self.department_id()) {
            department.attach_professor(self.number());
        }
    }
}

impl Stored for Student {
    type Key = u32;

    fn key(&self) -> u32 {
        self.number()
    }

    fn parse_key(id: &str) -> Option<u32> {
        table::parse_number_key(id)
    }

    fn table(store: &RecordStore) -> &Table<Self> {
        &store.students
    }

    fn table_mut(store: &mut RecordStore) -> &mut Table<Self> {
        &mut store.students
    }

    fn link(&self, store: &mut RecordStore) {
        store.student_ids.observe(self.number());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_with_math() -> RecordStore {
        let mut store = RecordStore::new();
        store
            .add(Department::new("MATH", "Mathematics", "Mathematics Department"))
            .unwrap();
        store
    }

    fn seed_enrollment(store: &mut RecordStore) -> String {
        let math = store.get_by_id::<Department>("MATH").unwrap().clone();
        store
            .add(Course::new("MATH1211", "Calculus", "Limits", &math))
            .unwrap();
        let pid = store.next_professor_id().unwrap();
        store
            .add(Professor::new(pid, "Bob Green", date(1985, 8, 25), &math))
            .unwrap();
        let sid = store.next_student_id().unwrap();
        store
            .add(Student::new(sid, "Ada Lovelace", date(2001, 12, 10)))
            .unwrap();
        store
            .enroll(&sid.to_string(), "MATH1211", &pid.to_string(), date(2024, 9, 1))
            .unwrap()
    }

    #[test]
    fn test_duplicate_department_leaves_store_unchanged() {
        let mut store = RecordStore::new();
        store
            .add(Department::new("CS", "Computer Science", "CS Department"))
            .unwrap();
        let err = store
            .add(Department::new("CS", "Cognitive Science", "Other"))
            .unwrap_err();
        assert_eq!(err, RecordsError::duplicate(EntityKind::Department, "CS"));
        assert_eq!(store.count::<Department>(), 1);
        assert_eq!(
            store.get_by_id::<Department>("CS").unwrap().name(),
            "Computer Science"
        );
    }

    #[test]
    fn test_course_links_to_department() {
        let mut store = store_with_math();
        let math = store.get_by_id::<Department>("MATH").unwrap().clone();
        store
            .add(Course::new("MATH1211", "Calculus", "Limits", &math))
            .unwrap();

        let math = store.get_by_id::<Department>("MATH").unwrap();
        assert_eq!(math.course_ids(), ["MATH1211".to_string()]);
        let course = store.get_by_id::<Course>("MATH1211").unwrap();
        assert_eq!(course.department_id(), "MATH");
    }

    #[test]
    fn test_course_with_unknown_department_is_rejected_before_mutation() {
        let mut store = store_with_math();
        let ghost = Department::new("PHYS", "Physics", "Not stored");
        let err = store
            .add(Course::new("PHYS1101", "Mechanics", "Motion", &ghost))
            .unwrap_err();
        assert_eq!(err, RecordsError::not_found(EntityKind::Department, "PHYS"));
        assert_eq!(store.count::<Course>(), 0);
        assert!(
            store
                .get_by_id::<Department>("MATH")
                .unwrap()
                .course_ids()
                .is_empty()
        );
    }

    #[test]
    fn test_duplicate_course_does_not_double_link() {
        let mut store = store_with_math();
        let math = store.get_by_id::<Department>("MATH").unwrap().clone();
        store
            .add(Course::new("MATH1211", "Calculus", "Limits", &math))
            .unwrap();
        assert!(
            store
                .add(Course::new("MATH1211", "Calculus II", "Series", &math))
                .is_err()
        );
        assert_eq!(
            store.get_by_id::<Department>("MATH").unwrap().course_ids().len(),
            1
        );
    }

    #[test]
    fn test_professor_ids_are_monotonic_and_independent() {
        let mut store = store_with_math();
        let math = store.get_by_id::<Department>("MATH").unwrap().clone();
        let p1 = store.next_professor_id().unwrap();
        let p2 = store.next_professor_id().unwrap();
        let s1 = store.next_student_id().unwrap();
        assert_eq!((p1, p2, s1), (1, 2, 1));

        store
            .add(Professor::new(p1, "Bob Green", date(1985, 8, 25), &math))
            .unwrap();
        store
            .add(Student::new(s1, "Ada", date(2001, 1, 1)))
            .unwrap();
        assert!(store.get_by_id::<Professor>("1").is_some());
        assert!(store.get_by_id::<Student>("1").is_some());
        assert!(store.get_by_id::<Student>("one").is_none());
        assert_eq!(
            store.get_by_id::<Department>("MATH").unwrap().professor_ids(),
            [1]
        );
    }

    #[test]
    fn test_enroll_and_lookup_by_composite_id() {
        let mut store = store_with_math();
        let id = seed_enrollment(&mut store);
        assert_eq!(id, "1_MATH1211");

        let enrollment = store.enrollment("1_MATH1211").unwrap();
        assert_eq!(enrollment.professor_id(), 1);
        assert_eq!(store.enrollment_name(enrollment), "Ada Lovelace enroll Calculus");
        assert_eq!(store.enrollments().count(), 1);
        assert_eq!(store.course_enrollments("MATH1211").count(), 1);
        assert!(store.enrollment("1_NOPE").is_none());
        assert!(store.enrollment("garbage").is_none());
    }

    #[test]
    fn test_enroll_rejects_missing_and_unknown_references() {
        let mut store = store_with_math();
        seed_enrollment(&mut store);
        let today = date(2024, 9, 1);

        assert!(matches!(
            store.enroll("", "MATH1211", "1", today),
            Err(RecordsError::InvalidArgument(_))
        ));
        assert_eq!(
            store.enroll("9", "MATH1211", "1", today),
            Err(RecordsError::not_found(EntityKind::Student, "9"))
        );
        assert_eq!(
            store.enroll("1", "MATH9999", "1", today),
            Err(RecordsError::not_found(EntityKind::Course, "MATH9999"))
        );
        assert_eq!(
            store.enroll("1", "MATH1211", "4", today),
            Err(RecordsError::not_found(EntityKind::Professor, "4"))
        );
        assert!(matches!(
            store.enroll("1", "MATH1211", "1", today),
            Err(RecordsError::IllegalState(_))
        ));
    }

    #[test]
    fn test_set_grade_scale_through_store() {
        let mut store = store_with_math();
        seed_enrollment(&mut store);
        assert_eq!(
            store.set_grade_scale(" 1", "MATH1211", 95.7).unwrap(),
            "1_MATH1211"
        );
        let student = store.get_by_id::<Student>("1").unwrap();
        assert_eq!(student.gpa(), 4.0);

        assert_eq!(
            store.set_grade_scale("1", "CS1101", 80.0),
            Err(RecordsError::not_found(EntityKind::Course, "CS1101"))
        );
    }

    #[test]
    fn test_remove_student_drops_enrollments() {
        let mut store = store_with_math();
        seed_enrollment(&mut store);

        assert!(store.remove_student("1"));
        assert!(store.get_by_id::<Student>("1").is_none());
        assert!(store.get_all::<Student>().is_empty());
        assert_eq!(store.enrollments().count(), 0);
        assert!(!store.remove_student("1"));
    }

    #[test]
    fn test_explicit_ids_advance_sequences() {
        let mut store = RecordStore::new();
        store
            .add(Student::new(5, "Imported", date(2000, 1, 1)))
            .unwrap();
        assert_eq!(store.next_student_id(), Ok(6));
    }

    #[test]
    fn test_exhausted_student_ids_are_an_error() {
        let mut store = RecordStore::new();
        store
            .add(Student::new(u32::MAX, "Last", date(2000, 1, 1)))
            .unwrap();
        assert!(matches!(
            store.next_student_id(),
            Err(RecordsError::IllegalState(_))
        ));
        assert_eq!(store.next_professor_id(), Ok(1));
    }

    #[test]
    fn test_lookup_trims_and_requires_canonical_numbers() {
        let mut store = store_with_math();
        store
            .add(Student::new(1, "Ada", date(2001, 1, 1)))
            .unwrap();

        assert!(store.get_by_id::<Student>("1").is_some());
        assert!(store.get_by_id::<Student>(" 1 ").is_some());
        assert!(store.get_by_id::<Student>("01").is_none());
        assert!(store.get_by_id::<Student>("+1").is_none());
        assert!(store.get_by_id::<Student>("").is_none());

        assert!(store.get_by_id::<Department>(" MATH ").is_some());
        assert!(store.get_by_id::<Department>("math").is_none());
        assert!(store.get_by_id::<Department>("  ").is_none());
    }
}
