//! Batch driver. Decodes commands and drives the manager contract for any kind.
//!
//! - Blank lines are skipped; every other line yields exactly one report
//! - A rejected command is reported and processing continues unless `stop_on_error`

use super::command::{self, Command, FieldSpec, Payload, Report};
use crate::domain::{Detail, EntityKind, Identified, RecordsError, Student};
use crate::ports::{AnyManager, LineSink, LineSource, StudentOps};
use crate::store::RecordStore;
use crate::usecases::{self, Managers};
use tracing::{info, warn};

pub struct BatchRunner {
    store: RecordStore,
    managers: Managers,
    stop_on_error: bool,
}

impl BatchRunner {
    pub fn new(stop_on_error: bool) -> Self {
        Self {
            store: RecordStore::new(),
            managers: Managers::new(),
            stop_on_error,
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Execute one decoded command against the store.
    pub fn execute(&mut self, command: Command) -> Result<Payload, RecordsError> {
        match command {
            Command::List { kind, detailed } => {
                let manager = self.manager(&kind)?;
                Ok(Payload::Records {
                    records: manager.list(&self.store, Detail::from_flag(detailed)),
                })
            }
            Command::Find { kind, id, detailed } => {
                let manager = self.manager(&kind)?;
                Ok(Payload::Record {
                    record: manager.find(&self.store, &id, Detail::from_flag(detailed)),
                })
            }
            Command::Fields { kind, updating } => {
                let manager = self.manager(&kind)?;
                Ok(Payload::Fields {
                    fields: manager
                        .list_fields(updating)
                        .into_iter()
                        .map(FieldSpec::from)
                        .collect(),
                    relations: manager.relations().iter().map(|r| r.label()).collect(),
                })
            }
            Command::Create {
                kind,
                fields,
                related,
            } => {
                let values = command::field_values(&fields)?;
                let choices = command::relation_choices(&related)?;
                let manager = self.managers.for_kind(kind.parse()?)?;
                let id = manager.add(&mut self.store, &values, &choices)?;
                Ok(Payload::Id { id })
            }
            Command::Update { kind, id, fields } => {
                let values = command::field_values(&fields)?;
                let manager = self.managers.for_kind(kind.parse()?)?;
                manager.update(&mut self.store, &id, &values)?;
                Ok(Payload::Id { id })
            }
            Command::Enroll {
                student,
                course,
                professor,
                date,
            } => {
                let enrolled_on = match date {
                    Some(raw) => command::parse_date(&raw)?,
                    None => usecases::today(),
                };
                let ops = student_ops(&self.managers, EntityKind::Student)?;
                let id = ops.enroll(&mut self.store, &student, &course, &professor, enrolled_on)?;
                Ok(Payload::Id { id })
            }
            Command::SetGrade {
                student,
                course,
                scale,
            } => {
                let ops = student_ops(&self.managers, EntityKind::Student)?;
                let enrollment = ops.set_grade(&mut self.store, &student, &course, scale)?;
                let letter_grade = self
                    .store
                    .enrollment(&enrollment)
                    .and_then(|e| e.letter_grade());
                Ok(Payload::Graded {
                    enrollment,
                    letter_grade,
                })
            }
            Command::Delete { kind, id } => {
                let ops = student_ops(&self.managers, kind.parse()?)?;
                Ok(Payload::Removed {
                    removed: ops.delete(&mut self.store, &id),
                })
            }
            Command::Gpa { student } => {
                let ops = student_ops(&self.managers, EntityKind::Student)?;
                let missing = || RecordsError::not_found(EntityKind::Student, &student);
                let id = self
                    .store
                    .get_by_id::<Student>(&student)
                    .map(Student::id)
                    .ok_or_else(missing)?;
                let gpa = ops.gpa(&self.store, &id).ok_or_else(missing)?;
                Ok(Payload::Gpa { student: id, gpa })
            }
        }
    }

    /// Report for one input line; `None` for blank lines.
    pub fn handle_line(&mut self, line_no: usize, line: &str) -> Option<Report> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return None;
        }
        let result = Command::parse(trimmed).and_then(|cmd| self.execute(cmd));
        if let Err(ref e) = result {
            warn!(line = line_no, error = %e, "command rejected");
        }
        Some(Report::from_result(line_no, result))
    }

    /// Drain `source`, writing one report per command to `sink`.
    pub async fn run(
        &mut self,
        source: &mut dyn LineSource,
        sink: &mut dyn LineSink,
    ) -> Result<RunStats, RecordsError> {
        let mut stats = RunStats::default();
        let mut line_no = 0usize;

        while let Some(line) = source.next_line().await? {
            line_no += 1;
            let Some(report) = self.handle_line(line_no, &line) else {
                continue;
            };
            stats.commands += 1;
            if !report.ok {
                stats.failed += 1;
            }
            let json = serde_json::to_string(&report)
                .map_err(|e| RecordsError::Input(format!("encode report: {}", e)))?;
            sink.write_line(&json).await?;
            if !report.ok && self.stop_on_error {
                warn!(line = line_no, "stopping at first failed command");
                break;
            }
        }
        sink.flush().await?;

        info!(
            commands = stats.commands,
            failed = stats.failed,
            departments = self.store.count::<crate::domain::Department>(),
            students = self.store.count::<Student>(),
            "batch finished"
        );
        Ok(stats)
    }

    fn manager(&self, kind: &str) -> Result<&dyn AnyManager, RecordsError> {
        self.managers.for_kind(kind.parse()?)
    }
}

fn student_ops(managers: &Managers, kind: EntityKind) -> Result<&dyn StudentOps, RecordsError> {
    managers.for_kind(kind)?.student_ops().ok_or_else(|| {
        RecordsError::IllegalState(format!(
            "{} records do not support enroll, grade or delete",
            kind
        ))
    })
}

/// Totals for one run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    pub commands: usize,
    pub failed: usize,
}
