use anyhow::{anyhow, Context};
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::db;

#[derive(Debug, Clone)]
pub struct Student {
    pub name: String,
    pub roll_no: String,
    pub age: i64,
    pub course: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Absent,
}

impl AttendanceStatus {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Present" => Some(Self::Present),
            "Absent" => Some(Self::Absent),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Present => "Present",
            Self::Absent => "Absent",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AttendanceRecord {
    pub date: String,
    pub status: AttendanceStatus,
}

#[derive(Debug, Clone)]
pub struct ComplaintRecord {
    pub complaint: String,
}

#[derive(Debug, Clone)]
pub struct RemarkRecord {
    pub remarks: String,
}

/// Handle over the four roll-number-keyed collections.
///
/// Constructed once at startup from the credential blob and held by the
/// dispatch state; every operation is a single statement against the
/// backing database. Writes are whole-record overwrites, reads return
/// `None` for absent keys.
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(data_dir: &Path) -> anyhow::Result<Self> {
        let conn = db::open_db(data_dir)
            .with_context(|| format!("failed to open database in {}", data_dir.display()))?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn put_student(&self, student: &Student) -> anyhow::Result<()> {
        self.conn.execute(
            "INSERT INTO students(roll_no, name, age, course)
             VALUES(?, ?, ?, ?)
             ON CONFLICT(roll_no) DO UPDATE SET
               name = excluded.name,
               age = excluded.age,
               course = excluded.course",
            (
                &student.roll_no,
                &student.name,
                student.age,
                &student.course,
            ),
        )?;
        Ok(())
    }

    /// Order is not part of the contract; roll-number order keeps list
    /// responses and exports deterministic.
    pub fn list_students(&self) -> anyhow::Result<Vec<Student>> {
        let mut stmt = self
            .conn
            .prepare("SELECT roll_no, name, age, course FROM students ORDER BY roll_no")?;
        let students = stmt
            .query_map([], |r| {
                Ok(Student {
                    roll_no: r.get(0)?,
                    name: r.get(1)?,
                    age: r.get(2)?,
                    course: r.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(students)
    }

    /// Removes the student record; absent keys are a no-op.
    pub fn delete_student(&self, roll_no: &str) -> anyhow::Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM students WHERE roll_no = ?", [roll_no])?;
        Ok(changed > 0)
    }

    pub fn put_attendance(&self, roll_no: &str, record: &AttendanceRecord) -> anyhow::Result<()> {
        self.conn.execute(
            "INSERT INTO attendance(roll_no, date, status)
             VALUES(?, ?, ?)
             ON CONFLICT(roll_no) DO UPDATE SET
               date = excluded.date,
               status = excluded.status",
            (roll_no, &record.date, record.status.as_str()),
        )?;
        Ok(())
    }

    pub fn get_attendance(&self, roll_no: &str) -> anyhow::Result<Option<AttendanceRecord>> {
        let row = self
            .conn
            .query_row(
                "SELECT date, status FROM attendance WHERE roll_no = ?",
                [roll_no],
                |r| Ok((r.get::<_, String>(0)?, r.get::<_, String>(1)?)),
            )
            .optional()?;
        let Some((date, status)) = row else {
            return Ok(None);
        };
        let status = AttendanceStatus::parse(&status)
            .ok_or_else(|| anyhow!("unrecognized attendance status: {}", status))?;
        Ok(Some(AttendanceRecord { date, status }))
    }

    pub fn put_complaint(&self, roll_no: &str, record: &ComplaintRecord) -> anyhow::Result<()> {
        self.conn.execute(
            "INSERT INTO complaints(roll_no, complaint)
             VALUES(?, ?)
             ON CONFLICT(roll_no) DO UPDATE SET
               complaint = excluded.complaint",
            (roll_no, &record.complaint),
        )?;
        Ok(())
    }

    pub fn get_complaint(&self, roll_no: &str) -> anyhow::Result<Option<ComplaintRecord>> {
        let complaint = self
            .conn
            .query_row(
                "SELECT complaint FROM complaints WHERE roll_no = ?",
                [roll_no],
                |r| r.get::<_, String>(0),
            )
            .optional()?;
        Ok(complaint.map(|complaint| ComplaintRecord { complaint }))
    }

    pub fn put_remark(&self, roll_no: &str, record: &RemarkRecord) -> anyhow::Result<()> {
        self.conn.execute(
            "INSERT INTO remarks(roll_no, remarks)
             VALUES(?, ?)
             ON CONFLICT(roll_no) DO UPDATE SET
               remarks = excluded.remarks",
            (roll_no, &record.remarks),
        )?;
        Ok(())
    }

    pub fn get_remark(&self, roll_no: &str) -> anyhow::Result<Option<RemarkRecord>> {
        let remarks = self
            .conn
            .query_row(
                "SELECT remarks FROM remarks WHERE roll_no = ?",
                [roll_no],
                |r| r.get::<_, String>(0),
            )
            .optional()?;
        Ok(remarks.map(|remarks| RemarkRecord { remarks }))
    }
}
