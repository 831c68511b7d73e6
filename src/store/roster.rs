//! Roster reads: people and their vacation ranges.
//!
//! People and vacations are owned by external user/vacation management; the
//! engine reads them and only ever writes the denormalized `last_chosen`
//! cache (through the history recorder). The insert methods here exist for
//! that management tooling and for test fixtures.

use chrono::NaiveDate;
use rusqlite::{OptionalExtension, Row, params};

use crate::error::EngineResult;
use crate::models::{Person, VacationRange, WeekdayMask};

use super::db::{Database, parse_date, parse_optional_date};

fn row_to_person(row: &Row) -> rusqlite::Result<(i64, String, String, Option<String>)> {
    Ok((
        row.get("id")?,
        row.get("mail")?,
        row.get("weekdays")?,
        row.get("last_chosen")?,
    ))
}

fn build_person(raw: (i64, String, String, Option<String>)) -> EngineResult<Person> {
    let (id, mail, weekdays, last_chosen) = raw;
    Ok(Person {
        id,
        mail,
        weekdays: WeekdayMask::from_digits(&weekdays),
        last_chosen: parse_optional_date(last_chosen, "last_chosen")?,
    })
}

impl Database {
    /// Returns all people, ordered by id.
    pub fn people(&self) -> EngineResult<Vec<Person>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, mail, weekdays, last_chosen FROM person ORDER BY id")?;
        let rows = stmt.query_map([], row_to_person)?;

        let mut people = Vec::new();
        for row in rows {
            people.push(build_person(row?)?);
        }
        Ok(people)
    }

    /// Returns the person with the given id, if present.
    pub fn person(&self, id: i64) -> EngineResult<Option<Person>> {
        let raw = self
            .conn
            .query_row(
                "SELECT id, mail, weekdays, last_chosen FROM person WHERE id = ?1",
                params![id],
                row_to_person,
            )
            .optional()?;
        raw.map(build_person).transpose()
    }

    /// Returns all vacation ranges that cover `date`.
    pub fn vacations_covering(&self, date: NaiveDate) -> EngineResult<Vec<VacationRange>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, person_id, start_date, end_date
             FROM vacation
             WHERE ?1 BETWEEN start_date AND end_date",
        )?;
        let rows = stmt.query_map(params![date.to_string()], |row| {
            Ok((
                row.get::<_, i64>("id")?,
                row.get::<_, i64>("person_id")?,
                row.get::<_, String>("start_date")?,
                row.get::<_, String>("end_date")?,
            ))
        })?;

        let mut ranges = Vec::new();
        for row in rows {
            let (id, person_id, start, end) = row?;
            ranges.push(VacationRange {
                id,
                person_id,
                start_date: parse_date(&start, "start_date")?,
                end_date: parse_date(&end, "end_date")?,
            });
        }
        Ok(ranges)
    }

    /// Inserts a person and returns the new row id.
    pub fn insert_person(
        &self,
        mail: &str,
        weekdays: WeekdayMask,
        last_chosen: Option<NaiveDate>,
    ) -> EngineResult<i64> {
        self.conn.execute(
            "INSERT INTO person (mail, weekdays, last_chosen) VALUES (?1, ?2, ?3)",
            params![
                mail,
                weekdays.to_digits(),
                last_chosen.map(|d| d.to_string())
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Inserts a vacation range and returns the new row id.
    pub fn insert_vacation(
        &self,
        person_id: i64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> EngineResult<i64> {
        self.conn.execute(
            "INSERT INTO vacation (person_id, start_date, end_date) VALUES (?1, ?2, ?3)",
            params![person_id, start_date.to_string(), end_date.to_string()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }
}
