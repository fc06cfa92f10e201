//! Internal Diesel row structs for database operations.
//!
//! These types never leave the persistence layer; repositories convert them
//! into domain or port types before returning.

use diesel::prelude::*;

use crate::domain::ports::StudentRecord;
use crate::domain::{User, UserAccount, UniversitySummary};

use super::schema::{students, universities, users};

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = universities)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UniversityRow {
    pub id: i64,
    pub name: String,
    pub location: String,
}

impl From<UniversityRow> for UniversitySummary {
    fn from(row: UniversityRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            location: row.location,
        }
    }
}

/// Insertable and changeset form of a university.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = universities)]
pub(crate) struct UniversityValues<'a> {
    pub name: &'a str,
    pub location: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = students)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct StudentRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub university_id: i64,
}

impl From<StudentRow> for StudentRecord {
    fn from(row: StudentRow) -> Self {
        Self {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            university_id: row.university_id,
        }
    }
}

/// Insertable and changeset form of a student; updates overwrite every column.
#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = students)]
pub(crate) struct StudentValues<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub university_id: i64,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl From<UserRow> for UserAccount {
    fn from(row: UserRow) -> Self {
        Self {
            user: User {
                id: row.id,
                username: row.username,
                email: row.email,
                first_name: row.first_name,
                last_name: row.last_name,
            },
            password_hash: row.password_hash,
        }
    }
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub first_name: Option<&'a str>,
    pub last_name: Option<&'a str>,
}
