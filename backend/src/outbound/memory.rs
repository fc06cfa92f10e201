//! In-memory repositories used when no database URL is configured, and by
//! integration tests.
//!
//! Each repository keeps its rows in a `BTreeMap` keyed by a monotonically
//! increasing id, so listing order matches insertion order like the
//! `BIGSERIAL` columns they stand in for.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{
    StudentRecord, StudentRepository, StudentRepositoryError, UniversityRepository,
    UniversityRepositoryError, UserRepository, UserRepositoryError,
};
use crate::domain::{NewStudent, NewUniversity, NewUser, User, UserAccount, UniversitySummary};

#[derive(Debug)]
struct Table<T> {
    next_id: i64,
    rows: BTreeMap<i64, T>,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

impl<T> Table<T> {
    fn allocate(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn lock<'a, T, E>(
    table: &'a Mutex<Table<T>>,
    poisoned: impl FnOnce(&'static str) -> E,
) -> Result<MutexGuard<'a, Table<T>>, E> {
    table
        .lock()
        .map_err(|_| poisoned("in-memory table lock poisoned"))
}

fn contains_ignoring_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Student rows held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryStudentRepository {
    table: Mutex<Table<StudentRecord>>,
}

impl InMemoryStudentRepository {
    fn table(&self) -> Result<MutexGuard<'_, Table<StudentRecord>>, StudentRepositoryError> {
        lock(&self.table, StudentRepositoryError::query)
    }
}

fn email_taken(table: &Table<StudentRecord>, email: &str, except: Option<i64>) -> bool {
    table
        .rows
        .values()
        .any(|row| row.email == email && Some(row.id) != except)
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn list(&self) -> Result<Vec<StudentRecord>, StudentRepositoryError> {
        Ok(self.table()?.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<StudentRecord>, StudentRepositoryError> {
        Ok(self.table()?.rows.get(&id).cloned())
    }

    async fn list_by_university(
        &self,
        university_id: i64,
    ) -> Result<Vec<StudentRecord>, StudentRepositoryError> {
        Ok(self
            .table()?
            .rows
            .values()
            .filter(|row| row.university_id == university_id)
            .cloned()
            .collect())
    }

    async fn search(&self, fragment: &str) -> Result<Vec<StudentRecord>, StudentRepositoryError> {
        let needle = fragment.to_lowercase();
        Ok(self
            .table()?
            .rows
            .values()
            .filter(|row| {
                contains_ignoring_case(&row.first_name, &needle)
                    || contains_ignoring_case(&row.last_name, &needle)
                    || contains_ignoring_case(&row.email, &needle)
            })
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, StudentRepositoryError> {
        let len = self.table()?.rows.len();
        Ok(i64::try_from(len).unwrap_or(i64::MAX))
    }

    async fn insert(&self, student: &NewStudent) -> Result<StudentRecord, StudentRepositoryError> {
        let mut table = self.table()?;
        if email_taken(&table, student.email(), None) {
            return Err(StudentRepositoryError::duplicate_email(student.email()));
        }
        let record = StudentRecord {
            id: table.allocate(),
            first_name: student.first_name().to_owned(),
            last_name: student.last_name().to_owned(),
            email: student.email().to_owned(),
            university_id: student.university_id(),
        };
        table.rows.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: i64,
        student: &NewStudent,
    ) -> Result<Option<StudentRecord>, StudentRepositoryError> {
        let mut table = self.table()?;
        if email_taken(&table, student.email(), Some(id)) {
            return Err(StudentRepositoryError::duplicate_email(student.email()));
        }
        let Some(row) = table.rows.get_mut(&id) else {
            return Ok(None);
        };
        row.first_name = student.first_name().to_owned();
        row.last_name = student.last_name().to_owned();
        row.email = student.email().to_owned();
        row.university_id = student.university_id();
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: i64) -> Result<bool, StudentRepositoryError> {
        Ok(self.table()?.rows.remove(&id).is_some())
    }

    async fn delete_by_university(
        &self,
        university_id: i64,
    ) -> Result<u64, StudentRepositoryError> {
        let mut table = self.table()?;
        let before = table.rows.len();
        table.rows.retain(|_, row| row.university_id != university_id);
        Ok(u64::try_from(before - table.rows.len()).unwrap_or(u64::MAX))
    }
}

/// University rows held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUniversityRepository {
    table: Mutex<Table<UniversitySummary>>,
}

impl InMemoryUniversityRepository {
    fn table(
        &self,
    ) -> Result<MutexGuard<'_, Table<UniversitySummary>>, UniversityRepositoryError> {
        lock(&self.table, UniversityRepositoryError::query)
    }
}

#[async_trait]
impl UniversityRepository for InMemoryUniversityRepository {
    async fn list(&self) -> Result<Vec<UniversitySummary>, UniversityRepositoryError> {
        Ok(self.table()?.rows.values().cloned().collect())
    }

    async fn find_by_id(
        &self,
        id: i64,
    ) -> Result<Option<UniversitySummary>, UniversityRepositoryError> {
        Ok(self.table()?.rows.get(&id).cloned())
    }

    async fn find_by_ids(
        &self,
        ids: &[i64],
    ) -> Result<Vec<UniversitySummary>, UniversityRepositoryError> {
        let table = self.table()?;
        Ok(ids
            .iter()
            .filter_map(|id| table.rows.get(id).cloned())
            .collect())
    }

    async fn search_by_name(
        &self,
        fragment: &str,
    ) -> Result<Vec<UniversitySummary>, UniversityRepositoryError> {
        let needle = fragment.to_lowercase();
        Ok(self
            .table()?
            .rows
            .values()
            .filter(|row| contains_ignoring_case(&row.name, &needle))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, UniversityRepositoryError> {
        let len = self.table()?.rows.len();
        Ok(i64::try_from(len).unwrap_or(i64::MAX))
    }

    async fn insert(
        &self,
        university: &NewUniversity,
    ) -> Result<UniversitySummary, UniversityRepositoryError> {
        let mut table = self.table()?;
        let row = UniversitySummary {
            id: table.allocate(),
            name: university.name().to_owned(),
            location: university.location().to_owned(),
        };
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        university: &UniversitySummary,
    ) -> Result<bool, UniversityRepositoryError> {
        let mut table = self.table()?;
        match table.rows.get_mut(&university.id) {
            Some(row) => {
                row.clone_from(university);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: i64) -> Result<bool, UniversityRepositoryError> {
        Ok(self.table()?.rows.remove(&id).is_some())
    }
}

/// User accounts held in process memory.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    table: Mutex<Table<UserAccount>>,
}

impl InMemoryUserRepository {
    fn table(&self) -> Result<MutexGuard<'_, Table<UserAccount>>, UserRepositoryError> {
        lock(&self.table, UserRepositoryError::query)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserAccount>, UserRepositoryError> {
        Ok(self
            .table()?
            .rows
            .values()
            .find(|account| account.user.username == username)
            .cloned())
    }

    async fn username_exists(&self, username: &str) -> Result<bool, UserRepositoryError> {
        Ok(self
            .table()?
            .rows
            .values()
            .any(|account| account.user.username == username))
    }

    async fn email_exists(&self, email: &str) -> Result<bool, UserRepositoryError> {
        Ok(self
            .table()?
            .rows
            .values()
            .any(|account| account.user.email == email))
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserRepositoryError> {
        let mut table = self.table()?;
        for account in table.rows.values() {
            if account.user.username == user.username {
                return Err(UserRepositoryError::duplicate("username"));
            }
            if account.user.email == user.email {
                return Err(UserRepositoryError::duplicate("email"));
            }
        }
        let account = UserAccount {
            user: User {
                id: table.allocate(),
                username: user.username.clone(),
                email: user.email.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
            },
            password_hash: user.password_hash.clone(),
        };
        let public = account.user.clone();
        table.rows.insert(public.id, account);
        Ok(public)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn students() -> InMemoryStudentRepository {
        InMemoryStudentRepository::default()
    }

    fn draft(first: &str, last: &str, university_id: i64) -> NewStudent {
        let email = format!("{}.{}@philosophe.edu", first.to_lowercase(), last.to_lowercase());
        NewStudent::try_new(first, last, &email, university_id).expect("valid draft")
    }

    #[rstest]
    #[tokio::test]
    async fn ids_are_fresh_and_increasing(students: InMemoryStudentRepository) {
        let first = students.insert(&draft("John", "Smith", 1)).await.expect("insert");
        let second = students.insert(&draft("Jane", "Doe", 1)).await.expect("insert");
        assert!(second.id > first.id);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(students: InMemoryStudentRepository) {
        students.insert(&draft("John", "Smith", 1)).await.expect("insert");
        let err = students
            .insert(&draft("John", "Smith", 2))
            .await
            .expect_err("duplicate");
        assert_eq!(
            err,
            StudentRepositoryError::duplicate_email("john.smith@philosophe.edu")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn update_may_keep_its_own_email(students: InMemoryStudentRepository) {
        let stored = students.insert(&draft("John", "Smith", 1)).await.expect("insert");
        let updated = students
            .update(stored.id, &draft("John", "Smith", 3))
            .await
            .expect("update")
            .expect("row exists");
        assert_eq!(updated.university_id, 3);
    }

    #[rstest]
    #[case("mar", 1)]
    #[case("MAR", 1)]
    #[case("philosophe", 2)]
    #[case("%", 0)]
    #[tokio::test]
    async fn search_matches_names_and_email_ignoring_case(
        students: InMemoryStudentRepository,
        #[case] query: &str,
        #[case] expected: usize,
    ) {
        students.insert(&draft("Emily", "Martinez", 4)).await.expect("insert");
        students.insert(&draft("James", "Garcia", 3)).await.expect("insert");
        let found = students.search(query).await.expect("search");
        assert_eq!(found.len(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn delete_by_university_reports_count(students: InMemoryStudentRepository) {
        students.insert(&draft("John", "Smith", 1)).await.expect("insert");
        students.insert(&draft("David", "Miller", 1)).await.expect("insert");
        students.insert(&draft("Jane", "Doe", 2)).await.expect("insert");

        let removed = students.delete_by_university(1).await.expect("delete");
        assert_eq!(removed, 2);
        assert_eq!(students.count().await.expect("count"), 1);
    }

    #[tokio::test]
    async fn users_reject_duplicate_email() {
        let users = InMemoryUserRepository::default();
        let new_user = |username: &str| NewUser {
            username: username.to_owned(),
            email: "ada@example.org".to_owned(),
            password_hash: "hash".to_owned(),
            first_name: None,
            last_name: None,
        };
        users.insert(&new_user("ada")).await.expect("insert");
        let err = users.insert(&new_user("lovelace")).await.expect_err("duplicate");
        assert_eq!(err, UserRepositoryError::duplicate("email"));
    }
}
