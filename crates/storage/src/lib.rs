use anyhow::{Context, Result};
use shared::{
    domain::{EmployeeRecord, RecordId},
    protocol::{EmployeeUpdate, NewEmployee},
};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow},
    Pool, Row, Sqlite,
};
use std::{
    fs,
    path::{Path, PathBuf},
    str::FromStr,
};

/// Every connection to `sqlite::memory:` opens its own empty database, so a
/// memory pool pins exactly one connection for its whole life.
fn pool_options(database_url: &str) -> SqlitePoolOptions {
    if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    }
}

const EMPLOYEE_COLUMNS: &str = "id, employee_id, name, department, designation, primary_skill, \
     secondary_skill, skill_rating, years_of_experience, email";

#[derive(Clone)]
pub struct Storage {
    pool: Pool<Sqlite>,
}

impl Storage {
    pub async fn new(database_url: &str) -> Result<Self> {
        ensure_sqlite_parent_dir_exists(database_url)?;

        let connect_options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = pool_options(database_url)
            .connect_with(connect_options)
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    pub async fn health_check(&self) -> Result<()> {
        let _: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .context("sqlite ping failed")?;
        Ok(())
    }

    pub async fn list_employees(&self) -> Result<Vec<EmployeeRecord>> {
        let rows = sqlx::query(&format!("SELECT {EMPLOYEE_COLUMNS} FROM employee ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .context("failed to list employees")?;
        rows.iter().map(employee_from_row).collect()
    }

    /// First record whose business key matches exactly.
    pub async fn find_by_employee_id(&self, employee_id: &str) -> Result<Option<EmployeeRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE employee_id = ? ORDER BY id LIMIT 1"
        ))
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await
        .context("failed to search employee")?;
        row.as_ref().map(employee_from_row).transpose()
    }

    pub async fn get_employee(&self, id: RecordId) -> Result<Option<EmployeeRecord>> {
        let row = sqlx::query(&format!("SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE id = ?"))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("failed to load employee {id}"))?;
        row.as_ref().map(employee_from_row).transpose()
    }

    pub async fn insert_employee(&self, employee: &NewEmployee) -> Result<EmployeeRecord> {
        let rec = sqlx::query(
            "INSERT INTO employee (employee_id, name, department, designation, primary_skill,
                                   secondary_skill, skill_rating, years_of_experience, email)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING id",
        )
        .bind(&employee.employee_id)
        .bind(&employee.name)
        .bind(&employee.department)
        .bind(&employee.designation)
        .bind(&employee.primary_skill)
        .bind(&employee.secondary_skill)
        .bind(i64::from(employee.skill_rating))
        .bind(i64::from(employee.years_of_experience))
        .bind(&employee.email)
        .fetch_one(&self.pool)
        .await
        .context("failed to insert employee")?;
        let id = RecordId(rec.get::<i64, _>(0));
        tracing::debug!(record_id = id.0, employee_id = %employee.employee_id, "employee stored");
        Ok(employee.clone().into_record(id))
    }

    /// Returns `None` when no record has `id`.
    pub async fn update_employee(
        &self,
        id: RecordId,
        update: &EmployeeUpdate,
    ) -> Result<Option<EmployeeRecord>> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(&format!("SELECT {EMPLOYEE_COLUMNS} FROM employee WHERE id = ?"))
            .bind(id.0)
            .fetch_optional(&mut *tx)
            .await
            .with_context(|| format!("failed to load employee {id}"))?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut record = employee_from_row(&row)?;
        update.apply_to(&mut record);

        sqlx::query(
            "UPDATE employee
             SET employee_id = ?, name = ?, department = ?, designation = ?, primary_skill = ?,
                 secondary_skill = ?, skill_rating = ?, years_of_experience = ?, email = ?
             WHERE id = ?",
        )
        .bind(&record.employee_id)
        .bind(&record.name)
        .bind(&record.department)
        .bind(&record.designation)
        .bind(&record.primary_skill)
        .bind(&record.secondary_skill)
        .bind(i64::from(record.skill_rating))
        .bind(i64::from(record.years_of_experience))
        .bind(&record.email)
        .bind(id.0)
        .execute(&mut *tx)
        .await
        .with_context(|| format!("failed to update employee {id}"))?;
        tx.commit().await?;

        Ok(Some(record))
    }

    /// Returns `false` when no record has `id`.
    pub async fn delete_employee(&self, id: RecordId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM employee WHERE id = ?")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .with_context(|| format!("failed to delete employee {id}"))?;
        Ok(result.rows_affected() > 0)
    }
}

fn employee_from_row(row: &SqliteRow) -> Result<EmployeeRecord> {
    let skill_rating: i64 = row.try_get("skill_rating")?;
    let years_of_experience: i64 = row.try_get("years_of_experience")?;
    Ok(EmployeeRecord {
        id: RecordId(row.try_get("id")?),
        employee_id: row.try_get("employee_id")?,
        name: row.try_get("name")?,
        department: row.try_get("department")?,
        designation: row.try_get("designation")?,
        primary_skill: row.try_get("primary_skill")?,
        secondary_skill: row.try_get("secondary_skill")?,
        skill_rating: u8::try_from(skill_rating)
            .with_context(|| format!("stored skill_rating out of range: {skill_rating}"))?,
        years_of_experience: u32::try_from(years_of_experience).with_context(|| {
            format!("stored years_of_experience out of range: {years_of_experience}")
        })?,
        email: row.try_get("email")?,
    })
}

fn ensure_sqlite_parent_dir_exists(database_url: &str) -> Result<()> {
    let Some(path) = sqlite_path(database_url) else {
        return Ok(());
    };

    let Some(parent) = path.parent() else {
        return Ok(());
    };

    fs::create_dir_all(parent).with_context(|| {
        format!(
            "failed to create parent directory '{}' for database url '{database_url}'",
            parent.display()
        )
    })?;

    Ok(())
}

fn sqlite_path(database_url: &str) -> Option<PathBuf> {
    if database_url.contains(":memory:") || !database_url.starts_with("sqlite:") {
        return None;
    }

    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:")
        .split('?')
        .next()
        .unwrap_or_default();

    if path.is_empty() {
        return None;
    }

    Some(Path::new(path).to_path_buf())
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
