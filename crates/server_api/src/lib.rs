use shared::{
    domain::{EmployeeRecord, RecordId, MAX_SKILL_RATING, MIN_SKILL_RATING},
    error::ApiError,
    protocol::{EmployeeUpdate, NewEmployee},
};
use storage::Storage;

#[derive(Clone)]
pub struct ApiContext {
    pub storage: Storage,
}

pub fn employees_route() -> &'static str {
    "/employees"
}

pub async fn list_employees(ctx: &ApiContext) -> Result<Vec<EmployeeRecord>, ApiError> {
    ctx.storage.list_employees().await.map_err(internal)
}

pub async fn search_employee(
    ctx: &ApiContext,
    employee_id: &str,
) -> Result<EmployeeRecord, ApiError> {
    ctx.storage
        .find_by_employee_id(employee_id)
        .await
        .map_err(internal)?
        .ok_or_else(|| ApiError::not_found(format!("employee '{employee_id}' not found")))
}

pub async fn create_employee(
    ctx: &ApiContext,
    employee: NewEmployee,
) -> Result<EmployeeRecord, ApiError> {
    validate_new_employee(&employee)?;
    let record = ctx
        .storage
        .insert_employee(&employee)
        .await
        .map_err(internal)?;
    tracing::info!(record_id = record.id.0, employee_id = %record.employee_id, "employee created");
    Ok(record)
}

pub async fn update_employee(
    ctx: &ApiContext,
    id: RecordId,
    update: EmployeeUpdate,
) -> Result<EmployeeRecord, ApiError> {
    if let Some(rating) = update.skill_rating.filter(|r| *r != 0) {
        ensure_rating_in_range(rating)?;
    }
    let record = ctx
        .storage
        .update_employee(id, &update)
        .await
        .map_err(internal)?
        .ok_or_else(|| record_not_found(id))?;
    tracing::info!(record_id = id.0, "employee updated");
    Ok(record)
}

pub async fn delete_employee(ctx: &ApiContext, id: RecordId) -> Result<(), ApiError> {
    if !ctx.storage.delete_employee(id).await.map_err(internal)? {
        return Err(record_not_found(id));
    }
    tracing::info!(record_id = id.0, "employee deleted");
    Ok(())
}

fn validate_new_employee(employee: &NewEmployee) -> Result<(), ApiError> {
    let required = [
        ("employeeId", &employee.employee_id),
        ("name", &employee.name),
        ("department", &employee.department),
        ("designation", &employee.designation),
        ("primarySkill", &employee.primary_skill),
        ("email", &employee.email),
    ];
    if let Some((field, _)) = required.iter().find(|(_, value)| value.trim().is_empty()) {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    ensure_rating_in_range(employee.skill_rating)
}

fn ensure_rating_in_range(rating: u8) -> Result<(), ApiError> {
    if (MIN_SKILL_RATING..=MAX_SKILL_RATING).contains(&rating) {
        Ok(())
    } else {
        Err(ApiError::validation(format!(
            "skillRating must be between {MIN_SKILL_RATING} and {MAX_SKILL_RATING}"
        )))
    }
}

fn record_not_found(id: RecordId) -> ApiError {
    ApiError::not_found(format!("employee record {id} not found"))
}

fn internal(err: anyhow::Error) -> ApiError {
    ApiError::internal(err.to_string())
}
