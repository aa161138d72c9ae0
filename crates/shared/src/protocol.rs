use serde::{Deserialize, Serialize};

use crate::domain::{EmployeeRecord, RecordId};

/// Create payload: an employee record without the server-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub primary_skill: String,
    #[serde(default)]
    pub secondary_skill: String,
    pub skill_rating: u8,
    pub years_of_experience: u32,
    pub email: String,
}

impl NewEmployee {
    pub fn into_record(self, id: RecordId) -> EmployeeRecord {
        EmployeeRecord {
            id,
            employee_id: self.employee_id,
            name: self.name,
            department: self.department,
            designation: self.designation,
            primary_skill: self.primary_skill,
            secondary_skill: self.secondary_skill,
            skill_rating: self.skill_rating,
            years_of_experience: self.years_of_experience,
            email: self.email,
        }
    }
}

/// Partial update payload. Absent fields are left untouched by the server,
/// and so are empty strings and zero numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_skill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_skill: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub years_of_experience: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl EmployeeUpdate {
    /// Applies the update the way the backend does: empty strings and zero
    /// numbers never overwrite a stored value.
    pub fn apply_to(&self, record: &mut EmployeeRecord) {
        fn apply_text(target: &mut String, value: &Option<String>) {
            if let Some(value) = value.as_deref().filter(|v| !v.is_empty()) {
                *target = value.to_string();
            }
        }

        apply_text(&mut record.employee_id, &self.employee_id);
        apply_text(&mut record.name, &self.name);
        apply_text(&mut record.department, &self.department);
        apply_text(&mut record.designation, &self.designation);
        apply_text(&mut record.primary_skill, &self.primary_skill);
        apply_text(&mut record.secondary_skill, &self.secondary_skill);
        apply_text(&mut record.email, &self.email);
        if let Some(rating) = self.skill_rating.filter(|v| *v != 0) {
            record.skill_rating = rating;
        }
        if let Some(years) = self.years_of_experience.filter(|v| *v != 0) {
            record.years_of_experience = years;
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
