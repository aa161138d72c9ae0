//! Text-form model shared by the add and edit views, and its conversion into
//! typed payloads.

use std::{
    fmt,
    num::{IntErrorKind, ParseIntError},
    str::FromStr,
};

use shared::{
    domain::EmployeeRecord,
    protocol::{EmployeeUpdate, NewEmployee},
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    EmployeeId,
    Name,
    Department,
    Designation,
    PrimarySkill,
    SecondarySkill,
    SkillRating,
    YearsOfExperience,
    Email,
}

impl FormField {
    pub const ALL: [FormField; 9] = [
        FormField::EmployeeId,
        FormField::Name,
        FormField::Department,
        FormField::Designation,
        FormField::PrimarySkill,
        FormField::SecondarySkill,
        FormField::SkillRating,
        FormField::YearsOfExperience,
        FormField::Email,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::EmployeeId => "Employee ID",
            FormField::Name => "Name",
            FormField::Department => "Department",
            FormField::Designation => "Designation",
            FormField::PrimarySkill => "Primary Skill",
            FormField::SecondarySkill => "Secondary Skill",
            FormField::SkillRating => "Skill Rating (1-10)",
            FormField::YearsOfExperience => "Years of Experience",
            FormField::Email => "Email",
        }
    }

    pub fn is_required(self) -> bool {
        self != FormField::SecondarySkill
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(FormField),
    #[error("{field} must be a non-negative whole number, got \"{value}\"")]
    InvalidNumber { field: FormField, value: String },
    #[error("{field} is too large, got \"{value}\"")]
    NumberTooLarge { field: FormField, value: String },
}

/// Raw text as typed by the user. Numeric fields stay text until submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmployeeForm {
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub primary_skill: String,
    pub secondary_skill: String,
    pub skill_rating: String,
    pub years_of_experience: String,
    pub email: String,
}

impl EmployeeForm {
    pub fn from_record(record: &EmployeeRecord) -> Self {
        Self {
            employee_id: record.employee_id.clone(),
            name: record.name.clone(),
            department: record.department.clone(),
            designation: record.designation.clone(),
            primary_skill: record.primary_skill.clone(),
            secondary_skill: record.secondary_skill.clone(),
            skill_rating: record.skill_rating.to_string(),
            years_of_experience: record.years_of_experience.to_string(),
            email: record.email.clone(),
        }
    }

    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::EmployeeId => &self.employee_id,
            FormField::Name => &self.name,
            FormField::Department => &self.department,
            FormField::Designation => &self.designation,
            FormField::PrimarySkill => &self.primary_skill,
            FormField::SecondarySkill => &self.secondary_skill,
            FormField::SkillRating => &self.skill_rating,
            FormField::YearsOfExperience => &self.years_of_experience,
            FormField::Email => &self.email,
        }
    }

    pub fn set(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::EmployeeId => self.employee_id = value,
            FormField::Name => self.name = value,
            FormField::Department => self.department = value,
            FormField::Designation => self.designation = value,
            FormField::PrimarySkill => self.primary_skill = value,
            FormField::SecondarySkill => self.secondary_skill = value,
            FormField::SkillRating => self.skill_rating = value,
            FormField::YearsOfExperience => self.years_of_experience = value,
            FormField::Email => self.email = value,
        }
    }

    /// Checks required fields and coerces the numeric ones. Text fields are
    /// sent as typed.
    pub fn to_new_employee(&self) -> Result<NewEmployee, FormError> {
        self.ensure_required()?;
        Ok(NewEmployee {
            employee_id: self.employee_id.clone(),
            name: self.name.clone(),
            department: self.department.clone(),
            designation: self.designation.clone(),
            primary_skill: self.primary_skill.clone(),
            secondary_skill: self.secondary_skill.clone(),
            skill_rating: parse_number(FormField::SkillRating, &self.skill_rating)?,
            years_of_experience: parse_number(
                FormField::YearsOfExperience,
                &self.years_of_experience,
            )?,
            email: self.email.clone(),
        })
    }

    /// Same checks as [`Self::to_new_employee`]; an empty secondary skill is
    /// left out so the stored one is kept.
    pub fn to_update(&self) -> Result<EmployeeUpdate, FormError> {
        let employee = self.to_new_employee()?;
        Ok(EmployeeUpdate {
            employee_id: Some(employee.employee_id),
            name: Some(employee.name),
            department: Some(employee.department),
            designation: Some(employee.designation),
            primary_skill: Some(employee.primary_skill),
            secondary_skill: Some(employee.secondary_skill).filter(|s| !s.is_empty()),
            skill_rating: Some(employee.skill_rating),
            years_of_experience: Some(employee.years_of_experience),
            email: Some(employee.email),
        })
    }

    fn ensure_required(&self) -> Result<(), FormError> {
        match FormField::ALL
            .into_iter()
            .find(|field| field.is_required() && self.get(*field).trim().is_empty())
        {
            Some(field) => Err(FormError::MissingField(field)),
            None => Ok(()),
        }
    }
}

fn parse_number<T>(field: FormField, raw: &str) -> Result<T, FormError>
where
    T: FromStr<Err = ParseIntError>,
{
    raw.trim().parse().map_err(|err: ParseIntError| {
        let value = raw.to_string();
        match err.kind() {
            IntErrorKind::PosOverflow => FormError::NumberTooLarge { field, value },
            _ => FormError::InvalidNumber { field, value },
        }
    })
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
