use serde::{Deserialize, Deserializer, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

id_newtype!(RecordId);

/// Departments offered as choices by front ends. The backend stores any string.
pub const KNOWN_DEPARTMENTS: &[&str] = &[
    "Engineering",
    "Marketing",
    "Sales",
    "HR",
    "Finance",
    "Operations",
    "IT",
];

pub const MIN_SKILL_RATING: u8 = 1;
pub const MAX_SKILL_RATING: u8 = 10;

/// One employee's skill profile as held by the backend collection.
///
/// `id` is assigned by the server and is the only key used for update and
/// delete. `employee_id` is the user-facing business key used by search; the
/// client does not assume it is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRecord {
    pub id: RecordId,
    pub employee_id: String,
    pub name: String,
    pub department: String,
    pub designation: String,
    pub primary_skill: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub secondary_skill: String,
    pub skill_rating: u8,
    pub years_of_experience: u32,
    pub email: String,
}

impl EmployeeRecord {
    /// Initial used by front ends as an avatar glyph.
    pub fn initial(&self) -> Option<char> {
        self.name.chars().next().map(|c| c.to_ascii_uppercase())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
