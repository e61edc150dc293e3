use crate::error::{ShajraError, ShajraResult};
use crate::model::{Gender, Id, Member, RelationshipType};

/// Validates that a string is not blank (empty or whitespace-only).
/// Returns the trimmed string on success.
pub fn non_blank(value: &str, field: &str) -> ShajraResult<String> {
    let trimmed = value.trim().to_string();
    if trimmed.is_empty() {
        Err(ShajraError::validation(format!("{} is required", field)))
    } else {
        Ok(trimmed)
    }
}

/// Gender must be exactly `M` or `F`.
pub fn gender(value: &str) -> ShajraResult<Gender> {
    Gender::parse(value).ok_or_else(|| ShajraError::validation("Gender must be M or F"))
}

/// When both years are known, death cannot precede birth.
pub fn year_order(birth_year: Option<i32>, death_year: Option<i32>) -> ShajraResult<()> {
    match (birth_year, death_year) {
        (Some(birth), Some(death)) if death < birth => Err(ShajraError::validation(
            "Death year cannot be before birth year",
        )),
        _ => Ok(()),
    }
}

pub fn relationship_type(value: &str) -> ShajraResult<RelationshipType> {
    let parsed = RelationshipType::from(value);
    if parsed.is_known() {
        Ok(parsed)
    } else {
        Err(ShajraError::validation("Invalid relationship type"))
    }
}

/// A relationship cannot link a member to itself.
pub fn distinct_members(member_id: Id<Member>, related_member_id: Id<Member>) -> ShajraResult<()> {
    if member_id == related_member_id {
        Err(ShajraError::validation("Cannot create relationship with self"))
    } else {
        Ok(())
    }
}

/// Trims an optional string, returning None if blank.
pub fn trim_optional(value: Option<&str>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
