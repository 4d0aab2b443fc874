use crate::assignment::Assignment;
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssignmentValidationError {
    #[error("assignment id must not be empty")]
    EmptyId,
    #[error("assignment {0} has an empty name")]
    EmptyName(String),
    #[error("split assignment {0} needs at least one unit")]
    NoUnits(String),
    #[error("duplicate assignment id {0}")]
    DuplicateId(String),
}

pub fn validate_assignment(assignment: &Assignment) -> Result<(), AssignmentValidationError> {
    if assignment.id.trim().is_empty() {
        return Err(AssignmentValidationError::EmptyId);
    }
    if assignment.name.trim().is_empty() {
        return Err(AssignmentValidationError::EmptyName(assignment.id.clone()));
    }
    if !assignment.recurring && assignment.total_units == 0 {
        return Err(AssignmentValidationError::NoUnits(assignment.id.clone()));
    }
    Ok(())
}

pub fn validate_assignment_collection(
    assignments: &[Assignment],
) -> Result<(), AssignmentValidationError> {
    let mut seen_ids = HashSet::with_capacity(assignments.len());
    for assignment in assignments {
        validate_assignment(assignment)?;
        if !seen_ids.insert(assignment.id.as_str()) {
            return Err(AssignmentValidationError::DuplicateId(
                assignment.id.clone(),
            ));
        }
    }
    Ok(())
}
