//! Input validation for identity queries.
//!
//! Both validators re-check the identifier shape after classification. For a query that
//! classified as citizen the `len != 10` re-check can never fire, and likewise the `len <= 3`
//! re-check for expatriates. That is the long-standing acceptance behaviour and is kept
//! as-is; see DESIGN.md before changing it.

use crate::constants::{CITIZEN_PREFIX, EXPAT_PREFIX, NATIONAL_ID_LEN};
use crate::query::{IdentityKind, IdentityQuery};
use crate::{IdentityError, IdentityResult};

/// Validates identifier and birth date for the resolution paths.
///
/// # Errors
///
/// - [`IdentityError::BadNationalId`] / [`IdentityError::BadIqamaId`] for a malformed id
/// - [`IdentityError::BadBirthDate`] when the birth date has 4 characters or fewer
/// - [`IdentityError::UnknownKind`] when the id is neither a national id nor an iqama number
pub fn validate(query: &IdentityQuery) -> IdentityResult<()> {
    validate_id_only(query)?;
    if query.birth_date.len() <= 4 {
        return Err(IdentityError::BadBirthDate);
    }
    Ok(())
}

/// Validates only the identifier shape, for paths that resolve by id alone.
///
/// # Errors
///
/// Same as [`validate`], minus the birth date check.
pub fn validate_id_only(query: &IdentityQuery) -> IdentityResult<()> {
    let id = query.id.as_str();
    match query.kind() {
        IdentityKind::Citizen => {
            if id.len() != NATIONAL_ID_LEN && id.starts_with(CITIZEN_PREFIX) {
                return Err(IdentityError::BadNationalId);
            }
        }
        IdentityKind::Expat => {
            if id.len() <= 3 && id.starts_with(EXPAT_PREFIX) {
                return Err(IdentityError::BadIqamaId);
            }
        }
        IdentityKind::Unknown => return Err(IdentityError::UnknownKind),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_citizen_and_expat() {
        assert!(validate(&IdentityQuery::new("1012345678", "01-01-1400")).is_ok());
        assert!(validate(&IdentityQuery::new("2123456789", "1990-01-01")).is_ok());
    }

    #[test]
    fn rejects_short_birth_dates() {
        for dob in ["", "1", "1990"] {
            let err = validate(&IdentityQuery::new("1012345678", dob)).unwrap_err();
            assert!(matches!(err, IdentityError::BadBirthDate), "{dob:?}");

            let err = validate(&IdentityQuery::new("2123456789", dob)).unwrap_err();
            assert!(matches!(err, IdentityError::BadBirthDate), "{dob:?}");
        }
        assert!(validate(&IdentityQuery::new("1012345678", "19900")).is_ok());
    }

    #[test]
    fn rejects_unknown_kind_regardless_of_birth_date() {
        for id in ["", "3012345678", "101234567", "2123"] {
            let err = validate(&IdentityQuery::new(id, "01-01-1990")).unwrap_err();
            assert!(matches!(err, IdentityError::UnknownKind), "{id:?}");

            let err = validate(&IdentityQuery::new(id, "")).unwrap_err();
            assert!(matches!(err, IdentityError::UnknownKind), "{id:?}");
        }
    }

    // The shape re-checks are unreachable once an id has classified: a wrong-length id
    // starting with "1" is Unknown, never a Citizen with a bad national id.
    #[test]
    fn shape_rechecks_never_fire_after_classification() {
        let err = validate(&IdentityQuery::new("10123", "01-01-1990")).unwrap_err();
        assert!(matches!(err, IdentityError::UnknownKind));

        let err = validate_id_only(&IdentityQuery::new("101234567890", "")).unwrap_err();
        assert!(matches!(err, IdentityError::UnknownKind));

        let err = validate_id_only(&IdentityQuery::new("212", "")).unwrap_err();
        assert!(matches!(err, IdentityError::UnknownKind));
    }

    #[test]
    fn id_only_skips_birth_date() {
        assert!(validate_id_only(&IdentityQuery::new("1012345678", "")).is_ok());
        assert!(validate_id_only(&IdentityQuery::new("21234", "")).is_ok());
    }
}
