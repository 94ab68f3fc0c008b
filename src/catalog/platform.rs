//! The fixed training-platform catalog
//!
//! Six collections. `users` and `companies` carry write-time validators;
//! the rest are shaped entirely by application code and carry only the
//! indexes that back their access paths:
//!
//! - users: {email:1} unique
//! - reps: {userId:1} unique, {email:1} unique
//! - rep_progress: {repId:1, journeyId:1, moduleId:1} unique
//! - training_journeys: {companyId:1}
//! - training_modules: {journeyId:1}

use super::types::{Catalog, CollectionSpec, FieldRule, IndexSpec, ValidatorSpec};

/// Email pattern enforced on users.email
pub const EMAIL_PATTERN: &str = "^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\\.[a-zA-Z]{2,}$";

/// Roles a platform user can hold
const USER_ROLES: [&str; 3] = ["trainee", "trainer", "admin"];

/// Recognized company size brackets
const COMPANY_SIZES: [&str; 5] = ["startup", "small", "medium", "large", "enterprise"];

/// Builds the catalog the bootstrap applies to the training-platform store.
pub fn training_platform() -> Catalog {
    Catalog::new(vec![
        CollectionSpec::validated(
            "users",
            ValidatorSpec::new(
                &["name", "email", "password", "role"],
                vec![
                    ("name", FieldRule::string().min_length(2).max_length(100)),
                    ("email", FieldRule::string().pattern(EMAIL_PATTERN)),
                    ("password", FieldRule::string().min_length(8)),
                    ("role", FieldRule::string().one_of(&USER_ROLES)),
                ],
            ),
        )
        .with_index(IndexSpec::unique(&["email"])),
        CollectionSpec::validated(
            "companies",
            ValidatorSpec::new(
                &["name", "industry", "size"],
                vec![
                    ("name", FieldRule::string().min_length(2).max_length(200)),
                    ("industry", FieldRule::string()),
                    ("size", FieldRule::string().one_of(&COMPANY_SIZES)),
                ],
            ),
        ),
        CollectionSpec::plain("training_journeys").with_index(IndexSpec::on(&["companyId"])),
        CollectionSpec::plain("training_modules").with_index(IndexSpec::on(&["journeyId"])),
        CollectionSpec::plain("reps")
            .with_index(IndexSpec::unique(&["userId"]))
            .with_index(IndexSpec::unique(&["email"])),
        CollectionSpec::plain("rep_progress")
            .with_index(IndexSpec::unique(&["repId", "journeyId", "moduleId"])),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_declares_six_collections() {
        let catalog = training_platform();
        assert_eq!(catalog.len(), 6);

        for name in [
            "users",
            "companies",
            "training_journeys",
            "training_modules",
            "reps",
            "rep_progress",
        ] {
            assert!(catalog.get(name).is_some(), "missing collection {}", name);
        }
    }

    #[test]
    fn test_only_users_and_companies_carry_validators() {
        let catalog = training_platform();

        assert!(catalog.get("users").unwrap().validator.is_some());
        assert!(catalog.get("companies").unwrap().validator.is_some());

        for name in ["training_journeys", "training_modules", "reps", "rep_progress"] {
            assert!(
                catalog.get(name).unwrap().validator.is_none(),
                "{} should not carry a validator",
                name
            );
        }
    }

    #[test]
    fn test_unique_indexes_match_contract() {
        let catalog = training_platform();

        let users = catalog.get("users").unwrap();
        assert_eq!(users.indexes, vec![IndexSpec::unique(&["email"])]);

        let reps = catalog.get("reps").unwrap();
        assert_eq!(
            reps.indexes,
            vec![IndexSpec::unique(&["userId"]), IndexSpec::unique(&["email"])]
        );

        let progress = catalog.get("rep_progress").unwrap();
        assert_eq!(
            progress.indexes,
            vec![IndexSpec::unique(&["repId", "journeyId", "moduleId"])]
        );
    }

    #[test]
    fn test_lookup_indexes_are_not_unique() {
        let catalog = training_platform();

        let journeys = catalog.get("training_journeys").unwrap();
        assert_eq!(journeys.indexes, vec![IndexSpec::on(&["companyId"])]);

        let modules = catalog.get("training_modules").unwrap();
        assert_eq!(modules.indexes, vec![IndexSpec::on(&["journeyId"])]);
    }

    #[test]
    fn test_companies_declare_no_indexes() {
        let catalog = training_platform();
        assert!(catalog.get("companies").unwrap().indexes.is_empty());
    }

    #[test]
    fn test_user_validator_bounds() {
        let catalog = training_platform();
        let validator = catalog.get("users").unwrap().validator.as_ref().unwrap();

        assert_eq!(
            validator.required,
            vec!["name", "email", "password", "role"]
        );

        let name = &validator.fields["name"];
        assert_eq!((name.min_length, name.max_length), (Some(2), Some(100)));

        let password = &validator.fields["password"];
        assert_eq!(password.min_length, Some(8));

        let role = &validator.fields["role"];
        assert_eq!(
            role.allowed.as_deref(),
            Some(&["trainee".to_string(), "trainer".to_string(), "admin".to_string()][..])
        );

        assert_eq!(
            validator.fields["email"].pattern.as_deref(),
            Some(EMAIL_PATTERN)
        );
    }
}
