//! # Validator and Status Label Properties
//!
//! Property tests for the submission rules and the closed set of status
//! labels, over arbitrary generated inputs.

use proptest::prelude::*;
use reaktor_core::{validate, IssueContent, IssueStatus, NewIssue, STUDENT_MAIL_SUFFIX};

/// A string with at least one non-whitespace character.
fn filled() -> impl Strategy<Value = String> {
    "[ \t]{0,3}[A-Za-z0-9._-]{1,20}[ \t]{0,3}"
}

/// A string made only of whitespace (possibly empty).
fn blank() -> impl Strategy<Value = String> {
    "[ \t\r\n]{0,6}"
}

/// A mail address that does not end with the student suffix.
fn professor_mail() -> impl Strategy<Value = String> {
    "[a-z]{1,10}(\\.[a-z]{1,10})?@(school\\.org|educaand\\.es|iesjandula\\.es)"
}

fn candidate(class_number: String, professor_mail: String, description: String) -> NewIssue {
    NewIssue {
        class_number,
        professor_mail,
        description,
    }
}

proptest! {
    #[test]
    fn filled_fields_with_professor_mail_are_valid(
        class in filled(),
        mail in professor_mail(),
        desc in filled(),
    ) {
        prop_assert!(validate(&candidate(class, mail, desc)));
    }

    #[test]
    fn blank_class_number_is_invalid(
        class in blank(),
        mail in professor_mail(),
        desc in filled(),
    ) {
        prop_assert!(!validate(&candidate(class, mail, desc)));
    }

    #[test]
    fn blank_description_is_invalid(
        class in filled(),
        mail in professor_mail(),
        desc in blank(),
    ) {
        prop_assert!(!validate(&candidate(class, mail, desc)));
    }

    #[test]
    fn blank_professor_mail_is_invalid(
        class in filled(),
        mail in blank(),
        desc in filled(),
    ) {
        prop_assert!(!validate(&candidate(class, mail, desc)));
    }

    #[test]
    fn student_mail_is_invalid(
        class in filled(),
        user in "[a-z]{1,12}",
        desc in filled(),
    ) {
        let mail = format!("{user}{STUDENT_MAIL_SUFFIX}");
        prop_assert!(!validate(&candidate(class, mail, desc)));
    }

    #[test]
    fn duplicate_detection_ignores_nothing_but_date_and_status(
        class in filled(),
        mail in professor_mail(),
        desc in filled(),
        other_desc in filled(),
    ) {
        let a = candidate(class.clone(), mail.clone(), desc.clone());
        let b = candidate(class, mail, other_desc.clone());
        prop_assert_eq!(a.is_duplicate_of(&b), desc == other_desc);
    }

    #[test]
    fn arbitrary_labels_outside_the_set_are_unknown(label in ".{0,16}") {
        let known = ["To do", "In process", "Finished", "Canceled"].contains(&label.as_str());
        prop_assert_eq!(IssueStatus::from_label(&label).is_some(), known);
    }
}

#[test]
fn every_listed_label_is_recognised() {
    for label in ["To do", "In process", "Finished", "Canceled"] {
        let status = IssueStatus::from_label(label).expect("recognised label");
        assert_eq!(status.as_str(), label);
    }
}
