//! # Submission Validator
//!
//! Decides whether a set of issue fields forms a legal issue. The rules:
//!
//! 1. professor mail is not blank and does not end with
//!    [`STUDENT_MAIL_SUFFIX`] (student accounts may not report issues);
//! 2. class number is not blank;
//! 3. description is not blank.
//!
//! "Blank" means empty or whitespace-only.

use crate::error::ValidationError;
use crate::issue::IssueContent;

/// Mail suffix of institutional student accounts.
pub const STUDENT_MAIL_SUFFIX: &str = "@g.educaand.es";

/// Whether `s` is empty or contains only whitespace.
pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Check every submission rule, reporting the first one broken.
///
/// # Errors
///
/// Returns the [`ValidationError`] of the first failing rule, checked in
/// the order professor mail, class number, description.
pub fn check(candidate: &impl IssueContent) -> Result<(), ValidationError> {
    let mail = candidate.professor_mail();
    if is_blank(mail) {
        return Err(ValidationError::BlankProfessorMail);
    }
    if mail.ends_with(STUDENT_MAIL_SUFFIX) {
        return Err(ValidationError::StudentMail(mail.to_string()));
    }
    if is_blank(candidate.class_number()) {
        return Err(ValidationError::BlankClassNumber);
    }
    if is_blank(candidate.description()) {
        return Err(ValidationError::BlankDescription);
    }
    Ok(())
}

/// Whether `candidate` forms a legal issue.
pub fn validate(candidate: &impl IssueContent) -> bool {
    check(candidate).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::NewIssue;

    fn candidate(class: &str, mail: &str, desc: &str) -> NewIssue {
        NewIssue {
            class_number: class.to_string(),
            professor_mail: mail.to_string(),
            description: desc.to_string(),
        }
    }

    #[test]
    fn accepts_well_formed_issue() {
        assert!(validate(&candidate("101", "j.smith@school.org", "Broken projector")));
    }

    #[test]
    fn rejects_blank_professor_mail() {
        assert_eq!(
            check(&candidate("101", "", "x")),
            Err(ValidationError::BlankProfessorMail)
        );
        assert_eq!(
            check(&candidate("101", "  \t", "x")),
            Err(ValidationError::BlankProfessorMail)
        );
    }

    #[test]
    fn rejects_student_mail() {
        let err = check(&candidate("101", "alumno@g.educaand.es", "x")).unwrap_err();
        assert_eq!(err, ValidationError::StudentMail("alumno@g.educaand.es".into()));
    }

    #[test]
    fn professor_domain_is_not_student_domain() {
        assert!(validate(&candidate("101", "profe@educaand.es", "x")));
        assert!(validate(&candidate("101", "profe@g.educaand.es.org", "x")));
    }

    #[test]
    fn rejects_blank_class_number() {
        assert_eq!(
            check(&candidate(" ", "p@school.org", "x")),
            Err(ValidationError::BlankClassNumber)
        );
    }

    #[test]
    fn rejects_blank_description() {
        assert_eq!(
            check(&candidate("101", "p@school.org", "\n")),
            Err(ValidationError::BlankDescription)
        );
    }

    #[test]
    fn mail_rule_is_reported_first() {
        assert_eq!(
            check(&candidate("", "", "")),
            Err(ValidationError::BlankProfessorMail)
        );
    }

    #[test]
    fn is_blank_cases() {
        assert!(is_blank(""));
        assert!(is_blank("   "));
        assert!(is_blank("\t\r\n"));
        assert!(!is_blank(" a "));
    }
}
