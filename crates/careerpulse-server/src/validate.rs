//! Input checks that run before any provider call

use crate::error::AppError;

/// Longest accepted value for any query or body field, in characters
pub const MAX_FIELD_CHARS: usize = 100;

/// Collects field problems so one response names every offending field.
#[derive(Debug, Default)]
pub struct Validator {
    missing: Vec<&'static str>,
    too_long: Vec<&'static str>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A field that must be present and non-blank. Returns the trimmed value,
    /// or an empty string once the field has been recorded as invalid.
    pub fn required<'a>(&mut self, name: &'static str, value: Option<&'a str>) -> &'a str {
        match value.map(str::trim).filter(|v| !v.is_empty()) {
            Some(v) => self.bounded(name, v),
            None => {
                self.missing.push(name);
                ""
            }
        }
    }

    /// A field that may be absent; blank counts as absent.
    pub fn optional<'a>(&mut self, name: &'static str, value: Option<&'a str>) -> Option<&'a str> {
        value
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(|v| self.bounded(name, v))
    }

    fn bounded<'a>(&mut self, name: &'static str, value: &'a str) -> &'a str {
        if value.chars().count() > MAX_FIELD_CHARS {
            self.too_long.push(name);
        }
        value
    }

    pub fn finish(self) -> Result<(), AppError> {
        let mut problems = Vec::new();
        if !self.missing.is_empty() {
            problems.push(format!("Missing required fields: {}", self.missing.join(", ")));
        }
        if !self.too_long.is_empty() {
            problems.push(format!(
                "Fields longer than {} characters: {}",
                MAX_FIELD_CHARS,
                self.too_long.join(", ")
            ));
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(AppError::BadRequest(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(result: Result<(), AppError>) -> String {
        match result {
            Err(AppError::BadRequest(msg)) => msg,
            other => panic!("expected bad request, got {other:?}"),
        }
    }

    #[test]
    fn accepts_trimmed_values() {
        let mut v = Validator::new();
        assert_eq!(v.required("job", Some("  Analyst ")), "Analyst");
        assert_eq!(v.optional("company", Some("   ")), None);
        assert!(v.finish().is_ok());
    }

    #[test]
    fn names_every_missing_field() {
        let mut v = Validator::new();
        v.required("job", None);
        v.required("skills", Some(""));
        assert_eq!(message(v.finish()), "Missing required fields: job, skills");
    }

    #[test]
    fn limit_is_inclusive() {
        let mut v = Validator::new();
        v.required("skills", Some(&"a".repeat(100)));
        assert!(v.finish().is_ok());

        let mut v = Validator::new();
        v.required("skills", Some(&"a".repeat(101)));
        v.optional("experience", Some(&"9".repeat(150)));
        assert_eq!(
            message(v.finish()),
            "Fields longer than 100 characters: skills, experience"
        );
    }

    #[test]
    fn mixes_missing_and_oversized() {
        let mut v = Validator::new();
        v.required("job", Some(&"j".repeat(120)));
        v.required("skills", None);
        assert_eq!(
            message(v.finish()),
            "Missing required fields: skills; Fields longer than 100 characters: job"
        );
    }
}
