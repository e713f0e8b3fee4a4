//! Submit-Time Form Validation
//!
//! Runs before any network call. The first failing check wins.

use chrono::NaiveDateTime;

use crate::clock;
use crate::error::ValidationError;
use crate::models::{ContestPayload, ProblemPayload};
use crate::roster::Roster;

/// Raw values of the contest form fields
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContestForm {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
}

/// Contest fields that passed validation
#[derive(Debug, Clone, PartialEq)]
pub struct ContestDraft {
    pub title: String,
    pub description: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
}

impl ContestDraft {
    pub fn payload(&self) -> ContestPayload {
        ContestPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            start_time: clock::to_wire(&self.start_time),
            end_time: clock::to_wire(&self.end_time),
        }
    }
}

pub fn validate_contest(form: &ContestForm, roster: &Roster) -> Result<ContestDraft, ValidationError> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if form.description.is_empty() {
        return Err(ValidationError::MissingDescription);
    }
    if form.start_time.trim().is_empty() || form.end_time.trim().is_empty() {
        return Err(ValidationError::MissingTimes);
    }
    let start_time = clock::parse_datetime(&form.start_time).ok_or(ValidationError::InvalidTime("Start"))?;
    let end_time = clock::parse_datetime(&form.end_time).ok_or(ValidationError::InvalidTime("End"))?;
    if end_time <= start_time {
        return Err(ValidationError::EndNotAfterStart);
    }
    if roster.is_empty() {
        return Err(ValidationError::EmptyRoster);
    }
    // Items are kept sorted by order, so duplicates are neighbours
    if let Some(pair) = roster.items().windows(2).find(|w| w[0].order == w[1].order) {
        return Err(ValidationError::DuplicateOrder(pair[0].order));
    }

    Ok(ContestDraft {
        title: title.to_string(),
        description: form.description.clone(),
        start_time,
        end_time,
    })
}

/// Raw values of the admin problem form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProblemForm {
    pub title: String,
    pub description: String,
    pub difficulty: String,
    /// Comma separated
    pub tags: String,
    pub time_limit_ms: String,
    pub memory_limit_kb: String,
}

pub fn validate_problem(form: &ProblemForm) -> Result<ProblemPayload, ValidationError> {
    let title = form.title.trim();
    if title.is_empty() {
        return Err(ValidationError::MissingTitle);
    }
    if form.description.trim().is_empty() {
        return Err(ValidationError::MissingDescription);
    }
    let time_limit_ms = parse_positive(&form.time_limit_ms).ok_or(ValidationError::InvalidTimeLimit)?;
    let memory_limit_kb = parse_positive(&form.memory_limit_kb).ok_or(ValidationError::InvalidMemoryLimit)?;

    let mut tags: Vec<String> = Vec::new();
    for tag in form.tags.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            tags.push(tag.to_string());
        }
    }

    Ok(ProblemPayload {
        title: title.to_string(),
        description: form.description.clone(),
        difficulty: form.difficulty.clone(),
        tags,
        time_limit_ms,
        memory_limit_kb,
    })
}

fn parse_positive(raw: &str) -> Option<u32> {
    raw.trim().parse::<u32>().ok().filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Id, Problem};

    fn filled_form() -> ContestForm {
        ContestForm {
            title: "  Weekly Round 12 ".to_string(),
            description: "Five problems, two hours.".to_string(),
            start_time: "2024-05-04T10:00".to_string(),
            end_time: "2024-05-04T12:00".to_string(),
        }
    }

    fn one_problem_roster() -> Roster {
        let mut roster = Roster::new();
        roster.add_item(&Problem {
            id: Id::from("p1"),
            title: "A".to_string(),
            difficulty: String::new(),
            tags: vec![],
        });
        roster
    }

    #[test]
    fn test_valid_form() {
        let draft = validate_contest(&filled_form(), &one_problem_roster()).unwrap();
        assert_eq!(draft.title, "Weekly Round 12");
        let payload = draft.payload();
        assert_eq!(payload.start_time, "2024-05-04T10:00:00");
        assert_eq!(payload.end_time, "2024-05-04T12:00:00");
    }

    #[test]
    fn test_checks_run_in_order() {
        let roster = Roster::new();
        let mut form = ContestForm::default();
        // Everything is wrong; title is reported first
        assert_eq!(validate_contest(&form, &roster), Err(ValidationError::MissingTitle));

        form.title = "   ".to_string();
        assert_eq!(validate_contest(&form, &roster), Err(ValidationError::MissingTitle));

        form.title = "T".to_string();
        assert_eq!(validate_contest(&form, &roster), Err(ValidationError::MissingDescription));

        form.description = "D".to_string();
        form.start_time = "2024-05-04T10:00".to_string();
        assert_eq!(validate_contest(&form, &roster), Err(ValidationError::MissingTimes));

        form.end_time = "2024-05-04T10:00".to_string();
        assert_eq!(validate_contest(&form, &roster), Err(ValidationError::EndNotAfterStart));

        form.end_time = "2024-05-04T11:00".to_string();
        assert_eq!(validate_contest(&form, &roster), Err(ValidationError::EmptyRoster));
    }

    #[test]
    fn test_duplicate_order_blocks_submit() {
        let mut roster = Roster::new();
        for id in ["p1", "p2", "p3"] {
            roster.add_item(&Problem {
                id: Id::from(id),
                title: id.to_string(),
                difficulty: String::new(),
                tags: vec![],
            });
        }
        roster.set_order(&Id::from("p3"), "1").unwrap();
        assert_eq!(
            validate_contest(&filled_form(), &roster),
            Err(ValidationError::DuplicateOrder(1))
        );

        // Resolving the clash makes the form valid again
        roster.set_order(&Id::from("p3"), "3").unwrap();
        assert!(validate_contest(&filled_form(), &roster).is_ok());
    }

    #[test]
    fn test_end_before_start() {
        let mut form = filled_form();
        form.end_time = "2024-05-04T09:00".to_string();
        assert_eq!(
            validate_contest(&form, &one_problem_roster()),
            Err(ValidationError::EndNotAfterStart)
        );
    }

    #[test]
    fn test_unparseable_time() {
        let mut form = filled_form();
        form.start_time = "soon".to_string();
        assert_eq!(
            validate_contest(&form, &one_problem_roster()),
            Err(ValidationError::InvalidTime("Start"))
        );
    }

    #[test]
    fn test_problem_form() {
        let form = ProblemForm {
            title: "Maze".to_string(),
            description: "Find the exit.".to_string(),
            difficulty: "medium".to_string(),
            tags: "bfs, graphs, BFS,, ".to_string(),
            time_limit_ms: "1000".to_string(),
            memory_limit_kb: "262144".to_string(),
        };
        let payload = validate_problem(&form).unwrap();
        assert_eq!(payload.tags, vec!["bfs".to_string(), "graphs".to_string()]);
        assert_eq!(payload.time_limit_ms, 1000);

        let bad = ProblemForm { time_limit_ms: "0".to_string(), ..form.clone() };
        assert_eq!(validate_problem(&bad), Err(ValidationError::InvalidTimeLimit));

        let bad = ProblemForm { memory_limit_kb: "lots".to_string(), ..form };
        assert_eq!(validate_problem(&bad), Err(ValidationError::InvalidMemoryLimit));
    }
}
