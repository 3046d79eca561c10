//! Events as shown in the event listing table.

use chrono::NaiveDate;
use regex::Regex;
use scraper::ElementRef;
use serde::Serialize;

use super::source::EventSource;
use super::EventDetails;
use crate::error::{GvpError, Result};
use crate::utils::date::parse_human_date_at;
use crate::utils::{extract_query_id, html};

/// Row class of approved events.
pub const APPROVED_CLASS: &str = "schvaleno";

/// Row class of proposed, not yet approved events.
pub const PROPOSED_CLASS: &str = "navrh";

const CHOSEN_STUDENTS_MARK: &str = "výběr studentů";
const ALL_CLASSES_MARK: &str = "všechny třídy";

/// Explicit class list, `třídy: 1.A, 2.B`.
const CLASS_LIST_PATTERN: &str = r"(?i)třídy:(.*)";

/// First parenthesized number, the teacher count in `Učitelé (3): ...`.
const TEACHER_COUNT_PATTERN: &str = r"\((\d+)\)";

/// Cell positions of a listing row.
mod cell {
    pub const NAME: usize = 0;
    pub const ORGANIZER: usize = 1;
    pub const START: usize = 2;
    pub const END: usize = 3;
    pub const CLASSES: usize = 4;
    pub const TEACHERS: usize = 5;
    pub const COUNT: usize = 6;
}

/// An event row of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    pub id: i64,
    pub name: String,
    pub organizer: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,

    /// Every class takes part
    pub all_classes: bool,

    /// Explicitly listed classes
    pub classes: Vec<String>,

    /// Only selected students take part
    pub has_chosen_students: bool,

    pub teachers: Vec<String>,
    pub teacher_count: u32,
    pub approved: bool,
}

impl Event {
    /// Build an event from a listing row, inferring years relative to `today`.
    pub fn from_row(row: ElementRef<'_>, today: NaiveDate) -> Result<Self> {
        let approved = row.value().classes().any(|c| c == APPROVED_CLASS);

        let cells = html::cells(row);
        if cells.len() != cell::COUNT {
            return Err(GvpError::decoding(
                "event row",
                format!("expected {} cells, found {}", cell::COUNT, cells.len()),
            ));
        }

        let link = html::nth(cells[cell::NAME], "a", 0, "event name")?;
        let href = html::attr(link, "href", "event name")?;
        let id = extract_query_id(href)
            .ok_or_else(|| GvpError::decoding("event name", format!("no id in link '{href}'")))?;

        let mut event = Self {
            id,
            name: html::text(link),
            organizer: html::text(cells[cell::ORGANIZER]),
            start: parse_human_date_at(&html::text(cells[cell::START]), today)?,
            end: parse_human_date_at(&html::text(cells[cell::END]), today)?,
            all_classes: false,
            classes: Vec::new(),
            has_chosen_students: false,
            teachers: Vec::new(),
            teacher_count: 0,
            approved,
        };

        event.read_classes(&html::text(cells[cell::CLASSES]))?;
        event.read_teachers(&html::text(cells[cell::TEACHERS]))?;
        Ok(event)
    }

    /// Whether a listing row holds an event at all.
    pub fn is_data_row(row: ElementRef<'_>) -> bool {
        html::cells(row)
            .first()
            .is_some_and(|first| !html::text(*first).is_empty())
    }

    /// Fetch the full details of this event.
    pub fn details(&self, source: &impl EventSource) -> Result<EventDetails> {
        source.get_event(self.id)
    }

    fn read_classes(&mut self, text: &str) -> Result<()> {
        let lower = text.to_lowercase();

        if lower.contains(CHOSEN_STUDENTS_MARK) {
            self.has_chosen_students = true;
        } else if lower.contains(ALL_CLASSES_MARK) {
            self.all_classes = true;
        } else {
            let pattern =
                Regex::new(CLASS_LIST_PATTERN).map_err(|e| GvpError::decoding("classes", e))?;
            if let Some(list) = pattern.captures(text).and_then(|caps| caps.get(1)) {
                self.classes = html::split_list(list.as_str());
            }
        }
        Ok(())
    }

    fn read_teachers(&mut self, text: &str) -> Result<()> {
        let pattern =
            Regex::new(TEACHER_COUNT_PATTERN).map_err(|e| GvpError::decoding("teachers", e))?;
        let count = pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .ok_or_else(|| {
                GvpError::decoding("teachers", format!("no teacher count in '{text}'"))
            })?;

        self.teacher_count = count
            .as_str()
            .parse()
            .map_err(|e| GvpError::decoding("teachers", e))?;
        self.teachers = text
            .split_once(':')
            .map(|(_, names)| html::split_list(names))
            .unwrap_or_default();
        Ok(())
    }
}
