//! Full event details read from the event edit form.

use chrono::{NaiveDate, NaiveDateTime};
use scraper::{ElementRef, Html};
use serde::Serialize;

use crate::error::{GvpError, Result};
use crate::utils::date::{parse_form_date, parse_form_time, parse_preliminary_month_at};
use crate::utils::html;

/// Form rows of the edit page, in document order.
mod row {
    pub const NAME: usize = 0;
    pub const DESCRIPTION: usize = 1;
    pub const ORGANIZER: usize = 2;
    pub const LOCATION: usize = 3;
    pub const PRELIMINARY_MONTH: usize = 4;
    pub const DURATION_TYPE: usize = 5;
    pub const START_DATE: usize = 6;
    pub const START_TIME: usize = 7;
    pub const START_LOCATION: usize = 8;
    pub const END_DATE: usize = 9;
    pub const END_TIME: usize = 10;
    pub const END_LOCATION: usize = 11;
    pub const PARTICIPANTS: usize = 12;
    pub const TEACHERS: usize = 13;
    pub const PRICE: usize = 14;
    pub const APPROVAL: usize = 15;
    pub const NOTES: usize = 16;
    pub const COUNT: usize = 17;
}

/// Approval radio value of approved events.
const APPROVED_VALUE: &str = "1";

/// When and where an event starts and ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub start: NaiveDateTime,
    pub start_location: String,
    pub end: NaiveDateTime,
    pub end_location: String,
}

/// Everything the edit form says about an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EventDetails {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub organizer: String,
    pub location: String,

    /// First day of the month the event is tentatively planned for
    pub preliminary_month: NaiveDate,

    /// Site-specific duration type code
    pub duration_type: u32,

    /// Exact dates, absent while only the preliminary month is known
    pub schedule: Option<Schedule>,

    pub all_classes: bool,
    pub classes: Vec<String>,
    pub students: Vec<String>,
    pub teachers: Vec<String>,
    pub teacher_count: u32,
    pub price: u32,
    pub approved: bool,
    pub notes: String,
}

impl EventDetails {
    /// Read the edit form of event `id`.
    ///
    /// The page does not carry the id itself, so it is supplied by the
    /// caller.
    pub fn from_document(document: &Html, id: i64) -> Result<Self> {
        Self::from_document_at(document, id, chrono::Local::now().date_naive())
    }

    /// Read the edit form, resolving the preliminary month relative to `today`.
    pub fn from_document_at(document: &Html, id: i64, today: NaiveDate) -> Result<Self> {
        let rows = html::select_all(document, "tr")?;
        if rows.len() < row::COUNT {
            return Err(GvpError::decoding(
                "event details",
                format!("expected {} rows, found {}", row::COUNT, rows.len()),
            ));
        }

        let month_index = selected_number(rows[row::PRELIMINARY_MONTH], "preliminary month")?;
        let duration_type = html::checked_radio(rows[row::DURATION_TYPE], "duration type")?
            .ok_or_else(|| GvpError::decoding("duration type", "no option checked"))?;
        let approval = html::checked_radio(rows[row::APPROVAL], "approval")?;

        let participants = rows[row::PARTICIPANTS];
        let teachers = rows[row::TEACHERS];

        Ok(Self {
            id,
            name: input(rows[row::NAME], "name")?,
            description: html::textarea_text(rows[row::DESCRIPTION], 0, "description")?,
            organizer: input(rows[row::ORGANIZER], "organizer")?,
            location: input(rows[row::LOCATION], "location")?,
            preliminary_month: parse_preliminary_month_at(month_index, today)?,
            duration_type: number(&duration_type, "duration type")?,
            schedule: read_schedule(&rows)?,
            all_classes: html::checkbox_checked(participants, 0, "all classes")?,
            classes: html::split_list(&html::input_value(participants, 0, "classes")?),
            students: html::split_list(&html::input_value(participants, 1, "students")?),
            teachers: html::split_list(&html::input_value(teachers, 0, "teachers")?),
            teacher_count: number(
                &html::input_value(teachers, 1, "teacher count")?,
                "teacher count",
            )?,
            price: number(&input(rows[row::PRICE], "price")?, "price")?,
            approved: approval.as_deref() == Some(APPROVED_VALUE),
            notes: html::textarea_text(rows[row::NOTES], 0, "notes")?,
        })
    }

    /// Start of the event, if scheduled.
    pub fn start(&self) -> Option<NaiveDateTime> {
        self.schedule.as_ref().map(|s| s.start)
    }

    /// End of the event, if scheduled.
    pub fn end(&self) -> Option<NaiveDateTime> {
        self.schedule.as_ref().map(|s| s.end)
    }
}

/// The date and place rows are only filled in once the start date is.
fn read_schedule(rows: &[ElementRef<'_>]) -> Result<Option<Schedule>> {
    let start_date = input(rows[row::START_DATE], "start date")?;
    if start_date.is_empty() {
        return Ok(None);
    }

    let start_time = parse_form_time(&input(rows[row::START_TIME], "start time")?)?;
    let end_date = parse_form_date(&input(rows[row::END_DATE], "end date")?)?;
    let end_time = parse_form_time(&input(rows[row::END_TIME], "end time")?)?;

    Ok(Some(Schedule {
        start: parse_form_date(&start_date)?.and_time(start_time),
        start_location: input(rows[row::START_LOCATION], "start location")?,
        end: end_date.and_time(end_time),
        end_location: input(rows[row::END_LOCATION], "end location")?,
    }))
}

fn input(row: ElementRef<'_>, context: &str) -> Result<String> {
    html::input_value(row, 0, context)
}

fn selected_number(row: ElementRef<'_>, context: &str) -> Result<u32> {
    number(&html::selected_option(row, context)?, context)
}

/// A whole number; a blank field counts as zero.
fn number(text: &str, context: &str) -> Result<u32> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(0);
    }
    text.parse()
        .map_err(|_| GvpError::decoding(context, format!("'{text}' is not a number")))
}
