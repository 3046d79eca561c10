// src/services/events.rs

//! Event listing and event details, scraped from the events pages.

use chrono::NaiveDate;
use scraper::Html;

use crate::error::Result;
use crate::models::{APPROVED_CLASS, Event, EventDetails, PROPOSED_CLASS};
use crate::services::client::GvpClient;
use crate::services::transport::{Request, Transport};
use crate::utils::{html, join_url};

/// Page listing the events of a month range.
const LISTING_PAGE: &str = "index.php";

/// Edit form of a single event.
const DETAILS_PAGE: &str = "edit.php";

/// Month range of the listing form, covering the whole school year.
const FIRST_MONTH: u32 = 1;
const LAST_MONTH: u32 = 12;

/// Parse the event listing table.
///
/// Only rows marked approved or proposed are events; among those, rows
/// with an empty first cell are separators and are skipped.
pub fn parse_event_listing(markup: &str, today: NaiveDate) -> Result<Vec<Event>> {
    let document = Html::parse_document(markup);
    let css = format!("tr.{APPROVED_CLASS}, tr.{PROPOSED_CLASS}");
    let rows = html::select_all(&document, &css)?;

    let mut events = Vec::with_capacity(rows.len());
    for (index, row) in rows.into_iter().enumerate() {
        if !Event::is_data_row(row) {
            log::debug!("Skipping listing row {index}: empty first cell");
            continue;
        }
        events.push(Event::from_row(row, today)?);
    }

    Ok(events)
}

impl<T: Transport> GvpClient<T> {
    /// All events of the current school year.
    pub fn list_events(&self) -> Result<Vec<Event>> {
        let request = Request::post(join_url(&self.events_url, LISTING_PAGE)?)
            .form("mesic1", FIRST_MONTH)
            .form("mesic2", LAST_MONTH);

        let body = self.fetch(&request)?;
        let events = parse_event_listing(&body, chrono::Local::now().date_naive())?;
        log::info!("Listed {} events", events.len());
        Ok(events)
    }

    /// Full details of the event with a given id.
    pub fn get_event(&self, id: i64) -> Result<EventDetails> {
        let request = Request::get(join_url(&self.events_url, DETAILS_PAGE)?).query("id", id);
        let body = self.fetch(&request)?;
        EventDetails::from_document(&Html::parse_document(&body), id)
    }
}
