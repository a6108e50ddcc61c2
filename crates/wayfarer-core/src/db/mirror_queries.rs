//! Full-refresh mirroring of a plan document and read-back queries.

use jiff::Timestamp;
use rusqlite::{params, types::Type};

use crate::{
    error::{DatabaseResultExt, Result},
    models::{DestinationId, ProcessKind, ProcessStatus, TripPlan},
};

const CLEAR_MARKERS_SQL: &str = "DELETE FROM cascade_markers";
const CLEAR_OFFERS_SQL: &str = "DELETE FROM chosen_offers";
const CLEAR_PROCESSES_SQL: &str = "DELETE FROM processes";
const CLEAR_DESTINATIONS_SQL: &str = "DELETE FROM destinations";
const INSERT_DESTINATION_SQL: &str = "INSERT INTO destinations (id, display_name, is_active, start_date, end_date, mirrored_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const INSERT_PROCESS_SQL: &str = "INSERT INTO processes (destination_id, process, status, updated_at, set_source) VALUES (?1, ?2, ?3, ?4, ?5)";
const INSERT_MARKER_SQL: &str = "INSERT INTO cascade_markers (destination_id, process, dirty, last_changed) VALUES (?1, ?2, ?3, ?4)";
const INSERT_OFFER_SQL: &str = "INSERT INTO chosen_offers (destination_id, offer_id, source_id, title, currency, price_per_person, price_total) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const SELECT_PROCESSES_SQL: &str = "SELECT destination_id, process, status, updated_at, set_source FROM processes
    ORDER BY destination_id, CASE process
        WHEN 'date_anchor' THEN 0
        WHEN 'destination_selection' THEN 1
        WHEN 'package' THEN 2
        WHEN 'transportation' THEN 3
        WHEN 'accommodation' THEN 4
        WHEN 'itinerary' THEN 5
        ELSE 6
    END";
const SELECT_DIRTY_SQL: &str = "SELECT destination_id, process, last_changed FROM dirty_processes ORDER BY destination_id, process_rank";

/// One row of the `processes` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessRow {
    pub destination: DestinationId,
    pub process: ProcessKind,
    pub status: ProcessStatus,
    pub updated_at: Option<Timestamp>,
    pub set_source: Option<String>,
}

/// One row of the `dirty_processes` view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerRow {
    pub destination: DestinationId,
    pub process: ProcessKind,
    pub last_changed: Option<Timestamp>,
}

fn conversion_error(column: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        column,
        Type::Text,
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, message)),
    )
}

fn parse_process(column: usize, raw: String) -> rusqlite::Result<ProcessKind> {
    raw.parse::<ProcessKind>()
        .map_err(|_| conversion_error(column, format!("Invalid process kind: {raw}")))
}

fn parse_timestamp(column: usize, raw: Option<String>) -> rusqlite::Result<Option<Timestamp>> {
    raw.map(|value| {
        value
            .parse::<Timestamp>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
    })
    .transpose()
}

impl super::Database {
    /// Replaces the mirror's contents with the state of `plan`.
    ///
    /// Runs in a single transaction, so readers never see a half-written
    /// mirror.
    pub fn mirror_plan(&mut self, plan: &TripPlan) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        for sql in [
            CLEAR_MARKERS_SQL,
            CLEAR_OFFERS_SQL,
            CLEAR_PROCESSES_SQL,
            CLEAR_DESTINATIONS_SQL,
        ] {
            tx.execute(sql, []).db_context("Failed to clear mirror table")?;
        }

        let now_str = Timestamp::now().to_string();

        for (id, destination) in &plan.destinations {
            let dates = destination.date_anchor.payload.confirmed_dates;
            tx.execute(
                INSERT_DESTINATION_SQL,
                params![
                    id.as_str(),
                    destination.display_name.as_deref(),
                    *id == plan.active_destination,
                    dates.map(|range| range.start.to_string()),
                    dates.map(|range| range.end.to_string()),
                    &now_str,
                ],
            )
            .db_context("Failed to insert destination")?;

            for kind in ProcessKind::ALL {
                tx.execute(
                    INSERT_PROCESS_SQL,
                    params![
                        id.as_str(),
                        kind.as_str(),
                        destination.status(kind).as_str(),
                        destination.updated_at(kind).map(|at| at.to_string()),
                        destination.set_source(kind),
                    ],
                )
                .db_context("Failed to insert process")?;
            }

            if let Some(offer) = &destination.package.payload.chosen_offer {
                tx.execute(
                    INSERT_OFFER_SQL,
                    params![
                        id.as_str(),
                        &offer.id,
                        &offer.source_id,
                        &offer.title,
                        &offer.currency,
                        offer.price_per_person.and_then(|price| i64::try_from(price).ok()),
                        offer.price_total.and_then(|price| i64::try_from(price).ok()),
                    ],
                )
                .db_context("Failed to insert chosen offer")?;
            }
        }

        // Markers may outlive their destination; mirror them as they are
        for (id, markers) in &plan.cascade_state.destinations {
            for (kind, marker) in markers {
                tx.execute(
                    INSERT_MARKER_SQL,
                    params![
                        id.as_str(),
                        kind.as_str(),
                        marker.dirty,
                        marker.last_changed.map(|at| at.to_string()),
                    ],
                )
                .db_context("Failed to insert cascade marker")?;
            }
        }

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }

    /// Every mirrored process row, ordered by destination, then by process
    /// dependency order.
    pub fn process_rows(&self) -> Result<Vec<ProcessRow>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PROCESSES_SQL)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map([], |row| {
                let status_str: String = row.get(2)?;
                let status = status_str
                    .parse::<ProcessStatus>()
                    .map_err(|_| conversion_error(2, format!("Invalid status: {status_str}")))?;

                Ok(ProcessRow {
                    destination: DestinationId::new(row.get::<_, String>(0)?),
                    process: parse_process(1, row.get(1)?)?,
                    status,
                    updated_at: parse_timestamp(3, row.get(3)?)?,
                    set_source: row.get(4)?,
                })
            })
            .db_context("Failed to query processes")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read process row")
    }

    /// Processes the mirror currently records as dirty, in the same order as
    /// [`process_rows`](Self::process_rows).
    pub fn dirty_processes(&self) -> Result<Vec<MarkerRow>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_DIRTY_SQL)
            .db_context("Failed to prepare query")?;

        let rows = stmt
            .query_map([], |row| {
                Ok(MarkerRow {
                    destination: DestinationId::new(row.get::<_, String>(0)?),
                    process: parse_process(1, row.get(1)?)?,
                    last_changed: parse_timestamp(2, row.get(2)?)?,
                })
            })
            .db_context("Failed to query dirty processes")?;

        rows.collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read dirty process row")
    }
}
