use crate::db::Database;
use crate::error::{AdvisorError, Result};
use crate::logic::{self, AlertPlan, CropCatalog};
use crate::models::{
    AdoptedCrop, AlertEvent, AlertStatus, AlertType, CropProfile, SoilSnapshot, SoilType,
    StoredAlert, WeatherSnapshot,
};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use tracing::warn;

const DATE_FORMAT: &str = "%Y-%m-%d";

// Soil Reading Queries

impl Database {
    /// Store a soil test after bounds checking it.
    pub fn insert_soil_reading(&self, reading: &SoilSnapshot) -> Result<i64> {
        reading.validate()?;

        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO soil_readings
                    (farmer_id, ph, moisture, nitrogen, phosphorus, potassium,
                     temperature, soil_type, recorded_at)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                "#,
                params![
                    reading.farmer_id,
                    reading.ph,
                    reading.moisture,
                    reading.nitrogen,
                    reading.phosphorus,
                    reading.potassium,
                    reading.temperature,
                    reading.soil_type.as_str(),
                    reading.recorded_at.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn latest_soil_reading(&self, farmer_id: i64) -> Result<Option<SoilSnapshot>> {
        self.with_conn(|conn| {
            conn.query_row(
                r#"
                SELECT * FROM soil_readings WHERE farmer_id = ?1
                ORDER BY recorded_at DESC, id DESC LIMIT 1
                "#,
                [farmer_id],
                row_to_soil_reading,
            )
            .optional()
            .map_err(Into::into)
        })
    }
}

fn row_to_soil_reading(row: &Row) -> rusqlite::Result<SoilSnapshot> {
    let soil_type_str: String = row.get("soil_type")?;
    let recorded_at_str: String = row.get("recorded_at")?;

    let soil_type = SoilType::from_str(&soil_type_str).unwrap_or_else(|| {
        warn!(
            soil_type = %soil_type_str,
            "Unknown soil_type in database, defaulting to Loamy"
        );
        SoilType::Loamy
    });

    Ok(SoilSnapshot {
        id: Some(row.get("id")?),
        farmer_id: row.get("farmer_id")?,
        ph: row.get("ph")?,
        moisture: row.get("moisture")?,
        nitrogen: row.get("nitrogen")?,
        phosphorus: row.get("phosphorus")?,
        potassium: row.get("potassium")?,
        temperature: row.get("temperature")?,
        soil_type,
        recorded_at: parse_timestamp(&recorded_at_str)?,
    })
}

// Weather Reading Queries

impl Database {
    pub fn insert_weather_reading(&self, reading: &WeatherSnapshot) -> Result<i64> {
        reading.validate()?;

        self.with_conn(|conn| {
            conn.execute(
                r#"
                INSERT INTO weather_readings
                    (farmer_id, temperature, humidity, rainfall_mm, recorded_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    reading.farmer_id,
                    reading.temperature,
                    reading.humidity,
                    reading.rainfall_mm,
                    reading.recorded_at.to_rfc3339(),
                ],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn latest_weather_reading(&self, farmer_id: i64) -> Result<Option<WeatherSnapshot>> {
        Ok(self.recent_weather_readings(farmer_id, 1)?.into_iter().next())
    }

    /// Up to `limit` readings, newest first.
    pub fn recent_weather_readings(
        &self,
        farmer_id: i64,
        limit: usize,
    ) -> Result<Vec<WeatherSnapshot>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                r#"
                SELECT * FROM weather_readings WHERE farmer_id = ?1
                ORDER BY recorded_at DESC, id DESC LIMIT ?2
                "#,
            )?;
            let readings = stmt
                .query_map(params![farmer_id, limit as i64], row_to_weather_reading)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(readings)
        })
    }
}

fn row_to_weather_reading(row: &Row) -> rusqlite::Result<WeatherSnapshot> {
    let recorded_at_str: String = row.get("recorded_at")?;

    Ok(WeatherSnapshot {
        id: Some(row.get("id")?),
        farmer_id: row.get("farmer_id")?,
        temperature: row.get("temperature")?,
        humidity: row.get("humidity")?,
        rainfall_mm: row.get("rainfall_mm")?,
        recorded_at: parse_timestamp(&recorded_at_str)?,
    })
}

// Adopted Crop Queries

impl Database {
    /// Record an adoption. Fails with `AlreadyAdopted` when the farmer already
    /// grows this crop.
    pub fn adopt_crop(
        &self,
        farmer_id: i64,
        crop: &CropProfile,
        confidence: f64,
        on: NaiveDate,
    ) -> Result<AdoptedCrop> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            let existing = query_adopted_crops(&tx, farmer_id)?;
            let mut adopted = logic::adopt(&existing, farmer_id, crop, confidence, on)?;

            tx.execute(
                r#"
                INSERT INTO adopted_crops (farmer_id, crop_id, adopted_on, confidence)
                VALUES (?1, ?2, ?3, ?4)
                "#,
                params![
                    adopted.farmer_id,
                    adopted.crop_id,
                    adopted.adopted_on.format(DATE_FORMAT).to_string(),
                    adopted.confidence,
                ],
            )?;
            adopted.id = Some(tx.last_insert_rowid());
            tx.commit()?;

            tracing::info!(farmer_id, crop_id = crop.id, crop = %crop.name, "Adopted crop");
            Ok(adopted)
        })
    }

    pub fn adopted_crops(&self, farmer_id: i64) -> Result<Vec<AdoptedCrop>> {
        self.with_conn(|conn| query_adopted_crops(conn, farmer_id))
    }
}

fn query_adopted_crops(conn: &Connection, farmer_id: i64) -> Result<Vec<AdoptedCrop>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM adopted_crops WHERE farmer_id = ?1 ORDER BY adopted_on, id",
    )?;
    let crops = stmt
        .query_map([farmer_id], row_to_adopted_crop)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(crops)
}

fn row_to_adopted_crop(row: &Row) -> rusqlite::Result<AdoptedCrop> {
    let adopted_on_str: String = row.get("adopted_on")?;

    Ok(AdoptedCrop {
        id: Some(row.get("id")?),
        farmer_id: row.get("farmer_id")?,
        crop_id: row.get("crop_id")?,
        adopted_on: parse_date(&adopted_on_str)?,
        confidence: row.get("confidence")?,
    })
}

// Alert Queries

impl Database {
    /// Generate alerts for every adopted crop and store the ones not already
    /// present. Reading, planning and inserting happen in one transaction.
    pub fn regenerate_alerts(
        &self,
        farmer_id: i64,
        catalog: &CropCatalog,
        now: NaiveDate,
    ) -> Result<AlertPlan> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let adopted = query_adopted_crops(&tx, farmer_id)?;
            let existing: Vec<AlertEvent> = query_alerts(&tx, farmer_id)?
                .into_iter()
                .map(|a| a.event)
                .collect();

            let plan = logic::plan_alerts(farmer_id, &adopted, catalog, &existing, now);
            let inserted = insert_alerts(&tx, plan.events)?;

            tx.commit()?;
            Ok(AlertPlan { events: inserted })
        })
    }

    /// All of a farmer's alerts, soonest first.
    pub fn alerts_for_farmer(&self, farmer_id: i64) -> Result<Vec<StoredAlert>> {
        self.with_conn(|conn| query_alerts(conn, farmer_id))
    }

    pub fn get_alert(&self, id: i64) -> Result<Option<StoredAlert>> {
        self.with_conn(|conn| {
            let alert = conn
                .query_row("SELECT * FROM alerts WHERE id = ?1", [id], row_to_alert)
                .optional()?;
            Ok(alert.flatten())
        })
    }

    pub fn set_alert_status(&self, id: i64, status: AlertStatus) -> Result<()> {
        self.with_conn(|conn| {
            let updated = conn.execute(
                "UPDATE alerts SET status = ?1 WHERE id = ?2",
                params![status.as_str(), id],
            )?;
            if updated == 0 {
                return Err(AdvisorError::NotFound(format!("alert {}", id)));
            }
            Ok(())
        })
    }

    pub fn delete_alert(&self, id: i64) -> Result<()> {
        self.with_conn(|conn| {
            let deleted = conn.execute("DELETE FROM alerts WHERE id = ?1", [id])?;
            if deleted == 0 {
                return Err(AdvisorError::NotFound(format!("alert {}", id)));
            }
            Ok(())
        })
    }
}

/// Store pending alerts, keeping only the events that produced a new row.
fn insert_alerts(conn: &Connection, events: Vec<AlertEvent>) -> Result<Vec<AlertEvent>> {
    let mut stmt = conn.prepare(
        r#"
        INSERT OR IGNORE INTO alerts
            (farmer_id, crop_id, alert_type, alert_date, message, status)
        VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )?;

    let mut inserted = Vec::with_capacity(events.len());
    for event in events {
        let changed = stmt.execute(params![
            event.farmer_id,
            event.crop_id,
            event.alert_type.as_str(),
            event.date.format(DATE_FORMAT).to_string(),
            event.message,
            AlertStatus::Pending.as_str(),
        ])?;
        if changed == 1 {
            inserted.push(event);
        } else {
            warn!(
                crop_id = event.crop_id,
                alert_type = %event.alert_type,
                date = %event.date,
                "Alert slot already taken, skipped"
            );
        }
    }
    Ok(inserted)
}

fn query_alerts(conn: &Connection, farmer_id: i64) -> Result<Vec<StoredAlert>> {
    let mut stmt =
        conn.prepare("SELECT * FROM alerts WHERE farmer_id = ?1 ORDER BY alert_date, id")?;
    let alerts = stmt
        .query_map([farmer_id], row_to_alert)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(alerts.into_iter().flatten().collect())
}

/// `None` for rows whose alert type this build does not know.
fn row_to_alert(row: &Row) -> rusqlite::Result<Option<StoredAlert>> {
    let alert_type_str: String = row.get("alert_type")?;
    let status_str: String = row.get("status")?;
    let date_str: String = row.get("alert_date")?;
    let id: i64 = row.get("id")?;

    let Some(alert_type) = AlertType::from_str(&alert_type_str) else {
        warn!(id, alert_type = %alert_type_str, "Unknown alert_type in database, skipping");
        return Ok(None);
    };
    let status = AlertStatus::from_str(&status_str).unwrap_or_else(|| {
        warn!(id, status = %status_str, "Unknown alert status in database, treating as pending");
        AlertStatus::Pending
    });

    Ok(Some(StoredAlert {
        id,
        event: AlertEvent {
            farmer_id: row.get("farmer_id")?,
            crop_id: row.get("crop_id")?,
            alert_type,
            date: parse_date(&date_str)?,
            message: row.get("message")?,
        },
        status,
    }))
}

fn parse_date(s: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))
}

fn parse_timestamp(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(0, Type::Text, Box::new(e)))
}

trait OptionalExt<T> {
    fn optional(self) -> rusqlite::Result<Option<T>>;
}

impl<T> OptionalExt<T> for rusqlite::Result<T> {
    fn optional(self) -> rusqlite::Result<Option<T>> {
        match self {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}
