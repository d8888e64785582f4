use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Role of a resident or staff account
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    Tenant,
    AirbnbGuest,
    Security,
}

/// Resident or staff account
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub cedula: String,
    pub phone: String,
    pub role: Role,
}

/// One apartment in the complex
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Apartment {
    pub id: i64,
    pub tower: String,
    pub floor: i32,
    pub number: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Late,
}

/// Administration payment owed by a resident for an apartment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: i64,
    pub user_id: i64,
    pub apartment_id: i64,
    pub amount: f64,
    pub concept: String,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
    /// Joined in by the backend for display
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub apartment: Option<Apartment>,
}

/// Scheduled maintenance, party or meeting in a common area
///
/// `event_type` is free text; see [`crate::filters::EventKind`] for the
/// substring classification the dashboard applies.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceEvent {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub area: String,
    pub scheduled_date: NaiveDate,
    #[serde(rename = "type")]
    pub event_type: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
}

/// Damage reported by a resident for an apartment or common area
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageReport {
    pub id: i64,
    pub apartment_id: i64,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub apartment: Option<Apartment>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GuestStatus {
    Pending,
    CheckedIn,
    CheckedOut,
}

/// Airbnb guest registered for a stay in one apartment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AirbnbGuest {
    pub id: i64,
    pub apartment_id: i64,
    pub guest_name: String,
    pub guest_cedula: String,
    pub number_of_guests: u32,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub status: GuestStatus,
    #[serde(default)]
    pub apartment: Option<Apartment>,
}

/// Announcement pushed to residents
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    pub title: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Login result: the bearer credential plus the signed-in profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Successful responses wrap the payload under `data`
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

// Request payloads. The backend assigns ids and timestamps.

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewApartment {
    pub tower: String,
    pub floor: i32,
    pub number: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub user_id: i64,
    pub apartment_id: i64,
    pub amount: f64,
    pub concept: String,
    pub due_date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub cedula: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub area: String,
    pub scheduled_date: NaiveDate,
    #[serde(rename = "type")]
    pub event_type: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub title: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDamageReport {
    pub apartment_id: i64,
    pub title: String,
    pub description: String,
    pub priority: Priority,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGuest {
    pub apartment_id: i64,
    pub guest_name: String,
    pub guest_cedula: String,
    pub number_of_guests: u32,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
}

/// Partial update for a damage report (the dashboard only moves status)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStatusUpdate {
    pub status: ReportStatus,
}
