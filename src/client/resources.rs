//! One convenience function per backend operation.
//!
//! Every function issues a single call, unwraps the `data` envelope on
//! success, and on failure logs a resource-specific diagnostic and maps the
//! gateway error through [`ApiError::from_gateway`]: callers get the server's
//! structured body when one exists, a generic connection error otherwise.
//! This second catch layer is deliberate and sits on top of the gateway's
//! own normalization.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::error;

use crate::client::error::{ApiError, FailureKind, GatewayError, CONNECTION_MESSAGE};
use crate::client::gateway::ApiClient;
use crate::models::{
    AirbnbGuest, Apartment, DamageReport, Envelope, MaintenanceEvent, NewApartment,
    NewDamageReport, NewEvent, NewGuest, NewNotification, NewPayment, NewUser, Notification,
    Payment, ReportStatusUpdate, Session, User,
};

impl ApiClient {
    /// Issue one call, unwrap the `data` field
    async fn request_data<T: DeserializeOwned>(
        &self,
        diagnostic: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        let response = self
            .send(request)
            .await
            .map_err(|e| demote(diagnostic, e))?;
        match response.json::<Envelope<T>>().await {
            Ok(envelope) => Ok(envelope.data),
            Err(source) => Err(demote(diagnostic, decode_failure(source))),
        }
    }

    /// Issue one call, return the body as-is (deletes have no envelope)
    async fn request_ack(
        &self,
        diagnostic: &str,
        request: RequestBuilder,
    ) -> Result<Value, ApiError> {
        let response = self
            .send(request)
            .await
            .map_err(|e| demote(diagnostic, e))?;
        match response.json::<Value>().await {
            Ok(body) => Ok(body),
            Err(source) => Err(demote(diagnostic, decode_failure(source))),
        }
    }

    // Auth

    pub async fn login(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.request_data("Login failed", self.post("/auth/login").json(&body))
            .await
    }

    // Apartments

    pub async fn apartments(&self) -> Result<Vec<Apartment>, ApiError> {
        self.request_data("Failed to fetch apartments", self.get("/apartments"))
            .await
    }

    pub async fn create_apartment(&self, apartment: &NewApartment) -> Result<Apartment, ApiError> {
        self.request_data(
            "Failed to create apartment",
            self.post("/apartments").json(apartment),
        )
        .await
    }

    pub async fn update_apartment(
        &self,
        id: i64,
        apartment: &NewApartment,
    ) -> Result<Apartment, ApiError> {
        self.request_data(
            "Failed to update apartment",
            self.put(&format!("/apartments/{id}")).json(apartment),
        )
        .await
    }

    pub async fn delete_apartment(&self, id: i64) -> Result<Value, ApiError> {
        self.request_ack(
            "Failed to delete apartment",
            self.delete(&format!("/apartments/{id}")),
        )
        .await
    }

    // Payments

    /// List payments, optionally narrowed to one month (`?month=YYYY-MM`)
    pub async fn payments(&self, month: Option<&str>) -> Result<Vec<Payment>, ApiError> {
        let mut request = self.get("/payments");
        if let Some(month) = month {
            request = request.query(&[("month", month)]);
        }
        self.request_data("Failed to fetch payments", request).await
    }

    pub async fn create_payment(&self, payment: &NewPayment) -> Result<Payment, ApiError> {
        self.request_data(
            "Failed to create payment",
            self.post("/payments").json(payment),
        )
        .await
    }

    pub async fn register_payment_as_paid(&self, id: i64) -> Result<Payment, ApiError> {
        self.request_data(
            "Failed to register payment",
            self.put(&format!("/payments/{id}/pay"))
                .json(&serde_json::json!({})),
        )
        .await
    }

    pub async fn update_payment(&self, id: i64, payment: &NewPayment) -> Result<Payment, ApiError> {
        self.request_data(
            "Failed to update payment",
            self.put(&format!("/payments/{id}")).json(payment),
        )
        .await
    }

    pub async fn delete_payment(&self, id: i64) -> Result<Value, ApiError> {
        self.request_ack(
            "Failed to delete payment",
            self.delete(&format!("/payments/{id}")),
        )
        .await
    }

    // Users

    pub async fn users(&self) -> Result<Vec<User>, ApiError> {
        self.request_data("Failed to fetch users", self.get("/users"))
            .await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<User, ApiError> {
        self.request_data("Failed to create user", self.post("/users").json(user))
            .await
    }

    // Maintenance events

    pub async fn events(&self) -> Result<Vec<MaintenanceEvent>, ApiError> {
        self.request_data("Failed to fetch events", self.get("/maintenance"))
            .await
    }

    pub async fn create_event(&self, event: &NewEvent) -> Result<MaintenanceEvent, ApiError> {
        self.request_data(
            "Failed to create event",
            self.post("/maintenance").json(event),
        )
        .await
    }

    pub async fn update_event(
        &self,
        id: i64,
        event: &NewEvent,
    ) -> Result<MaintenanceEvent, ApiError> {
        self.request_data(
            "Failed to update event",
            self.put(&format!("/maintenance/{id}")).json(event),
        )
        .await
    }

    pub async fn delete_event(&self, id: i64) -> Result<Value, ApiError> {
        self.request_ack(
            "Failed to delete event",
            self.delete(&format!("/maintenance/{id}")),
        )
        .await
    }

    // Notifications

    pub async fn notifications(&self) -> Result<Vec<Notification>, ApiError> {
        self.request_data("Failed to fetch notifications", self.get("/notifications"))
            .await
    }

    pub async fn create_notification(
        &self,
        notification: &NewNotification,
    ) -> Result<Notification, ApiError> {
        self.request_data(
            "Failed to create notification",
            self.post("/notifications").json(notification),
        )
        .await
    }

    pub async fn update_notification(
        &self,
        id: i64,
        notification: &NewNotification,
    ) -> Result<Notification, ApiError> {
        self.request_data(
            "Failed to update notification",
            self.put(&format!("/notifications/{id}")).json(notification),
        )
        .await
    }

    pub async fn delete_notification(&self, id: i64) -> Result<Value, ApiError> {
        self.request_ack(
            "Failed to delete notification",
            self.delete(&format!("/notifications/{id}")),
        )
        .await
    }

    // Damage reports

    /// Reports visible to the signed-in resident
    pub async fn damage_reports(&self) -> Result<Vec<DamageReport>, ApiError> {
        self.request_data(
            "Failed to fetch damage reports",
            self.get("/damage-reports/my-reports"),
        )
        .await
    }

    pub async fn create_damage_report(
        &self,
        report: &NewDamageReport,
    ) -> Result<DamageReport, ApiError> {
        self.request_data(
            "Failed to create damage report",
            self.post("/damage-reports").json(report),
        )
        .await
    }

    pub async fn update_damage_report(
        &self,
        id: i64,
        report: &NewDamageReport,
    ) -> Result<DamageReport, ApiError> {
        self.request_data(
            "Failed to update damage report",
            self.put(&format!("/damage-reports/{id}")).json(report),
        )
        .await
    }

    /// Move a report along pending → in_progress → resolved
    pub async fn update_report_status(
        &self,
        id: i64,
        update: &ReportStatusUpdate,
    ) -> Result<DamageReport, ApiError> {
        self.request_data(
            "Failed to update damage report status",
            self.put(&format!("/damage-reports/{id}")).json(update),
        )
        .await
    }

    pub async fn delete_damage_report(&self, id: i64) -> Result<Value, ApiError> {
        self.request_ack(
            "Failed to delete damage report",
            self.delete(&format!("/damage-reports/{id}")),
        )
        .await
    }

    // Airbnb guests

    pub async fn guests(&self) -> Result<Vec<AirbnbGuest>, ApiError> {
        self.request_data("Failed to fetch Airbnb guests", self.get("/airbnb/guests"))
            .await
    }

    /// Guests currently staying in the complex
    pub async fn active_guests(&self) -> Result<Vec<AirbnbGuest>, ApiError> {
        self.request_data(
            "Failed to fetch active guests",
            self.get("/airbnb/guests/active"),
        )
        .await
    }

    pub async fn create_guest(&self, guest: &NewGuest) -> Result<AirbnbGuest, ApiError> {
        self.request_data(
            "Failed to create Airbnb guest",
            self.post("/airbnb/guests").json(guest),
        )
        .await
    }

    pub async fn update_guest(&self, id: i64, guest: &NewGuest) -> Result<AirbnbGuest, ApiError> {
        self.request_data(
            "Failed to update Airbnb guest",
            self.put(&format!("/airbnb/guests/{id}")).json(guest),
        )
        .await
    }

    pub async fn check_in_guest(&self, id: i64) -> Result<AirbnbGuest, ApiError> {
        self.request_data(
            "Failed to check in guest",
            self.put(&format!("/airbnb/guests/{id}/checkin")),
        )
        .await
    }

    pub async fn delete_guest(&self, id: i64) -> Result<Value, ApiError> {
        self.request_ack(
            "Failed to delete Airbnb guest",
            self.delete(&format!("/airbnb/guests/{id}")),
        )
        .await
    }
}

/// Resource-level catch: log the diagnostic, then let the server's
/// structured body (when captured) win over the gateway message.
fn demote(diagnostic: &str, gateway: GatewayError) -> ApiError {
    match &gateway.body {
        Some(body) => error!("{diagnostic}: {body}"),
        None => error!("{diagnostic}: {gateway}"),
    }
    ApiError::from_gateway(gateway)
}

/// A success response whose body did not decode still surfaces as an error
fn decode_failure(source: reqwest::Error) -> GatewayError {
    GatewayError {
        user_message: CONNECTION_MESSAGE.to_string(),
        kind: FailureKind::Decode,
        status: None,
        body: None,
        source: Some(source),
    }
}
