//! Client-side list filtering and classification.
//!
//! Every dashboard screen fetches a full list and narrows it in memory:
//! case-insensitive substring search over a handful of display fields, plus
//! an optional exact status or role filter where the page has one. These
//! helpers are pure so the screens stay thin.

use chrono::NaiveDate;

use crate::models::{
    AirbnbGuest, DamageReport, GuestStatus, MaintenanceEvent, Payment, ReportStatus, Role, User,
};

/// Kind of common-area event, derived from the free-text `type` field.
///
/// The backend stores whatever label the organizer typed (in Spanish), so
/// classification is a substring match, not an enum on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Maintenance,
    Party,
    Meeting,
    Other,
}

impl EventKind {
    pub fn classify(event_type: &str) -> Self {
        let lowered = event_type.to_lowercase();
        if lowered.contains("manten") {
            EventKind::Maintenance
        } else if lowered.contains("fiesta") {
            EventKind::Party
        } else if lowered.contains("reuni") {
            EventKind::Meeting
        } else {
            EventKind::Other
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Users screen: role tabs (None = all) plus name search
pub fn filter_users<'a>(
    users: &'a [User],
    role: Option<Role>,
    search: &str,
) -> Vec<&'a User> {
    let search = search.trim();
    users
        .iter()
        .filter(|user| role.map_or(true, |r| user.role == r))
        .filter(|user| search.is_empty() || contains_ci(&user.name, search))
        .collect()
}

/// Payments screen: search over concept, resident name/email and the
/// apartment's number and tower (when the backend joined them in)
pub fn filter_payments<'a>(payments: &'a [Payment], search: &str) -> Vec<&'a Payment> {
    if search.is_empty() {
        return payments.iter().collect();
    }
    payments
        .iter()
        .filter(|payment| {
            contains_ci(&payment.concept, search)
                || payment.user.as_ref().map_or(false, |u| {
                    contains_ci(&u.name, search) || contains_ci(&u.email, search)
                })
                || payment.apartment.as_ref().map_or(false, |a| {
                    contains_ci(&a.number, search) || contains_ci(&a.tower, search)
                })
        })
        .collect()
}

/// Maintenance screen: search over title, description and area
pub fn filter_events<'a>(events: &'a [MaintenanceEvent], search: &str) -> Vec<&'a MaintenanceEvent> {
    if search.is_empty() {
        return events.iter().collect();
    }
    events
        .iter()
        .filter(|event| {
            contains_ci(&event.title, search)
                || contains_ci(&event.description, search)
                || contains_ci(&event.area, search)
        })
        .collect()
}

/// Damage-reports screen: search plus an optional exact status filter
pub fn filter_reports<'a>(
    reports: &'a [DamageReport],
    status: Option<ReportStatus>,
    search: &str,
) -> Vec<&'a DamageReport> {
    reports
        .iter()
        .filter(|report| status.map_or(true, |s| report.status == s))
        .filter(|report| {
            search.is_empty()
                || contains_ci(&report.title, search)
                || contains_ci(&report.description, search)
                || report
                    .apartment
                    .as_ref()
                    .map_or(false, |a| a.number.contains(search))
        })
        .collect()
}

/// Airbnb screen: search over guest name, cedula and apartment number, plus
/// an optional exact status filter
pub fn filter_guests<'a>(
    guests: &'a [AirbnbGuest],
    status: Option<GuestStatus>,
    search: &str,
) -> Vec<&'a AirbnbGuest> {
    guests
        .iter()
        .filter(|guest| status.map_or(true, |s| guest.status == s))
        .filter(|guest| {
            search.is_empty()
                || contains_ci(&guest.guest_name, search)
                || contains_ci(&guest.guest_cedula, search)
                || guest
                    .apartment
                    .as_ref()
                    .map_or(false, |a| a.number.contains(search))
        })
        .collect()
}

/// Counters shown at the top of the Airbnb screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuestStats {
    pub pending_check_in: usize,
    pub check_ins_today: usize,
}

pub fn guest_stats(guests: &[AirbnbGuest], today: NaiveDate) -> GuestStats {
    GuestStats {
        pending_check_in: guests
            .iter()
            .filter(|g| g.status == GuestStatus::Pending)
            .count(),
        check_ins_today: guests.iter().filter(|g| g.check_in_date == today).count(),
    }
}
