//! Catalog entities

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use std::str::FromStr;

use super::value_objects::{ServiceId, parse_features};

/// Fractional digits stored for a price (`NUMERIC(12, 2)`)
const PRICE_SCALE: u32 = 2;
/// Exclusive upper bound on a price, 10^10
const PRICE_LIMIT: Decimal = Decimal::from_parts(1_410_065_408, 2, 0, false, 0);
use crate::domain::errors::{DomainError, optional_field, require_field};

/// A bookable service offered by the business
#[derive(Debug, Clone, PartialEq)]
pub struct Service {
    pub service_id: ServiceId,
    pub title: String,
    pub description: String,
    /// List price, used as the fallback price for bookings without an amount
    pub price: Decimal,
    pub category: String,
    pub image_url: Option<String>,
    /// Object storage path backing `image_url`
    pub image_path: Option<String>,
    pub is_active: bool,
    pub features: Vec<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Service {
    pub fn new(draft: ServiceDraft) -> Self {
        let now = Utc::now();
        Self {
            service_id: ServiceId::generate(),
            title: draft.title,
            description: draft.description,
            price: draft.price,
            category: draft.category,
            image_url: draft.image_url,
            image_path: draft.image_path,
            is_active: draft.is_active,
            features: draft.features,
            duration: draft.duration,
            location: draft.location,
            created_at: now,
            updated_at: now,
        }
    }

    /// Overwrite the editable fields with a validated draft
    pub fn apply(&mut self, draft: ServiceDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.price = draft.price;
        self.category = draft.category;
        self.image_url = draft.image_url;
        self.image_path = draft.image_path;
        self.is_active = draft.is_active;
        self.features = draft.features;
        self.duration = draft.duration;
        self.location = draft.location;
        self.updated_at = Utc::now();
    }
}

/// Service form as submitted by the console, before validation
#[derive(Debug, Clone, Default)]
pub struct ServiceForm {
    pub title: String,
    pub description: String,
    /// Free text; must parse as a non-negative decimal
    pub price: String,
    pub category: String,
    /// Comma-separated
    pub features: String,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
    pub is_active: Option<bool>,
}

/// Validated service fields
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceDraft {
    pub title: String,
    pub description: String,
    pub price: Decimal,
    pub category: String,
    pub features: Vec<String>,
    pub duration: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub image_path: Option<String>,
    pub is_active: bool,
}

impl ServiceForm {
    /// Validate the form before anything is written
    pub fn validate(self) -> Result<ServiceDraft, DomainError> {
        let title = require_field("title", &self.title)?;
        let description = require_field("description", &self.description)?;
        let price = require_field("price", &self.price)?;
        let category = require_field("category", &self.category)?;

        let price = Decimal::from_str(&price)
            .map_err(|_| DomainError::validation("price", format!("'{}' is not a number", price)))?;
        if price.is_sign_negative() {
            return Err(DomainError::validation("price", "price cannot be negative"));
        }
        if price.normalize().scale() > PRICE_SCALE {
            return Err(DomainError::validation(
                "price",
                format!("price cannot have more than {} decimal places", PRICE_SCALE),
            ));
        }
        if price >= PRICE_LIMIT {
            return Err(DomainError::validation(
                "price",
                format!("price must be below {}", PRICE_LIMIT),
            ));
        }
        let mut price = price;
        price.rescale(PRICE_SCALE);

        Ok(ServiceDraft {
            title,
            description,
            price,
            category,
            features: parse_features(&self.features),
            duration: optional_field(self.duration),
            location: optional_field(self.location),
            image_url: optional_field(self.image_url),
            image_path: optional_field(self.image_path),
            is_active: self.is_active.unwrap_or(true),
        })
    }
}

/// Filter applied to the service list
#[derive(Debug, Clone, Default)]
pub struct ServiceQuery {
    /// Matched case-insensitively against title and description
    pub search: Option<String>,
    /// Exact category match
    pub category: Option<String>,
}

impl ServiceQuery {
    pub fn matches(&self, service: &Service) -> bool {
        if let Some(category) = self.category.as_deref()
            && !service.category.eq_ignore_ascii_case(category)
        {
            return false;
        }

        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => {
                let term = term.to_lowercase();
                service.title.to_lowercase().contains(&term)
                    || service.description.to_lowercase().contains(&term)
            }
            _ => true,
        }
    }
}
