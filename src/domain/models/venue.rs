use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub category: String,
    pub capacity: i32,
    pub price: i64,
    pub description: String,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub is_available: bool,
    pub rating: f64,
    pub review_count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct NewVenueParams {
    pub name: String,
    pub category: String,
    pub capacity: i32,
    pub price: i64,
    pub description: String,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub is_available: bool,
}

impl Venue {
    pub fn new(params: NewVenueParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: params.name,
            category: params.category,
            capacity: params.capacity,
            price: params.price,
            description: params.description,
            amenities: params.amenities,
            images: params.images,
            is_available: params.is_available,
            rating: 0.0,
            review_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A venue as presented for one availability query.
#[derive(Debug, Serialize, Clone)]
pub struct VenueAvailability {
    #[serde(flatten)]
    pub venue: Venue,
    pub available: bool,
}
