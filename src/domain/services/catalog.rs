use serde::Serialize;

/// Guests allowed on one service booking.
pub const MAX_SERVICE_GUESTS: i32 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceCategory {
    Spa,
    Dining,
    Facilities,
    Hotel,
}

impl ServiceCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceCategory::Spa => "spa",
            ServiceCategory::Dining => "dining",
            ServiceCategory::Facilities => "facilities",
            ServiceCategory::Hotel => "hotel",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CatalogService {
    pub service_type: &'static str,
    pub service_name: &'static str,
    pub category: ServiceCategory,
    pub price: i64,
    pub duration_min: i32,
    pub description: &'static str,
}

const CATALOG: &[CatalogService] = &[
    CatalogService {
        service_type: "spa-traditional-massage",
        service_name: "Traditional Massage",
        category: ServiceCategory::Spa,
        price: 350_000,
        duration_min: 60,
        description: "Full body massage with warm aromatic oils.",
    },
    CatalogService {
        service_type: "spa-hot-stone",
        service_name: "Hot Stone Therapy",
        category: ServiceCategory::Spa,
        price: 500_000,
        duration_min: 90,
        description: "Heated basalt stones to release deep muscle tension.",
    },
    CatalogService {
        service_type: "spa-facial",
        service_name: "Signature Facial",
        category: ServiceCategory::Spa,
        price: 400_000,
        duration_min: 60,
        description: "Cleansing and hydrating facial treatment.",
    },
    CatalogService {
        service_type: "dining-breakfast-buffet",
        service_name: "Breakfast Buffet",
        category: ServiceCategory::Dining,
        price: 150_000,
        duration_min: 120,
        description: "International breakfast buffet at the main restaurant.",
    },
    CatalogService {
        service_type: "dining-romantic-dinner",
        service_name: "Romantic Dinner",
        category: ServiceCategory::Dining,
        price: 750_000,
        duration_min: 150,
        description: "Five-course dinner served poolside.",
    },
    CatalogService {
        service_type: "dining-in-room",
        service_name: "In-Room Dining",
        category: ServiceCategory::Dining,
        price: 200_000,
        duration_min: 60,
        description: "Selected menu delivered to the room.",
    },
    CatalogService {
        service_type: "facility-tennis-court",
        service_name: "Tennis Court",
        category: ServiceCategory::Facilities,
        price: 100_000,
        duration_min: 60,
        description: "Outdoor court with racket rental.",
    },
    CatalogService {
        service_type: "facility-fitness-class",
        service_name: "Fitness Class",
        category: ServiceCategory::Facilities,
        price: 75_000,
        duration_min: 45,
        description: "Instructor-led group class at the gym.",
    },
    CatalogService {
        service_type: "hotel-airport-transfer",
        service_name: "Airport Transfer",
        category: ServiceCategory::Hotel,
        price: 250_000,
        duration_min: 90,
        description: "Private car between the airport and the hotel.",
    },
    CatalogService {
        service_type: "hotel-laundry",
        service_name: "Laundry Service",
        category: ServiceCategory::Hotel,
        price: 50_000,
        duration_min: 1440,
        description: "Wash and fold, returned within a day.",
    },
];

pub fn all_services() -> &'static [CatalogService] {
    CATALOG
}

pub fn find_service(service_type: &str) -> Option<&'static CatalogService> {
    CATALOG.iter().find(|s| s.service_type == service_type)
}
