//! Reference and sample data for a fresh marketplace.
//!
//! The compatibility table is static reference data shared by every
//! marketplace; the providers and stations are a representative sample
//! of Nigerian workshops and fuel sites used for demos and tests. A few
//! learning hub articles round out the sample.

use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::article::{Article, ArticleCategory};
use crate::located::ServiceKind::{self, Both, Cng, Ev, Hybrid};
use crate::location::{Address, Location};
use crate::station::{Availability, EvChargers, OperatingHours, Station, StationPricing};
use crate::status::StationStatus;
use crate::user::{ConversionPricing, ProviderListing, Role, User};
use crate::vehicle::{CompatibilityRecord, EstimatedCost, FuelType, YearRange};

/// Vehicles with known conversion paths.
pub static COMPATIBILITY_TABLE: Lazy<Vec<CompatibilityRecord>> = Lazy::new(|| {
    vec![
        compatibility(
            "Toyota",
            "Camry",
            (2010, 2024),
            &[Cng, Ev],
            (Some(750_000), Some(3_200_000)),
            "Popular choice for CNG conversion. EV conversion requires battery pack upgrade.",
        ),
        compatibility(
            "Honda",
            "Accord",
            (2012, 2024),
            &[Cng, Ev],
            (Some(780_000), Some(3_400_000)),
            "Excellent compatibility with both conversion types.",
        ),
        compatibility(
            "Nissan",
            "Altima",
            (2013, 2024),
            &[Cng, Ev],
            (Some(720_000), Some(3_100_000)),
            "Good fuel efficiency makes it ideal for conversions.",
        ),
        compatibility(
            "Hyundai",
            "Elantra",
            (2011, 2024),
            &[Cng],
            (Some(680_000), None),
            "CNG conversion only. Compact design limits EV battery placement.",
        ),
    ]
});

fn compatibility(
    make: &str,
    model: &str,
    (start, end): (i32, i32),
    conversion_types: &[ServiceKind],
    (cng, ev): (Option<u64>, Option<u64>),
    notes: &str,
) -> CompatibilityRecord {
    CompatibilityRecord {
        make: make.to_string(),
        model: model.to_string(),
        year_range: YearRange { start, end },
        engine_types: vec![FuelType::Petrol],
        conversion_types: conversion_types.to_vec(),
        estimated_cost: EstimatedCost { cng, ev },
        notes: Some(notes.to_string()),
    }
}

//------------------------------------------------------------------
// Providers
//------------------------------------------------------------------

struct ProviderSeed {
    company: &'static str,
    description: &'static str,
    street: &'static str,
    city: &'static str,
    state: &'static str,
    location: Location,
    services: &'static [ServiceKind],
    certifications: &'static [&'static str],
    pricing: ConversionPricing,
    rating: f64,
    total_reviews: u32,
}

const PROVIDERS: [ProviderSeed; 7] = [
    ProviderSeed {
        company: "GreenTech Auto Solutions",
        description: "Leading CNG conversion specialists with certified technicians and quality assurance.",
        street: "15 Adeola Odeku Street, Victoria Island",
        city: "Lagos",
        state: "Lagos",
        location: Location::new(6.4281, 3.4219),
        services: &[Cng, Ev],
        certifications: &["NMDPRA Certified", "ISO 9001", "NADDC Approved"],
        pricing: ConversionPricing {
            cng_conversion: Some(750_000),
            ev_conversion: Some(3_200_000),
        },
        rating: 4.8,
        total_reviews: 127,
    },
    ProviderSeed {
        company: "EcoMotion Garage",
        description: "Specialized in electric vehicle conversions and hybrid systems.",
        street: "Plot 45, Ahmadu Bello Way, Garki",
        city: "Abuja",
        state: "FCT",
        location: Location::new(9.0579, 7.4951),
        services: &[Ev, Hybrid],
        certifications: &["NMDPRA Certified", "IEEE Member"],
        pricing: ConversionPricing {
            cng_conversion: None,
            ev_conversion: Some(3_800_000),
        },
        rating: 4.6,
        total_reviews: 89,
    },
    ProviderSeed {
        company: "CleanFuel Motors",
        description: "Affordable CNG conversion services with flexible payment plans.",
        street: "12 Bompai Road",
        city: "Kano",
        state: "Kano",
        location: Location::new(12.0022, 8.5919),
        services: &[Cng],
        certifications: &["NMDPRA Certified"],
        pricing: ConversionPricing {
            cng_conversion: Some(680_000),
            ev_conversion: None,
        },
        rating: 4.4,
        total_reviews: 156,
    },
    ProviderSeed {
        company: "PowerDrive Technologies",
        description: "Premium electric vehicle conversion specialists.",
        street: "23 Opebi Road, Ikeja",
        city: "Lagos",
        state: "Lagos",
        location: Location::new(6.6018, 3.3515),
        services: &[Ev],
        certifications: &["IEEE Member", "NADDC Approved"],
        pricing: ConversionPricing {
            cng_conversion: None,
            ev_conversion: Some(4_200_000),
        },
        rating: 4.9,
        total_reviews: 73,
    },
    ProviderSeed {
        company: "EnergyMax Conversions",
        description: "Full-service CNG and hybrid conversion center with a 3-year warranty.",
        street: "156 Aba Road",
        city: "Port Harcourt",
        state: "Rivers",
        location: Location::new(4.8156, 7.0498),
        services: &[Cng, Hybrid],
        certifications: &["NMDPRA Certified", "ISO 9001"],
        pricing: ConversionPricing {
            cng_conversion: Some(720_000),
            ev_conversion: None,
        },
        rating: 4.5,
        total_reviews: 142,
    },
    ProviderSeed {
        company: "Metro Clean Drive",
        description: "Compact vehicle conversions for city driving and commercial fleets.",
        street: "34 Ring Road",
        city: "Ibadan",
        state: "Oyo",
        location: Location::new(7.3775, 3.947),
        services: &[Cng, Ev],
        certifications: &["NMDPRA Certified"],
        pricing: ConversionPricing {
            cng_conversion: Some(700_000),
            ev_conversion: Some(3_600_000),
        },
        rating: 4.3,
        total_reviews: 98,
    },
    ProviderSeed {
        company: "TechAuto Solutions",
        description: "Advanced automotive technology center for all conversion types.",
        street: "67 Zaria Road",
        city: "Kaduna",
        state: "Kaduna",
        location: Location::new(10.5105, 7.4165),
        services: &[Cng, Ev, Hybrid],
        certifications: &["NMDPRA Certified", "IEEE Member", "NADDC Approved"],
        pricing: ConversionPricing {
            cng_conversion: Some(740_000),
            ev_conversion: Some(3_900_000),
        },
        rating: 4.7,
        total_reviews: 156,
    },
];

/// Verified sample providers with complete listings.
pub fn sample_providers() -> Vec<User> {
    PROVIDERS
        .iter()
        .map(|seed| {
            let mut user = User::new(
                mailbox(seed.company, "switchr.ng"),
                Role::Provider {
                    company_name: seed.company.to_string(),
                    listing: Some(ProviderListing {
                        description: seed.description.to_string(),
                        address: Address {
                            street: seed.street.to_string(),
                            city: seed.city.to_string(),
                            state: seed.state.to_string(),
                            location: seed.location,
                        },
                        services: seed.services.to_vec(),
                        certifications: seed.certifications.iter().map(|c| c.to_string()).collect(),
                        pricing: seed.pricing,
                        rating: seed.rating,
                        total_reviews: seed.total_reviews,
                    }),
                },
                None,
            );
            user.is_verified = true;
            user.is_email_verified = true;
            user
        })
        .collect()
}

//------------------------------------------------------------------
// Stations
//------------------------------------------------------------------

struct StationSeed {
    name: &'static str,
    kind: ServiceKind,
    street: &'static str,
    city: &'static str,
    state: &'static str,
    location: Location,
    pricing: StationPricing,
    amenities: &'static [&'static str],
    /// `None` means open around the clock.
    hours: Option<(&'static str, &'static str)>,
    ev_chargers: Option<EvChargers>,
}

const STATIONS: [StationSeed; 9] = [
    StationSeed {
        name: "Total CNG Station Victoria Island",
        kind: Cng,
        street: "Tiamiyu Savage Street, Victoria Island",
        city: "Lagos",
        state: "Lagos",
        location: Location::new(6.4474, 3.4044),
        pricing: StationPricing {
            cng_price: Some(230),
            ev_price: None,
        },
        amenities: &["ATM", "Convenience Store", "Restroom", "WiFi"],
        hours: Some(("06:00", "22:00")),
        ev_chargers: None,
    },
    StationSeed {
        name: "Nipco EV Charging Hub",
        kind: Ev,
        street: "Lekki Phase 1",
        city: "Lagos",
        state: "Lagos",
        location: Location::new(6.4698, 3.5852),
        pricing: StationPricing {
            cng_price: None,
            ev_price: Some(75),
        },
        amenities: &["Fast Charging", "Cafe", "Parking", "Security"],
        hours: None,
        ev_chargers: Some(EvChargers {
            total: 8,
            available: 6,
            fast_chargers: 4,
        }),
    },
    StationSeed {
        name: "Conoil Multi-Energy Station",
        kind: Both,
        street: "Gwarinpa District",
        city: "Abuja",
        state: "FCT",
        location: Location::new(9.1092, 7.4165),
        pricing: StationPricing {
            cng_price: Some(240),
            ev_price: Some(68),
        },
        amenities: &["CNG", "EV Charging", "Petrol", "Diesel", "Shop"],
        hours: None,
        ev_chargers: Some(EvChargers {
            total: 4,
            available: 3,
            fast_chargers: 2,
        }),
    },
    StationSeed {
        name: "Shell CNG Ikeja",
        kind: Cng,
        street: "Oba Akran Avenue, Ikeja",
        city: "Lagos",
        state: "Lagos",
        location: Location::new(6.6018, 3.3515),
        pricing: StationPricing {
            cng_price: Some(225),
            ev_price: None,
        },
        amenities: &["ATM", "Restroom", "Car Wash"],
        hours: Some(("05:30", "23:00")),
        ev_chargers: None,
    },
    StationSeed {
        name: "Mobil SuperCharger Abuja",
        kind: Ev,
        street: "Central Business District",
        city: "Abuja",
        state: "FCT",
        location: Location::new(9.0579, 7.4951),
        pricing: StationPricing {
            cng_price: None,
            ev_price: Some(80),
        },
        amenities: &["Ultra Fast Charging", "VIP Lounge", "WiFi", "Restaurant"],
        hours: None,
        ev_chargers: Some(EvChargers {
            total: 12,
            available: 9,
            fast_chargers: 8,
        }),
    },
    StationSeed {
        name: "NNPC CNG Port Harcourt",
        kind: Cng,
        street: "Aba Road",
        city: "Port Harcourt",
        state: "Rivers",
        location: Location::new(4.8156, 7.0498),
        pricing: StationPricing {
            cng_price: Some(235),
            ev_price: None,
        },
        amenities: &["ATM", "Convenience Store", "Security"],
        hours: Some(("06:00", "22:00")),
        ev_chargers: None,
    },
    StationSeed {
        name: "Tesla Supercharger Lekki",
        kind: Ev,
        street: "Admiralty Way, Lekki Phase 1",
        city: "Lagos",
        state: "Lagos",
        location: Location::new(6.4698, 3.5852),
        pricing: StationPricing {
            cng_price: None,
            ev_price: Some(85),
        },
        amenities: &["Ultra Fast Charging", "Lounge"],
        hours: None,
        ev_chargers: Some(EvChargers {
            total: 16,
            available: 12,
            fast_chargers: 16,
        }),
    },
    StationSeed {
        name: "Oando Energy Hub Kano",
        kind: Both,
        street: "Bompai Road",
        city: "Kano",
        state: "Kano",
        location: Location::new(12.0022, 8.5919),
        pricing: StationPricing {
            cng_price: Some(245),
            ev_price: Some(70),
        },
        amenities: &["CNG", "EV Charging", "Restaurant", "Prayer Room"],
        hours: None,
        ev_chargers: Some(EvChargers {
            total: 6,
            available: 4,
            fast_chargers: 3,
        }),
    },
    StationSeed {
        name: "Forte Oil CNG Ibadan",
        kind: Cng,
        street: "Ring Road",
        city: "Ibadan",
        state: "Oyo",
        location: Location::new(7.3775, 3.947),
        pricing: StationPricing {
            cng_price: Some(220),
            ev_price: None,
        },
        amenities: &["ATM", "Restroom", "Convenience Store"],
        hours: Some(("05:00", "23:30")),
        ev_chargers: None,
    },
];

/// Sample stations, each paired with the station partner who owns it.
pub fn sample_stations() -> Vec<(User, Station)> {
    STATIONS
        .iter()
        .map(|seed| {
            let mut owner = User::new(
                mailbox(seed.name, "energy.ng"),
                Role::StationPartner {
                    company_name: seed.name.to_string(),
                },
                None,
            );
            owner.is_verified = true;
            owner.is_email_verified = true;

            let operating_hours = match seed.hours {
                Some((open, close)) => OperatingHours {
                    open: open.to_string(),
                    close: close.to_string(),
                    is_24_hours: false,
                },
                None => OperatingHours::always(),
            };
            let station = Station {
                uid: Uuid::new_v4(),
                name: seed.name.to_string(),
                kind: seed.kind,
                address: Address {
                    street: seed.street.to_string(),
                    city: seed.city.to_string(),
                    state: seed.state.to_string(),
                    location: seed.location,
                },
                pricing: seed.pricing,
                amenities: seed.amenities.iter().map(|a| a.to_string()).collect(),
                operating_hours,
                status: StationStatus::Operational,
                availability: Availability {
                    cng_available: seed.kind.satisfies(Cng).then_some(true),
                    ev_chargers: seed.ev_chargers,
                },
                owner: owner.uid,
                verified: true,
            };
            (owner, station)
        })
        .collect()
}

//------------------------------------------------------------------
// Articles
//------------------------------------------------------------------

struct ArticleSeed {
    title: &'static str,
    content: &'static str,
    category: ArticleCategory,
    tags: &'static [&'static str],
    published: bool,
    featured: bool,
    read_time_minutes: u32,
    days_ago: i64,
}

const ARTICLES: [ArticleSeed; 5] = [
    ArticleSeed {
        title: "Why CNG Makes Sense for Nigerian Drivers",
        content: "With petrol above 600 naira a liter and CNG near 230, a typical \
                  commuter recovers the cost of a conversion kit in under two years.",
        category: ArticleCategory::Benefits,
        tags: &["CNG", "savings", "fuel prices"],
        published: true,
        featured: true,
        read_time_minutes: 5,
        days_ago: 40,
    },
    ArticleSeed {
        title: "Staying Safe with a CNG Conversion Kit",
        content: "Only use NMDPRA certified workshops, have cylinders inspected \
                  every five years and never ignore the smell of gas.",
        category: ArticleCategory::Safety,
        tags: &["CNG", "safety", "NMDPRA"],
        published: true,
        featured: true,
        read_time_minutes: 6,
        days_ago: 25,
    },
    ArticleSeed {
        title: "Inside the Presidential CNG Initiative",
        content: "The federal programme subsidises conversion kits for commercial \
                  vehicles and funds new refuelling stations across the states.",
        category: ArticleCategory::Government,
        tags: &["policy", "PCNGI", "subsidy"],
        published: true,
        featured: true,
        read_time_minutes: 4,
        days_ago: 10,
    },
    ArticleSeed {
        title: "Routine Maintenance After an EV Conversion",
        content: "Converted EVs have fewer moving parts, but battery cooling, \
                  brake wear and charge port contacts still need regular checks.",
        category: ArticleCategory::Maintenance,
        tags: &["EV", "battery", "maintenance"],
        published: true,
        featured: false,
        read_time_minutes: 7,
        days_ago: 3,
    },
    ArticleSeed {
        title: "Charging at Home: What EV Converts Need",
        content: "A dedicated circuit, a surge protector and a backup plan for \
                  grid outages.",
        category: ArticleCategory::Benefits,
        tags: &["EV", "charging"],
        published: false,
        featured: false,
        read_time_minutes: 3,
        days_ago: 1,
    },
];

/// The editorial account that authors the sample articles.
pub fn editorial_team() -> User {
    let mut editor = User::new(
        "editorial@switchr.ng",
        Role::Admin {
            full_name: "Switchr Editorial".to_string(),
        },
        None,
    );
    editor.is_verified = true;
    editor.is_email_verified = true;
    editor
}

/// Sample learning hub articles written by `author`, including one
/// unpublished draft.
pub fn sample_articles(author: Uuid) -> Vec<Article> {
    let now = Utc::now();
    ARTICLES
        .iter()
        .map(|seed| Article {
            uid: Uuid::new_v4(),
            title: seed.title.to_string(),
            content: seed.content.to_string(),
            category: seed.category,
            tags: seed.tags.iter().map(|t| t.to_string()).collect(),
            author,
            published: seed.published,
            featured: seed.featured,
            read_time_minutes: seed.read_time_minutes,
            created_at: now - Duration::days(seed.days_ago),
        })
        .collect()
}

/// "GreenTech Auto Solutions" -> "greentechautosolutions@switchr.ng"
fn mailbox(name: &str, domain: &str) -> String {
    let local: String = name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();
    format!("{local}@{domain}")
}
