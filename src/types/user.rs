//! Users, their marketplace roles, and the identity handed to request
//! handlers.
//!
//! A provider is not a separate record: it is a [`User`] whose
//! [`Role`] is [`Role::Provider`]. The provider's public listing lives
//! inside the role and is optional until the provider completes
//! onboarding.
//!
//! Sign-in happens outside this crate. Handlers only see a
//! [`CurrentIdentity`], obtained through the [`AuthContext`] trait, so
//! tests and callers can hand in whatever identity they like.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::located::{Locatable, ServiceKind};
use super::location::{Address, Location};
use crate::error::{Error, Result};

/// Rating given to a provider listing before anyone has reviewed it.
pub const INITIAL_PROVIDER_RATING: f64 = 4.0;

//------------------------------------------------------------------
// Identity
//------------------------------------------------------------------

/// Who is making the current request, as vouched for by the identity
/// provider.
#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct CurrentIdentity {
    pub user_id: Uuid,
    pub email: String,
}

/// Capability to resolve the caller of a request.
pub trait AuthContext {
    fn identity(&self) -> Option<CurrentIdentity>;
}

impl AuthContext for CurrentIdentity {
    fn identity(&self) -> Option<CurrentIdentity> {
        Some(self.clone())
    }
}

impl<T: AuthContext> AuthContext for Option<T> {
    fn identity(&self) -> Option<CurrentIdentity> {
        self.as_ref().and_then(AuthContext::identity)
    }
}

/// A request made without signing in.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl AuthContext for Anonymous {
    fn identity(&self) -> Option<CurrentIdentity> {
        None
    }
}

//------------------------------------------------------------------
// Roles and permissions
//------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewBookings,
    ManageBookings,
    ViewCustomers,
    ViewAnalytics,
    EditProfile,
    ViewDocuments,
    ManageStations,
}

impl Permission {
    pub const ALL: [Permission; 7] = [
        Permission::ViewBookings,
        Permission::ManageBookings,
        Permission::ViewCustomers,
        Permission::ViewAnalytics,
        Permission::EditProfile,
        Permission::ViewDocuments,
        Permission::ManageStations,
    ];
}

/// Quoted conversion prices, in naira.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ConversionPricing {
    pub cng_conversion: Option<u64>,
    pub ev_conversion: Option<u64>,
}

/// The public face of a conversion workshop.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ProviderListing {
    pub description: String,
    pub address: Address,
    pub services: Vec<ServiceKind>,
    pub certifications: Vec<String>,
    pub pricing: ConversionPricing,

    /// Mean review score in [1, 5].
    pub rating: f64,
    pub total_reviews: u32,
}

impl ProviderListing {
    pub fn offers(&self, kind: ServiceKind) -> bool {
        self.services.contains(&kind)
    }

    /// Folds one more review score into the running mean.
    pub fn record_review(&mut self, rating: u8) {
        let total = f64::from(self.total_reviews);
        self.total_reviews += 1;
        self.rating = (self.rating * total + f64::from(rating)) / f64::from(self.total_reviews);
    }
}

/// What a user does on the marketplace. Each variant carries only the
/// fields that make sense for it.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Role {
    VehicleOwner {
        full_name: String,
    },
    Provider {
        company_name: String,
        listing: Option<ProviderListing>,
    },
    StationPartner {
        company_name: String,
    },
    Admin {
        full_name: String,
    },
}

impl Role {
    pub fn permissions(&self) -> &'static [Permission] {
        match self {
            Role::VehicleOwner { .. } => &[
                Permission::ViewBookings,
                Permission::EditProfile,
                Permission::ViewDocuments,
            ],
            Role::Provider { .. } => &[
                Permission::ManageBookings,
                Permission::ViewCustomers,
                Permission::ViewAnalytics,
                Permission::EditProfile,
            ],
            Role::StationPartner { .. } => &[Permission::ManageStations, Permission::EditProfile],
            Role::Admin { .. } => &Permission::ALL,
        }
    }

    pub fn is_provider(&self) -> bool {
        matches!(self, Role::Provider { .. })
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub struct Preferences {
    pub notifications: bool,
    pub newsletter: bool,
    pub language: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            notifications: true,
            newsletter: false,
            language: "en".to_string(),
        }
    }
}

//------------------------------------------------------------------
// Users
//------------------------------------------------------------------

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct User {
    pub uid: Uuid,
    pub email: String,
    pub role: Role,
    pub phone: Option<String>,
    pub is_verified: bool,
    pub is_email_verified: bool,
    pub created_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub preferences: Preferences,
}

impl User {
    /// A freshly registered, unverified user.
    pub fn new(email: impl Into<String>, role: Role, phone: Option<String>) -> Self {
        User {
            uid: Uuid::new_v4(),
            email: email.into(),
            role,
            phone,
            is_verified: false,
            is_email_verified: false,
            created_at: Utc::now(),
            last_login_at: None,
            preferences: Preferences::default(),
        }
    }

    /// Company name for businesses, personal name for everyone else.
    pub fn display_name(&self) -> &str {
        match &self.role {
            Role::Provider { company_name, .. } | Role::StationPartner { company_name } => {
                company_name
            }
            Role::VehicleOwner { full_name } | Role::Admin { full_name } => full_name,
        }
    }

    /// Avatar initials, e.g. "GA" for "GreenTech Auto".
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.role.permissions().contains(&permission)
    }

    pub fn listing(&self) -> Option<&ProviderListing> {
        match &self.role {
            Role::Provider { listing, .. } => listing.as_ref(),
            _ => None,
        }
    }

    pub fn listing_mut(&mut self) -> Option<&mut ProviderListing> {
        match &mut self.role {
            Role::Provider { listing, .. } => listing.as_mut(),
            _ => None,
        }
    }
}

impl Locatable for User {
    fn uid(&self) -> Uuid {
        self.uid
    }

    fn location(&self) -> Option<&Location> {
        self.listing().map(|listing| &listing.address.location)
    }

    fn categories(&self) -> &[ServiceKind] {
        self.listing()
            .map(|listing| listing.services.as_slice())
            .unwrap_or(&[])
    }
}

/// Partial update of a provider listing. Only the fields that are set
/// are written.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderProfileUpdate {
    pub description: Option<String>,
    pub address: Option<Address>,
    pub services: Option<Vec<ServiceKind>>,
    pub certifications: Option<Vec<String>>,
    pub pricing: Option<ConversionPricing>,
}

impl ProviderProfileUpdate {
    /// Merges the update into `listing`. A missing listing is created,
    /// which requires an address.
    pub fn apply(self, listing: &mut Option<ProviderListing>) -> Result<()> {
        if let Some(address) = &self.address {
            address.location.validate()?;
        }

        let mut current = match listing.take() {
            Some(current) => current,
            None => {
                let address = self.address.clone().ok_or_else(|| {
                    Error::InvalidInput("a new provider listing needs an address".to_string())
                })?;
                ProviderListing {
                    description: String::new(),
                    address,
                    services: Vec::new(),
                    certifications: Vec::new(),
                    pricing: ConversionPricing::default(),
                    rating: INITIAL_PROVIDER_RATING,
                    total_reviews: 0,
                }
            }
        };

        if let Some(description) = self.description {
            current.description = description;
        }
        if let Some(address) = self.address {
            current.address = address;
        }
        if let Some(services) = self.services {
            current.services = services;
        }
        if let Some(certifications) = self.certifications {
            current.certifications = certifications;
        }
        if let Some(pricing) = self.pricing {
            current.pricing = pricing;
        }
        *listing = Some(current);
        Ok(())
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------
