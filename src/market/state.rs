//! Stores the state of the marketplace
//!
//! [`Marketplace`] owns every record and exposes the request level
//! operations. Records are kept in insertion order, which is also the
//! tie-break order for proximity ranking.

use chrono::Utc;
use serde::Deserialize;
use uuid::Uuid;

use super::seed::{
    editorial_team, sample_articles, sample_providers, sample_stations, COMPATIBILITY_TABLE,
};
use crate::algorithms::estimator::{
    check_compatibility, estimate_savings, Compatibility, SavingsReport,
};
use crate::algorithms::ranking::{find_nearest, NearestQuery};
use crate::article::{Article, ArticleCategory};
use crate::booking::{
    Booking, BookingStatus, BookingView, NewBooking, Review, ReviewAuthor, ReviewTarget, ReviewView,
    RATING_RANGE,
};
use crate::config::MarketConfig;
use crate::error::{Error, Result};
use crate::located::ServiceKind;
use crate::location::Location;
use crate::ranked::Ranked;
use crate::station::{Availability, NewStation, Station};
use crate::status::StationStatus;
use crate::user::{AuthContext, CurrentIdentity, ProviderProfileUpdate, Role, User};
use crate::vehicle::{CompatibilityRecord, ConversionType, FuelType, VehicleProfile, VehicleQuery};

/// Filters for [`Marketplace::list_providers`]. Unset fields match
/// everything.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProviderFilter {
    /// Compared without regard to case.
    pub city: Option<String>,
    /// Keeps providers offering any of these. An empty list matches
    /// everything.
    pub services: Option<Vec<ServiceKind>>,
    pub verified: Option<bool>,
}

/// Filters for [`Marketplace::list_stations`]. Every set field must
/// match exactly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StationFilter {
    pub city: Option<String>,
    pub state: Option<String>,
    pub kind: Option<ServiceKind>,
    pub status: Option<StationStatus>,
}

/// Filters for [`Marketplace::list_articles`]. Every set field must
/// match.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ArticleFilter {
    pub category: Option<ArticleCategory>,
    pub featured: Option<bool>,
    pub published: Option<bool>,
}

/// Savings calculator form, with fuel and conversion types still as
/// typed by the user.
#[derive(Debug, Clone, Deserialize)]
pub struct SavingsRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub current_fuel_type: String,
    pub monthly_distance_km: f64,
    pub fuel_efficiency_km_per_liter: f64,
    pub conversion_type: String,
}

impl SavingsRequest {
    fn parse(&self) -> Result<(VehicleProfile, ConversionType)> {
        let current_fuel_type: FuelType = self.current_fuel_type.parse()?;
        let conversion: ConversionType = self.conversion_type.parse()?;
        let profile = VehicleProfile {
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year,
            current_fuel_type,
            monthly_distance_km: self.monthly_distance_km,
            fuel_efficiency_km_per_liter: self.fuel_efficiency_km_per_liter,
        };
        Ok((profile, conversion))
    }
}

/// In-process record store and request handlers.
#[derive(Debug, Clone)]
pub struct Marketplace {
    config: MarketConfig,
    users: Vec<User>,
    stations: Vec<Station>,
    bookings: Vec<Booking>,
    reviews: Vec<Review>,
    articles: Vec<Article>,
    compatibility: Vec<CompatibilityRecord>,
}

impl Marketplace {
    /// An empty marketplace with the reference compatibility table.
    pub fn new(config: MarketConfig) -> Result<Self> {
        config.validate()?;
        Ok(Marketplace {
            config,
            users: Vec::new(),
            stations: Vec::new(),
            bookings: Vec::new(),
            reviews: Vec::new(),
            articles: Vec::new(),
            compatibility: COMPATIBILITY_TABLE.clone(),
        })
    }

    /// A marketplace loaded with the sample providers, stations and
    /// articles.
    pub fn seeded(config: MarketConfig) -> Result<Self> {
        let mut market = Self::new(config)?;
        market.seed();
        Ok(market)
    }

    /// Loads the sample data into an empty marketplace.
    ///
    /// # Returns
    /// `false`, without touching anything, when users or stations are
    /// already present.
    pub fn seed(&mut self) -> bool {
        if !self.users.is_empty() || !self.stations.is_empty() {
            info!("Marketplace already populated, skipping seed");
            return false;
        }

        self.users.extend(sample_providers());
        for (owner, station) in sample_stations() {
            self.users.push(owner);
            self.stations.push(station);
        }
        let editor = editorial_team();
        self.articles.extend(sample_articles(editor.uid));
        self.users.push(editor);
        info!(
            "Seeded {} users, {} stations and {} articles",
            self.users.len(),
            self.stations.len(),
            self.articles.len()
        );
        true
    }

    pub fn config(&self) -> &MarketConfig {
        &self.config
    }

    //--------------------------------------------------------------
    // Users
    //--------------------------------------------------------------

    /// Creates an unverified user. Providers start without a listing.
    ///
    /// # Returns
    /// The new user's id, or [`Error::EmailTaken`] when another user
    /// already has the address (compared without regard to case).
    pub fn register_user(&mut self, email: &str, role: Role, phone: Option<String>) -> Result<Uuid> {
        if let Role::Provider {
            listing: Some(_), ..
        } = &role
        {
            warn!("Rejecting pre-filled provider listing for {}", email);
            return Err(Error::InvalidInput(
                "provider listings are created with a profile update".to_string(),
            ));
        }
        let email = email.trim();
        if !email.contains('@') {
            warn!("Rejecting email {:?}", email);
            return Err(Error::InvalidInput(format!("not an email address: {email:?}")));
        }
        if self.users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
            warn!("Email {} already registered", email);
            return Err(Error::EmailTaken(email.to_string()));
        }

        let user = User::new(email, role, phone);
        let uid = user.uid;
        self.users.push(user);
        info!("Registered user {}", uid);
        Ok(uid)
    }

    /// The caller's user record, stamped with a fresh login time.
    pub fn logged_in_user(&mut self, auth: &impl AuthContext) -> Option<&User> {
        let identity = auth.identity()?;
        let index = self.find_user(&identity)?;
        let user = &mut self.users[index];
        user.last_login_at = Some(Utc::now());
        debug!("user {} logged in", user.uid);
        Some(&*user)
    }

    //--------------------------------------------------------------
    // Providers
    //--------------------------------------------------------------

    pub fn list_providers(&self, filter: &ProviderFilter) -> Vec<&User> {
        debug!("provider filter: {:?}", filter);
        self.users
            .iter()
            .filter(|u| u.role.is_provider())
            .filter(|u| filter.verified.map_or(true, |verified| u.is_verified == verified))
            .filter(|u| match &filter.city {
                Some(city) => u
                    .listing()
                    .is_some_and(|l| l.address.city.eq_ignore_ascii_case(city.trim())),
                None => true,
            })
            .filter(|u| match &filter.services {
                Some(services) if !services.is_empty() => u
                    .listing()
                    .is_some_and(|l| services.iter().any(|kind| l.offers(*kind))),
                _ => true,
            })
            .collect()
    }

    /// Looks up a user with the provider role.
    pub fn get_provider(&self, uid: Uuid) -> Result<&User> {
        self.users
            .iter()
            .find(|u| u.uid == uid && u.role.is_provider())
            .ok_or(Error::NotFound {
                kind: "provider",
                uid,
            })
    }

    /// The caller, when signed in as a provider.
    pub fn current_provider(&self, auth: &impl AuthContext) -> Option<&User> {
        self.caller(auth).ok().filter(|u| u.role.is_provider())
    }

    /// Merges `update` into the caller's provider listing.
    pub fn update_provider_profile(
        &mut self,
        auth: &impl AuthContext,
        update: ProviderProfileUpdate,
    ) -> Result<&User> {
        let index = self.caller_index(auth)?;
        let user = &mut self.users[index];
        match &mut user.role {
            Role::Provider { listing, .. } => update.apply(listing)?,
            _ => {
                warn!("User {} is not a provider", user.uid);
                return Err(Error::Unauthorized(
                    "only providers can edit a provider profile".to_string(),
                ));
            }
        }
        info!("Updated provider profile {}", user.uid);
        Ok(&self.users[index])
    }

    /// Providers with a listing, nearest first.
    ///
    /// # Arguments
    /// * `reference` - The search point.
    /// * `query` - Ranking filters. A missing radius falls back to the
    ///   configured default.
    pub fn nearby_providers(
        &self,
        reference: &Location,
        query: NearestQuery,
    ) -> Result<Vec<Ranked<'_, User>>> {
        let candidates = self.users.iter().filter(|u| u.role.is_provider());
        find_nearest(reference, candidates, self.with_default_radius(query))
    }

    //--------------------------------------------------------------
    // Stations
    //--------------------------------------------------------------

    pub fn list_stations(&self, filter: &StationFilter) -> Vec<&Station> {
        debug!("station filter: {:?}", filter);
        self.stations
            .iter()
            .filter(|s| filter.city.as_ref().map_or(true, |city| s.address.city == *city))
            .filter(|s| filter.state.as_ref().map_or(true, |state| s.address.state == *state))
            .filter(|s| filter.kind.map_or(true, |kind| s.kind == kind))
            .filter(|s| filter.status.map_or(true, |status| s.status == status))
            .collect()
    }

    pub fn get_station(&self, uid: Uuid) -> Result<&Station> {
        self.stations
            .iter()
            .find(|s| s.uid == uid)
            .ok_or(Error::NotFound {
                kind: "station",
                uid,
            })
    }

    /// Stations nearest first. A missing radius falls back to the
    /// configured default.
    pub fn nearby_stations(
        &self,
        reference: &Location,
        query: NearestQuery,
    ) -> Result<Vec<Ranked<'_, Station>>> {
        find_nearest(reference, &self.stations, self.with_default_radius(query))
    }

    /// Lists a new, unverified station owned by the caller. Any signed-in
    /// user may list one; verification happens afterwards.
    pub fn create_station(&mut self, auth: &impl AuthContext, request: NewStation) -> Result<Uuid> {
        let caller = self.caller(auth)?;
        let station = request.into_station(caller.uid)?;
        let uid = station.uid;
        info!("Listed station {} ({})", station.name, uid);
        self.stations.push(station);
        Ok(uid)
    }

    /// Replaces a station's live availability. Only the owner may do so.
    pub fn update_station_availability(
        &mut self,
        auth: &impl AuthContext,
        station: Uuid,
        availability: Availability,
    ) -> Result<&Station> {
        let caller = self.caller(auth)?.uid;
        let record = self
            .stations
            .iter_mut()
            .find(|s| s.uid == station)
            .ok_or(Error::NotFound {
                kind: "station",
                uid: station,
            })?;
        if record.owner != caller {
            warn!("User {} does not own station {}", caller, station);
            return Err(Error::Unauthorized(
                "only the station owner can update availability".to_string(),
            ));
        }
        availability.validate()?;

        record.availability = availability;
        debug!("station {} availability: {:?}", station, availability);
        Ok(&*record)
    }

    //--------------------------------------------------------------
    // Bookings
    //--------------------------------------------------------------

    /// Books a conversion with a provider that offers it.
    pub fn create_booking(&mut self, auth: &impl AuthContext, request: NewBooking) -> Result<Uuid> {
        let user = self.caller(auth)?.uid;
        let provider = self.get_provider(request.provider)?;
        let offered = provider
            .listing()
            .is_some_and(|l| l.offers(request.conversion_type));
        if !offered {
            warn!(
                "Provider {} does not offer {}",
                provider.uid, request.conversion_type
            );
            return Err(Error::ServiceNotOffered(request.conversion_type));
        }

        let booking = Booking {
            uid: Uuid::new_v4(),
            user,
            provider: request.provider,
            vehicle: request.vehicle,
            conversion_type: request.conversion_type,
            scheduled_for: request.scheduled_for,
            status: BookingStatus::Pending,
            total_cost: request.total_cost,
            notes: request.notes,
            created_at: Utc::now(),
        };
        let uid = booking.uid;
        self.bookings.push(booking);
        info!("Booked {} with provider {}", uid, request.provider);
        Ok(uid)
    }

    /// The caller's bookings with the provider each was made with,
    /// newest first. Empty when signed out.
    pub fn user_bookings(&self, auth: &impl AuthContext) -> Vec<BookingView<'_>> {
        let Ok(caller) = self.caller(auth) else {
            return Vec::new();
        };
        self.bookings
            .iter()
            .rev()
            .filter(|b| b.user == caller.uid)
            .map(|booking| BookingView {
                booking,
                provider: self.get_provider(booking.provider).ok(),
            })
            .collect()
    }

    /// Bookings made with `provider`, newest first. Only the provider
    /// may list them.
    pub fn provider_bookings(&self, auth: &impl AuthContext, provider: Uuid) -> Result<Vec<&Booking>> {
        let caller = self.caller(auth)?.uid;
        if caller != provider {
            warn!("User {} asked for bookings of provider {}", caller, provider);
            return Err(Error::Unauthorized(
                "providers can only list their own bookings".to_string(),
            ));
        }
        Ok(self
            .bookings
            .iter()
            .rev()
            .filter(|b| b.provider == provider)
            .collect())
    }

    /// Moves a booking along. Only the booking's provider may do so.
    pub fn update_booking_status(
        &mut self,
        auth: &impl AuthContext,
        booking: Uuid,
        status: BookingStatus,
    ) -> Result<&Booking> {
        let caller = self.caller(auth)?.uid;
        let record = self
            .bookings
            .iter_mut()
            .find(|b| b.uid == booking)
            .ok_or(Error::NotFound {
                kind: "booking",
                uid: booking,
            })?;
        if record.provider != caller {
            warn!("User {} cannot update booking {}", caller, booking);
            return Err(Error::Unauthorized(
                "only the booked provider can update a booking".to_string(),
            ));
        }
        if !record.status.can_become(status) {
            warn!("Booking {}: {} -> {} refused", booking, record.status, status);
            return Err(Error::InvalidTransition {
                from: record.status,
                to: status,
            });
        }

        info!("Booking {}: {} -> {}", booking, record.status, status);
        record.status = status;
        Ok(&*record)
    }

    //--------------------------------------------------------------
    // Reviews
    //--------------------------------------------------------------

    /// Records the caller's review of a provider or station.
    ///
    /// A provider review is folded into the listing's running rating.
    pub fn create_review(
        &mut self,
        auth: &impl AuthContext,
        target: ReviewTarget,
        rating: u8,
        comment: &str,
    ) -> Result<Uuid> {
        let user = self.caller(auth)?.uid;
        if !RATING_RANGE.contains(&rating) {
            warn!("Rejecting rating {}", rating);
            return Err(Error::InvalidInput(format!(
                "rating must be between {} and {}, got {rating}",
                RATING_RANGE.start(),
                RATING_RANGE.end()
            )));
        }
        match target {
            ReviewTarget::Provider(uid) => {
                self.get_provider(uid)?;
            }
            ReviewTarget::Station(uid) => {
                self.get_station(uid)?;
            }
        }
        if self.reviews.iter().any(|r| r.user == user && r.target == target) {
            return Err(Error::AlreadyReviewed(target.kind()));
        }

        let review = Review {
            uid: Uuid::new_v4(),
            user,
            target,
            rating,
            comment: comment.to_string(),
            verified: false,
            created_at: Utc::now(),
        };
        let uid = review.uid;
        self.reviews.push(review);

        if let ReviewTarget::Provider(provider) = target {
            if let Some(listing) = self
                .users
                .iter_mut()
                .find(|u| u.uid == provider)
                .and_then(User::listing_mut)
            {
                listing.record_review(rating);
                debug!(
                    "provider {} rating now {:.2} over {} reviews",
                    provider, listing.rating, listing.total_reviews
                );
            }
        }
        info!("Recorded {} review {}", target.kind(), uid);
        Ok(uid)
    }

    /// Reviews of `target` with their authors, newest first.
    pub fn reviews_for(&self, target: ReviewTarget) -> Vec<ReviewView<'_>> {
        self.reviews
            .iter()
            .rev()
            .filter(|r| r.target == target)
            .map(|review| ReviewView {
                review,
                author: self
                    .users
                    .iter()
                    .find(|u| u.uid == review.user)
                    .map(|u| ReviewAuthor {
                        name: u.display_name(),
                        email: &u.email,
                    }),
            })
            .collect()
    }

    //--------------------------------------------------------------
    // Articles
    //--------------------------------------------------------------

    /// Articles matching `filter`, newest first.
    pub fn list_articles(&self, filter: &ArticleFilter) -> Vec<&Article> {
        debug!("article filter: {:?}", filter);
        let mut articles: Vec<&Article> = self
            .articles
            .iter()
            .filter(|a| filter.category.map_or(true, |category| a.category == category))
            .filter(|a| filter.featured.map_or(true, |featured| a.featured == featured))
            .filter(|a| filter.published.map_or(true, |published| a.published == published))
            .collect();
        articles.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        articles
    }

    pub fn get_article(&self, uid: Uuid) -> Result<&Article> {
        self.articles
            .iter()
            .find(|a| a.uid == uid)
            .ok_or(Error::NotFound {
                kind: "article",
                uid,
            })
    }

    //--------------------------------------------------------------
    // Conversions
    //--------------------------------------------------------------

    pub fn check_compatibility(&self, vehicle: &VehicleQuery) -> Compatibility {
        let verdict = check_compatibility(vehicle, &self.compatibility);
        debug!("{}: {:?}", vehicle, verdict);
        verdict
    }

    /// Parses the calculator form and projects savings at the configured
    /// fuel prices, rounded for display.
    pub fn calculate_savings(&self, request: &SavingsRequest) -> Result<SavingsReport> {
        info!(
            "Calculating {} savings for {} {}",
            request.conversion_type, request.make, request.model
        );
        let (profile, conversion) = request.parse()?;
        let report = estimate_savings(&profile, conversion, &self.config.fuel_prices)?.into_report();
        info!("Payback: {}", report.payback);
        Ok(report)
    }

    //--------------------------------------------------------------
    // Private functions
    //--------------------------------------------------------------

    fn with_default_radius(&self, query: NearestQuery) -> NearestQuery {
        NearestQuery {
            radius_km: query.radius_km.or(Some(self.config.default_radius_km)),
            ..query
        }
    }

    fn find_user(&self, identity: &CurrentIdentity) -> Option<usize> {
        self.users
            .iter()
            .position(|u| u.uid == identity.user_id)
            .or_else(|| {
                self.users
                    .iter()
                    .position(|u| u.email.eq_ignore_ascii_case(&identity.email))
            })
    }

    fn caller_index(&self, auth: &impl AuthContext) -> Result<usize> {
        let Some(identity) = auth.identity() else {
            warn!("Rejecting anonymous request");
            return Err(Error::NotAuthenticated);
        };
        self.find_user(&identity).ok_or_else(|| {
            warn!("No user for identity {}", identity.email);
            Error::NotAuthenticated
        })
    }

    fn caller(&self, auth: &impl AuthContext) -> Result<&User> {
        let index = self.caller_index(auth)?;
        Ok(&self.users[index])
    }
}

//------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------

#[cfg(test)]
mod state_tests {
    use super::*;
    use crate::algorithms::estimator::{IncompatibleReason, Payback};
    use crate::location::Address;
    use crate::station::{EvChargers, OperatingHours, StationPricing};
    use crate::user::Anonymous;
    use crate::vehicle::VehicleInfo;
    use chrono::Duration;

    const LAGOS_VI: Location = Location::new(6.4281, 3.4219);

    fn market() -> Marketplace {
        Marketplace::seeded(MarketConfig::default()).unwrap()
    }

    fn identity_of(user: &User) -> CurrentIdentity {
        CurrentIdentity {
            user_id: user.uid,
            email: user.email.clone(),
        }
    }

    fn provider_named(market: &Marketplace, name: &str) -> CurrentIdentity {
        let provider = market
            .list_providers(&ProviderFilter::default())
            .into_iter()
            .find(|p| p.display_name() == name)
            .unwrap();
        identity_of(provider)
    }

    fn station_named<'a>(market: &'a Marketplace, name: &str) -> &'a Station {
        market
            .list_stations(&StationFilter::default())
            .into_iter()
            .find(|s| s.name == name)
            .unwrap()
    }

    fn register_owner(market: &mut Marketplace, email: &str) -> CurrentIdentity {
        register_named_owner(market, email, "Ada Obi")
    }

    fn register_named_owner(market: &mut Marketplace, email: &str, name: &str) -> CurrentIdentity {
        let uid = market
            .register_user(
                email,
                Role::VehicleOwner {
                    full_name: name.to_string(),
                },
                None,
            )
            .unwrap();
        CurrentIdentity {
            user_id: uid,
            email: email.to_string(),
        }
    }

    fn camry_booking(provider: Uuid, conversion_type: ServiceKind) -> NewBooking {
        NewBooking {
            provider,
            vehicle: VehicleInfo {
                make: "Toyota".to_string(),
                model: "Camry".to_string(),
                year: 2018,
                engine_type: "petrol".to_string(),
            },
            conversion_type,
            scheduled_for: Utc::now() + Duration::days(3),
            total_cost: 750_000,
            notes: None,
        }
    }

    #[test]
    fn test_seed_runs_once() {
        let mut market = market();
        let users = market.users.len();
        assert_eq!(market.stations.len(), 9);
        assert!(!market.seed());
        assert_eq!(market.users.len(), users);
    }

    #[test]
    fn test_register_rejects_taken_email() {
        let mut market = market();
        register_owner(&mut market, "ada@example.ng");
        let err = market
            .register_user(
                "ADA@example.ng",
                Role::VehicleOwner {
                    full_name: "Someone Else".to_string(),
                },
                None,
            )
            .unwrap_err();
        assert!(matches!(err, Error::EmailTaken(_)));
    }

    #[test]
    fn test_register_rejects_prefilled_listing() {
        let mut market = market();
        let listing = market
            .list_providers(&ProviderFilter::default())
            .first()
            .and_then(|p| p.listing())
            .cloned();
        let err = market
            .register_user(
                "copycat@example.ng",
                Role::Provider {
                    company_name: "Copycat Motors".to_string(),
                    listing,
                },
                None,
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(market
            .list_providers(&ProviderFilter::default())
            .iter()
            .all(|p| p.email != "copycat@example.ng"));
    }

    #[test]
    fn test_logged_in_user_falls_back_to_email() {
        let mut market = market();
        register_owner(&mut market, "ada@example.ng");
        let stranger_id = CurrentIdentity {
            user_id: Uuid::new_v4(),
            email: "ada@example.ng".to_string(),
        };
        let user = market.logged_in_user(&stranger_id).unwrap();
        assert_eq!(user.email, "ada@example.ng");
        assert!(user.last_login_at.is_some());
        assert!(market.logged_in_user(&Anonymous).is_none());
    }

    #[test]
    fn test_list_providers_filters() {
        let market = market();
        let lagos = ProviderFilter {
            city: Some("lagos".to_string()),
            ..Default::default()
        };
        let names: Vec<&str> = market
            .list_providers(&lagos)
            .iter()
            .map(|p| p.display_name())
            .collect();
        assert_eq!(names, vec!["GreenTech Auto Solutions", "PowerDrive Technologies"]);

        let hybrid = ProviderFilter {
            services: Some(vec![ServiceKind::Hybrid]),
            ..Default::default()
        };
        assert_eq!(market.list_providers(&hybrid).len(), 3);

        let unverified = ProviderFilter {
            verified: Some(false),
            ..Default::default()
        };
        assert!(market.list_providers(&unverified).is_empty());
    }

    #[test]
    fn test_get_provider_requires_provider_role() {
        let market = market();
        let partner = station_named(&market, "Shell CNG Ikeja").owner;
        let err = market.get_provider(partner).unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "provider", .. }));
    }

    #[test]
    fn test_nearby_providers() {
        let market = market();
        let cng = market
            .nearby_providers(&LAGOS_VI, NearestQuery::default().offering(ServiceKind::Cng))
            .unwrap();
        assert_eq!(cng.len(), 1);
        assert_eq!(cng[0].entity.display_name(), "GreenTech Auto Solutions");
        assert_eq!(cng[0].distance_km.into_inner(), 0.0);

        let ev = market
            .nearby_providers(&LAGOS_VI, NearestQuery::default().offering(ServiceKind::Ev))
            .unwrap();
        let names: Vec<&str> = ev.iter().map(|r| r.entity.display_name()).collect();
        assert_eq!(names, vec!["GreenTech Auto Solutions", "PowerDrive Technologies"]);

        let nearest = market
            .nearby_providers(&LAGOS_VI, NearestQuery::within(1000.0).take(1))
            .unwrap();
        assert_eq!(nearest.len(), 1);
        assert_eq!(nearest[0].entity.display_name(), "GreenTech Auto Solutions");
    }

    #[test]
    fn test_nearby_stations_limit() {
        let market = market();
        let all = market
            .nearby_stations(&LAGOS_VI, NearestQuery::within(2000.0))
            .unwrap();
        assert_eq!(all.len(), 9);
        let top = market
            .nearby_stations(&LAGOS_VI, NearestQuery::within(2000.0).take(5))
            .unwrap();
        assert_eq!(top.as_slice(), &all[..5]);
    }

    #[test]
    fn test_new_provider_appears_after_profile_update() {
        let mut market = market();
        let uid = market
            .register_user(
                "fleet@autofix.ng",
                Role::Provider {
                    company_name: "AutoFix Lekki".to_string(),
                    listing: None,
                },
                None,
            )
            .unwrap();
        let identity = CurrentIdentity {
            user_id: uid,
            email: "fleet@autofix.ng".to_string(),
        };
        assert!(market.current_provider(&identity).is_some());

        let user = market
            .update_provider_profile(
                &identity,
                ProviderProfileUpdate {
                    address: Some(Address {
                        street: "Admiralty Way".to_string(),
                        city: "Lagos".to_string(),
                        state: "Lagos".to_string(),
                        location: Location::new(6.4282, 3.4219),
                    }),
                    services: Some(vec![ServiceKind::Cng]),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(user.listing().unwrap().rating, 4.0);

        assert!(!user.is_verified);

        // Unverified providers are ranked like any other.
        let nearby = market
            .nearby_providers(&LAGOS_VI, NearestQuery::default().offering(ServiceKind::Cng))
            .unwrap();
        let names: Vec<&str> = nearby.iter().map(|r| r.entity.display_name()).collect();
        assert_eq!(names, vec!["GreenTech Auto Solutions", "AutoFix Lekki"]);
        assert!(nearby[1].distance_km.into_inner() < 0.05);
    }

    #[test]
    fn test_only_providers_edit_provider_profiles() {
        let mut market = market();
        let owner = register_owner(&mut market, "ada@example.ng");
        let err = market
            .update_provider_profile(&owner, ProviderProfileUpdate::default())
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
        assert!(market.current_provider(&owner).is_none());
    }

    #[test]
    fn test_list_stations_exact_match() {
        let market = market();
        let filter = StationFilter {
            city: Some("Lagos".to_string()),
            kind: Some(ServiceKind::Ev),
            ..Default::default()
        };
        let names: Vec<&str> = market
            .list_stations(&filter)
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, vec!["Nipco EV Charging Hub", "Tesla Supercharger Lekki"]);

        let lowercase = StationFilter {
            city: Some("lagos".to_string()),
            ..Default::default()
        };
        assert!(market.list_stations(&lowercase).is_empty());
    }

    #[test]
    fn test_nearby_stations_default_radius_and_ties() {
        let market = market();
        let ev = market
            .nearby_stations(&LAGOS_VI, NearestQuery::default().offering(ServiceKind::Ev))
            .unwrap();
        let names: Vec<&str> = ev.iter().map(|r| r.entity.name.as_str()).collect();
        // Same coordinates, so seed order decides.
        assert_eq!(names, vec!["Nipco EV Charging Hub", "Tesla Supercharger Lekki"]);

        let cng = market
            .nearby_stations(&LAGOS_VI, NearestQuery::default().offering(ServiceKind::Cng))
            .unwrap();
        let names: Vec<&str> = cng.iter().map(|r| r.entity.name.as_str()).collect();
        assert_eq!(names, vec!["Total CNG Station Victoria Island", "Shell CNG Ikeja"]);
        assert!((cng[0].distance_km.into_inner() - 2.889).abs() < 0.01);
    }

    #[test]
    fn test_nearby_stations_rejects_bad_radius() {
        let market = market();
        let err = market.nearby_stations(&LAGOS_VI, NearestQuery::within(0.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    fn ikeja_station() -> NewStation {
        NewStation {
            name: "Ardova EV Point".to_string(),
            kind: ServiceKind::Ev,
            address: Address {
                street: "Allen Avenue".to_string(),
                city: "Lagos".to_string(),
                state: "Lagos".to_string(),
                location: Location::new(6.6, 3.35),
            },
            pricing: StationPricing {
                cng_price: None,
                ev_price: Some(72),
            },
            amenities: vec![],
            operating_hours: OperatingHours::always(),
        }
    }

    #[test]
    fn test_create_station_needs_sign_in() {
        let mut market = market();
        let err = market.create_station(&Anonymous, ikeja_station()).unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));

        let provider = provider_named(&market, "PowerDrive Technologies");
        let uid = market.create_station(&provider, ikeja_station()).unwrap();
        let station = market.get_station(uid).unwrap();
        assert!(!station.verified);
        assert_eq!(station.owner, provider.user_id);
        assert_eq!(station.availability, Availability::defaults_for(ServiceKind::Ev));

        let owner = register_owner(&mut market, "ada@example.ng");
        let uid = market.create_station(&owner, ikeja_station()).unwrap();
        assert_eq!(market.get_station(uid).unwrap().owner, owner.user_id);
    }

    #[test]
    fn test_only_owner_updates_availability() {
        let mut market = market();
        let nipco = station_named(&market, "Nipco EV Charging Hub");
        let (uid, owner) = (nipco.uid, nipco.owner);
        let owner = identity_of(market.users.iter().find(|u| u.uid == owner).unwrap());
        let stranger = provider_named(&market, "GreenTech Auto Solutions");

        let update = Availability {
            cng_available: None,
            ev_chargers: Some(EvChargers {
                total: 8,
                available: 2,
                fast_chargers: 4,
            }),
        };
        let err = market
            .update_station_availability(&stranger, uid, update)
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));

        let too_many = Availability {
            ev_chargers: Some(EvChargers {
                total: 8,
                available: 9,
                fast_chargers: 4,
            }),
            ..update
        };
        let err = market
            .update_station_availability(&owner, uid, too_many)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let station = market.update_station_availability(&owner, uid, update).unwrap();
        assert_eq!(station.availability, update);
    }

    #[test]
    fn test_booking_lifecycle() {
        let mut market = market();
        let owner = register_owner(&mut market, "ada@example.ng");
        let greentech = provider_named(&market, "GreenTech Auto Solutions");

        let booking = market
            .create_booking(&owner, camry_booking(greentech.user_id, ServiceKind::Cng))
            .unwrap();
        let mine = market.user_bookings(&owner);
        assert_eq!(mine[0].booking.status, BookingStatus::Pending);
        assert_eq!(mine[0].provider.map(|p| p.uid), Some(greentech.user_id));

        // The customer cannot move their own booking.
        let err = market
            .update_booking_status(&owner, booking, BookingStatus::Confirmed)
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));

        let err = market
            .update_booking_status(&greentech, booking, BookingStatus::Completed)
            .unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidTransition {
                from: BookingStatus::Pending,
                to: BookingStatus::Completed
            }
        ));

        for status in [
            BookingStatus::Confirmed,
            BookingStatus::InProgress,
            BookingStatus::Completed,
        ] {
            let updated = market
                .update_booking_status(&greentech, booking, status)
                .unwrap();
            assert_eq!(updated.status, status);
        }
        let err = market
            .update_booking_status(&greentech, booking, BookingStatus::Cancelled)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTransition { .. }));
    }

    #[test]
    fn test_booking_requires_offered_service() {
        let mut market = market();
        let owner = register_owner(&mut market, "ada@example.ng");
        let cleanfuel = provider_named(&market, "CleanFuel Motors");
        let err = market
            .create_booking(&owner, camry_booking(cleanfuel.user_id, ServiceKind::Ev))
            .unwrap_err();
        assert!(matches!(err, Error::ServiceNotOffered(ServiceKind::Ev)));

        let err = market
            .create_booking(&Anonymous, camry_booking(cleanfuel.user_id, ServiceKind::Cng))
            .unwrap_err();
        assert!(matches!(err, Error::NotAuthenticated));
    }

    #[test]
    fn test_bookings_are_listed_newest_first() {
        let mut market = market();
        let owner = register_owner(&mut market, "ada@example.ng");
        let greentech = provider_named(&market, "GreenTech Auto Solutions");

        let first = market
            .create_booking(&owner, camry_booking(greentech.user_id, ServiceKind::Cng))
            .unwrap();
        let second = market
            .create_booking(&owner, camry_booking(greentech.user_id, ServiceKind::Ev))
            .unwrap();

        let mine: Vec<Uuid> = market.user_bookings(&owner).iter().map(|b| b.booking.uid).collect();
        assert_eq!(mine, vec![second, first]);
        assert!(market.user_bookings(&Anonymous).is_empty());

        let theirs = market
            .provider_bookings(&greentech, greentech.user_id)
            .unwrap();
        assert_eq!(theirs.len(), 2);
        let err = market
            .provider_bookings(&owner, greentech.user_id)
            .unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn test_provider_review_updates_rating() {
        let mut market = market();
        let owner = register_owner(&mut market, "ada@example.ng");
        let greentech = provider_named(&market, "GreenTech Auto Solutions");
        let target = ReviewTarget::Provider(greentech.user_id);

        market
            .create_review(&owner, target, 5, "Smooth CNG install")
            .unwrap();
        let listing = market
            .get_provider(greentech.user_id)
            .unwrap()
            .listing()
            .unwrap();
        assert_eq!(listing.total_reviews, 128);
        assert!((listing.rating - (4.8 * 127.0 + 5.0) / 128.0).abs() < 1e-9);

        let err = market
            .create_review(&owner, target, 4, "Again")
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyReviewed("provider")));
        assert_eq!(market.reviews_for(target).len(), 1);
    }

    #[test]
    fn test_review_validation() {
        let mut market = market();
        let owner = register_owner(&mut market, "ada@example.ng");
        let station = station_named(&market, "Forte Oil CNG Ibadan").uid;

        for rating in [0, 6] {
            let err = market
                .create_review(&owner, ReviewTarget::Station(station), rating, "")
                .unwrap_err();
            assert!(matches!(err, Error::InvalidInput(_)));
        }
        let err = market
            .create_review(&owner, ReviewTarget::Station(Uuid::new_v4()), 4, "")
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "station", .. }));

        let other = register_named_owner(&mut market, "chidi@example.ng", "Chidi Eze");
        let first = market
            .create_review(&owner, ReviewTarget::Station(station), 4, "Quick queue")
            .unwrap();
        let second = market
            .create_review(&other, ReviewTarget::Station(station), 3, "Slow pump")
            .unwrap();
        let order: Vec<Uuid> = market
            .reviews_for(ReviewTarget::Station(station))
            .iter()
            .map(|r| r.review.uid)
            .collect();
        assert_eq!(order, vec![second, first]);

        let reviews = market.reviews_for(ReviewTarget::Station(station));
        let author = reviews[0].author.unwrap();
        assert_eq!(author.name, "Chidi Eze");
        assert_eq!(author.email, "chidi@example.ng");
    }

    #[test]
    fn test_check_compatibility_uses_reference_table() {
        let market = market();
        let query = |make: &str, model: &str, year| VehicleQuery {
            make: make.to_string(),
            model: model.to_string(),
            year,
        };
        assert!(market
            .check_compatibility(&query(" toyota ", "CAMRY", 2015))
            .is_compatible());
        assert!(matches!(
            market.check_compatibility(&query("Toyota", "Camry", 2008)),
            Compatibility::Incompatible(IncompatibleReason::YearOutOfRange { .. })
        ));
        assert_eq!(
            market.check_compatibility(&query("Kia", "Rio", 2015)),
            Compatibility::Incompatible(IncompatibleReason::NoData)
        );
    }

    fn taxi(fuel: &str, conversion: &str) -> SavingsRequest {
        SavingsRequest {
            make: "Toyota".to_string(),
            model: "Camry".to_string(),
            year: 2018,
            current_fuel_type: fuel.to_string(),
            monthly_distance_km: 1000.0,
            fuel_efficiency_km_per_liter: 12.0,
            conversion_type: conversion.to_string(),
        }
    }

    #[test]
    fn test_calculate_savings() {
        let market = market();
        let report = market.calculate_savings(&taxi("Petrol", "CNG")).unwrap();
        assert_eq!(report.current_monthly_cost, 51417);
        assert_eq!(report.new_monthly_cost, 15333);
        assert_eq!(report.payback, Payback::Months(22));
    }

    #[test]
    fn test_calculate_savings_parse_errors() {
        let market = market();
        let err = market.calculate_savings(&taxi("Kerosene", "CNG")).unwrap_err();
        assert!(matches!(err, Error::UnknownFuelType(fuel) if fuel == "Kerosene"));
        let err = market.calculate_savings(&taxi("Petrol", "LPG")).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_articles_newest_first() {
        let market = market();
        let published = ArticleFilter {
            published: Some(true),
            ..Default::default()
        };
        let titles: Vec<&str> = market
            .list_articles(&published)
            .iter()
            .map(|a| a.title.as_str())
            .collect();
        assert_eq!(
            titles,
            vec![
                "Routine Maintenance After an EV Conversion",
                "Inside the Presidential CNG Initiative",
                "Staying Safe with a CNG Conversion Kit",
                "Why CNG Makes Sense for Nigerian Drivers",
            ]
        );
        assert_eq!(market.list_articles(&ArticleFilter::default()).len(), 5);
    }

    #[test]
    fn test_article_filters_combine() {
        let market = market();
        let benefits = ArticleFilter {
            category: Some(ArticleCategory::Benefits),
            ..Default::default()
        };
        assert_eq!(market.list_articles(&benefits).len(), 2);

        let published_benefits = ArticleFilter {
            published: Some(true),
            ..benefits
        };
        let found = market.list_articles(&published_benefits);
        assert_eq!(found.len(), 1);
        assert!(found[0].featured);

        let featured = ArticleFilter {
            featured: Some(true),
            published: Some(true),
            ..Default::default()
        };
        assert_eq!(market.list_articles(&featured).len(), 3);
    }

    #[test]
    fn test_get_article() {
        let market = market();
        let draft = market
            .list_articles(&ArticleFilter {
                published: Some(false),
                ..Default::default()
            })[0]
            .uid;
        assert!(!market.get_article(draft).unwrap().published);
        let err = market.get_article(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, Error::NotFound { kind: "article", .. }));
    }
}
