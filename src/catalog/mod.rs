/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 27/2/26
******************************************************************************/

//! Service catalog: the read-only reference data the queue core consults.
//!
//! A shop offers [`Service`]s, each with one or more [`DurationVariant`]s
//! (label, minutes, price). Customers join the queue by selecting duration
//! variants, not whole services. The [`ServiceCatalog`] indexes variants by
//! id and resolves a selection into a [`Selection`] with derived totals.
//!
//! The catalog is immutable input from the queue's point of view: it is
//! owned by the shop-management collaborator and handed to the queue at
//! construction time.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier of a [`Service`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceId(Uuid);

impl ServiceId {
    /// Creates a new random service id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ServiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier of a [`DurationVariant`].
///
/// Queue joins reference duration-variant ids directly — a selection is a
/// list of these, never of service ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DurationId(Uuid);

impl DurationId {
    /// Creates a new random duration-variant id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for DurationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DurationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One bookable variant of a service: a label, a duration and a price.
///
/// Prices are integer cents. The presentation layer formats currency.
///
/// # Examples
///
/// ```
/// use queueline_rs::catalog::DurationVariant;
///
/// let variant = DurationVariant::new("Standard", 30, 2500);
/// assert_eq!(variant.minutes, 30);
/// assert_eq!(variant.price_cents, 2500);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationVariant {
    /// Unique id of this variant.
    pub id: DurationId,

    /// Display label, e.g. "Standard" or "Express".
    pub label: String,

    /// Duration of the variant in minutes.
    pub minutes: u32,

    /// Price of the variant in integer cents.
    pub price_cents: u64,
}

impl DurationVariant {
    /// Creates a new variant with a fresh id.
    #[must_use]
    pub fn new(label: impl Into<String>, minutes: u32, price_cents: u64) -> Self {
        Self {
            id: DurationId::new(),
            label: label.into(),
            minutes,
            price_cents,
        }
    }
}

/// A named offering with one or more duration variants.
///
/// # Examples
///
/// ```
/// use queueline_rs::catalog::{DurationVariant, Service};
///
/// let service = Service::new(
///     "Haircut",
///     vec![DurationVariant::new("Standard", 30, 2500)],
/// );
/// assert_eq!(service.variants.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Service {
    /// Unique id of this service.
    pub id: ServiceId,

    /// Display name, e.g. "Haircut".
    pub name: String,

    /// The bookable duration variants of this service.
    pub variants: Vec<DurationVariant>,
}

impl Service {
    /// Creates a new service with a fresh id.
    #[must_use]
    pub fn new(name: impl Into<String>, variants: Vec<DurationVariant>) -> Self {
        Self {
            id: ServiceId::new(),
            name: name.into(),
            variants,
        }
    }
}

/// Indexed, read-only view of one shop's services.
///
/// Built once from the shop's service list; resolves duration-variant ids
/// into a [`Selection`] with derived totals.
///
/// # Examples
///
/// ```
/// use queueline_rs::catalog::{DurationVariant, Service, ServiceCatalog};
///
/// let cut = DurationVariant::new("Standard", 30, 2500);
/// let cut_id = cut.id;
/// let catalog = ServiceCatalog::from_services(vec![Service::new("Haircut", vec![cut])]);
///
/// let selection = catalog.resolve(&[cut_id]).unwrap();
/// assert_eq!(selection.total_minutes(), 30);
/// assert_eq!(selection.total_price_cents(), 2500);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    services: Vec<Service>,
    // duration id -> (service index, variant index)
    index: HashMap<DurationId, (usize, usize)>,
}

impl ServiceCatalog {
    /// Creates an empty catalog. A shop with an empty catalog is a draft
    /// and cannot accept queue joins.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a list of services.
    #[must_use]
    pub fn from_services(services: Vec<Service>) -> Self {
        let mut catalog = Self::new();
        for service in services {
            catalog.add_service(service);
        }
        catalog
    }

    /// Adds a service and indexes its variants.
    pub fn add_service(&mut self, service: Service) {
        let service_idx = self.services.len();
        for (variant_idx, variant) in service.variants.iter().enumerate() {
            self.index.insert(variant.id, (service_idx, variant_idx));
        }
        self.services.push(service);
    }

    /// Returns `true` if the catalog has no services.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Returns the number of services in the catalog.
    #[must_use]
    pub fn service_count(&self) -> usize {
        self.services.len()
    }

    /// Returns all services.
    #[must_use]
    pub fn services(&self) -> &[Service] {
        &self.services
    }

    /// Looks up a single duration variant together with its owning service.
    #[must_use]
    pub fn variant(&self, id: DurationId) -> Option<(&Service, &DurationVariant)> {
        let (service_idx, variant_idx) = self.index.get(&id).copied()?;
        let service = &self.services[service_idx];
        Some((service, &service.variants[variant_idx]))
    }

    /// Resolves a list of duration-variant ids into a [`Selection`].
    ///
    /// Order is preserved. Totals are derived from the resolved variants,
    /// never supplied by the caller.
    ///
    /// # Errors
    ///
    /// Returns the first unknown [`DurationId`]. Empty selections are the
    /// queue's concern, not the catalog's: resolving an empty slice yields
    /// an empty [`Selection`].
    pub fn resolve(&self, ids: &[DurationId]) -> Result<Selection, DurationId> {
        let mut items = Vec::with_capacity(ids.len());
        for &id in ids {
            let (service, variant) = self.variant(id).ok_or(id)?;
            items.push(SelectedVariant {
                duration_id: id,
                service_name: service.name.clone(),
                label: variant.label.clone(),
                minutes: variant.minutes,
                price_cents: variant.price_cents,
            });
        }
        Ok(Selection { items })
    }
}

/// One resolved Service+Duration pair inside a [`Selection`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedVariant {
    /// Id of the selected duration variant.
    pub duration_id: DurationId,

    /// Name of the owning service.
    pub service_name: String,

    /// Label of the variant.
    pub label: String,

    /// Duration in minutes.
    pub minutes: u32,

    /// Price in integer cents.
    pub price_cents: u64,
}

/// An ordered set of resolved Service+Duration pairs.
///
/// Totals are always recomputed from the items — there is no way to set
/// them independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Selection {
    items: Vec<SelectedVariant>,
}

impl Selection {
    /// Returns the resolved items in selection order.
    #[must_use]
    pub fn items(&self) -> &[SelectedVariant] {
        &self.items
    }

    /// Returns the number of selected variants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing was selected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of the selected variants' minutes.
    #[must_use]
    pub fn total_minutes(&self) -> u32 {
        self.items.iter().map(|item| item.minutes).sum()
    }

    /// Sum of the selected variants' prices in cents.
    #[must_use]
    pub fn total_price_cents(&self) -> u64 {
        self.items.iter().map(|item| item.price_cents).sum()
    }
}
