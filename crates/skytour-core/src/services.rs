//! Bookable services sold alongside the tour routes, and the operator's
//! order figures for them.

use serde::{Deserialize, Serialize};

use crate::models::Site;

/// Drones held in the operator's hangar across all sites.
pub const HANGAR_DRONES: u32 = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RentalKind {
    /// Booked in the app, flown on a preset route while the tourist watches remotely
    AppRemote,
    /// Rented by scanning a code at the site
    OnsiteRental,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// Tourist photo composited into the scenery
    RealisticSynthesis,
    /// 3D avatar animated at the site
    VirtualAvatar,
}

/// Any bookable service kind, used for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKind {
    AppRemote,
    OnsiteRental,
    RealisticSynthesis,
    VirtualAvatar,
}

impl From<RentalKind> for ServiceKind {
    fn from(kind: RentalKind) -> Self {
        match kind {
            RentalKind::AppRemote => ServiceKind::AppRemote,
            RentalKind::OnsiteRental => ServiceKind::OnsiteRental,
        }
    }
}

impl From<ContentKind> for ServiceKind {
    fn from(kind: ContentKind) -> Self {
        match kind {
            ContentKind::RealisticSynthesis => ServiceKind::RealisticSynthesis,
            ContentKind::VirtualAvatar => ServiceKind::VirtualAvatar,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalService {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RentalKind,
    pub name: String,
    pub description: String,
    /// Price in CNY
    pub price: u32,
    pub duration_min: u32,
    pub features: Vec<String>,
    pub available: bool,
    pub site: Site,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentService {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub name: String,
    pub description: String,
    /// Price in CNY
    pub price: u32,
    pub features: Vec<String>,
    pub processing_time_min: u32,
    pub site: Site,
    /// Photo spot the content is generated for
    pub checkpoint: String,
}

/// Services matching a site/kind filter.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceListing {
    pub rentals: Vec<RentalService>,
    pub content: Vec<ContentService>,
}

impl ServiceListing {
    pub fn len(&self) -> usize {
        self.rentals.len() + self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RentalStats {
    pub total_orders: u32,
    pub today_orders: u32,
    /// CNY
    pub revenue: u64,
    pub app_remote_count: u32,
    pub onsite_rental_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStats {
    pub total_orders: u32,
    pub today_orders: u32,
    /// CNY
    pub revenue: u64,
    pub realistic_synthesis_count: u32,
    pub virtual_avatar_count: u32,
}

/// Order counts and revenue per service line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStats {
    pub drone_rentals: RentalStats,
    pub generative_content: ContentStats,
}

impl ServiceStats {
    pub fn today_orders(&self) -> u32 {
        self.drone_rentals.today_orders + self.generative_content.today_orders
    }

    pub fn total_revenue(&self) -> u64 {
        self.drone_rentals.revenue + self.generative_content.revenue
    }
}

/// Static service offer plus the figures shown on the operator dashboard.
#[derive(Debug, Clone)]
pub struct ServiceCatalog {
    rentals: Vec<RentalService>,
    content: Vec<ContentService>,
    stats: ServiceStats,
}

impl ServiceCatalog {
    pub fn builtin() -> Self {
        Self {
            rentals: builtin_rentals(),
            content: builtin_content(),
            stats: builtin_stats(),
        }
    }

    pub fn rentals(&self) -> &[RentalService] {
        &self.rentals
    }

    pub fn content(&self) -> &[ContentService] {
        &self.content
    }

    pub fn stats(&self) -> &ServiceStats {
        &self.stats
    }

    /// Services offered at `site` and of `kind`; `None` matches everything.
    pub fn listing(&self, site: Option<Site>, kind: Option<ServiceKind>) -> ServiceListing {
        let keep = |s: Site, k: ServiceKind| {
            site.map_or(true, |want| want == s) && kind.map_or(true, |want| want == k)
        };
        ServiceListing {
            rentals: self
                .rentals
                .iter()
                .filter(|r| keep(r.site, r.kind.into()))
                .cloned()
                .collect(),
            content: self
                .content
                .iter()
                .filter(|c| keep(c.site, c.kind.into()))
                .cloned()
                .collect(),
        }
    }
}

impl Default for ServiceCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn tags(features: &[&str]) -> Vec<String> {
    features.iter().map(|f| f.to_string()).collect()
}

#[allow(clippy::too_many_arguments)]
fn rental(
    id: &str,
    kind: RentalKind,
    site: Site,
    name: &str,
    description: &str,
    price: u32,
    duration_min: u32,
    features: &[&str],
) -> RentalService {
    RentalService {
        id: id.to_string(),
        kind,
        name: name.to_string(),
        description: description.to_string(),
        price,
        duration_min,
        features: tags(features),
        available: true,
        site,
    }
}

#[allow(clippy::too_many_arguments)]
fn content(
    id: &str,
    kind: ContentKind,
    site: Site,
    name: &str,
    description: &str,
    price: u32,
    processing_time_min: u32,
    checkpoint: &str,
    features: &[&str],
) -> ContentService {
    ContentService {
        id: id.to_string(),
        kind,
        name: name.to_string(),
        description: description.to_string(),
        price,
        features: tags(features),
        processing_time_min,
        site,
        checkpoint: checkpoint.to_string(),
    }
}

fn builtin_rentals() -> Vec<RentalService> {
    use RentalKind::*;
    vec![
        rental(
            "app-rental-basum-1",
            AppRemote,
            Site::BasumTso,
            "Basum Tso Lake Highlights",
            "Book the classic lake loop in the app and watch it live from the cloud",
            199,
            15,
            &["Preset classic route", "Live cloud upload", "4K footage", "Kept forever"],
        ),
        rental(
            "app-rental-haba-1",
            AppRemote,
            Site::HabaTso,
            "Haba Tso Glacier Panorama",
            "Book the Glacier Eye route and see the ancient ice from above",
            299,
            20,
            &["Glacier panorama", "Live cloud upload", "Pro camera moves", "Kept forever"],
        ),
        rental(
            "app-rental-nianlang-1",
            AppRemote,
            Site::Nianlang,
            "Nianlang Hot Spring Retreat",
            "Book the hot spring route and overlook the wellness valley",
            99,
            10,
            &["Spring panorama", "Live cloud upload", "HD footage", "Kept forever"],
        ),
        rental(
            "onsite-rental-basum-1",
            OnsiteRental,
            Site::BasumTso,
            "Basum Tso Smart Rental",
            "Scan and take off in 30 seconds with follow-me, orbit and auto group shots",
            50,
            10,
            &["Follow me", "Smart orbit", "Auto group shot", "Live phone preview"],
        ),
        rental(
            "onsite-rental-haba-1",
            OnsiteRental,
            Site::HabaTso,
            "Haba Tso On-site Rental",
            "Smart rental in the glacier valley for professional aerial shots",
            80,
            15,
            &["Pro aerial shots", "Smart follow", "Live preview", "One-tap flight"],
        ),
        rental(
            "onsite-rental-nianlang-1",
            OnsiteRental,
            Site::Nianlang,
            "Nianlang Hot Spring Rental",
            "Easy smart rental around the hot springs",
            40,
            8,
            &["Point and fly", "Live preview", "Auto group shot", "Quick take-off"],
        ),
    ]
}

fn builtin_content() -> Vec<ContentService> {
    use ContentKind::*;
    vec![
        content(
            "realistic-basum-1",
            RealisticSynthesis,
            Site::BasumTso,
            "Sacred Lake Portrait",
            "Upload a photo and get a crowd-free portrait at the sacred lake",
            29,
            5,
            "Tashi Island viewpoint",
            &["AI compositing", "High-precision 3D model", "Best light", "Cinematic camera"],
        ),
        content(
            "realistic-basum-2",
            RealisticSynthesis,
            Site::BasumTso,
            "Sacred Mountain Portrait",
            "Stand at the foot of the sacred mountain with a pilgrim's view",
            39,
            5,
            "Sacred mountain viewpoint",
            &["Mountain view", "Pilgrim route", "Cultural backdrop", "Striking visuals"],
        ),
        content(
            "realistic-haba-1",
            RealisticSynthesis,
            Site::HabaTso,
            "Glacier Eye Panorama Portrait",
            "Composited into the heart of the glacier",
            49,
            8,
            "Glacier viewpoint",
            &["Glacier effects", "Panoramic compositing", "Motion effects", "Striking visuals"],
        ),
        content(
            "realistic-haba-2",
            RealisticSynthesis,
            Site::HabaTso,
            "Ice Cave Expedition Portrait",
            "Composited inside the ice cave",
            59,
            10,
            "Ice cave entrance",
            &["Ice cave effects", "Inside view", "Fantasy look", "Pro compositing"],
        ),
        content(
            "realistic-nianlang-1",
            RealisticSynthesis,
            Site::Nianlang,
            "Hot Spring Portrait",
            "Composited into the quiet of the hot spring valley",
            25,
            3,
            "Hot spring viewpoint",
            &["Spring effects", "Calm mood", "Wellness theme", "Seamless compositing"],
        ),
        content(
            "avatar-basum-1",
            VirtualAvatar,
            Site::BasumTso,
            "Tibetan Costume Dance",
            "A 3D avatar in Tibetan dress dancing by the sacred lake",
            35,
            8,
            "Culture corner",
            &["3D avatar", "Tibetan dress", "Lakeside dance", "Interactive fun"],
        ),
        content(
            "avatar-basum-2",
            VirtualAvatar,
            Site::BasumTso,
            "Mountain Circuit Pilgrimage",
            "Your avatar walks the pilgrim circuit around the mountain",
            45,
            12,
            "Circuit trail",
            &["Pilgrimage", "Cultural interaction", "Virtual walk", "Deep immersion"],
        ),
        content(
            "avatar-haba-1",
            VirtualAvatar,
            Site::HabaTso,
            "Glacier Explorer",
            "Your avatar takes on the glacier as an explorer",
            55,
            15,
            "Expedition base",
            &["Expedition", "Ice interaction", "Extreme challenge", "Adventure"],
        ),
        content(
            "avatar-haba-2",
            VirtualAvatar,
            Site::HabaTso,
            "Kayak Hero",
            "Your avatar paddles across the glacier lake",
            50,
            10,
            "Kayak pier",
            &["Kayaking", "Lake crossing", "Water sport", "Courage"],
        ),
        content(
            "avatar-nianlang-1",
            VirtualAvatar,
            Site::Nianlang,
            "Hot Spring Wellness",
            "Your avatar relaxes in the springs, Tibetan wellness style",
            30,
            6,
            "Wellness center",
            &["Wellness", "Spring culture", "Relaxation", "Healthy living"],
        ),
    ]
}

fn builtin_stats() -> ServiceStats {
    ServiceStats {
        drone_rentals: RentalStats {
            total_orders: 1250,
            today_orders: 45,
            revenue: 28_500,
            app_remote_count: 780,
            onsite_rental_count: 470,
        },
        generative_content: ContentStats {
            total_orders: 890,
            today_orders: 32,
            revenue: 19_800,
            realistic_synthesis_count: 520,
            virtual_avatar_count: 370,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn builtin_offer_covers_every_site_and_kind() {
        let catalog = ServiceCatalog::builtin();
        assert_eq!(catalog.rentals().len(), 6);
        assert_eq!(catalog.content().len(), 10);

        let ids: HashSet<&str> = catalog
            .rentals()
            .iter()
            .map(|r| r.id.as_str())
            .chain(catalog.content().iter().map(|c| c.id.as_str()))
            .collect();
        assert_eq!(ids.len(), 16);

        for site in Site::ALL {
            for kind in [
                ServiceKind::AppRemote,
                ServiceKind::OnsiteRental,
                ServiceKind::RealisticSynthesis,
                ServiceKind::VirtualAvatar,
            ] {
                assert!(!catalog.listing(Some(site), Some(kind)).is_empty(), "{site} {kind:?}");
            }
        }
    }

    #[test]
    fn listing_filters_by_site_and_kind() {
        let catalog = ServiceCatalog::builtin();

        let haba = catalog.listing(Some(Site::HabaTso), None);
        assert_eq!(haba.rentals.len(), 2);
        assert_eq!(haba.content.len(), 4);
        assert!(haba.content.iter().all(|c| c.site == Site::HabaTso));

        let avatars = catalog.listing(None, Some(ServiceKind::VirtualAvatar));
        assert!(avatars.rentals.is_empty());
        assert_eq!(avatars.content.len(), 5);

        let both = catalog.listing(Some(Site::Nianlang), Some(ServiceKind::OnsiteRental));
        assert_eq!(both.len(), 1);
        assert_eq!(both.rentals[0].id, "onsite-rental-nianlang-1");

        assert_eq!(catalog.listing(None, None).len(), 16);
    }

    #[test]
    fn stats_split_totals_by_kind() {
        let stats = ServiceCatalog::builtin().stats().clone();
        let rentals = &stats.drone_rentals;
        let content = &stats.generative_content;
        assert_eq!(rentals.app_remote_count + rentals.onsite_rental_count, rentals.total_orders);
        assert_eq!(
            content.realistic_synthesis_count + content.virtual_avatar_count,
            content.total_orders
        );
        assert_eq!(stats.today_orders(), 77);
        assert_eq!(stats.total_revenue(), 48_300);
    }

    #[test]
    fn services_serialize_with_type_tag() {
        let catalog = ServiceCatalog::builtin();
        let json = serde_json::to_value(&catalog.content()[0]).unwrap();
        assert_eq!(json["type"], "realistic_synthesis");
        assert_eq!(json["site"], "basum_tso");
        assert_eq!(json["processing_time_min"], 5);

        let kind: ServiceKind = serde_json::from_str("\"app_remote\"").unwrap();
        assert_eq!(kind, ServiceKind::from(RentalKind::AppRemote));
    }
}
