//! Built-in tourist routes and route lookup.
//!
//! Routes are static for the whole session. Drones reference their route by
//! site and name; lookups that miss fall back to the catalog's default route
//! so a tick never fails on a stale assignment.

use std::collections::HashSet;

use crate::error::CatalogError;
use crate::models::{Coordinate, DroneState, Route, RouteAssignment, Site};

/// Route every unmatched assignment falls back to.
pub const DEFAULT_ROUTE_ID: &str = "basum-classic-loop";

/// Validated, immutable set of routes.
#[derive(Debug, Clone)]
pub struct RouteCatalog {
    routes: Vec<Route>,
    default_index: usize,
}

impl RouteCatalog {
    /// Build a catalog, rejecting empty routes, duplicate ids and a missing
    /// default.
    pub fn new(routes: Vec<Route>, default_route_id: &str) -> Result<Self, CatalogError> {
        if routes.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut seen = HashSet::new();
        for route in &routes {
            if !seen.insert(route.id.as_str()) {
                return Err(CatalogError::DuplicateRoute(route.id.clone()));
            }
            if route.coordinates.is_empty() {
                return Err(CatalogError::EmptyRoute(route.id.clone()));
            }
        }

        let default_index = routes
            .iter()
            .position(|r| r.id == default_route_id)
            .ok_or_else(|| CatalogError::UnknownDefault(default_route_id.to_string()))?;

        Ok(Self {
            routes,
            default_index,
        })
    }

    /// The operator's published routes, two per site.
    pub fn builtin() -> Self {
        Self {
            routes: builtin_routes(),
            default_index: 0,
        }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn get(&self, route_id: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.id == route_id)
    }

    pub fn by_site(&self, site: Site) -> impl Iterator<Item = &Route> + '_ {
        self.routes.iter().filter(move |r| r.site == site)
    }

    pub fn default_route(&self) -> &Route {
        &self.routes[self.default_index]
    }

    /// Exact site + name match.
    pub fn find(&self, assignment: &RouteAssignment) -> Option<&Route> {
        self.routes
            .iter()
            .find(|r| r.site == assignment.site && r.name == assignment.route_name)
    }

    /// Route a drone flies: its own assignment, or the default route.
    pub fn resolve(&self, assignment: &RouteAssignment) -> &Route {
        self.find(assignment).unwrap_or_else(|| self.default_route())
    }
}

impl Default for RouteCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Drones launched at startup, each at the first waypoint of its route.
pub fn default_fleet(catalog: &RouteCatalog) -> Vec<DroneState> {
    [
        ("drone1", "basum-classic-loop"),
        ("drone2", "haba-glacier-eye"),
        ("drone3", "nianlang-valley-sunrise"),
    ]
    .into_iter()
    .filter_map(|(drone_id, route_id)| {
        catalog
            .get(route_id)
            .map(|route| DroneState::launch(drone_id, route))
    })
    .collect()
}

fn path(points: &[(f64, f64)]) -> Vec<Coordinate> {
    points
        .iter()
        .map(|&(lat, lon)| Coordinate::new(lat, lon))
        .collect()
}

fn tags(features: &[&str]) -> Vec<String> {
    features.iter().map(|f| f.to_string()).collect()
}

fn builtin_routes() -> Vec<Route> {
    vec![
        Route {
            id: DEFAULT_ROUTE_ID.to_string(),
            name: "Classic Lake Loop".to_string(),
            site: Site::BasumTso,
            price: 199,
            duration_min: 15,
            coordinates: path(&[
                (29.500, 90.500),
                (29.510, 90.510),
                (29.520, 90.500),
                (29.510, 90.490),
                (29.500, 90.480),
                (29.490, 90.490),
            ]),
            features: tags(&["Preset classic route", "Live cloud upload", "4K footage"]),
            restriction: None,
        },
        Route {
            id: "basum-sacred-mountain".to_string(),
            name: "Sacred Mountain Pilgrimage".to_string(),
            site: Site::BasumTso,
            price: 259,
            duration_min: 20,
            coordinates: path(&[
                (29.500, 90.500),
                (29.520, 90.480),
                (29.540, 90.470),
                (29.520, 90.490),
            ]),
            features: tags(&["Smart orbit", "Pilgrim's-eye view", "Live cloud upload"]),
            restriction: None,
        },
        Route {
            id: "nianlang-wellness".to_string(),
            name: "Hot Spring Wellness Tour".to_string(),
            site: Site::Nianlang,
            price: 99,
            duration_min: 10,
            coordinates: path(&[
                (29.590, 90.410),
                (29.600, 90.415),
                (29.610, 90.410),
                (29.610, 90.390),
                (29.590, 90.390),
            ]),
            features: tags(&["Spring panorama", "HD footage"]),
            restriction: Some("Keeps outside the spring privacy fence".to_string()),
        },
        Route {
            id: "haba-glacier-eye".to_string(),
            name: "Glacier Eye Panorama".to_string(),
            site: Site::HabaTso,
            price: 299,
            duration_min: 20,
            coordinates: path(&[
                (29.700, 90.300),
                (29.710, 90.290),
                (29.720, 90.280),
                (29.730, 90.290),
                (29.720, 90.310),
            ]),
            features: tags(&["Glacier panorama", "Pro camera moves", "8K offload"]),
            restriction: None,
        },
        Route {
            id: "haba-ice-cave".to_string(),
            name: "Ice Cave Expedition".to_string(),
            site: Site::HabaTso,
            price: 349,
            duration_min: 25,
            coordinates: path(&[
                (29.700, 90.300),
                (29.705, 90.320),
                (29.715, 90.330),
                (29.725, 90.320),
            ]),
            features: tags(&["Low-altitude pass", "8K offload"]),
            restriction: None,
        },
        Route {
            id: "nianlang-valley-sunrise".to_string(),
            name: "Valley Sunrise Flight".to_string(),
            site: Site::Nianlang,
            price: 129,
            duration_min: 12,
            coordinates: path(&[
                (29.620, 90.420),
                (29.610, 90.410),
                (29.602, 90.401),
                (29.590, 90.390),
            ]),
            features: tags(&["Sunrise window", "Valley panorama"]),
            restriction: Some("Crosses the spring privacy fence; drones are held at the boundary".to_string()),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NoFlyZone;

    fn one_point_route(id: &str) -> Route {
        Route {
            id: id.to_string(),
            name: id.to_string(),
            site: Site::BasumTso,
            price: 1,
            duration_min: 1,
            coordinates: vec![Coordinate::new(29.5, 90.5)],
            features: Vec::new(),
            restriction: None,
        }
    }

    #[test]
    fn builtin_catalog_passes_validation() {
        let builtin = RouteCatalog::builtin();
        let validated = RouteCatalog::new(builtin.routes().to_vec(), DEFAULT_ROUTE_ID).unwrap();
        assert_eq!(validated.default_route().id, builtin.default_route().id);
        assert_eq!(builtin.len(), 6);
        for site in Site::ALL {
            assert_eq!(builtin.by_site(site).count(), 2, "{site}");
        }
    }

    #[test]
    fn rejects_invalid_catalogs() {
        assert_eq!(RouteCatalog::new(Vec::new(), "x").unwrap_err(), CatalogError::Empty);

        let dup = vec![one_point_route("a"), one_point_route("a")];
        assert_eq!(
            RouteCatalog::new(dup, "a").unwrap_err(),
            CatalogError::DuplicateRoute("a".to_string())
        );

        let mut empty = one_point_route("b");
        empty.coordinates.clear();
        assert_eq!(
            RouteCatalog::new(vec![empty], "b").unwrap_err(),
            CatalogError::EmptyRoute("b".to_string())
        );

        assert_eq!(
            RouteCatalog::new(vec![one_point_route("c")], "missing").unwrap_err(),
            CatalogError::UnknownDefault("missing".to_string())
        );
    }

    #[test]
    fn resolve_matches_site_and_name() {
        let catalog = RouteCatalog::builtin();
        let glacier = catalog.resolve(&RouteAssignment::new(Site::HabaTso, "Glacier Eye Panorama"));
        assert_eq!(glacier.id, "haba-glacier-eye");

        // Right name, wrong site: no exact match.
        let wrong_site = RouteAssignment::new(Site::Nianlang, "Glacier Eye Panorama");
        assert!(catalog.find(&wrong_site).is_none());
        assert_eq!(catalog.resolve(&wrong_site).id, DEFAULT_ROUTE_ID);
    }

    #[test]
    fn unknown_assignment_falls_back_to_default() {
        let catalog = RouteCatalog::builtin();
        let route = catalog.resolve(&RouteAssignment::new(Site::BasumTso, "Discontinued Route"));
        assert_eq!(route.id, DEFAULT_ROUTE_ID);
    }

    #[test]
    fn default_fleet_starts_on_distinct_routes() {
        let catalog = RouteCatalog::builtin();
        let fleet = default_fleet(&catalog);
        assert_eq!(fleet.len(), 3);
        assert!(fleet.iter().all(|d| d.is_flying && d.route_index == 0));
        assert_eq!(fleet[0].position, catalog.get("basum-classic-loop").unwrap().coordinates[0]);
        assert_eq!(fleet[1].assignment.site, Site::HabaTso);
    }

    #[test]
    fn only_the_valley_route_enters_the_default_zone() {
        let catalog = RouteCatalog::builtin();
        let zone = NoFlyZone::default();
        for route in catalog.routes() {
            let crosses = route.coordinates.iter().any(|c| zone.contains(*c));
            assert_eq!(crosses, route.id == "nianlang-valley-sunrise", "{}", route.id);
        }
    }
}
