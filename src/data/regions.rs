//! Static region catalog
//!
//! The closed set of region names accepted on the command line, spelled
//! exactly as the dataset spells them.

/// Static array of all selectable regions
///
/// Contains the 19 regions plus the two autonomous provinces of Bolzano and
/// Trento, in the order they are listed to the user.
pub static REGIONS: [&str; 21] = [
    "Lombardia",
    "Lazio",
    "Campania",
    "Sicilia",
    "Veneto",
    "Emilia Romagna",
    "Abbruzzo",
    "Basilicata",
    "P.A. Bolzano",
    "Calabria",
    "Friuli Venezia Giulia",
    "Liguria",
    "Marche",
    "Molise",
    "Piemonte",
    "Puglia",
    "Sardegna",
    "Toscana",
    "P.A. Trento",
    "Umbria",
    "Valle d'Aosta",
];

/// Get all catalog regions
pub fn all_regions() -> &'static [&'static str] {
    &REGIONS
}

/// Looks up a region by its exact (case and whitespace sensitive) name
pub fn find_region(name: &str) -> Option<&'static str> {
    REGIONS.iter().copied().find(|region| *region == name)
}

/// Renders the catalog as a quoted, comma separated listing
///
/// Used in error messages so the user sees every valid name.
pub fn catalog_listing() -> String {
    REGIONS
        .iter()
        .map(|region| format!("'{}'", region))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_has_21_entries() {
        assert_eq!(all_regions().len(), 21);
    }

    #[test]
    fn test_all_regions_have_unique_names() {
        let mut names: Vec<&str> = all_regions().to_vec();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 21, "Region names are not unique");
    }

    #[test]
    fn test_find_region_is_exact() {
        assert_eq!(find_region("Toscana"), Some("Toscana"));
        assert_eq!(find_region("Toscana "), None);
        assert_eq!(find_region("toscana"), None);
        assert_eq!(find_region(""), None);
    }

    #[test]
    fn test_catalog_listing_mentions_every_region() {
        let listing = catalog_listing();
        for region in all_regions() {
            assert!(listing.contains(&format!("'{}'", region)), "missing {}", region);
        }
        assert!(listing.starts_with("'Lombardia'"));
        assert!(listing.ends_with("'Valle d'Aosta'"));
    }
}
