use crate::model::SearchLocation;

/// The fixed set of locations the app can search for. There is no external
/// configuration; these are compiled in.
pub fn builtin() -> Vec<SearchLocation> {
    [
        ("Reykjavík", 64.1355, -21.8954),
        ("Akureyri", 65.6835, -18.0878),
        ("New York", 40.7128, -74.006),
        ("Tokyo", 35.6764, 139.65),
        ("Sydney", 33.8688, 151.2093),
    ]
    .into_iter()
    .map(|(title, lat, lng)| SearchLocation {
        title: title.to_string(),
        lat,
        lng,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_five_distinct_locations() {
        let locations = builtin();

        assert_eq!(locations.len(), 5);
        assert_eq!(locations[0].title, "Reykjavík");
        assert_eq!(locations[0].lat, 64.1355);
        assert_eq!(locations[0].lng, -21.8954);

        for pair in locations.windows(2) {
            assert_ne!(pair[0].title, pair[1].title);
        }
    }
}
