//! Static city table, city resolution and weather code lookup.

use weather_proxy::weather::codes::{self, Condition, WEATHER_CODES};
use weather_proxy::weather::{find_city, MAJOR_CITIES};

#[test]
fn city_lookup_ignores_case() {
    let upper = find_city("New York").expect("exact name");
    let lower = find_city("new york").expect("lowercase name");
    let shouty = find_city("NEW YORK").expect("uppercase name");

    assert_eq!(upper, lower);
    assert_eq!(upper, shouty);
    assert_eq!(upper.country, "USA");
    assert_eq!(upper.latitude, 40.7128);
    assert_eq!(upper.longitude, -74.006);
}

#[test]
fn city_lookup_does_not_trim_or_fold_accents() {
    assert!(find_city(" London").is_none());
    assert!(find_city("London ").is_none());
    assert!(find_city("Mexico  City").is_none());
    assert!(find_city("Atlantis").is_none());
    assert!(find_city("").is_none());
}

#[test]
fn city_table_has_unique_names() {
    assert_eq!(MAJOR_CITIES.len(), 20);
    for (i, a) in MAJOR_CITIES.iter().enumerate() {
        for b in &MAJOR_CITIES[i + 1..] {
            assert_ne!(a.name.to_lowercase(), b.name.to_lowercase());
        }
        assert!((-90.0..=90.0).contains(&a.latitude), "{}", a.name);
        assert!((-180.0..=180.0).contains(&a.longitude), "{}", a.name);
    }
}

#[test]
fn weather_codes_describe_known_values() {
    let clear = codes::describe(0).expect("code 0");
    assert_eq!(clear.description, "Clear sky");
    assert_eq!(clear.condition, Condition::Clear);

    assert_eq!(codes::describe(63).map(|c| c.condition), Some(Condition::Rain));
    assert_eq!(codes::describe(86).map(|c| c.condition), Some(Condition::Snow));
    assert_eq!(
        codes::describe(99).map(|c| c.description),
        Some("Thunderstorm with hail")
    );
}

#[test]
fn weather_codes_reject_unknown_values() {
    assert!(codes::describe(4).is_none());
    assert!(codes::describe(100).is_none());
}

#[test]
fn weather_code_table_is_sorted_and_unique() {
    assert!(WEATHER_CODES.windows(2).all(|w| w[0].code < w[1].code));
}
