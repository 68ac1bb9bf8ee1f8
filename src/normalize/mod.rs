//! Maps loosely-typed upstream project records onto [`Property`].
//!
//! Every logical attribute is resolved from an ordered list of candidate
//! fields; the first candidate yielding a usable value wins. Nothing in here
//! fails: missing or malformed data turns into defaults or absent fields.

pub mod images;
pub mod numbers;
pub mod text;

use crate::models::{ListingType, Property, PropertyId};
use numbers::{as_count, as_f64, as_positive};
use serde_json::Value;
use text::{as_flag, as_text, as_text_list};

pub const DEFAULT_TITLE: &str = "Untitled Property";
pub const DEFAULT_TYPE: &str = "Off-Plan";
pub const DEFAULT_LOCATION: &str = "Dubai, UAE";

/// First of `keys` whose value `extract` accepts
fn first_of<T>(raw: &Value, keys: &[&str], extract: impl Fn(&Value) -> Option<T>) -> Option<T> {
    keys.iter().filter_map(|k| raw.get(*k)).find_map(extract)
}

fn as_id(value: &Value) -> Option<PropertyId> {
    match value {
        Value::Number(n) => n.as_i64().map(PropertyId::Number),
        Value::String(s) if !s.trim().is_empty() => Some(PropertyId::Text(s.trim().to_string())),
        _ => None,
    }
}

/// `{min, max}` / `{from, to}` range objects
fn range_of(value: &Value) -> Option<(Option<f64>, Option<f64>)> {
    let map = value.as_object()?;
    let min = ["min", "from"].iter().filter_map(|k| map.get(*k)).find_map(as_positive);
    let max = ["max", "to"].iter().filter_map(|k| map.get(*k)).find_map(as_positive);
    (min.is_some() || max.is_some()).then_some((min, max))
}

fn coordinate(raw: &Value, keys: &[&str], nested: &[&str]) -> Option<f64> {
    let valid = |v: &Value| as_f64(v).filter(|n| *n != 0.0);
    first_of(raw, keys, valid).or_else(|| {
        ["coordinates", "location"]
            .iter()
            .filter_map(|k| raw.get(*k))
            .find_map(|obj| first_of(obj, nested, valid))
    })
}

/// Convert one upstream record into the canonical property model
pub fn map_api_property(raw: &Value) -> Property {
    let slug = first_of(raw, &["slug"], as_text);
    let id = first_of(raw, &["id", "project_id", "_id"], as_id)
        .or_else(|| slug.clone().map(PropertyId::Text))
        .unwrap_or_else(|| PropertyId::Text(String::new()));

    let title = first_of(raw, &["title", "name", "property_name"], as_text)
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let description = first_of(raw, &["description", "short_description", "summary"], as_text)
        .unwrap_or_default();
    let property_type = first_of(raw, &["type", "property_type", "project_type"], as_text)
        .unwrap_or_else(|| DEFAULT_TYPE.to_string());

    let price_range = raw.get("price").and_then(range_of);
    let min_price = first_of(raw, &["min_price", "price_from", "starting_price"], as_positive)
        .or_else(|| price_range.and_then(|r| r.0));
    let max_price = first_of(raw, &["max_price", "price_to"], as_positive)
        .or_else(|| price_range.and_then(|r| r.1));
    let price = first_of(raw, &["price"], as_positive)
        .or(min_price)
        .or(max_price)
        .unwrap_or(0.0);

    let area_range = first_of(raw, &["area", "size"], range_of);
    let min_area = first_of(raw, &["min_area", "area_from", "area_min"], as_positive)
        .or_else(|| area_range.and_then(|r| r.0));
    let max_area = first_of(raw, &["max_area", "area_to", "area_max"], as_positive)
        .or_else(|| area_range.and_then(|r| r.1));
    let area = first_of(raw, &["area", "size"], as_positive).or(min_area).or(max_area);

    let bedrooms = first_of(raw, &["bedrooms", "rooms", "min_bedrooms", "bedroom"], as_count);
    let bathrooms = first_of(raw, &["bathrooms", "baths", "bathroom"], as_count);

    let city = first_of(raw, &["city", "emirate"], as_text);
    let locality = first_of(raw, &["locality", "district", "community"], as_text);
    let location = first_of(
        raw,
        &["location", "address", "locality", "district", "area_name", "city"],
        as_text,
    )
    .unwrap_or_else(|| DEFAULT_LOCATION.to_string());

    let (main_image, gallery) = images::resolve_images(raw);

    let listing_type = match first_of(raw, &["listing_type", "listingType"], as_text) {
        Some(t) if t.eq_ignore_ascii_case("rent") => ListingType::Rent,
        _ => ListingType::Sale,
    };

    Property {
        id,
        slug,
        title,
        description,
        property_type,
        price,
        min_price,
        max_price,
        bedrooms,
        bathrooms,
        area,
        min_area,
        max_area,
        location,
        city,
        locality,
        category: first_of(raw, &["category", "property_category"], as_text),
        developer: first_of(raw, &["developer", "developer_name", "builder"], as_text),
        amenities: first_of(raw, &["amenities", "features"], as_text_list).unwrap_or_default(),
        main_image,
        gallery,
        created_at: first_of(raw, &["created_at", "createdAt"], as_text),
        updated_at: first_of(raw, &["updated_at", "updatedAt"], as_text),
        ready_date: first_of(
            raw,
            &["ready_date", "readyDate", "completion_date", "handover_date"],
            as_text,
        ),
        listing_type,
        floors: first_of(raw, &["floors", "floors_count", "total_floors"], as_count),
        security: first_of(raw, &["security"], |v| match v {
            Value::Bool(true) => Some("Yes".to_string()),
            other => as_text(other),
        }),
        furnished: first_of(raw, &["furnished", "is_furnished"], as_flag),
        payment_plan: first_of(raw, &["payment_plan", "paymentPlan", "payment_plans"], as_text),
        roi: first_of(raw, &["roi", "expected_roi"], as_positive),
        latitude: coordinate(raw, &["latitude", "lat"], &["lat", "latitude"]),
        longitude: coordinate(raw, &["longitude", "lng", "lon"], &["lng", "lon", "longitude"]),
        construction_percent: first_of(
            raw,
            &["construction_percent", "construction_progress", "construction_percentage"],
            |v| as_f64(v).filter(|n| *n >= 0.0),
        ),
        total_units: first_of(raw, &["total_units", "units_count", "units"], as_count),
        agent_fee: first_of(raw, &["agent_fee", "commission"], as_positive),
        project_badges: first_of(raw, &["project_badges", "badges"], as_text_list)
            .unwrap_or_default(),
        sales_status: first_of(raw, &["sales_status", "status"], as_text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PLACEHOLDER_IMAGE;
    use serde_json::json;

    #[test]
    fn maps_a_full_live_record() {
        let raw = json!({
            "id": 1842,
            "slug": "marina-vista",
            "name": "Marina Vista",
            "description": "<p>Sea views</p>",
            "type": ["Apartment"],
            "min_price": "AED 1,450,000",
            "max_price": 3_200_000,
            "bedrooms": ["One", "Two"],
            "bathrooms": "2",
            "area": { "min": 720, "max": 1800 },
            "location": { "name": "Dubai Marina" },
            "city": { "name": "Dubai" },
            "district": "Dubai Marina",
            "developer": { "id": 7, "name": "Emaar" },
            "amenities": [{ "name": "Pool" }, "Gym"],
            "images": ["https://cdn/1.jpg", "https://cdn/2.jpg"],
            "completion_date": "Q4 2027",
            "coordinates": { "lat": 25.08, "lng": 55.14 },
            "sales_status": "On sale",
            "listing_type": "sale"
        });

        let property = map_api_property(&raw);
        assert_eq!(property.id, PropertyId::Number(1842));
        assert_eq!(property.slug.as_deref(), Some("marina-vista"));
        assert_eq!(property.title, "Marina Vista");
        assert_eq!(property.property_type, "Apartment");
        assert_eq!(property.price, 1_450_000.0);
        assert_eq!(property.min_price, Some(1_450_000.0));
        assert_eq!(property.max_price, Some(3_200_000.0));
        assert_eq!(property.bedrooms, Some(1));
        assert_eq!(property.bathrooms, Some(2));
        assert_eq!(property.area, Some(720.0));
        assert_eq!(property.max_area, Some(1800.0));
        assert_eq!(property.location, "Dubai Marina");
        assert_eq!(property.city.as_deref(), Some("Dubai"));
        assert_eq!(property.locality.as_deref(), Some("Dubai Marina"));
        assert_eq!(property.developer.as_deref(), Some("Emaar"));
        assert_eq!(property.amenities, vec!["Pool", "Gym"]);
        assert_eq!(property.main_image, "https://cdn/1.jpg");
        assert_eq!(property.gallery, vec!["https://cdn/2.jpg"]);
        assert_eq!(property.ready_date.as_deref(), Some("Q4 2027"));
        assert_eq!(property.latitude, Some(25.08));
        assert_eq!(property.longitude, Some(55.14));
        assert_eq!(property.sales_status.as_deref(), Some("On sale"));
        assert_eq!(property.plain_description(), "Sea views");
    }

    #[test]
    fn empty_record_gets_defaults() {
        let property = map_api_property(&json!({}));
        assert_eq!(property.title, DEFAULT_TITLE);
        assert_eq!(property.property_type, DEFAULT_TYPE);
        assert_eq!(property.location, DEFAULT_LOCATION);
        assert_eq!(property.price, 0.0);
        assert_eq!(property.main_image, PLACEHOLDER_IMAGE);
        assert_eq!(property.bedrooms, None);
        assert_eq!(property.area, None);
        assert_eq!(property.listing_type, ListingType::Sale);
    }

    #[test]
    fn non_object_input_does_not_panic() {
        for raw in [json!(null), json!(5), json!("text"), json!([1, 2])] {
            let property = map_api_property(&raw);
            assert_eq!(property.title, DEFAULT_TITLE);
        }
    }

    #[test]
    fn title_falls_back_through_names() {
        assert_eq!(map_api_property(&json!({ "title": "", "property_name": "Creek Edge" })).title, "Creek Edge");
    }

    #[test]
    fn unknown_bedrooms_are_absent() {
        for value in [json!(""), json!("zero"), json!("Zero"), json!(0), json!("0")] {
            let property = map_api_property(&json!({ "bedrooms": value, "bathrooms": value }));
            assert_eq!(property.bedrooms, None, "bedrooms {:?}", value);
            assert_eq!(property.bathrooms, None, "bathrooms {:?}", value);
        }
    }

    #[test]
    fn spelled_out_bedrooms_resolve_up_to_twenty() {
        let words = [
            "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
            "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen",
            "eighteen", "nineteen", "twenty",
        ];
        for (idx, word) in words.iter().enumerate() {
            let expected = Some(idx as u32 + 1);
            assert_eq!(map_api_property(&json!({ "bedrooms": word })).bedrooms, expected);
            assert_eq!(map_api_property(&json!({ "bedrooms": word.to_uppercase() })).bedrooms, expected);
            assert_eq!(map_api_property(&json!({ "bedrooms": numbers::number_to_word(idx as u32 + 1) })).bedrooms, expected);
        }
    }

    #[test]
    fn mapping_is_idempotent() {
        let raw = json!({
            "id": "abc",
            "title": "Sobha Hartland",
            "price": { "min": 900000 },
            "gallery": ["https://cdn/a.jpg", "https://cdn/a.jpg"],
            "furnished": "yes"
        });
        assert_eq!(map_api_property(&raw), map_api_property(&raw));
    }

    #[test]
    fn price_resolves_from_ranges_and_defaults_to_zero() {
        assert_eq!(map_api_property(&json!({ "price": { "min": 900000, "max": 1200000 } })).price, 900_000.0);
        assert_eq!(map_api_property(&json!({ "price": "on request" })).price, 0.0);
        assert_eq!(map_api_property(&json!({ "price": 0, "price_to": 500000 })).price, 500_000.0);
    }

    #[test]
    fn rent_listing_and_extension_fields() {
        let property = map_api_property(&json!({
            "listingType": "Rent",
            "security": true,
            "furnished": false,
            "roi": "7.5%",
            "floors": "Twelve",
            "total_units": 240,
            "agent_fee": 2,
            "badges": "Hot, Launch",
            "construction_progress": 0
        }));
        assert_eq!(property.listing_type, ListingType::Rent);
        assert_eq!(property.security.as_deref(), Some("Yes"));
        assert_eq!(property.furnished, Some(false));
        assert_eq!(property.roi, Some(7.5));
        assert_eq!(property.floors, Some(12));
        assert_eq!(property.total_units, Some(240));
        assert_eq!(property.agent_fee, Some(2.0));
        assert_eq!(property.project_badges, vec!["Hot", "Launch"]);
        assert_eq!(property.construction_percent, Some(0.0));
    }

    #[test]
    fn slug_stands_in_for_missing_id() {
        let property = map_api_property(&json!({ "slug": "creek-rise" }));
        assert_eq!(property.id, PropertyId::Text("creek-rise".to_string()));
        assert!(property.is_identified_by("creek-rise"));
    }
}
