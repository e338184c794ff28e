use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// The document served by the dataset endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub restaurants: Vec<Restaurant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub neighborhood: String,
    /// base file name of the photo, without size suffix or extension
    #[serde(default)]
    pub photograph: Option<String>,
    #[serde(default)]
    pub photo_caption: String,
    #[serde(default)]
    pub photo_alt: String,
    pub address: String,
    pub latlng: LatLng,
    pub cuisine_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operating_hours: Option<OperatingHours>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

/// A review as the dataset carries it. Fields are never validated: text
/// fields accept any JSON scalar and the rating is kept as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default)]
    pub rating: Value,
    #[serde(default, deserialize_with = "lenient_text")]
    pub comments: String,
}

impl Review {
    /// The rating the way the page prints it.
    pub fn rating_text(&self) -> String {
        value_text(&self.rating)
    }
}

/// Weekday to opening hours, kept in the order the dataset lists them. A
/// repeated weekday keeps its first position and its last value.
pub type OperatingHours = IndexMap<String, String>;

fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Value::deserialize(deserializer).map(|value| value_text(&value))
}

#[test]
fn test_operating_hours_keep_source_order() {
    let raw = r#"{"Sunday": "closed", "Monday": "9:00 am - 5:00 pm", "Wednesday": "noon"}"#;
    let hours: OperatingHours = serde_json::from_str(raw).unwrap();
    let days = hours.iter().map(|(day, _)| day).collect::<Vec<_>>();
    assert_eq!(days, ["Sunday", "Monday", "Wednesday"]);

    let back = serde_json::to_string(&hours).unwrap();
    assert!(back.find("Sunday").unwrap() < back.find("Monday").unwrap());
}

#[test]
fn test_restaurant_optional_fields() {
    let raw = r#"{
        "id": 7,
        "name": "Bodega",
        "neighborhood": "Queens",
        "address": "1 Main St",
        "latlng": {"lat": 40.7, "lng": -73.9},
        "cuisine_type": "Pizza"
    }"#;
    let restaurant: Restaurant = serde_json::from_str(raw).unwrap();
    assert_eq!(restaurant.photograph, None);
    assert_eq!(restaurant.photo_alt, "");
    assert!(restaurant.operating_hours.is_none());
    assert!(restaurant.reviews.is_none());
}

#[test]
fn test_repeated_weekday_keeps_one_row() {
    let raw = r#"{"Monday": "9-5", "Tuesday": "9-5", "Monday": "closed"}"#;
    let hours: OperatingHours = serde_json::from_str(raw).unwrap();
    let rows = hours.iter().collect::<Vec<_>>();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0], (&"Monday".to_string(), &"closed".to_string()));
    assert_eq!(rows[1].0, "Tuesday");
}

#[test]
fn test_review_values_taken_as_received() {
    let raw = r#"[
        {"name": "Ann", "date": "May 1", "rating": "4", "comments": "ok"},
        {"name": 12, "rating": 3.5, "comments": null},
        {}
    ]"#;
    let reviews: Vec<Review> = serde_json::from_str(raw).unwrap();
    assert_eq!(reviews[0].rating_text(), "4");
    assert_eq!(reviews[1].name, "12");
    assert_eq!(reviews[1].date, "");
    assert_eq!(reviews[1].rating_text(), "3.5");
    assert_eq!(reviews[1].comments, "");
    assert_eq!(reviews[2].rating_text(), "");
}
