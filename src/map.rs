use serde::Serialize;

use crate::{
    data::{LatLng, Restaurant},
    urls,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: LatLng,
    pub title: String,
    /// where a click on the marker navigates to
    pub url: String,
}

pub fn map_marker_for_restaurant(restaurant: &Restaurant) -> Marker {
    Marker {
        position: restaurant.latlng,
        title: restaurant.name.clone(),
        url: urls::url_for_restaurant(restaurant),
    }
}

/// State handed to the client-side map script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    center: LatLng,
    zoom: u8,
    scrollwheel: bool,
    markers: Vec<Marker>,
}

impl MapView {
    pub fn new(center: LatLng, zoom: u8) -> Self {
        Self {
            center,
            zoom,
            scrollwheel: false,
            markers: Vec::new(),
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn add_marker(&mut self, marker: Marker) {
        self.markers.push(marker);
    }

    /// Detach every marker from the map.
    pub fn clear_markers(&mut self) {
        if !self.markers.is_empty() {
            tracing::debug!("detaching {} markers", self.markers.len());
        }
        self.markers.clear();
    }

    /// JSON safe to embed inside a `<script>` element.
    pub fn to_script_json(&self) -> serde_json::Result<String> {
        Ok(serde_json::to_string(self)?.replace("</", "<\\/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;

    #[test]
    fn test_markers_and_json() {
        let restaurants = fixture::dataset().restaurants;
        let mut map = MapView::new(restaurants[0].latlng, 16);
        map.add_marker(map_marker_for_restaurant(&restaurants[0]));
        assert_eq!(map.markers()[0].url, "./restaurant.html?id=1");
        assert_eq!(map.markers()[0].title, "Trattoria Uno");

        let json: serde_json::Value = serde_json::from_str(&map.to_script_json().unwrap()).unwrap();
        assert_eq!(json["zoom"], 16);
        assert_eq!(json["scrollwheel"], false);
        assert_eq!(json["markers"][0]["position"]["lat"], 40.713829);

        map.clear_markers();
        assert!(map.markers().is_empty());
    }

    #[test]
    fn test_script_json_cannot_close_the_script() {
        let mut map = MapView::new(LatLng { lat: 0.0, lng: 0.0 }, 12);
        map.add_marker(Marker {
            position: LatLng { lat: 0.0, lng: 0.0 },
            title: "</script><script>alert(1)".to_string(),
            url: "./restaurant.html?id=9".to_string(),
        });
        assert!(!map.to_script_json().unwrap().contains("</script>"));
    }
}
