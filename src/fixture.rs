//! Three restaurants shared by the unit tests.

use std::sync::Arc;

use crate::{
    data::Dataset,
    provider::{DataProvider, DatasetSource},
};

pub(crate) const DATASET: &str = r#"{
  "restaurants": [
    {
      "id": 1,
      "name": "Trattoria Uno",
      "neighborhood": "A",
      "photograph": "1",
      "photo_caption": "The dining room",
      "photo_alt": "tables by the window",
      "address": "1 First Ave",
      "latlng": { "lat": 40.713829, "lng": -73.989667 },
      "cuisine_type": "Italian",
      "operating_hours": {
        "Monday": "5:30 pm - 11:00 pm",
        "Tuesday": "5:30 pm - 11:00 pm",
        "Sunday": "Closed"
      },
      "reviews": [
        {
          "name": "Steve",
          "date": "October 26, 2016",
          "rating": 4,
          "comments": "Solid pasta & good wine."
        },
        {
          "name": "Morgan",
          "date": "October 26, 2016",
          "rating": 5,
          "comments": "Best <em>cacio e pepe</em> in town."
        }
      ]
    },
    {
      "id": 2,
      "name": "Taqueria Dos",
      "neighborhood": "B",
      "photograph": "2",
      "photo_caption": "Counter",
      "photo_alt": "tacos on a plate",
      "address": "2 Second St",
      "latlng": { "lat": 40.683555, "lng": -73.966393 },
      "cuisine_type": "Mexican"
    },
    {
      "id": 3,
      "name": "Osteria Tre",
      "neighborhood": "A",
      "address": "3 Third Pl",
      "latlng": { "lat": 40.747143, "lng": -73.985414 },
      "cuisine_type": "Italian",
      "operating_hours": {
        "Monday": "noon - 10:00 pm"
      },
      "reviews": []
    }
  ]
}"#;

pub(crate) fn dataset() -> Dataset {
    serde_json::from_str(DATASET).unwrap()
}

pub(crate) fn provider() -> DataProvider {
    DataProvider::new(DatasetSource::Memory(Arc::new(dataset().restaurants)))
}
