use crate::data::Restaurant;

const IMAGE_DIR: &str = "./img/";
const IMAGE_EXT: &str = "jpg";

/// The two sizes the image build step writes for every photograph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRepresentations {
    pub large_1x: String,
    pub small_1x: String,
}

pub fn url_for_restaurant(restaurant: &Restaurant) -> String {
    format!("./restaurant.html?id={}", restaurant.id)
}

/// `None` when the restaurant has no photograph.
pub fn image_url_for_restaurant(restaurant: &Restaurant) -> Option<ImageRepresentations> {
    restaurant
        .photograph
        .as_deref()
        .filter(|name| !name.is_empty())
        .map(image_representations_paths)
}

pub fn image_representations_paths(filename: &str) -> ImageRepresentations {
    ImageRepresentations {
        large_1x: format!("{IMAGE_DIR}{filename}-512_1x.{IMAGE_EXT}"),
        small_1x: format!("{IMAGE_DIR}{filename}-380_1x.{IMAGE_EXT}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture;

    #[test]
    fn test_restaurant_urls() {
        let restaurants = fixture::dataset().restaurants;
        assert_eq!(url_for_restaurant(&restaurants[1]), "./restaurant.html?id=2");

        let images = image_url_for_restaurant(&restaurants[0]).unwrap();
        assert_eq!(images.large_1x, "./img/1-512_1x.jpg");
        assert_eq!(images.small_1x, "./img/1-380_1x.jpg");

        assert_eq!(image_url_for_restaurant(&restaurants[2]), None);
    }
}
