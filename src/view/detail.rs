use actix_web::web::Query;

use crate::{
    data::{OperatingHours, Restaurant, Review},
    dom::{Document, Element},
    error::{Error, Result},
    map::{self, MapView},
    provider::DataProvider,
    urls,
};

pub const RESTAURANT_NAME: &str = "restaurant-name";
pub const RESTAURANT_ADDRESS: &str = "restaurant-address";
pub const RESTAURANT_IMG: &str = "restaurant-img";
pub const RESTAURANT_CAPTION: &str = "restaurant-caption";
pub const RESTAURANT_CUISINE: &str = "restaurant-cuisine";
pub const RESTAURANT_HOURS: &str = "restaurant-hours";
pub const REVIEWS_CONTAINER: &str = "reviews-container";
pub const BREADCRUMB: &str = "breadcrumb";

const ZOOM: u8 = 16;

/// Value of the first `name` query parameter in `url`.
///
/// `None` when the parameter is absent, an empty string when it has no value.
pub fn get_parameter_by_name(name: &str, url: &str) -> Option<String> {
    let query = url.split_once('?')?.1;
    let query = query.split('#').next().unwrap_or_default();
    let Ok(pairs) = Query::<Vec<(String, String)>>::from_query(query) else {
        return None;
    };
    pairs
        .into_inner()
        .into_iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value)
}

/// State of the detail page for one render.
#[derive(Debug, Clone)]
pub struct DetailView {
    restaurant: Option<Restaurant>,
    map: Option<MapView>,
    document: Document,
}

impl Default for DetailView {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailView {
    pub fn new() -> Self {
        let document = Document::new([
            Element::with_id("h2", RESTAURANT_NAME),
            Element::with_id("p", RESTAURANT_ADDRESS),
            Element::with_id("img", RESTAURANT_IMG),
            Element::with_id("figcaption", RESTAURANT_CAPTION),
            Element::with_id("p", RESTAURANT_CUISINE),
            Element::with_id("table", RESTAURANT_HOURS),
            Element::with_id("section", REVIEWS_CONTAINER),
            Element::with_id("ul", BREADCRUMB).child(
                Element::new("li").child(Element::new("a").attr("href", "/").text("Home")),
            ),
        ]);
        Self {
            restaurant: None,
            map: None,
            document,
        }
    }

    pub fn restaurant(&self) -> Option<&Restaurant> {
        self.restaurant.as_ref()
    }

    pub fn map(&self) -> Option<&MapView> {
        self.map.as_ref()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Load the restaurant named by `url`, then center a map on it. A failure
    /// is logged and nothing further is rendered.
    pub async fn init_map(&mut self, provider: &DataProvider, url: &str) {
        let restaurant = match self.fetch_restaurant_from_url(provider, url).await {
            Ok(restaurant) => restaurant.clone(),
            Err(e) => {
                tracing::error!("fail to load restaurant from {url}: {e}");
                return;
            }
        };

        let mut map = MapView::new(restaurant.latlng, ZOOM);
        if let Err(e) = self.fill_breadcrumb() {
            tracing::error!("fail to fill breadcrumb: {e}");
        }
        map.add_marker(map::map_marker_for_restaurant(&restaurant));
        self.map = Some(map);
    }

    pub async fn fetch_restaurant_from_url(
        &mut self,
        provider: &DataProvider,
        url: &str,
    ) -> Result<&Restaurant> {
        if self.restaurant.is_none() {
            let id = get_parameter_by_name("id", url)
                .filter(|id| !id.is_empty())
                .ok_or(Error::MissingId)?;
            let restaurant = provider.fetch_restaurant_by_id(&id).await?;
            self.fill_restaurant_html(&restaurant)?;
            self.restaurant = Some(restaurant);
        }
        self.restaurant.as_ref().ok_or(Error::RestaurantNotFound)
    }

    pub fn fill_restaurant_html(&mut self, restaurant: &Restaurant) -> Result<()> {
        let name = self.document.element_mut(RESTAURANT_NAME)?;
        name.set_attr("tabindex", "0");
        name.set_text(restaurant.name.as_str());

        let address = self.document.element_mut(RESTAURANT_ADDRESS)?;
        address.set_attr("tabindex", "0");
        address.set_text(restaurant.address.as_str());

        if let Some(images) = urls::image_url_for_restaurant(restaurant) {
            let image = self.document.element_mut(RESTAURANT_IMG)?;
            image.set_attr("class", "restaurant-img");
            image.set_attr("aria-labelledby", RESTAURANT_CAPTION);
            image.set_attr("role", "img");
            image.set_attr("src", images.large_1x);
            image.set_attr("tabindex", "0");
            image.set_attr("alt", format!("{} Restaurant", restaurant.name));

            self.document
                .element_mut(RESTAURANT_CAPTION)?
                .set_text(restaurant.photo_caption.as_str());
        }

        self.document
            .element_mut(RESTAURANT_CUISINE)?
            .set_text(restaurant.cuisine_type.as_str());

        if let Some(hours) = &restaurant.operating_hours {
            self.fill_restaurant_hours_html(hours)?;
        }
        self.fill_reviews_html(restaurant.reviews.as_deref())
    }

    /// One row per weekday, in the order the dataset lists them.
    pub fn fill_restaurant_hours_html(&mut self, operating_hours: &OperatingHours) -> Result<()> {
        let table = self.document.element_mut(RESTAURANT_HOURS)?;
        for (day, hours) in operating_hours.iter() {
            table.append(
                Element::new("tr")
                    .child(Element::new("td").attr("tabindex", "0").text(day))
                    .child(Element::new("td").attr("tabindex", "0").text(hours)),
            );
        }
        Ok(())
    }

    pub fn fill_reviews_html(&mut self, reviews: Option<&[Review]>) -> Result<()> {
        let container = self.document.element_mut(REVIEWS_CONTAINER)?;
        container.append(Element::new("h3").text("Reviews"));

        let Some(reviews) = reviews.filter(|reviews| !reviews.is_empty()) else {
            container.append(Element::new("p").text("No reviews yet!"));
            return Ok(());
        };
        let mut list = Element::with_id("ul", "reviews-list");
        for review in reviews {
            list.append(create_review_html(review));
        }
        container.append(list);
        Ok(())
    }

    pub fn fill_breadcrumb(&mut self) -> Result<()> {
        let Some(restaurant) = &self.restaurant else {
            return Err(Error::RestaurantNotFound);
        };
        self.document
            .element_mut(BREADCRUMB)?
            .append(Element::new("li").text(restaurant.name.as_str()));
        Ok(())
    }
}

pub fn create_review_html(review: &Review) -> Element {
    Element::new("li")
        .child(Element::new("p").attr("tabindex", "0").text(review.name.as_str()))
        .child(Element::new("p").attr("tabindex", "0").text(review.date.as_str()))
        .child(
            Element::new("p")
                .attr("tabindex", "0")
                .text(format!("Rating: {}", review.rating_text())),
        )
        .child(Element::new("p").attr("tabindex", "0").text(review.comments.as_str()))
}
