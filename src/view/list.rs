use crate::{
    data::{LatLng, Restaurant},
    dom::{Document, Element},
    error::Result,
    map::{self, MapView},
    provider::{DataProvider, Filter, RestaurantQuery},
    urls,
};

pub const NEIGHBORHOODS_SELECT: &str = "neighborhoods-select";
pub const CUISINES_SELECT: &str = "cuisines-select";
pub const RESTAURANTS_LIST: &str = "restaurants-list";

const DEFAULT_CENTER: LatLng = LatLng {
    lat: 40.722216,
    lng: -73.987501,
};
const DEFAULT_ZOOM: u8 = 12;

/// State of the list page for one render.
#[derive(Debug, Clone)]
pub struct ListView {
    query: RestaurantQuery,
    restaurants: Vec<Restaurant>,
    neighborhoods: Vec<String>,
    cuisines: Vec<String>,
    map: MapView,
    document: Document,
}

impl ListView {
    pub fn new(query: RestaurantQuery) -> Self {
        let document = Document::new([
            select_control(
                NEIGHBORHOODS_SELECT,
                "neighborhood",
                "All Neighborhoods",
                &query.neighborhood,
            ),
            select_control(CUISINES_SELECT, "cuisine", "All Cuisines", &query.cuisine),
            Element::with_id("ul", RESTAURANTS_LIST),
        ]);
        Self {
            query,
            restaurants: Vec::new(),
            neighborhoods: Vec::new(),
            cuisines: Vec::new(),
            map: MapView::new(DEFAULT_CENTER, DEFAULT_ZOOM),
            document,
        }
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn neighborhoods(&self) -> &[String] {
        &self.neighborhoods
    }

    pub fn cuisines(&self) -> &[String] {
        &self.cuisines
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Fill both select controls, then the list and the map. A failed step
    /// is logged and leaves the page incomplete.
    pub async fn load(&mut self, provider: &DataProvider) {
        if let Err(e) = self.fetch_neighborhoods(provider).await {
            tracing::error!("fail to fetch neighborhoods: {e}");
        }
        if let Err(e) = self.fetch_cuisines(provider).await {
            tracing::error!("fail to fetch cuisines: {e}");
        }
        if let Err(e) = self.update_restaurants(provider).await {
            tracing::error!("fail to update restaurants: {e}");
        }
    }

    pub async fn fetch_neighborhoods(&mut self, provider: &DataProvider) -> Result<()> {
        self.neighborhoods = provider.fetch_neighborhoods().await?;
        self.fill_neighborhoods_html()
    }

    pub fn fill_neighborhoods_html(&mut self) -> Result<()> {
        let select = self.document.element_mut(NEIGHBORHOODS_SELECT)?;
        fill_options(select, &self.neighborhoods, &self.query.neighborhood);
        Ok(())
    }

    pub async fn fetch_cuisines(&mut self, provider: &DataProvider) -> Result<()> {
        self.cuisines = provider.fetch_cuisines().await?;
        self.fill_cuisines_html()
    }

    pub fn fill_cuisines_html(&mut self) -> Result<()> {
        let select = self.document.element_mut(CUISINES_SELECT)?;
        fill_options(select, &self.cuisines, &self.query.cuisine);
        Ok(())
    }

    /// Re-fetch, re-filter and rebuild the list and markers from scratch.
    pub async fn update_restaurants(&mut self, provider: &DataProvider) -> Result<()> {
        let restaurants = provider
            .fetch_restaurants_by_cuisine_and_neighborhood(&self.query)
            .await?;
        self.reset_restaurants(restaurants)?;
        self.fill_restaurants_html()
    }

    pub fn reset_restaurants(&mut self, restaurants: Vec<Restaurant>) -> Result<()> {
        self.restaurants.clear();
        self.document.element_mut(RESTAURANTS_LIST)?.clear();

        self.map.clear_markers();
        self.restaurants = restaurants;
        Ok(())
    }

    pub fn fill_restaurants_html(&mut self) -> Result<()> {
        let list = self.document.element_mut(RESTAURANTS_LIST)?;
        for restaurant in &self.restaurants {
            list.append(create_restaurant_html(restaurant));
        }
        self.add_markers_to_map();
        Ok(())
    }

    pub fn add_markers_to_map(&mut self) {
        for restaurant in &self.restaurants {
            self.map.add_marker(map::map_marker_for_restaurant(restaurant));
        }
    }
}

/// A select control whose `name` is the query parameter it submits.
fn select_control(id: &str, name: &str, all_label: &str, active: &Filter) -> Element {
    let mut all = Element::new("option").attr("value", "all").text(all_label);
    if *active == Filter::All {
        all.set_attr("selected", "selected");
    }
    Element::with_id("select", id)
        .attr("name", name)
        .attr("aria-label", all_label)
        .child(all)
}

fn fill_options(select: &mut Element, values: &[String], active: &Filter) {
    for value in values {
        let mut option = Element::new("option")
            .attr("value", value.as_str())
            .text(value.as_str());
        if *active != Filter::All && active.as_str() == value.as_str() {
            option.set_attr("selected", "selected");
        }
        select.append(option);
    }
}

/// One self-contained list entry.
pub fn create_restaurant_html(restaurant: &Restaurant) -> Element {
    let mut li = Element::new("li");

    if let Some(images) = urls::image_url_for_restaurant(restaurant) {
        let figure_id = format!("fig_{}", restaurant.id);
        let picture = Element::new("picture")
            .attr("class", "restaurant-img")
            .attr("aria-labelledby", figure_id.as_str())
            .attr("role", "img")
            .child(
                Element::new("source")
                    .attr("media", "(max-width:700px)")
                    .attr("srcset", format!("{} 1x", images.small_1x)),
            )
            .child(
                Element::new("source")
                    .attr("media", "(min-width:701px)")
                    .attr("srcset", format!("{} 1x", images.large_1x)),
            )
            .child(
                Element::new("img")
                    .attr("src", images.small_1x.as_str())
                    .attr(
                        "alt",
                        format!("restaurant {}, {}", restaurant.name, restaurant.photo_alt),
                    )
                    .attr("class", "restaurant-img"),
            )
            .child(
                Element::with_id("figcaption", figure_id.as_str())
                    .text(restaurant.photo_caption.as_str()),
            );
        li.append(picture);
    }

    li.append(Element::new("h1").text(restaurant.name.as_str()));
    li.append(Element::new("p").text(restaurant.neighborhood.as_str()));
    li.append(Element::new("p").text(restaurant.address.as_str()));
    li.append(
        Element::new("a")
            .attr("role", "button")
            .attr("aria-label", format!("View more about {}", restaurant.name))
            .attr("href", urls::url_for_restaurant(restaurant))
            .text("View Details"),
    );
    li
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        fixture,
        provider::{DatasetSource, RestaurantQueryBuilder},
    };

    fn list_ids(view: &ListView) -> Vec<i64> {
        view.restaurants().iter().map(|r| r.id).collect()
    }

    #[tokio::test]
    async fn test_load_renders_every_restaurant() {
        let provider = fixture::provider();
        let mut view = ListView::new(RestaurantQuery::default());
        view.load(&provider).await;

        assert_eq!(list_ids(&view), [1, 2, 3]);
        assert_eq!(view.neighborhoods(), ["A", "B"]);
        assert_eq!(view.cuisines(), ["Italian", "Mexican"]);
        assert_eq!(view.map().markers().len(), 3);

        let list = view.document().get_element_by_id(RESTAURANTS_LIST).unwrap();
        assert_eq!(list.child_elements().count(), 3);

        let select = view.document().get_element_by_id(CUISINES_SELECT).unwrap();
        let values = select
            .child_elements()
            .map(|opt| opt.get_attr("value").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(values, ["all", "Italian", "Mexican"]);
    }

    #[tokio::test]
    async fn test_filter_change_rebuilds_list_and_markers() {
        let provider = fixture::provider();
        let query = RestaurantQueryBuilder::default()
            .cuisine("Italian")
            .neighborhood("A")
            .build()
            .unwrap();
        let mut view = ListView::new(query);
        view.update_restaurants(&provider).await.unwrap();
        assert_eq!(list_ids(&view), [1, 3]);

        // a second update must not leave items from the first behind
        view.update_restaurants(&provider).await.unwrap();
        let list = view.document().get_element_by_id(RESTAURANTS_LIST).unwrap();
        assert_eq!(list.child_elements().count(), 2);
        let titles = view
            .map()
            .markers()
            .iter()
            .map(|m| m.title.as_str())
            .collect::<Vec<_>>();
        assert_eq!(titles, ["Trattoria Uno", "Osteria Tre"]);
    }

    #[tokio::test]
    async fn test_active_filter_is_selected() {
        let provider = fixture::provider();
        let query = RestaurantQueryBuilder::default()
            .neighborhood("B")
            .build()
            .unwrap();
        let mut view = ListView::new(query);
        view.fetch_neighborhoods(&provider).await.unwrap();

        let select = view.document().get_element_by_id(NEIGHBORHOODS_SELECT).unwrap();
        let selected = select
            .child_elements()
            .filter(|opt| opt.get_attr("selected").is_some())
            .map(|opt| opt.text_content())
            .collect::<Vec<_>>();
        assert_eq!(selected, ["B"]);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_page_unloaded() {
        let missing = std::env::temp_dir().join("restaurant-reviews-does-not-exist.json");
        let provider = DataProvider::new(DatasetSource::File(missing));
        let mut view = ListView::new(RestaurantQuery::default());
        let before = view.document().clone();

        view.load(&provider).await;
        assert_eq!(view.document(), &before);
        assert!(view.restaurants().is_empty());
        assert!(view.map().markers().is_empty());
    }

    #[test]
    fn test_restaurant_item() {
        let restaurants = fixture::dataset().restaurants;
        let html = create_restaurant_html(&restaurants[0]).render();
        assert!(html.contains(
            r#"<source media="(max-width:700px)" srcset="./img/1-380_1x.jpg 1x">"#
        ));
        assert!(html.contains(
            r#"<source media="(min-width:701px)" srcset="./img/1-512_1x.jpg 1x">"#
        ));
        assert!(html.contains(r#"alt="restaurant Trattoria Uno, tables by the window""#));
        assert!(html.contains(r#"<figcaption id="fig_1">The dining room</figcaption>"#));
        assert!(html.contains(r#"href="./restaurant.html?id&#x3D;1""#));

        let without_photo = create_restaurant_html(&restaurants[2]);
        assert!(!without_photo.render().contains("<picture"));
        let tags = without_photo
            .child_elements()
            .map(|el| el.tag())
            .collect::<Vec<_>>();
        assert_eq!(tags, ["h1", "p", "p", "a"]);
    }
}
