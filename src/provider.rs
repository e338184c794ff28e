use std::{collections::HashSet, hash::Hash, path::PathBuf, sync::Arc};

use derive_builder::Builder;

use crate::{
    data::{Dataset, Restaurant},
    error::{Error, Result},
};

/// Where the restaurant document comes from.
#[derive(Debug, Clone)]
pub enum DatasetSource {
    Http { client: reqwest::Client, url: String },
    File(PathBuf),
    Memory(Arc<Vec<Restaurant>>),
}

impl DatasetSource {
    pub fn http(url: impl Into<String>) -> Self {
        Self::Http {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    async fn load(&self) -> Result<Vec<Restaurant>> {
        let dataset: Dataset = match self {
            Self::Http { client, url } => {
                let resp = client.get(url).send().await?;
                if resp.status() != reqwest::StatusCode::OK {
                    return Err(Error::RequestFailed(resp.status().as_u16()));
                }
                serde_json::from_slice(&resp.bytes().await?)?
            }
            Self::File(path) => {
                let raw = tokio::fs::read(path)
                    .await
                    .map_err(|e| Error::Io(path.clone(), e))?;
                serde_json::from_slice(&raw)?
            }
            Self::Memory(restaurants) => return Ok(restaurants.as_ref().clone()),
        };
        Ok(dataset.restaurants)
    }
}

/// A single filter value. `"all"` selects everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Filter {
    #[default]
    All,
    Only(String),
}

impl Filter {
    pub fn matches(&self, value: &str) -> bool {
        match self {
            Self::All => true,
            Self::Only(expect) => expect == value,
        }
    }

    /// The value a select control submits for this filter.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Only(value) => value,
        }
    }
}

impl From<&str> for Filter {
    fn from(value: &str) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }
}

impl From<String> for Filter {
    fn from(value: String) -> Self {
        if value == "all" {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<Option<String>> for Filter {
    fn from(value: Option<String>) -> Self {
        value.map(Self::from).unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Builder)]
pub struct RestaurantQuery {
    #[builder(setter(into), default)]
    pub cuisine: Filter,
    #[builder(setter(into), default)]
    pub neighborhood: Filter,
}

impl RestaurantQuery {
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        self.cuisine.matches(&restaurant.cuisine_type)
            && self.neighborhood.matches(&restaurant.neighborhood)
    }
}

/// Keep the restaurants matching both filters, in their original order.
pub fn filter_restaurants(restaurants: Vec<Restaurant>, query: &RestaurantQuery) -> Vec<Restaurant> {
    restaurants
        .into_iter()
        .filter(|restaurant| query.matches(restaurant))
        .collect()
}

/// Drop repeated values, keeping the first occurrence of each.
pub fn distinct<T, I>(values: I) -> Vec<T>
where
    T: Eq + Hash + Clone,
    I: IntoIterator<Item = T>,
{
    let mut seen = HashSet::new();
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}

/// Compare a textual identifier from a URL against a record id the way a
/// browser compares a string with a number: numerically, ignoring
/// surrounding whitespace, with `0x`/`0o`/`0b` integer literals accepted.
pub fn id_matches(id: i64, raw: &str) -> bool {
    let raw = raw.trim();
    if raw.is_empty() {
        return id == 0;
    }
    let radix = match raw.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => Some(16),
        Some("0o") => Some(8),
        Some("0b") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &raw[2..];
        // unsigned digits only, as in the browser
        return !digits.starts_with(['+', '-'])
            && i64::from_str_radix(digits, radix).map_or(false, |parsed| parsed == id);
    }
    // only decimal literals, not the `inf`/`nan` spellings `f64` also accepts
    if raw.chars().any(|c| c.is_ascii_alphabetic() && !matches!(c, 'e' | 'E')) {
        return false;
    }
    raw.parse::<f64>().map_or(false, |parsed| parsed == id as f64)
}

#[derive(Debug, Clone)]
pub struct DataProvider {
    source: DatasetSource,
}

impl DataProvider {
    pub fn new(source: DatasetSource) -> Self {
        Self { source }
    }

    /// Fetch the whole collection. Every accessor below starts from a fresh
    /// copy of it.
    pub async fn fetch_restaurants(&self) -> Result<Vec<Restaurant>> {
        let restaurants = self.source.load().await?;
        tracing::debug!("fetched {} restaurants", restaurants.len());
        Ok(restaurants)
    }

    pub async fn fetch_restaurant_by_id(&self, id: &str) -> Result<Restaurant> {
        self.fetch_restaurants()
            .await?
            .into_iter()
            .find(|restaurant| id_matches(restaurant.id, id))
            .ok_or(Error::RestaurantNotFound)
    }

    pub async fn fetch_restaurants_by_cuisine(&self, cuisine: &str) -> Result<Vec<Restaurant>> {
        let restaurants = self.fetch_restaurants().await?;
        Ok(restaurants
            .into_iter()
            .filter(|r| r.cuisine_type == cuisine)
            .collect())
    }

    pub async fn fetch_restaurants_by_neighborhood(
        &self,
        neighborhood: &str,
    ) -> Result<Vec<Restaurant>> {
        let restaurants = self.fetch_restaurants().await?;
        Ok(restaurants
            .into_iter()
            .filter(|r| r.neighborhood == neighborhood)
            .collect())
    }

    pub async fn fetch_restaurants_by_cuisine_and_neighborhood(
        &self,
        query: &RestaurantQuery,
    ) -> Result<Vec<Restaurant>> {
        let restaurants = self.fetch_restaurants().await?;
        Ok(filter_restaurants(restaurants, query))
    }

    pub async fn fetch_neighborhoods(&self) -> Result<Vec<String>> {
        let restaurants = self.fetch_restaurants().await?;
        Ok(distinct(restaurants.into_iter().map(|r| r.neighborhood)))
    }

    pub async fn fetch_cuisines(&self) -> Result<Vec<String>> {
        let restaurants = self.fetch_restaurants().await?;
        Ok(distinct(restaurants.into_iter().map(|r| r.cuisine_type)))
    }
}
