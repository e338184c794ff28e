//! Page shells the controllers' slots are rendered into.

use std::collections::BTreeMap;

use handlebars::Handlebars;
use serde::Serialize;

use crate::{
    error::{Error, Result},
    map::MapView,
    view::{DetailView, ListView},
};

const INDEX: &str = "index";
const RESTAURANT: &str = "restaurant";

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'a str,
    slots: BTreeMap<String, String>,
    /// `None` leaves the map container empty
    map: Option<String>,
    maps_api_key: Option<&'a str>,
}

pub struct Pages {
    registry: Handlebars<'static>,
    maps_api_key: Option<String>,
}

impl Pages {
    pub fn new(maps_api_key: Option<String>) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry.register_template_string(INDEX, include_str!("../templates/index.hbs"))?;
        registry.register_template_string(
            RESTAURANT,
            include_str!("../templates/restaurant.hbs"),
        )?;
        Ok(Self {
            registry,
            maps_api_key,
        })
    }

    pub fn render_index(&self, view: &ListView) -> Result<String> {
        let ctx = PageContext {
            title: "Restaurant Reviews",
            slots: view.document().rendered_slots(),
            map: Some(map_json(view.map())?),
            maps_api_key: self.maps_api_key.as_deref(),
        };
        self.render(INDEX, &ctx)
    }

    pub fn render_restaurant(&self, view: &DetailView) -> Result<String> {
        let ctx = PageContext {
            title: view
                .restaurant()
                .map(|r| r.name.as_str())
                .unwrap_or("Restaurant Info"),
            slots: view.document().rendered_slots(),
            map: view.map().map(map_json).transpose()?,
            maps_api_key: self.maps_api_key.as_deref(),
        };
        self.render(RESTAURANT, &ctx)
    }

    fn render(&self, name: &str, ctx: &PageContext) -> Result<String> {
        let page = self
            .registry
            .render(name, ctx)
            .map_err(|e| Error::Render(name.to_string(), e))?;
        tracing::info!("rendered page {name} ({} bytes)", page.len());
        Ok(page)
    }
}

fn map_json(map: &MapView) -> Result<String> {
    Ok(map.to_script_json()?)
}
