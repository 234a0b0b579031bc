//! Positional page layout of the online shop.
//!
//! The catalog pages carry no stable ids, so panels, product cards, and card
//! fields are addressed by absolute XPath. Every template lives here so a
//! markup change is a one-place edit.

use super::session::Locator;

/// Part of a product card the crawler reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardField {
    Name,
    Image,
    Description,
    NewPrice,
    OldPrice,
}

impl CardField {
    pub const ALL: [Self; 5] = [
        Self::Name,
        Self::Image,
        Self::Description,
        Self::NewPrice,
        Self::OldPrice,
    ];
}

#[derive(Debug, Clone)]
pub struct CatalogLayout {
    /// Page that hosts the store picker.
    pub landing_url: String,
    pub pickup_button: Locator,
    pub location_input: Locator,
    /// Autocomplete entries shown while typing a location.
    pub location_suggestions: Locator,
    pub shop_cards: Locator,
    pub confirm_button: Locator,
    /// Header badge showing the currently selected store.
    pub store_badge: Locator,
    pub change_store_button: Locator,
    /// `{category}` and `{item}` are substituted.
    pub category_url_template: String,
    /// Container whose child `div`s are the micro-category panels.
    pub panels_xpath: String,
    /// Index of the first panel holding products; earlier ones are headers.
    pub first_panel_index: usize,
    /// Relative to a panel.
    pub cards_suffix: String,
    /// Relative to a panel.
    pub load_more_suffix: String,
    pub name_suffix: String,
    pub image_suffix: String,
    pub image_attr: String,
    pub description_suffix: String,
    pub new_price_suffix: String,
    pub old_price_suffix: String,
}

impl CatalogLayout {
    /// Layout of oasitigre.it.
    #[must_use]
    pub fn oasi_tigre() -> Self {
        Self {
            landing_url: "https://oasitigre.it/it/spesa.html".to_string(),
            pickup_button: Locator::class("ritira-in-negozio-main-page"),
            location_input: Locator::css("input.form-control.pdv.pac-target-input"),
            location_suggestions: Locator::css(".pac-container .pac-item"),
            shop_cards: Locator::xpath(
                "//div[@class='shop-card-container']/div[@class='card-selezione-negozio']",
            ),
            confirm_button: Locator::class("scegliDopo"),
            store_badge: Locator::xpath(
                "/html/body/div[1]/div/div/header/div/nav/div/div[3]/div[1]/span[3]",
            ),
            change_store_button: Locator::xpath(
                "/html/body/div[3]/div[2]/div[3]/div[3]/div[1]/div[2]/span[2]",
            ),
            category_url_template: "https://oasitigre.it/it/spesa/reparti/{category}/{item}.html"
                .to_string(),
            panels_xpath: "/html/body/main/div[1]/div[2]/div[2]/div".to_string(),
            first_panel_index: 2,
            cards_suffix: "/div/div[2]/div/div/div[1]/div".to_string(),
            load_more_suffix: "/div/div[2]/div/div/div[3]".to_string(),
            name_suffix: "/div/div[3]/div[2]/h4".to_string(),
            image_suffix: "/div/div[3]/div[1]/a/img".to_string(),
            image_attr: "src".to_string(),
            description_suffix: "/div/div[3]/div[3]/p".to_string(),
            new_price_suffix: "/div/div[4]/div[1]/div[2]/p".to_string(),
            old_price_suffix: "/div/div[4]/div[1]/div[1]/p".to_string(),
        }
    }

    #[must_use]
    pub fn category_url(&self, category: &str, item: &str) -> String {
        self.category_url_template
            .replace("{category}", category)
            .replace("{item}", item)
    }

    /// All panel containers on a category page.
    #[must_use]
    pub fn panels(&self) -> Locator {
        Locator::xpath(self.panels_xpath.clone())
    }

    /// One panel, 1-based like XPath.
    #[must_use]
    pub fn panel(&self, panel: usize) -> Locator {
        Locator::xpath(self.panel_xpath(panel))
    }

    #[must_use]
    pub fn cards(&self, panel: usize) -> Locator {
        Locator::xpath(format!("{}{}", self.panel_xpath(panel), self.cards_suffix))
    }

    #[must_use]
    pub fn card_field(&self, panel: usize, card: usize, field: CardField) -> Locator {
        let suffix = match field {
            CardField::Name => &self.name_suffix,
            CardField::Image => &self.image_suffix,
            CardField::Description => &self.description_suffix,
            CardField::NewPrice => &self.new_price_suffix,
            CardField::OldPrice => &self.old_price_suffix,
        };
        Locator::xpath(format!(
            "{}{}[{card}]{suffix}",
            self.panel_xpath(panel),
            self.cards_suffix
        ))
    }

    #[must_use]
    pub fn load_more(&self, panel: usize) -> Locator {
        Locator::xpath(format!("{}{}", self.panel_xpath(panel), self.load_more_suffix))
    }

    fn panel_xpath(&self, panel: usize) -> String {
        format!("{}[{panel}]", self.panels_xpath)
    }
}

impl Default for CatalogLayout {
    fn default() -> Self {
        Self::oasi_tigre()
    }
}
