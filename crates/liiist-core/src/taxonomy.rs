//! Category taxonomy walked by the catalog crawler.
//!
//! The taxonomy is plain configuration: a list of top-level categories, each
//! with an ordered list of sub-category slugs. Slugs are only used to build
//! page URLs, so they must match the target site verbatim.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub subcategories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTaxonomy {
    pub categories: Vec<Category>,
}

impl CategoryTaxonomy {
    /// Iterate `(category, sub-category)` pairs in declaration order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.categories.iter().flat_map(|category| {
            category
                .subcategories
                .iter()
                .map(move |sub| (category.name.as_str(), sub.as_str()))
        })
    }

    /// Total number of sub-category pages in the taxonomy.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.categories.iter().map(|c| c.subcategories.len()).sum()
    }

    /// The department tree of the Oasi Tigre online shop.
    #[must_use]
    pub fn oasi_tigre() -> Self {
        let categories = OASI_TIGRE_DEPARTMENTS
            .iter()
            .map(|(name, subs)| Category {
                name: (*name).to_string(),
                subcategories: subs.iter().map(|s| (*s).to_string()).collect(),
            })
            .collect();
        Self { categories }
    }
}

impl Default for CategoryTaxonomy {
    fn default() -> Self {
        Self::oasi_tigre()
    }
}

/// Load and validate a taxonomy from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_taxonomy(path: &Path) -> Result<CategoryTaxonomy, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TaxonomyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_taxonomy(&content)
}

fn parse_taxonomy(content: &str) -> Result<CategoryTaxonomy, ConfigError> {
    let taxonomy: CategoryTaxonomy = serde_yaml::from_str(content)?;
    validate_taxonomy(&taxonomy)?;
    Ok(taxonomy)
}

fn validate_taxonomy(taxonomy: &CategoryTaxonomy) -> Result<(), ConfigError> {
    if taxonomy.categories.is_empty() {
        return Err(ConfigError::Validation(
            "taxonomy must contain at least one category".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for category in &taxonomy.categories {
        if category.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "category name must be non-empty".to_string(),
            ));
        }
        if !seen.insert(category.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate category: '{}'",
                category.name
            )));
        }
        if category.subcategories.is_empty() {
            return Err(ConfigError::Validation(format!(
                "category '{}' has no sub-categories",
                category.name
            )));
        }
        if let Some(blank) = category.subcategories.iter().find(|s| s.trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "category '{}' has a blank sub-category slug {blank:?}",
                category.name
            )));
        }
    }

    Ok(())
}

const OASI_TIGRE_DEPARTMENTS: &[(&str, &[&str])] = &[
    (
        "Frutta-e-Verdura",
        &[
            "Frutta-Fresca",
            "Frutta-Pronta-da-mangiare",
            "Aglio-Peperoncino-Odori",
            "Funghi-Olive-Capperi",
            "Ortaggi",
            "Verdura-Fresca",
            "Verdura-Lavata-o-Tagliata",
            "Frutta-Secca-Disidratata",
            "Legumi-e-Cereali-secchi",
            "Barrette-Snack-Polpa-frutta",
            "Condimenti-Spezie-Farine",
            "Piatti-Pronti",
        ],
    ),
    (
        "Carne-e-Pesce",
        &[
            "Bovino",
            "Ovino-Avicunicolo",
            "Pollo-Tacchino",
            "Speciali",
            "Suino",
            "Frutti-di-Mare",
            "Pesci-Interi-Tranci-Filetti",
            "Pesci-Salati-o-Confezionati",
            "Carne-Pronta",
            "Carne-Pronta-a-Cuocere",
            "Pesce-Cotto",
            "Pesce-Pronto-a-Cuocere",
            "Sushi",
        ],
    ),
    (
        "Forno-e-Gastronomia",
        &[
            "Dolci-Pasticceria",
            "Pane-Panini",
            "Pizza-Focacce-Rustici",
            "Taralli-Freselle-Grissini",
            "Pasta-Fresca",
            "Piatti-Pronti",
            "Sughi-Condimenti",
            "Formaggi--Freschissimi",
            "Formaggi-Freschi",
            "Formaggi-Semistagionati",
            "Formaggi-Stagionati",
            "Insaccati",
            "Salumi",
        ],
    ),
    (
        "Prodotti-da-Frigo",
        &[
            "Formaggi-Confezionati",
            "Salumi-Confezionati",
            "Latte-Fresco",
            "Latte-uht",
            "Panna--fresca-Burro",
            "Panna-Besciamella-uht",
            "Yogurt",
            "Pasta-Fresca",
            "Uova-Lievito-Sfoglie",
            "Gastronomia",
            "Snack-Merende-Dessert",
        ],
    ),
    (
        "Surgelati",
        &[
            "Gelati",
            "Gelati-Vaschetta",
            "Torte-Dessert",
            "Carne-Surgelata",
            "Pesce-Surgelato",
            "Piatti-Sughi-surgelati",
            "Pizze-Dolci-surgelati",
            "Verdura-Surgelata",
        ],
    ),
    (
        "Dispensa-Salata",
        &[
            "Conserve-Animali",
            "Conserve-Vegetali",
            "Olive-Sottolio-Sottaceto",
            "Passate-Sughi-Dadi",
            "Sale-Olio-Aceto",
            "Salse-Spezie",
            "Pasta-Riso",
            "Primi-piatti-Zuppe",
            "Alimenti-No-Glutine",
            "Cibi-Etnici",
            "Snack-Salati-Patatine",
            "Sostituti-Pane",
        ],
    ),
    (
        "Dispensa-Dolce",
        &[
            "Caffè",
            "Orzo-Solubili",
            "Tè-Infusi-Tisane",
            "Caramelle-Cioccolate",
            "Cereali",
            "Fette-Spalmabili",
            "Pasticcini-Biscotti",
            "Torte-Merendine",
            "Farine-Zucchero-Lievito",
            "Preparazione-Dolci",
            "Dolci-no-Glutine",
            "Sostituti-Pasto-Integratori",
        ],
    ),
    (
        "Bevande-e-Bollicine",
        &[
            "Acqua-Preparati",
            "Bibite-gassate",
            "Succhi-Frutta",
            "Tè-Integratori-Energy-drink",
            "Aperitivi",
            "Birre",
            "Spumanti-Champagne",
            "Liquori",
            "Vini--Esteri-Liquorosi",
            "Vini--Tavola",
            "Vini-Bianchi",
            "Vini-Rosati",
            "Vini-Rossi",
        ],
    ),
    (
        "Infanzia",
        &[
            "Biscotti-Pastine-Farine",
            "Latte-Infanzia",
            "Liofilizzati-Infusi",
            "Omogeneizzati",
            "Snack-Pouch-Merendine",
            "Cura-Baby",
            "Detergenti-Polveri",
            "Pannolini-Salviette",
            "Biberon-Prime-pappe",
            "Calze-Bimbo",
            "Puericultura-varie",
        ],
    ),
    (
        "Cura-Casa",
        &[
            "Ammorbidenti-Additivi",
            "Detersivi-Bucato",
            "Stiro-Guardaroba",
            "Cottura-Conservazione",
            "Monouso-Carta-Casa",
            "Party-Regalo-Pic-Nic",
            "Sapone-Piatti",
            "Accessori-Pulizia-casa",
            "Deo-ambiente-Insetticidi",
            "Detergenti-Casa",
            "Brico-Giardino",
            "Cancelleria",
        ],
    ),
    (
        "Cura-Persona-e-Animali",
        &[
            "Epilazione-Rasatura",
            "Igiene-Orale",
            "Deodoranti-Accessori",
            "Detergenti-Igiene-intima",
            "Shampoo-Acconciatura",
            "Trattamenti-Creme-Protettive",
            "Calze-Collant",
            "Carta-Igienica-Fazzoletti",
            "Incontinenza-Assorbenti",
            "Sanitaria-Parafarmacia",
            "Accessori",
            "Alimentazione",
        ],
    ),
];

#[cfg(test)]
#[path = "taxonomy_test.rs"]
mod tests;
