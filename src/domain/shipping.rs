use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::errors::DomainError;

/// The closed set of shipping categories a product can be classified into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CategoryLabel {
    Books,
    CdsCassettesVinyl,
    VhsVideotapes,
    DvdsAndBluRay,
    VideoGames,
    SoftwareAndComputerGames,
    CameraAndPhoto,
    ToolsAndHardware,
    KitchenAndHousewares,
    Computer,
    OutdoorLiving,
    Electronics,
    SportsAndOutdoors,
    CellPhonesAndService,
    MusicalInstruments,
    OfficeProducts,
    ToyAndBaby,
    IndependentDesignItems,
    EverythingElse,
}

impl CategoryLabel {
    pub const ALL: [CategoryLabel; 19] = [
        CategoryLabel::Books,
        CategoryLabel::CdsCassettesVinyl,
        CategoryLabel::VhsVideotapes,
        CategoryLabel::DvdsAndBluRay,
        CategoryLabel::VideoGames,
        CategoryLabel::SoftwareAndComputerGames,
        CategoryLabel::CameraAndPhoto,
        CategoryLabel::ToolsAndHardware,
        CategoryLabel::KitchenAndHousewares,
        CategoryLabel::Computer,
        CategoryLabel::OutdoorLiving,
        CategoryLabel::Electronics,
        CategoryLabel::SportsAndOutdoors,
        CategoryLabel::CellPhonesAndService,
        CategoryLabel::MusicalInstruments,
        CategoryLabel::OfficeProducts,
        CategoryLabel::ToyAndBaby,
        CategoryLabel::IndependentDesignItems,
        CategoryLabel::EverythingElse,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryLabel::Books => "Books",
            CategoryLabel::CdsCassettesVinyl => "CDs, Cassettes, Vinyl",
            CategoryLabel::VhsVideotapes => "VHS Videotapes",
            CategoryLabel::DvdsAndBluRay => "DVDs and Blu-ray",
            CategoryLabel::VideoGames => "Video Games",
            CategoryLabel::SoftwareAndComputerGames => "Software & Computer Games",
            CategoryLabel::CameraAndPhoto => "Camera & Photo",
            CategoryLabel::ToolsAndHardware => "Tools & Hardware",
            CategoryLabel::KitchenAndHousewares => "Kitchen & Housewares",
            CategoryLabel::Computer => "Computer",
            CategoryLabel::OutdoorLiving => "Outdoor Living",
            CategoryLabel::Electronics => "Electronics",
            CategoryLabel::SportsAndOutdoors => "Sports & Outdoors",
            CategoryLabel::CellPhonesAndService => "Cell Phones & Service",
            CategoryLabel::MusicalInstruments => "Musical Instruments",
            CategoryLabel::OfficeProducts => "Office Products",
            CategoryLabel::ToyAndBaby => "Toy & Baby",
            CategoryLabel::IndependentDesignItems => "Independent Design items",
            CategoryLabel::EverythingElse => "Everything Else",
        }
    }

    /// Media ships at a flat rate regardless of weight.
    pub fn is_media(&self) -> bool {
        matches!(
            self,
            CategoryLabel::Books
                | CategoryLabel::CdsCassettesVinyl
                | CategoryLabel::VhsVideotapes
                | CategoryLabel::DvdsAndBluRay
                | CategoryLabel::VideoGames
                | CategoryLabel::SoftwareAndComputerGames
        )
    }
}

impl fmt::Display for CategoryLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact, case-sensitive match against the label text.
impl FromStr for CategoryLabel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CategoryLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == s)
            .ok_or_else(|| DomainError::UnknownCategory(s.to_string()))
    }
}

impl TryFrom<String> for CategoryLabel {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CategoryLabel> for String {
    fn from(label: CategoryLabel) -> Self {
        label.as_str().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShippingRate {
    pub base: f64,
    pub per_pound: f64,
}

impl ShippingRate {
    pub const fn new(base: f64, per_pound: f64) -> Self {
        Self { base, per_pound }
    }

    pub fn fee_for(&self, weight_lb: f64) -> f64 {
        self.base + self.per_pound * weight_lb
    }
}

const MEDIA_RATE: ShippingRate = ShippingRate::new(3.99, 0.0);
const STANDARD_RATE: ShippingRate = ShippingRate::new(4.49, 0.50);
const FEE_FREE_RATE: ShippingRate = ShippingRate::new(0.0, 0.0);

/// Immutable category → rate mapping, fixed once the service is built.
#[derive(Debug, Clone)]
pub struct ShippingRateTable {
    rates: HashMap<CategoryLabel, ShippingRate>,
}

impl ShippingRateTable {
    pub fn new(rates: impl IntoIterator<Item = (CategoryLabel, ShippingRate)>) -> Self {
        Self {
            rates: rates.into_iter().collect(),
        }
    }

    /// The production table: flat-rate media, fee-free independent design
    /// items and a base-plus-per-pound rate for everything else.
    pub fn standard() -> Self {
        Self::new(CategoryLabel::ALL.into_iter().map(|label| {
            let rate = if label.is_media() {
                MEDIA_RATE
            } else if label == CategoryLabel::IndependentDesignItems {
                FEE_FREE_RATE
            } else {
                STANDARD_RATE
            };
            (label, rate)
        }))
    }

    pub fn rate(&self, category: CategoryLabel) -> Option<&ShippingRate> {
        self.rates.get(&category)
    }

    pub fn fee(&self, category: CategoryLabel, weight_lb: f64) -> Result<f64, DomainError> {
        self.rate(category)
            .map(|rate| rate.fee_for(weight_lb))
            .ok_or_else(|| DomainError::UnknownCategory(category.to_string()))
    }

    /// Fails on any label outside the enumeration; there is no default rate.
    pub fn fee_by_name(&self, category: &str, weight_lb: f64) -> Result<f64, DomainError> {
        self.fee(category.parse()?, weight_lb)
    }
}

impl Default for ShippingRateTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Shipping fee for `category` under the standard rate table.
pub fn calculate_shipping_fee(category: &str, weight_lb: f64) -> Result<f64, DomainError> {
    static STANDARD: OnceLock<ShippingRateTable> = OnceLock::new();
    STANDARD
        .get_or_init(ShippingRateTable::standard)
        .fee_by_name(category, weight_lb)
}
