//! Listing records as returned by the listings API.
//!
//! The shape is owned by the API; everything is read-only here. Fields the
//! table guards (address, summary, rating) are optional, the rest default when
//! missing so one sparse record does not reject the whole page.

use crate::error::DetailError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Read a value, treating `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Read a count that may arrive as an integer, an integral float, a numeric
/// string or `null`. Anything else counts as 0 and is logged.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let count = match &value {
        None | Some(Value::Null) => Some(0),
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            })
            .and_then(|c| u32::try_from(c).ok()),
        Some(Value::String(s)) => s.trim().parse::<u32>().ok(),
        Some(_) => None,
    };
    Ok(count.unwrap_or_else(|| {
        log::warn!("Unreadable count in listing record: {:?}", value);
        0
    }))
}

/// Number of listings requested per page.
pub const PER_PAGE: u32 = 10;

/// Text shown when a listing has no neighborhood overview.
pub const NO_OVERVIEW: &str = "No neighborhood overview available.";

/// A rentable property record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Listing {
    /// Listing identifier
    #[serde(rename = "_id", deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub room_type: String,
    pub address: Option<Address>,
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient_count")]
    pub accommodates: u32,
    pub review_scores: Option<ReviewScores>,
    #[serde(deserialize_with = "lenient_count")]
    pub number_of_reviews: u32,
    pub images: Option<Images>,
    pub neighborhood_overview: Option<String>,
    /// Raw price value; checked for numeric content when the detail view is built
    pub price: Value,
    #[serde(deserialize_with = "null_as_default")]
    pub bed_type: String,
    #[serde(deserialize_with = "lenient_count")]
    pub beds: u32,
}

/// Postal address of a listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Address {
    #[serde(deserialize_with = "null_as_default")]
    pub street: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub country: String,
}

/// Review scores block.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReviewScores {
    pub review_scores_rating: Option<f64>,
}

/// Image URLs of a listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Images {
    pub picture_url: Option<String>,
}

impl Listing {
    /// Format the address as `street, city, country`, or `N/A` when absent.
    pub fn address_line(&self) -> String {
        match &self.address {
            Some(a) => format!("{}, {}, {}", a.street, a.city, a.country),
            None => "N/A".to_string(),
        }
    }

    /// Summary text, empty when absent.
    pub fn summary_text(&self) -> &str {
        self.summary.as_deref().unwrap_or("")
    }

    /// Review rating, or `N/A` when missing or zero.
    pub fn rating_label(&self) -> String {
        self.review_scores
            .as_ref()
            .and_then(|r| r.review_scores_rating)
            .filter(|r| *r != 0.0)
            .map(|r| r.to_string())
            .unwrap_or_else(|| "N/A".to_string())
    }

    /// Numeric price.
    ///
    /// # Returns
    /// * `Result<f64, DetailError>` - Price or `NonNumericPrice`
    ///
    /// # Details
    /// Accepts a JSON number, a numeric string, or an extended-JSON decimal
    /// (`{"$numberDecimal": "125.50"}`) as emitted by MongoDB-backed APIs.
    pub fn price_amount(&self) -> Result<f64, DetailError> {
        let parsed = match &self.price {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            Value::Object(map) => map
                .get("$numberDecimal")
                .and_then(Value::as_str)
                .and_then(|s| s.trim().parse::<f64>().ok()),
            _ => None,
        };
        parsed
            .filter(|p| p.is_finite())
            .ok_or_else(|| DetailError::NonNumericPrice(self.price.to_string()))
    }

    /// Cover image URL.
    pub fn picture_url(&self) -> Result<&str, DetailError> {
        self.images
            .as_ref()
            .and_then(|i| i.picture_url.as_deref())
            .filter(|url| !url.is_empty())
            .ok_or(DetailError::MissingPicture)
    }
}

/// Content of the detail dialog for one listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDetails {
    pub name: String,
    pub picture_url: String,
    pub neighborhood_overview: String,
    /// Price formatted as `$X.XX`
    pub price: String,
    pub room_type: String,
    /// `bed_type (N beds)`
    pub bed_line: String,
    pub accommodates: u32,
}

impl TryFrom<&Listing> for ListingDetails {
    type Error = DetailError;

    /// Build the detail template from a listing.
    ///
    /// Fails when the cover image is missing or the price is not numeric.
    fn try_from(listing: &Listing) -> Result<Self, Self::Error> {
        let picture_url = listing.picture_url()?.to_string();
        let price = format_price(listing.price_amount()?);
        let neighborhood_overview = listing
            .neighborhood_overview
            .as_deref()
            .filter(|o| !o.is_empty())
            .unwrap_or(NO_OVERVIEW)
            .to_string();

        Ok(Self {
            name: listing.name.clone(),
            picture_url,
            neighborhood_overview,
            price,
            room_type: listing.room_type.clone(),
            bed_line: format!("{} ({} beds)", listing.bed_type, listing.beds),
            accommodates: listing.accommodates,
        })
    }
}

/// Format a price with a dollar sign and exactly two decimals.
pub fn format_price(amount: f64) -> String {
    format!("${:.2}", amount)
}
