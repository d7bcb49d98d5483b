//! External book-metadata search (Google Books volumes API)
//!
//! Flattens the volumes response into the display shape the rest of the
//! client uses.

use serde::{Deserialize, Serialize};

/// A book hit from the external metadata search.
///
/// `price` is a display string ("1200 JPY") because the external API
/// quotes prices per currency; it is never used for arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoogleBook {
    pub id: String,
    pub title: String,
    pub author: String,
    pub price: String,
    pub publisher: String,
    pub published: String,
    pub image: String,
    pub info: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct VolumeList {
    #[serde(default)]
    pub items: Vec<Volume>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Volume {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub volume_info: VolumeInfo,
    #[serde(default)]
    pub sale_info: SaleInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct VolumeInfo {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub publisher: String,
    #[serde(default)]
    pub published_date: String,
    pub image_links: Option<ImageLinks>,
    #[serde(default)]
    pub info_link: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ImageLinks {
    pub thumbnail: Option<String>,
    pub small_thumbnail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SaleInfo {
    pub list_price: Option<ListPrice>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ListPrice {
    pub amount: f64,
    #[serde(default)]
    pub currency_code: String,
}

impl From<Volume> for GoogleBook {
    fn from(volume: Volume) -> Self {
        let info = volume.volume_info;

        let image = info
            .image_links
            .and_then(|links| links.thumbnail.or(links.small_thumbnail))
            .unwrap_or_default();

        let price = volume
            .sale_info
            .list_price
            .map(|price| {
                if price.currency_code.is_empty() {
                    price.amount.to_string()
                } else {
                    format!("{} {}", price.amount, price.currency_code)
                }
            })
            .unwrap_or_default();

        Self {
            id: volume.id,
            title: info.title,
            author: info.authors.join(", "),
            price,
            publisher: info.publisher,
            published: info.published_date,
            image,
            info: info.info_link,
        }
    }
}
