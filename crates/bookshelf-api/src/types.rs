//! Wire-contract types for the bookshelf service
//!
//! Plain records mirroring the server's JSON payloads. Field names are
//! camelCase on the wire; dates travel as strings.

use serde::{Deserialize, Serialize};

/// A user account as the service sends and receives it.
///
/// `password` is only populated on requests that carry credentials;
/// `token` only on the login response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    pub id: String,
    #[serde(default)]
    pub password: String,
    pub name: String,
    pub role_name: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A shelved book row.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub user_id: String,
    pub seq_no: i64,
    pub title: String,
    pub author: String,
    pub price: i64,
    pub publisher: String,
    pub published: String,
    pub buy_date: String,
    pub complete_date: String,
    pub genre: Genre,
    pub memo: String,
    pub rate: i64,
    pub img_url: String,
    pub info_url: String,
}

/// Registration payload for a new or edited book.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
    pub seq_no: i64,
    pub image: String,
    pub title: String,
    pub price: i64,
    pub author: String,
    pub publisher: String,
    pub published: String,
    pub buy_date: String,
    pub complete_date: String,
    pub memo: String,
    pub rate: i64,
    pub genre: i64,
    pub info: String,
}

/// Search condition for the shelf; empty strings and zeroes mean
/// "no restriction" on that field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCond {
    pub user_id: String,
    pub title: String,
    pub author: String,
    pub complete_date_from: String,
    pub complete_date_to: String,
    pub genre: i64,
    pub rate: i64,
}
