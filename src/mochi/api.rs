//! Raw REST calls against the Mochi card service. Auth is HTTP Basic with
//! the API key as username and an empty password.

use reqwest::{
    Client,
    Response,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::MochimineError;

const API_BASE: &str = "https://app.mochi.cards/api";

#[derive(Serialize)]
struct CreateDeckRequest<'a> {
    name: &'a str,
}

#[derive(Deserialize)]
struct DeckResponse {
    id: String,
}

#[derive(Serialize)]
struct CreateCardRequest<'a> {
    content: &'a str,
    #[serde(rename = "deck-id")]
    deck_id: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct CardDoc {
    pub content: String,
}

#[derive(Deserialize)]
struct ListCardsResponse {
    docs: Vec<CardDoc>,
}

async fn ensure_success(response: Response) -> Result<Response, MochimineError> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    Err(MochimineError::MochiApi { status, body })
}

pub async fn create_deck(
    client: &Client,
    api_key: &str,
    name: &str,
) -> Result<String, MochimineError> {
    let response = client
        .post(format!("{}/decks", API_BASE))
        .basic_auth(api_key, Some(""))
        .json(&CreateDeckRequest { name })
        .send()
        .await?;

    let deck: DeckResponse = ensure_success(response).await?.json().await?;
    Ok(deck.id)
}

pub async fn create_card(
    client: &Client,
    api_key: &str,
    deck_id: &str,
    content: &str,
) -> Result<(), MochimineError> {
    let response = client
        .post(format!("{}/cards", API_BASE))
        .basic_auth(api_key, Some(""))
        .json(&CreateCardRequest { content, deck_id })
        .send()
        .await?;

    ensure_success(response).await?;
    Ok(())
}

pub async fn list_cards(
    client: &Client,
    api_key: &str,
    deck_id: &str,
    limit: usize,
) -> Result<Vec<CardDoc>, MochimineError> {
    let response = client
        .get(format!("{}/cards", API_BASE))
        .basic_auth(api_key, Some(""))
        .query(&[("deck-id", deck_id), ("limit", &limit.to_string())])
        .send()
        .await?;

    let listing: ListCardsResponse = ensure_success(response).await?.json().await?;
    Ok(listing.docs)
}
