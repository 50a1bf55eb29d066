use reqwest::Client;

use super::error::ScryfallError;
use super::types::{ScryfallCard, SearchPage};
use crate::traits::{Card, CardCatalog};

const API_URL: &str = "https://api.scryfall.com";

/// Scryfall REST API client.
///
/// Stateless beyond the underlying connection pool. No retries: a single
/// failed exchange fails the whole operation, and callers decide what to
/// do with it.
pub struct ScryfallClient {
    http: Client,
}

impl ScryfallClient {
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    async fn read_page(resp: reqwest::Response, query: &str) -> Result<SearchPage, ScryfallError> {
        let status = resp.status();
        if !status.is_success() {
            let status = status.as_u16();
            let message = resp.text().await.unwrap_or_default();
            tracing::warn!(query, status, "Scryfall search page failed");
            return Err(ScryfallError::Search { status, message });
        }
        resp.json::<SearchPage>()
            .await
            .map_err(|e| ScryfallError::Parse(e.to_string()))
    }
}

impl Default for ScryfallClient {
    fn default() -> Self {
        Self::new()
    }
}

impl CardCatalog for ScryfallClient {
    type Error = ScryfallError;

    /// `GET /cards/named?fuzzy=<name>`. A non-success status surfaces the
    /// literal queried name, so a batch caller can report which row broke.
    async fn lookup_by_name(&self, name: &str) -> Result<Card, ScryfallError> {
        tracing::debug!(name, "Scryfall named lookup");

        let resp = self
            .http
            .get(format!("{API_URL}/cards/named"))
            .header("Accept", "application/json")
            .query(&[("fuzzy", name)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(name, status = status.as_u16(), "Scryfall lookup failed");
            return Err(ScryfallError::Lookup {
                name: name.to_string(),
                status: status.as_u16(),
            });
        }

        let card: ScryfallCard = resp
            .json()
            .await
            .map_err(|e| ScryfallError::Parse(e.to_string()))?;
        Ok(card.into_card())
    }

    /// `GET /cards/search`, cheapest printings first, following `next_page`
    /// links. Pagination is strictly sequential: each page's successor URL
    /// is only known once that page resolves.
    async fn search_many(&self, query: &str, pool_cap: usize) -> Result<Vec<Card>, ScryfallError> {
        tracing::debug!(query, pool_cap, "Scryfall search");

        let mut out: Vec<Card> = Vec::new();

        let resp = self
            .http
            .get(format!("{API_URL}/cards/search"))
            .header("Accept", "application/json")
            .query(&[
                ("q", query),
                ("unique", "cards"),
                ("order", "usd"),
                ("dir", "asc"),
            ])
            .send()
            .await?;
        let mut page = Self::read_page(resp, query).await?;

        loop {
            let SearchPage {
                data,
                has_more,
                next_page,
            } = page;
            out.extend(data.into_iter().map(ScryfallCard::into_card));

            if out.len() >= pool_cap {
                break;
            }
            let next = match next_page {
                Some(url) if has_more => url,
                _ => break,
            };

            let resp = self
                .http
                .get(&next)
                .header("Accept", "application/json")
                .send()
                .await?;
            page = Self::read_page(resp, query).await?;
        }

        out.truncate(pool_cap);
        Ok(out)
    }
}
