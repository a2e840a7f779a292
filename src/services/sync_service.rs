// ============================================================================
// SERVICIO DE SINCRONIZACIÓN - fetch remoto + merge last-write-wins
// ============================================================================

use chrono::Utc;

use crate::config::CONFIG;
use crate::error::QuoteError;
use crate::models::{MergeReport, Quote, RemotePost};
use crate::services::ApiClient;

/// Servicio de sincronización contra la lista remota
#[derive(Clone)]
pub struct SyncService {
    api_client: ApiClient,
    batch_limit: usize,
}

impl SyncService {
    pub fn new() -> Self {
        Self {
            api_client: ApiClient::new(),
            batch_limit: CONFIG.remote_batch_limit,
        }
    }

    /// Fetch + mapeo al formato local
    pub async fn fetch_remote_quotes(&self) -> Result<Vec<Quote>, QuoteError> {
        log::info!("📥 Descargando citas remotas de {}", self.api_client.base_url());
        let posts = self.api_client.fetch_posts().await?;
        let fetched_at = Utc::now().timestamp_millis();
        let quotes = map_remote_posts(posts, fetched_at, self.batch_limit);
        log::info!("📥 {} citas remotas recibidas", quotes.len());
        Ok(quotes)
    }

    /// Envía una cita recién creada; errores solo se loguean
    pub async fn push_quote(&self, quote: &Quote) {
        match self.api_client.post_quote(quote).await {
            Ok(response) => log::info!("📤 Cita {} enviada al servidor: {}", quote.id, response),
            Err(e) => log::error!("❌ Error enviando cita {}: {}", quote.id, e),
        }
    }
}

impl Default for SyncService {
    fn default() -> Self {
        Self::new()
    }
}

/// Toma los primeros `limit` items y los convierte con lastUpdated = fetched_at
pub fn map_remote_posts(posts: Vec<RemotePost>, fetched_at: i64, limit: usize) -> Vec<Quote> {
    posts
        .into_iter()
        .take(limit)
        .map(|post| post.into_quote(fetched_at))
        .collect()
}

/// Merge por id: inserta si no existe, sobrescribe si el remoto es más reciente
pub fn merge_remote(local: &mut Vec<Quote>, remote: Vec<Quote>) -> MergeReport {
    let mut report = MergeReport::default();

    for incoming in remote {
        match local.iter_mut().find(|q| q.id == incoming.id) {
            None => {
                local.push(incoming);
                report.inserted += 1;
            }
            Some(existing) if incoming.last_updated > existing.last_updated => {
                existing.text = incoming.text;
                existing.category = incoming.category;
                existing.last_updated = incoming.last_updated;
                report.updated += 1;
            }
            Some(_) => {}
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::constants::SERVER_CATEGORY;

    fn post(id: i64, title: &str) -> RemotePost {
        RemotePost {
            id,
            title: title.to_string(),
        }
    }

    #[test]
    fn mapping_keeps_only_first_batch() {
        let posts = (1..=15).map(|id| post(id, "t")).collect();
        let quotes = map_remote_posts(posts, 1_000, 10);
        assert_eq!(quotes.len(), 10);
        assert_eq!(quotes.last().unwrap().id, 10);
        assert!(quotes.iter().all(|q| q.category == SERVER_CATEGORY && q.last_updated == 1_000));
    }

    #[test]
    fn newer_remote_overwrites_local_fields() {
        let mut local = vec![Quote::new(1, "mine", "Local", 10)];
        let report = merge_remote(&mut local, vec![Quote::new(1, "theirs", SERVER_CATEGORY, 20)]);
        assert_eq!(report, MergeReport { inserted: 0, updated: 1 });
        assert_eq!(local, vec![Quote::new(1, "theirs", SERVER_CATEGORY, 20)]);
    }

    #[test]
    fn missing_ids_are_appended() {
        let mut local = Vec::new();
        let report = merge_remote(&mut local, vec![Quote::new(2, "new", SERVER_CATEGORY, 5)]);
        assert!(report.changed());
        assert_eq!(local, vec![Quote::new(2, "new", SERVER_CATEGORY, 5)]);
    }

    #[test]
    fn equal_or_older_remote_is_ignored() {
        let mut local = vec![Quote::new(1, "mine", "Local", 10), Quote::new(2, "also", "Local", 30)];
        let before = local.clone();
        let report = merge_remote(
            &mut local,
            vec![Quote::new(1, "same age", SERVER_CATEGORY, 10), Quote::new(2, "older", SERVER_CATEGORY, 20)],
        );
        assert!(!report.changed());
        assert_eq!(local, before);
    }
}
