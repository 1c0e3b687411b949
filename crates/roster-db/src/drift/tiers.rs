//! Ordered raw-query fallback chains.
//!
//! A logical read declares its fallback variants as data: a slice of
//! [`QueryTier`]s of decreasing specificity, sharing one defensive row
//! materializer. The driver walks them in order on the request's own
//! connection; each tier's statement and cursor live only for that tier's
//! scope and are released by drop on every exit path, including
//! cancellation.

/// One raw query variant in a fallback chain.
pub struct QueryTier {
    /// Short label used in logs.
    pub name: &'static str,
    pub sql: &'static str,
    /// Try-next-variant tiers (the term-name map's table spellings)
    /// advance when they run but yield nothing. Ordinary tiers treat an
    /// empty result as a valid terminal outcome.
    pub advance_on_empty: bool,
}

/// Walk the chain and return the first tier's materialized results.
///
/// - A tier that fails to execute advances the chain (drift is expected
///   here; anything else is logged at debug and advances too — by this
///   point the structured attempt has already classified the request).
/// - A malformed row inside a succeeding tier is skipped with a warning;
///   one bad row never aborts a tier.
/// - An exhausted chain is an empty result, never an error.
pub async fn run_chain<T, P>(
    conn: &libsql::Connection,
    tiers: &[QueryTier],
    params: impl Fn() -> P,
    materialize: impl Fn(&libsql::Row) -> Option<T>,
) -> Vec<T>
where
    P: libsql::params::IntoParams,
{
    'tiers: for tier in tiers {
        let mut rows = match conn.query(tier.sql, params()).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::debug!("tier '{}' failed, advancing: {e}", tier.name);
                continue;
            }
        };

        let mut results = Vec::new();
        loop {
            let row = match rows.next().await {
                Ok(Some(row)) => row,
                Ok(None) => break,
                Err(e) => {
                    tracing::debug!("tier '{}' failed while reading rows, advancing: {e}", tier.name);
                    continue 'tiers;
                }
            };
            match materialize(&row) {
                Some(item) => results.push(item),
                None => tracing::warn!("tier '{}': dropping malformed row", tier.name),
            }
        }

        if results.is_empty() && tier.advance_on_empty {
            tracing::debug!("tier '{}' empty, trying next variant", tier.name);
            continue;
        }
        return results;
    }

    tracing::debug!("fallback chain exhausted, returning empty result");
    Vec::new()
}
