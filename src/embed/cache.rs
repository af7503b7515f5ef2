//! Bounded embedding cache.
//!
//! Wraps any [`EmbeddingProvider`] with an in-memory LRU keyed by a
//! content hash of (model identity, text). Embeddings depend only on
//! sentence text, so a pipeline answering many questions against the same
//! document encodes each sentence once and reuses the vector for every
//! question. The cache is deliberately scoped to embeddings: per-query
//! answer caching is a different concern and stays out of it.
//!
//! Keys are xxHash64 of the text seeded by the model id, so two providers
//! with different models never share entries. The store is a mutexed map
//! with a logical clock per entry; eviction removes the least-recently
//! used entry once the bound is exceeded. The bound is small (hundreds of
//! sentences), so the linear eviction scan is not worth a fancier
//! structure.

use std::collections::HashMap;

use parking_lot::Mutex;
use xxhash_rust::xxh64::xxh64;

use crate::error::RankError;

use super::EmbeddingProvider;

/// Cache hit/miss counters, for verbose diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

struct Entry {
    vector: Vec<f32>,
    last_used: u64,
}

struct Store {
    entries: HashMap<u64, Entry>,
    clock: u64,
    stats: CacheStats,
}

/// An [`EmbeddingProvider`] with a bounded LRU in front of it.
pub struct CachedEmbedder<P> {
    inner: P,
    capacity: usize,
    model_seed: u64,
    store: Mutex<Store>,
}

impl<P: EmbeddingProvider> CachedEmbedder<P> {
    /// Wrap a provider with an LRU bounded at `capacity` entries.
    pub fn new(inner: P, capacity: usize) -> Self {
        let model_seed = xxh64(inner.model_id().as_bytes(), 0);
        Self {
            inner,
            capacity,
            model_seed,
            store: Mutex::new(Store {
                entries: HashMap::new(),
                clock: 0,
                stats: CacheStats::default(),
            }),
        }
    }

    /// Current hit/miss/eviction counters.
    pub fn stats(&self) -> CacheStats {
        self.store.lock().stats
    }

    fn key(&self, text: &str) -> u64 {
        xxh64(text.as_bytes(), self.model_seed)
    }

    fn lookup(&self, key: u64) -> Option<Vec<f32>> {
        let mut store = self.store.lock();
        store.clock += 1;
        let clock = store.clock;
        let found = match store.entries.get_mut(&key) {
            Some(entry) => {
                entry.last_used = clock;
                Some(entry.vector.clone())
            }
            None => None,
        };
        if found.is_some() {
            store.stats.hits += 1;
        } else {
            store.stats.misses += 1;
        }
        found
    }

    fn insert(&self, key: u64, vector: Vec<f32>) {
        if self.capacity == 0 {
            return;
        }
        let mut store = self.store.lock();
        store.clock += 1;
        let clock = store.clock;
        store.entries.insert(key, Entry { vector, last_used: clock });

        while store.entries.len() > self.capacity {
            let oldest = store
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_used)
                .map(|(&k, _)| k);
            match oldest {
                Some(k) => {
                    store.entries.remove(&k);
                    store.stats.evictions += 1;
                }
                None => break,
            }
        }
    }
}

impl<P: EmbeddingProvider> EmbeddingProvider for CachedEmbedder<P> {
    fn model_id(&self) -> &str {
        self.inner.model_id()
    }

    fn dimension(&self) -> usize {
        self.inner.dimension()
    }

    fn encode(&self, text: &str) -> Result<Vec<f32>, RankError> {
        let key = self.key(text);
        if let Some(vector) = self.lookup(key) {
            return Ok(vector);
        }
        let vector = self.inner.encode(text)?;
        self.insert(key, vector.clone());
        Ok(vector)
    }

    /// Batch encode with per-text cache lookups; only misses reach the
    /// inner provider, as one batch.
    fn encode_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RankError> {
        let mut out: Vec<Option<Vec<f32>>> = Vec::with_capacity(texts.len());
        let mut miss_indices = Vec::new();
        let mut miss_texts = Vec::new();

        for (i, text) in texts.iter().enumerate() {
            match self.lookup(self.key(text)) {
                Some(vector) => out.push(Some(vector)),
                None => {
                    out.push(None);
                    miss_indices.push(i);
                    miss_texts.push(text.clone());
                }
            }
        }

        if !miss_texts.is_empty() {
            let fresh = self.inner.encode_batch(&miss_texts)?;
            if fresh.len() != miss_texts.len() {
                return Err(RankError::Embedding(format!(
                    "provider returned {} vectors for {} inputs",
                    fresh.len(),
                    miss_texts.len()
                )));
            }
            for (slot, vector) in miss_indices.into_iter().zip(fresh) {
                self.insert(self.key(&texts[slot]), vector.clone());
                out[slot] = Some(vector);
            }
        }

        // Every slot is filled by now: hits above, misses just inserted.
        Ok(out.into_iter().flatten().collect())
    }
}
