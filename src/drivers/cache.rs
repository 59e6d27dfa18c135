use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use log::debug;
use once_cell::sync::OnceCell;
use crate::drivers::transform::{RustFftProvider, TransformProvider};
use crate::drivers::SpectralError;
type ProviderFactory =
    dyn Fn(usize) -> Result<Arc<dyn TransformProvider>, SpectralError> + Send + Sync;
/// Keeps one transform provider per size. Entries are created on first use and
/// never evicted.
pub struct TransformCache {
    providers: Mutex<HashMap<usize, Arc<dyn TransformProvider>>>,
    factory: Box<ProviderFactory>,
}
impl TransformCache {
    pub fn new() -> Self {
        Self::with_factory(|size| {
            let provider: Arc<dyn TransformProvider> = Arc::new(RustFftProvider::new(size)?);
            Ok(provider)
        })
    }
    /// Cache that builds providers through `factory` instead of `rustfft`.
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: Fn(usize) -> Result<Arc<dyn TransformProvider>, SpectralError> + Send + Sync + 'static,
    {
        Self {
            providers: Mutex::new(HashMap::new()),
            factory: Box::new(factory),
        }
    }
    /// Process-wide cache used by the free-standing helpers.
    pub fn shared() -> Arc<TransformCache> {
        static SHARED: OnceCell<Arc<TransformCache>> = OnceCell::new();
        Arc::clone(SHARED.get_or_init(|| Arc::new(TransformCache::new())))
    }
    pub fn get(&self, size: usize) -> Result<Arc<dyn TransformProvider>, SpectralError> {
        let mut providers = self.lock();
        if let Some(provider) = providers.get(&size) {
            return Ok(Arc::clone(provider));
        }
        let provider = (self.factory)(size)?;
        debug!("created transform provider for size {size}");
        providers.insert(size, Arc::clone(&provider));
        Ok(provider)
    }
    pub fn contains(&self, size: usize) -> bool {
        self.lock().contains_key(&size)
    }
    pub fn len(&self) -> usize {
        self.lock().len()
    }
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
    // A panic while holding the lock cannot leave the map half-written.
    fn lock(&self) -> MutexGuard<'_, HashMap<usize, Arc<dyn TransformProvider>>> {
        self.providers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
impl Default for TransformCache {
    fn default() -> Self {
        Self::new()
    }
}
