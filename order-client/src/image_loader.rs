//! Menu item image loading
//!
//! `ImageLoader` fetches a single image with a cancellation token.
//! `ImageTaskRegistry` is for list views: it maps a row key to the token of
//! the load currently targeting that row, so loads can be cancelled when the
//! row is reused or the screen goes away, and stale completions can be
//! dropped silently.

use image::{GenericImageView, ImageFormat};
use parking_lot::Mutex;
use reqwest::StatusCode;
use std::collections::HashMap;
use std::hash::Hash;
use tokio_util::sync::CancellationToken;

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

/// A fetched, decodable image
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub format: ImageFormat,
    pub width: u32,
    pub height: u32,
    /// Raw encoded payload as served
    pub bytes: Vec<u8>,
}

/// Fetches item photos
#[derive(Debug, Clone)]
pub struct ImageLoader {
    http: HttpClient,
}

impl ImageLoader {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Fetch and validate the image at `url`
    ///
    /// Fails with `Cancelled` if `cancel` fires first, and with
    /// `ImageDataMissing` otherwise unless the response is HTTP 200 with a
    /// payload the `image` crate can decode. Transport failures count as
    /// missing data too.
    pub async fn fetch_image(&self, url: &str, cancel: &CancellationToken) -> ClientResult<LoadedImage> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ClientError::Cancelled),
            result = self.fetch(url) => result,
        }
    }

    async fn fetch(&self, url: &str) -> ClientResult<LoadedImage> {
        let missing = |e: &dyn std::fmt::Display| ClientError::ImageDataMissing(format!("{}: {}", url, e));

        let response = self.http.get_absolute(url).await.map_err(|e| missing(&e))?;
        let status = response.status();
        if status != StatusCode::OK {
            return Err(missing(&format!("HTTP {}", status)));
        }

        let bytes = response.bytes().await.map_err(|e| missing(&e))?.to_vec();
        decode(url, bytes)
    }

    /// Like [`fetch_image`](Self::fetch_image), but every failure means
    /// "no image"; a missing thumbnail is never an error for the caller.
    pub async fn load_thumbnail(&self, url: &str, cancel: &CancellationToken) -> Option<LoadedImage> {
        match self.fetch_image(url, cancel).await {
            Ok(image) => Some(image),
            Err(e) => {
                tracing::debug!(%url, error = %e, "Image unavailable");
                None
            }
        }
    }
}

fn decode(url: &str, bytes: Vec<u8>) -> ClientResult<LoadedImage> {
    let format = image::guess_format(&bytes)
        .map_err(|e| ClientError::ImageDataMissing(format!("{}: {}", url, e)))?;
    let decoded = image::load_from_memory_with_format(&bytes, format)
        .map_err(|e| ClientError::ImageDataMissing(format!("{}: {}", url, e)))?;
    let (width, height) = decoded.dimensions();

    Ok(LoadedImage {
        format,
        width,
        height,
        bytes,
    })
}

/// Identifies one load started by [`ImageTaskRegistry::begin`]
#[derive(Debug, Clone)]
pub struct ImageTicket<K> {
    key: K,
    generation: u64,
    token: CancellationToken,
}

impl<K> ImageTicket<K> {
    pub fn key(&self) -> &K {
        &self.key
    }

    /// Token to pass to the loader
    pub fn token(&self) -> &CancellationToken {
        &self.token
    }
}

struct Slot {
    generation: u64,
    token: CancellationToken,
}

struct RegistryState<K> {
    next_generation: u64,
    slots: HashMap<K, Slot>,
}

/// In-flight image loads keyed by visual slot (row, index path, ...)
pub struct ImageTaskRegistry<K> {
    state: Mutex<RegistryState<K>>,
}

impl<K: Eq + Hash + Clone> Default for ImageTaskRegistry<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> ImageTaskRegistry<K> {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(RegistryState {
                next_generation: 0,
                slots: HashMap::new(),
            }),
        }
    }

    /// Start tracking a load for `key`, cancelling whatever targeted it before
    pub fn begin(&self, key: K) -> ImageTicket<K> {
        let mut state = self.state.lock();
        state.next_generation += 1;
        let generation = state.next_generation;
        let token = CancellationToken::new();

        let previous = state.slots.insert(
            key.clone(),
            Slot {
                generation,
                token: token.clone(),
            },
        );
        if let Some(previous) = previous {
            previous.token.cancel();
        }

        ImageTicket {
            key,
            generation,
            token,
        }
    }

    /// Cancel the load for `key` (row scrolled off screen)
    pub fn cancel(&self, key: &K) {
        if let Some(slot) = self.state.lock().slots.remove(key) {
            slot.token.cancel();
        }
    }

    /// Cancel every load (screen dismissed)
    pub fn cancel_all(&self) {
        let slots: Vec<Slot> = self.state.lock().slots.drain().map(|(_, slot)| slot).collect();
        for slot in slots {
            slot.token.cancel();
        }
    }

    /// Whether `ticket` is still the live load for its key
    pub fn is_current(&self, ticket: &ImageTicket<K>) -> bool {
        !ticket.token.is_cancelled()
            && self
                .state
                .lock()
                .slots
                .get(&ticket.key)
                .is_some_and(|slot| slot.generation == ticket.generation)
    }

    /// Mark `ticket` complete; returns whether its result may be applied
    ///
    /// A stale or cancelled ticket returns `false` and leaves the newer load
    /// for the same key untouched.
    pub fn finish(&self, ticket: &ImageTicket<K>) -> bool {
        let mut state = self.state.lock();
        let current = state
            .slots
            .get(&ticket.key)
            .is_some_and(|slot| slot.generation == ticket.generation);
        if current {
            state.slots.remove(&ticket.key);
        }
        current && !ticket.token.is_cancelled()
    }

    /// Number of loads still tracked
    pub fn in_flight(&self) -> usize {
        self.state.lock().slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes() -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(3, 2);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_valid_png() {
        let image = decode("http://x/1.png", png_bytes()).unwrap();
        assert_eq!(image.format, ImageFormat::Png);
        assert_eq!((image.width, image.height), (3, 2));
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let result = decode("http://x/1.png", b"<html>not found</html>".to_vec());
        assert!(matches!(result, Err(ClientError::ImageDataMissing(_))));
    }

    #[test]
    fn test_begin_replaces_previous_load() {
        let registry = ImageTaskRegistry::new();
        let first = registry.begin(4usize);
        let second = registry.begin(4usize);

        assert!(first.token().is_cancelled());
        assert!(!registry.is_current(&first));
        assert!(registry.is_current(&second));

        // The stale completion is a no-op and does not evict the new load
        assert!(!registry.finish(&first));
        assert_eq!(registry.in_flight(), 1);
        assert!(registry.finish(&second));
        assert_eq!(registry.in_flight(), 0);
    }

    #[test]
    fn test_cancel_and_cancel_all() {
        let registry = ImageTaskRegistry::new();
        let a = registry.begin("a");
        let b = registry.begin("b");
        let c = registry.begin("c");

        registry.cancel(&"a");
        assert!(a.token().is_cancelled());
        assert!(!registry.finish(&a));

        registry.cancel_all();
        assert!(b.token().is_cancelled());
        assert!(c.token().is_cancelled());
        assert_eq!(registry.in_flight(), 0);
    }

    #[tokio::test]
    async fn test_cancelled_token_short_circuits_fetch() {
        let http = HttpClient::new(&crate::ClientConfig::new("http://127.0.0.1:9")).unwrap();
        let loader = ImageLoader::new(http);
        let token = CancellationToken::new();
        token.cancel();

        let result = loader.fetch_image("http://127.0.0.1:9/1.png", &token).await;
        assert!(matches!(result, Err(ClientError::Cancelled)));
        assert!(loader.load_thumbnail("http://127.0.0.1:9/1.png", &token).await.is_none());
    }
}
