use crate::error::InvocationError;
use crate::event::StorageEvent;
use crate::preprocessing::Pipeline;
use crate::storage::ObjectStore;

/// Where the processed image of one event was stored
#[derive(Debug, Clone)]
pub struct Outcome {
    pub bucket: String,
    pub name: String,
    pub bytes_written: usize,
    pub components_kept: usize,
    pub processing_time_ms: u64,
}

/// Handle one event: fetch the photo, process it, store the result under the
/// same name in `output_bucket`. Nothing is written when any step fails.
pub fn process_event(
    store: &dyn ObjectStore,
    pipeline: &Pipeline,
    output_bucket: &str,
    event: &StorageEvent,
) -> Result<Outcome, InvocationError> {
    let source = store.read(event.bucket(), event.name())?;
    tracing::debug!(
        "Read {} bytes from {}/{}",
        source.len(),
        event.bucket(),
        event.name()
    );

    let processed = pipeline.process_bytes(&source)?;
    for step in &processed.result.steps {
        tracing::debug!("  {}: {}ms", step.name, step.time_ms);
    }

    store.write(
        output_bucket,
        event.name(),
        &processed.bytes,
        processed.content_type,
    )?;

    Ok(Outcome {
        bucket: output_bucket.to_string(),
        name: event.name().to_string(),
        bytes_written: processed.bytes.len(),
        components_kept: processed.result.components_kept,
        processing_time_ms: processed.result.total_time_ms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PipelineError, StorageError};
    use crate::event::StorageObjectData;
    use image::{DynamicImage, Rgb, RgbImage};
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        objects: Mutex<HashMap<(String, String), (Vec<u8>, String)>>,
    }

    impl MemoryStore {
        fn insert(&self, bucket: &str, name: &str, bytes: Vec<u8>) {
            self.objects.lock().unwrap().insert(
                (bucket.to_string(), name.to_string()),
                (bytes, "application/octet-stream".to_string()),
            );
        }

        fn get(&self, bucket: &str, name: &str) -> Option<(Vec<u8>, String)> {
            self.objects
                .lock()
                .unwrap()
                .get(&(bucket.to_string(), name.to_string()))
                .cloned()
        }
    }

    impl ObjectStore for MemoryStore {
        fn read(&self, bucket: &str, name: &str) -> Result<Vec<u8>, StorageError> {
            self.get(bucket, name)
                .map(|(bytes, _)| bytes)
                .ok_or_else(|| StorageError::NotFound {
                    bucket: bucket.to_string(),
                    name: name.to_string(),
                })
        }

        fn write(
            &self,
            bucket: &str,
            name: &str,
            bytes: &[u8],
            content_type: &str,
        ) -> Result<(), StorageError> {
            self.objects.lock().unwrap().insert(
                (bucket.to_string(), name.to_string()),
                (bytes.to_vec(), content_type.to_string()),
            );
            Ok(())
        }
    }

    fn event(name: &str) -> StorageEvent {
        StorageEvent {
            id: "1".to_string(),
            event_type: "google.cloud.storage.object.v1.finalized".to_string(),
            source: None,
            subject: None,
            data: StorageObjectData {
                bucket: "photos".to_string(),
                name: name.to_string(),
                metageneration: None,
                time_created: None,
                updated: None,
            },
        }
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([240, 240, 240])));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_writes_jpeg_under_same_name() {
        let store = MemoryStore::default();
        store.insert("photos", "meter/0800.png", png(1000, 800));

        let outcome =
            process_event(&store, &Pipeline::default(), "readings", &event("meter/0800.png")).unwrap();

        let (bytes, content_type) = store.get("readings", "meter/0800.png").unwrap();
        assert_eq!(content_type, "image/jpeg");
        assert_eq!(outcome.bytes_written, bytes.len());
        assert_eq!(outcome.bucket, "readings");
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (350, 70));
    }

    #[test]
    fn test_missing_source_writes_nothing() {
        let store = MemoryStore::default();

        let err = process_event(&store, &Pipeline::default(), "readings", &event("gone.jpg"))
            .unwrap_err();

        assert!(matches!(err, InvocationError::Storage(StorageError::NotFound { .. })));
        assert!(store.get("readings", "gone.jpg").is_none());
    }

    #[test]
    fn test_small_photo_writes_nothing() {
        let store = MemoryStore::default();
        store.insert("photos", "small.png", png(640, 480));

        let err = process_event(&store, &Pipeline::default(), "readings", &event("small.png"))
            .unwrap_err();

        assert!(matches!(
            err,
            InvocationError::Pipeline(PipelineError::CropOutOfBounds { .. })
        ));
        assert!(store.get("readings", "small.png").is_none());
    }

    #[test]
    fn test_corrupt_photo_writes_nothing() {
        let store = MemoryStore::default();
        store.insert("photos", "broken.jpg", b"\xFF\xD8 truncated".to_vec());

        let err = process_event(&store, &Pipeline::default(), "readings", &event("broken.jpg"))
            .unwrap_err();

        assert!(matches!(err, InvocationError::Pipeline(PipelineError::Decode(_))));
        assert!(store.get("readings", "broken.jpg").is_none());
    }
}
