use std::{io::ErrorKind, marker::PhantomData, path::PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::{debug, warn};

use crate::errors::ServiceError;

/// Generic JSON file-backed list store.
///
/// The whole list is the unit of persistence: `save` rewrites the file
/// wholesale and `load` parses it back as one JSON array. Synchronisation is
/// left to the owner of the store.
#[derive(Clone, Debug)]
pub struct JsonListStore<T> {
    file_path: PathBuf,
    _item: PhantomData<fn() -> T>,
}

impl<T> JsonListStore<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { file_path: path.into(), _item: PhantomData }
    }

    /// Whether the backing file is present. Errors other than "not found"
    /// (permissions, a file where a directory should be) are returned.
    pub async fn exists(&self) -> Result<bool, ServiceError> {
        Ok(fs::try_exists(&self.file_path).await?)
    }

    /// Read and parse the backing file. A missing file is an empty list.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let items: Vec<T> = serde_json::from_slice(&bytes)?;
        Ok(items)
    }

    /// Overwrite the backing file with the tab-indented JSON array of `items`.
    pub async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        let mut data = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"\t");
        let mut ser = serde_json::Serializer::with_formatter(&mut data, formatter);
        items.serialize(&mut ser)?;

        fs::write(&self.file_path, data).await?;
        debug!(path = %self.file_path.display(), count = items.len(), "list saved");
        Ok(())
    }

    /// Delete the backing file. Removing an absent file only logs.
    pub async fn remove(&self) -> Result<(), ServiceError> {
        match fs::remove_file(&self.file_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %self.file_path.display(), "remove called but backing file is absent");
                Ok(())
            }
            Err(e) => Err(e.into()),
        }
    }
}
