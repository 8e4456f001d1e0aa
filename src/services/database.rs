use csv::{ReaderBuilder, WriterBuilder};
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info};

use crate::error::StoreError;
use crate::models::request::MeetingRequest;

const HEADERS: [&str; 4] = ["name", "email", "topic", "requested_at"];

/// CSV-backed store for booking form submissions
pub struct MeetingRequestStore {
    csv_path: PathBuf,
    file_mutex: Mutex<()>,
}

impl MeetingRequestStore {
    /// Open the store, creating the CSV file with headers if it is missing
    pub fn open(csv_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let csv_path = csv_path.as_ref().to_path_buf();

        if !csv_path.exists() {
            info!("Creating meeting request file at {}", csv_path.display());

            if let Some(dir) = csv_path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }

            let file = File::create(&csv_path)?;
            let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);
            writer.write_record(HEADERS)?;
            writer.flush()?;
        }

        Ok(Self {
            csv_path,
            file_mutex: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.csv_path
    }

    pub fn store(&self, request: &MeetingRequest) -> Result<(), StoreError> {
        let _lock = self.file_mutex.lock().unwrap_or_else(PoisonError::into_inner);

        let file = OpenOptions::new().append(true).open(&self.csv_path)?;
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(file);

        writer.serialize(request)?;
        writer.flush()?;

        info!("Stored meeting request from {} <{}>", request.name, request.email);
        Ok(())
    }

    pub fn list(&self) -> Result<Vec<MeetingRequest>, StoreError> {
        let _lock = self.file_mutex.lock().unwrap_or_else(PoisonError::into_inner);

        let file = File::open(&self.csv_path)?;
        let mut reader = ReaderBuilder::new().has_headers(true).from_reader(file);

        let mut requests = Vec::new();
        for record in reader.deserialize() {
            match record {
                Ok(request) => requests.push(request),
                Err(err) => {
                    error!("Skipping unreadable meeting request row: {}", err);
                }
            }
        }

        Ok(requests)
    }
}

pub fn create_request_store(csv_path: &str) -> Result<Arc<MeetingRequestStore>, StoreError> {
    MeetingRequestStore::open(csv_path).map(Arc::new)
}
