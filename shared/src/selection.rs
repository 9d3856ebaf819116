use crate::config::SAMPLE_COUNT;
use crate::error::WorkflowError;
use log::{info, warn};
use std::fmt;

/// One of the bundled sample X-rays, numbered from 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SampleIndex(u8);

impl SampleIndex {
    pub fn new(index: u8) -> Option<Self> {
        (1..=SAMPLE_COUNT).contains(&index).then_some(Self(index))
    }

    pub fn all() -> impl Iterator<Item = SampleIndex> {
        (1..=SAMPLE_COUNT).map(SampleIndex)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn asset_name(self) -> String {
        format!("normal{}.png", self.0)
    }
}

impl fmt::Display for SampleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub byte_size: u64,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            byte_size: data.len() as u64,
            mime_type: mime_type.into(),
            data,
        }
    }

    fn identity(&self) -> UploadIdentity {
        UploadIdentity {
            name: self.name.clone(),
            byte_size: self.byte_size,
        }
    }
}

impl fmt::Debug for UploadedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UploadedFile")
            .field("name", &self.name)
            .field("byte_size", &self.byte_size)
            .field("mime_type", &self.mime_type)
            .finish_non_exhaustive()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ImageSource {
    Sample(SampleIndex),
    Upload(UploadedFile),
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageSource::Sample(index) => write!(f, "sample {}", index.asset_name()),
            ImageSource::Upload(file) => write!(f, "upload {}", file.name),
        }
    }
}

/// Non-blocking notices raised by a selection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Advisory {
    DuplicateUpload { name: String },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::DuplicateUpload { name } => {
                write!(f, "The same file ({name}) seems to have been uploaded again.")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct UploadIdentity {
    name: String,
    byte_size: u64,
}

#[derive(Debug, Default)]
pub struct SelectionState {
    active: Option<ImageSource>,
    last_upload: Option<UploadIdentity>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_source(&self) -> Option<&ImageSource> {
        self.active.as_ref()
    }

    pub fn select_sample(&mut self, index: SampleIndex) {
        info!("Sample {} selected", index);
        self.active = Some(ImageSource::Sample(index));
    }

    /// Makes `file` the active source. A file whose name and size match the
    /// previous upload is still accepted; the repeat is reported as an
    /// advisory.
    pub fn select_upload(&mut self, file: UploadedFile) -> Result<Option<Advisory>, WorkflowError> {
        if !file.mime_type.starts_with("image/") {
            warn!("Rejected upload {} with type {:?}", file.name, file.mime_type);
            return Err(WorkflowError::InvalidFileType {
                mime_type: file.mime_type,
            });
        }

        let identity = file.identity();
        let advisory = if self.last_upload.as_ref() == Some(&identity) {
            warn!("Warning: The same file seems to have been uploaded again.");
            Some(Advisory::DuplicateUpload {
                name: file.name.clone(),
            })
        } else {
            None
        };

        info!(
            "Upload accepted: {} ({} bytes, {})",
            file.name, file.byte_size, file.mime_type
        );
        self.last_upload = Some(identity);
        self.active = Some(ImageSource::Upload(file));
        Ok(advisory)
    }
}
