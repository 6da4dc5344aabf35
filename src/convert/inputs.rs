//! Input enumeration: a directory of nmrML files, a zip or tar archive of
//! them, or a single document.

use std::fs::{self, File};
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use super::ConversionError;
use crate::nmrml::{sample_name_of, NmrMLDocument, NmrMLError};

/// nmrML file extension (matched case-insensitively)
pub const NMRML_EXTENSION: &str = "nmrml";

/// One document to extract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentSource {
    /// A file on disk
    File(PathBuf),
    /// An archive entry, read into memory
    Memory {
        /// Entry name inside the archive
        name: String,
        /// Entry contents
        bytes: Vec<u8>,
    },
}

impl DocumentSource {
    /// Display name (path or entry name)
    pub fn name(&self) -> String {
        match self {
            DocumentSource::File(path) => path.display().to_string(),
            DocumentSource::Memory { name, .. } => name.clone(),
        }
    }

    /// Sample name: base name without extension
    pub fn sample_name(&self) -> String {
        match self {
            DocumentSource::File(path) => sample_name_of(path),
            DocumentSource::Memory { name, .. } => sample_name_of(Path::new(name)),
        }
    }

    /// Parse the document
    pub fn open(&self) -> Result<NmrMLDocument, NmrMLError> {
        match self {
            DocumentSource::File(path) => NmrMLDocument::open(path),
            DocumentSource::Memory { bytes, .. } => {
                NmrMLDocument::from_reader(&self.sample_name(), Cursor::new(bytes.as_slice()))
            }
        }
    }
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension))
}

/// Archive layouts recognised from the file name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArchiveKind {
    Zip,
    Tar,
    TarGz,
    TarBz2,
}

impl ArchiveKind {
    fn detect(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".zip") {
            Some(ArchiveKind::Zip)
        } else if name.ends_with(".tar") {
            Some(ArchiveKind::Tar)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(ArchiveKind::TarGz)
        } else if name.ends_with(".tar.bz2") || name.ends_with(".tbz2") {
            Some(ArchiveKind::TarBz2)
        } else {
            None
        }
    }
}

/// Every document under an input location, in a stable order
///
/// - a directory: its `*.nmrML` files, sorted by path
/// - a `.zip`, `.tar`, `.tar.gz` or `.tar.bz2` archive: its `.nmrML`
///   entries, sorted by name
/// - anything else: the file itself
pub fn enumerate<P: AsRef<Path>>(input: P) -> Result<Vec<DocumentSource>, ConversionError> {
    let input = input.as_ref();

    let sources = if input.is_dir() {
        from_directory(input)?
    } else if let Some(kind) = ArchiveKind::detect(input).filter(|_| input.is_file()) {
        from_archive(input, kind)?
    } else if input.is_file() {
        vec![DocumentSource::File(input.to_path_buf())]
    } else {
        Vec::new()
    };

    if sources.is_empty() {
        return Err(ConversionError::NoDocuments(input.to_path_buf()));
    }
    log::info!("Found {} nmrML documents in {}", sources.len(), input.display());
    Ok(sources)
}

fn from_directory(dir: &Path) -> Result<Vec<DocumentSource>, ConversionError> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() && has_extension(&path, NMRML_EXTENSION) {
            paths.push(path);
        }
    }
    paths.sort();
    Ok(paths.into_iter().map(DocumentSource::File).collect())
}

fn from_archive(path: &Path, kind: ArchiveKind) -> Result<Vec<DocumentSource>, ConversionError> {
    let file = File::open(path)?;
    let mut sources = match kind {
        ArchiveKind::Zip => from_zip(file)?,
        ArchiveKind::Tar => from_tar(file)?,
        ArchiveKind::TarGz => from_tar(flate2::read::GzDecoder::new(file))?,
        ArchiveKind::TarBz2 => from_tar(bzip2::read::BzDecoder::new(file))?,
    };
    sources.sort_by(|a, b| a.name().cmp(&b.name()));
    Ok(sources)
}

fn from_tar<R: Read>(reader: R) -> Result<Vec<DocumentSource>, ConversionError> {
    let mut archive = tar::Archive::new(reader);
    let mut sources = Vec::new();

    for entry in archive.entries()? {
        let mut entry = entry?;
        if !entry.header().entry_type().is_file() {
            continue;
        }
        let name = entry.path()?.to_string_lossy().into_owned();
        if !has_extension(Path::new(&name), NMRML_EXTENSION) {
            continue;
        }
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        sources.push(DocumentSource::Memory { name, bytes });
    }

    Ok(sources)
}

fn from_zip(file: File) -> Result<Vec<DocumentSource>, ConversionError> {
    let mut archive = zip::ZipArchive::new(file)?;
    let mut sources = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if !entry.is_file() || !has_extension(Path::new(entry.name()), NMRML_EXTENSION) {
            continue;
        }
        let name = entry.name().to_string();
        // The declared size comes from the archive header and is not trusted
        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        sources.push(DocumentSource::Memory { name, bytes });
    }

    Ok(sources)
}
