use std::path::PathBuf;

use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Failure while encoding or decoding a single record.
#[derive(Debug, Error)]
pub enum RecordError {
    #[error("unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },
    #[error("record has {count} outputs, at most {max} are supported")]
    TooManyOutputs { count: usize, max: usize },
    #[error("record decoder consumed no bytes")]
    NoProgress,
    #[error("json record error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors surfaced by configuration save/load calls.
///
/// Every variant carries the path of the file involved so the message can be
/// shown to the user verbatim.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unable to access {}: {source}", .path.display())]
    #[diagnostic(code("kfg.io"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(
        "{} does not have the correct data prefix. This is likely an unsupported format.",
        .path.display()
    )]
    #[diagnostic(code("kfg.unsupported_format"))]
    UnsupportedFormat { path: PathBuf, found: Option<u32> },
    #[error("{} indicates an unsupported data format.", .path.display())]
    #[diagnostic(
        code("kfg.unsupported_version"),
        help("files from other data format versions are not migrated")
    )]
    UnsupportedVersion { path: PathBuf, found: Option<u32> },
    #[error("{} is not a valid configuration document: {message}", .path.display())]
    #[diagnostic(code("kfg.malformed_document"))]
    MalformedDocument {
        path: PathBuf,
        message: String,
        #[source_code]
        src: String,
        #[label("here")]
        span: SourceSpan,
    },
    #[error("{} import was not successful", .path.display())]
    #[diagnostic(code("kfg.import_failed"))]
    ImportFailed { path: PathBuf },
    #[error("{}: entry {index} could not be decoded: {source}", .path.display())]
    #[diagnostic(code("kfg.entry_decode"))]
    EntryDecode {
        path: PathBuf,
        index: usize,
        /// Byte offset of the record for binary files.
        offset: Option<usize>,
        #[source]
        source: RecordError,
    },
    #[error("{}: entry {index} could not be encoded: {source}", .path.display())]
    #[diagnostic(code("kfg.entry_encode"))]
    EntryEncode {
        path: PathBuf,
        index: usize,
        #[source]
        source: RecordError,
    },
    #[error("{}: document could not be encoded: {source}", .path.display())]
    #[diagnostic(code("kfg.document_encode"))]
    DocumentEncode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} has no recognised configuration extension", .path.display())]
    #[diagnostic(code("kfg.unknown_extension"), help("use a .kfg or .json file"))]
    UnknownExtension { path: PathBuf },
    #[error("settings file {} could not be processed: {message}", .path.display())]
    #[diagnostic(code("kfg.settings"))]
    Settings { path: PathBuf, message: String },
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Path of the file the error refers to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. }
            | Self::UnsupportedFormat { path, .. }
            | Self::UnsupportedVersion { path, .. }
            | Self::MalformedDocument { path, .. }
            | Self::ImportFailed { path }
            | Self::EntryDecode { path, .. }
            | Self::EntryEncode { path, .. }
            | Self::DocumentEncode { path, .. }
            | Self::UnknownExtension { path }
            | Self::Settings { path, .. } => path,
        }
    }
}
