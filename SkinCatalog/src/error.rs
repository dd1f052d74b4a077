//! Error types for `SkinCatalog`

use thiserror::Error;

/// The error type for `SkinCatalog` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== IO Errors ====================
    /// IO error from file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ==================== Text Decoding Errors ====================
    /// UTF-8 conversion error.
    #[error("UTF-8 conversion error: {0}")]
    Utf8Error(#[from] std::string::FromUtf8Error),

    /// UTF-16 conversion error.
    #[error("UTF-16 conversion error: {0}")]
    Utf16Error(#[from] std::string::FromUtf16Error),

    /// A UTF-16 byte stream with an odd number of bytes.
    #[error("UTF-16 data has odd length: {len} bytes")]
    OddUtf16Length {
        /// The length of the data after the BOM.
        len: usize,
    },

    // ==================== KeyValues Parse Errors ====================
    /// A line that does not fit the KeyValues grammar at its position.
    #[error("malformed token on line {line}: {message}")]
    MalformedToken {
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A `}` with no section left to close.
    #[error("unbalanced section closer on line {line}")]
    UnbalancedSection {
        /// 1-based line number.
        line: usize,
    },

    /// Input ended inside an open section or an unterminated string.
    #[error("unexpected end of input after line {line} ({open_sections} section(s) still open)")]
    UnexpectedEof {
        /// Last line read.
        line: usize,
        /// Number of sections that were never closed.
        open_sections: usize,
    },

    // ==================== Navigation Errors ====================
    /// A key path that does not exist in the tree.
    #[error("key not found: {path}")]
    NotFound {
        /// The `/`-joined key path.
        path: String,
    },

    /// A key path that exists but holds the wrong kind of node.
    #[error("type mismatch at {path}: expected {expected}")]
    TypeMismatch {
        /// The `/`-joined key path.
        path: String,
        /// `"section"` or `"scalar"`.
        expected: &'static str,
    },

    /// A scalar that should have been numeric.
    #[error("invalid number at {path}: {value:?}")]
    InvalidNumber {
        /// The `/`-joined key path.
        path: String,
        /// The raw scalar.
        value: String,
    },

    // ==================== Catalog Errors ====================
    /// An id referenced by one table is absent from another.
    #[error("unresolved {kind} reference {id:?} ({context})")]
    UnresolvedReference {
        /// What kind of id this is (e.g. "paintkit", "item", "item set").
        kind: &'static str,
        /// The missing id.
        id: String,
        /// Where the reference came from.
        context: String,
    },

    /// Prefab inheritance loops back on itself.
    #[error("cyclic prefab inheritance: {}", chain.join(" -> "))]
    CyclicPrefab {
        /// The prefab ids on the walk, ending with the re-entered id.
        chain: Vec<String>,
    },

    /// A client loot list contains itself through its sublists.
    #[error("cyclic client loot list: {}", chain.join(" -> "))]
    CyclicLootList {
        /// The list ids on the walk, ending with the re-entered id.
        chain: Vec<String>,
    },

    /// An icon path that contains a known item id but cannot be split around it.
    #[error("cannot split icon path {path:?} around item id {item_id:?}")]
    InvalidIconPath {
        /// The icon path.
        path: String,
        /// The item id that matched.
        item_id: String,
    },

    // ==================== Serialization Errors ====================
    /// JSON parsing or serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for [`Error::UnresolvedReference`].
    pub(crate) fn unresolved(
        kind: &'static str,
        id: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Error::UnresolvedReference {
            kind,
            id: id.into(),
            context: context.into(),
        }
    }
}

/// A specialized Result type for `SkinCatalog` operations.
pub type Result<T> = std::result::Result<T, Error>;
