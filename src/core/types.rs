//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`ObjectId`] - SHA-256 content digest of a stored object
//! - [`BranchName`] - Validated branch name
//! - [`CommitTime`] - UTC commit timestamp with log rendering
//! - [`DateOffset`] - Fixed display offset such as `-0800`
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, preventing entire classes of bugs.
//!
//! # Examples
//!
//! ```
//! use gitlet::core::types::{BranchName, ObjectId};
//!
//! let branch = BranchName::new("feature").unwrap();
//! let id = ObjectId::for_bytes(b"hello");
//! assert_eq!(id.as_str().len(), 64);
//!
//! assert!(BranchName::new("bad name").is_err());
//! assert!(ObjectId::new("not-a-digest").is_err());
//! ```

use chrono::{DateTime, FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid object id: {0}")]
    InvalidObjectId(String),

    #[error("invalid date offset: {0}")]
    InvalidDateOffset(String),
}

/// Length of a hex-encoded SHA-256 digest.
pub const OBJECT_ID_LEN: usize = 64;

/// Length of an abbreviated commit id accepted on the command line.
pub const SHORT_ID_LEN: usize = 8;

/// A content digest identifying a stored blob or commit.
///
/// Ids are normalized to lowercase hex.
///
/// # Example
///
/// ```
/// use gitlet::core::types::ObjectId;
///
/// let a = ObjectId::for_bytes(b"same bytes");
/// let b = ObjectId::for_bytes(b"same bytes");
/// assert_eq!(a, b);
/// assert_eq!(a.short(8).len(), 8);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ObjectId(String);

impl ObjectId {
    /// Create a validated object id from its hex form.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidObjectId` if the string is not 64 hex characters.
    pub fn new(id: impl Into<String>) -> Result<Self, TypeError> {
        let id = id.into().to_ascii_lowercase();
        Self::validate(&id)?;
        Ok(Self(id))
    }

    /// Compute the digest of a byte sequence.
    pub fn for_bytes(bytes: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        Self(hex::encode(hasher.finalize()))
    }

    /// Get an abbreviated form of the id.
    ///
    /// Returns the first `len` characters, or the full id if `len` is larger.
    pub fn short(&self, len: usize) -> &str {
        let end = len.min(self.0.len());
        &self.0[..end]
    }

    fn validate(id: &str) -> Result<(), TypeError> {
        if id.len() != OBJECT_ID_LEN {
            return Err(TypeError::InvalidObjectId(format!(
                "expected {} hex characters, got {}",
                OBJECT_ID_LEN,
                id.len()
            )));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(TypeError::InvalidObjectId(
                "object id must be hexadecimal".into(),
            ));
        }
        Ok(())
    }

    /// Get the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for ObjectId {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<ObjectId> for String {
    fn from(id: ObjectId) -> Self {
        id.0
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated branch name.
///
/// Branch names:
/// - Cannot be empty
/// - Cannot start with `.` or `-`
/// - Cannot start or end with `/`
/// - Cannot contain `..`, whitespace, or ASCII control characters
///
/// # Example
///
/// ```
/// use gitlet::core::types::BranchName;
///
/// let name = BranchName::new("feature/login").unwrap();
/// assert_eq!(name.as_str(), "feature/login");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new("-x").is_err());
/// assert!(BranchName::new("a..b").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name breaks the rules above.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        if name.is_empty() {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot be empty".into(),
            ));
        }
        if name.starts_with('.') {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot start with '.'".into(),
            ));
        }
        if name.starts_with('-') {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot start with '-'".into(),
            ));
        }
        if name.starts_with('/') || name.ends_with('/') {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot start or end with '/'".into(),
            ));
        }
        if name.contains("..") {
            return Err(TypeError::InvalidBranchName(
                "branch name cannot contain '..'".into(),
            ));
        }
        for c in name.chars() {
            if c.is_whitespace() {
                return Err(TypeError::InvalidBranchName(
                    "branch name cannot contain whitespace".into(),
                ));
            }
            if c.is_ascii_control() {
                return Err(TypeError::InvalidBranchName(
                    "branch name cannot contain control characters".into(),
                ));
            }
        }
        Ok(())
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A fixed offset used when rendering commit dates, written as `+HHMM` or `-HHMM`.
///
/// # Example
///
/// ```
/// use gitlet::core::types::DateOffset;
///
/// let offset = DateOffset::parse("-0800").unwrap();
/// assert_eq!(offset.to_string(), "-0800");
/// assert!(DateOffset::parse("PST").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateOffset {
    /// Seconds east of UTC, always within +/- 23:59.
    seconds: i32,
}

impl DateOffset {
    /// The offset used when nothing is configured.
    pub const DEFAULT: &'static str = "-0800";

    /// Parse a `+HHMM` / `-HHMM` offset.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        let invalid = || TypeError::InvalidDateOffset(format!("'{s}' is not of the form +HHMM"));

        let (sign, digits) = match s.as_bytes().first() {
            Some(b'+') => (1, &s[1..]),
            Some(b'-') => (-1, &s[1..]),
            _ => return Err(invalid()),
        };
        if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        let hours: i32 = digits[..2].parse().map_err(|_| invalid())?;
        let minutes: i32 = digits[2..].parse().map_err(|_| invalid())?;
        if hours > 23 || minutes > 59 {
            return Err(invalid());
        }

        Ok(Self {
            seconds: sign * (hours * 3600 + minutes * 60),
        })
    }

    /// Get the chrono offset.
    pub fn as_fixed(&self) -> FixedOffset {
        FixedOffset::east_opt(self.seconds).unwrap_or_else(|| Utc.fix())
    }
}

impl Default for DateOffset {
    fn default() -> Self {
        Self {
            seconds: -8 * 3600,
        }
    }
}

impl std::fmt::Display for DateOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secs = self.seconds;
        let sign = if secs < 0 { '-' } else { '+' };
        let secs = secs.abs();
        write!(f, "{}{:02}{:02}", sign, secs / 3600, (secs % 3600) / 60)
    }
}

/// The creation time of a commit, stored in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitTime(DateTime<Utc>);

impl CommitTime {
    /// The current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// The Unix epoch, used for the root commit.
    pub fn epoch() -> Self {
        Self(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Create from a chrono datetime.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Render as `Thu Jan 1 00:00:00 1970 +0000` in the given offset.
    pub fn format_in(&self, offset: DateOffset) -> String {
        self.0
            .with_timezone(&offset.as_fixed())
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}
