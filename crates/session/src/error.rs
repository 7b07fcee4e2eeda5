//! Session error types.

/// Errors produced during a drop cycle.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("only one item may be dropped at a time")]
    MultipleItems,

    #[error("could not find image file '{0}'")]
    NotFound(String),

    #[error("image file must be at least {min} bytes, got {size}")]
    ImageTooSmall { size: u64, min: u64 },

    #[error("a transfer is already in flight")]
    Busy,

    #[error("locator error: {0}")]
    Locator(#[from] pocudrop_locator::LocatorError),

    #[error("upload error: {0}")]
    Upload(#[from] pocudrop_uploader::UploadError),
}

impl SessionError {
    /// `true` for user-input errors that warrant a visible dialog.
    ///
    /// `Busy` is an invariant guard against a caller bug: it is logged
    /// when it fires and must not produce a user dialog.
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, SessionError::Busy)
    }
}
