pub type ToolResult<T> = Result<T, ToolError>;

#[derive(thiserror::Error, Debug)]
pub enum ToolError {
    /// Bad arguments or missing inputs. The binaries print these and exit normally.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("transcode error: {0}")]
    Transcode(String),

    #[error("image error: {0}")]
    Image(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ToolError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn transcode(msg: impl Into<String>) -> Self {
        Self::Transcode(msg.into())
    }

    pub fn image(msg: impl Into<String>) -> Self {
        Self::Image(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            ToolError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            ToolError::transcode("x")
                .to_string()
                .contains("transcode error:")
        );
        assert!(ToolError::image("x").to_string().contains("image error:"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = ToolError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
        assert!(!err.is_validation());
    }
}
