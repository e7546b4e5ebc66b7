//! Parameters for program generation.

use mesh_io::MeshFormat;

/// Parameters for [`try_generate`](crate::try_generate).
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateParams {
    /// Uniform scale applied to every vertex before emission. Default: 1.0
    ///
    /// Not validated: zero and negative factors are applied as given.
    pub scale: f64,

    /// Input format. If None, detected from the mesh file extension.
    pub format: Option<MeshFormat>,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            format: None,
        }
    }
}

impl GenerateParams {
    /// Create params with the given scale factor.
    #[must_use]
    pub fn with_scale(scale: f64) -> Self {
        Self {
            scale,
            ..Default::default()
        }
    }

    /// Force the input format instead of detecting it from the extension.
    #[must_use]
    pub const fn format(mut self, format: MeshFormat) -> Self {
        self.format = Some(format);
        self
    }
}
