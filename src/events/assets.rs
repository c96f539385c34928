//! Messages exchanged with the background sheet loader.
//!
//! These travel over crossbeam channels, not through the ECS: see
//! [`crate::resources::assetloader`] for the bridge and
//! [`crate::systems::assets`] for both ends of it.

use std::path::PathBuf;

use crate::resources::assetloader::AssetError;
use crate::resources::texturestore::SheetImage;

/// Commands sent from the frame thread to the loader thread.
#[derive(Debug, Clone)]
pub enum AssetRequest {
    /// Read and decode the sheet image at `path`.
    LoadSheet { sheet: String, path: PathBuf },
    /// Stop the loader thread.
    Shutdown,
}

/// Answers sent back from the loader thread.
#[derive(Debug)]
pub enum AssetResult {
    SheetLoaded {
        sheet: String,
        width: u32,
        height: u32,
        /// Encoded image, uploaded to the GPU by the windowed host.
        image: SheetImage,
    },
    SheetFailed { sheet: String, error: AssetError },
}
