use std::path::PathBuf;

use directories::{ProjectDirs, UserDirs};

const APP_QUALIFIER: &str = "com";
const APP_ORG: &str = "CarPriceEstimator";
const APP_NAME: &str = "CarPriceEstimator";

/// Where exported reports go: the user's download folder, else the app data directory.
pub fn export_dir() -> Option<PathBuf> {
    UserDirs::new()
        .and_then(|dirs| dirs.download_dir().map(|dir| dir.to_path_buf()))
        .or_else(|| {
            ProjectDirs::from(APP_QUALIFIER, APP_ORG, APP_NAME)
                .map(|dirs| dirs.data_dir().join("reports"))
        })
}
