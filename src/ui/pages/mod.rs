pub mod estimate;
pub mod landing;

pub use estimate::EstimatePage;
pub use landing::LandingPage;
