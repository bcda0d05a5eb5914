pub mod cv;
pub mod profile;

pub use cv::ParsedCv;
pub use profile::Profile;
